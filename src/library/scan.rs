use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::ImportError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// One candidate file offered to the importer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub mime: String,
    pub path: PathBuf,
}

impl FileHandle {
    /// Build a handle for `path`, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME)
            .to_string();

        Self {
            name,
            mime,
            path: path.to_path_buf(),
        }
    }

    pub fn is_audio(&self) -> bool {
        self.mime.starts_with("audio/")
    }
}

/// Lazy, consume-once stream of candidates.
pub type Candidates<'a> = Box<dyn Iterator<Item = Result<FileHandle, ImportError>> + 'a>;

/// Something the importer can pull candidate files from.
pub trait FileSource {
    /// Human-readable name of what is being imported (folder name).
    fn label(&self) -> String;

    fn candidates(&self) -> Result<Candidates<'_>, ImportError>;
}

/// Depth-first walk of a folder.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    settings: LibrarySettings,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, settings: &LibrarySettings) -> Self {
        Self {
            root: root.into(),
            settings: settings.clone(),
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn access_denied(path: &Path, source: io::Error) -> ImportError {
    ImportError::AccessDenied {
        path: path.to_path_buf(),
        source,
    }
}

impl FileSource for DirectorySource {
    fn label(&self) -> String {
        self.root
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    fn candidates(&self) -> Result<Candidates<'_>, ImportError> {
        let meta = fs::metadata(&self.root).map_err(|e| access_denied(&self.root, e))?;
        if !meta.is_dir() {
            return Err(ImportError::NotADirectory(self.root.clone()));
        }
        // Surface an unreadable root up front rather than as the first item.
        fs::read_dir(&self.root).map_err(|e| access_denied(&self.root, e))?;

        let settings = &self.settings;
        let mut walker = WalkDir::new(&self.root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        let include_hidden = settings.include_hidden;
        let root = self.root.as_path();
        let iter = walker
            .into_iter()
            .filter_entry(move |e| include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(move |entry| match entry {
                Ok(e) if e.file_type().is_file() => Some(Ok(FileHandle::from_path(e.path()))),
                Ok(_) => None,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                    Some(Err(ImportError::AccessDenied { path, source }))
                }
            });

        Ok(Box::new(iter))
    }
}

/// Flat list of files picked individually, used when no folder is given.
#[derive(Debug, Clone)]
pub struct FileListSource {
    paths: Vec<PathBuf>,
}

impl FileListSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl FileSource for FileListSource {
    fn label(&self) -> String {
        self.paths
            .first()
            .and_then(|p| p.parent())
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn candidates(&self) -> Result<Candidates<'_>, ImportError> {
        let iter = self.paths.iter().map(|p| -> Result<FileHandle, ImportError> {
            let meta = fs::metadata(p).map_err(|e| access_denied(p, e))?;
            if meta.is_file() {
                Ok(FileHandle::from_path(p))
            } else {
                Err(access_denied(
                    p,
                    io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
                ))
            }
        });
        Ok(Box::new(iter))
    }
}

/// Several sources imported as one batch, in the order given.
pub struct CombinedSource {
    sources: Vec<Box<dyn FileSource>>,
}

impl CombinedSource {
    pub fn new(sources: Vec<Box<dyn FileSource>>) -> Self {
        Self { sources }
    }
}

impl FileSource for CombinedSource {
    fn label(&self) -> String {
        self.sources
            .iter()
            .map(|s| s.label())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn candidates(&self) -> Result<Candidates<'_>, ImportError> {
        let parts = self
            .sources
            .iter()
            .map(|s| s.candidates())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Box::new(parts.into_iter().flatten()))
    }
}
