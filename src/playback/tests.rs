use std::time::Duration;

use super::testing::{Call, FakeSink};
use super::*;
use crate::library::{SourceRef, Track, TrackId, sample_tracks};

fn track(id: u64, secs: u64) -> Track {
    Track {
        id: TrackId(id),
        length: Some(Duration::from_secs(secs)),
        source: SourceRef::Url(format!("sample://{id}")),
        ..sample_tracks().remove(0)
    }
}

fn controller() -> PlaybackController<FakeSink> {
    PlaybackController::new(FakeSink::default(), 80, false)
}

#[test]
fn starts_idle_and_applies_initial_volume() {
    let c = controller();
    assert_eq!(c.status(), PlayerStatus::Idle);
    assert_eq!(c.state().volume, 80);
    assert_eq!(c.sink().calls, vec![Call::Volume(0.8), Call::Muted(false)]);
}

#[test]
fn select_track_loads_then_plays() {
    let mut c = controller();
    let t = track(1, 125);

    c.select_track(&t).unwrap();

    assert_eq!(c.status(), PlayerStatus::Playing);
    assert_eq!(c.sink().source, Some(t.source.clone()));
    assert_eq!(
        c.sink().transport_calls(),
        vec![Call::SetSource(t.source.clone(), LoadId(1)), Call::Load, Call::Play]
    );
    assert_eq!(c.state().duration, Duration::from_secs(125));
    assert_eq!(c.state().current.as_ref().map(|t| t.id), Some(TrackId(1)));
}

#[test]
fn select_track_from_paused_switches_and_plays() {
    let mut c = controller();
    c.select_track(&track(1, 60)).unwrap();
    c.toggle_play().unwrap();
    assert_eq!(c.status(), PlayerStatus::Paused);

    c.select_track(&track(2, 90)).unwrap();
    assert_eq!(c.status(), PlayerStatus::Playing);
    assert_eq!(c.state().current.as_ref().map(|t| t.id), Some(TrackId(2)));
    assert_eq!(c.state().position, Duration::ZERO);
}

#[test]
fn toggle_play_while_idle_is_a_noop() {
    let mut c = controller();
    let before = c.sink().calls.len();

    c.toggle_play().unwrap();

    assert_eq!(c.status(), PlayerStatus::Idle);
    assert_eq!(c.sink().calls.len(), before);
}

#[test]
fn toggle_play_pauses_and_resumes() {
    let mut c = controller();
    c.select_track(&track(1, 60)).unwrap();

    c.toggle_play().unwrap();
    assert_eq!(c.status(), PlayerStatus::Paused);
    assert_eq!(c.sink().calls.last(), Some(&Call::Pause));

    c.toggle_play().unwrap();
    assert_eq!(c.status(), PlayerStatus::Playing);
    assert_eq!(c.sink().calls.last(), Some(&Call::Play));
}

#[test]
fn rejected_play_rolls_back_to_paused() {
    let mut c = PlaybackController::new(FakeSink::rejecting(), 80, false);

    assert!(c.select_track(&track(1, 60)).is_err());
    assert_eq!(c.status(), PlayerStatus::Paused);

    assert!(c.toggle_play().is_err());
    assert_eq!(c.status(), PlayerStatus::Paused);
}

#[test]
fn seek_clamps_to_duration_and_updates_immediately() {
    let mut c = controller();
    c.select_track(&track(1, 100)).unwrap();

    assert_eq!(c.seek(Duration::from_secs(30)), Duration::from_secs(30));
    assert_eq!(c.state().position, Duration::from_secs(30));

    assert_eq!(c.seek(Duration::from_secs(500)), Duration::from_secs(100));
    assert_eq!(c.sink().calls.last(), Some(&Call::Seek(Duration::from_secs(100))));

    assert_eq!(c.seek_by(-1_000), Duration::ZERO);
    assert_eq!(c.seek_by(5), Duration::from_secs(5));
}

#[test]
fn seek_with_unknown_duration_stays_in_scrub_range() {
    let mut c = controller();
    let mut t = track(1, 0);
    t.length = None;
    c.select_track(&t).unwrap();
    assert_eq!(c.state().duration, Duration::ZERO);

    assert_eq!(c.seek(Duration::from_secs(1_000_000)), Duration::from_secs(100));
    assert_eq!(c.state().position, Duration::from_secs(100));
    assert_eq!(c.sink().calls.last(), Some(&Call::Seek(Duration::from_secs(100))));
    assert_eq!(c.seek(Duration::from_secs(42)), Duration::from_secs(42));

    // Once the sink reports a length, that bound wins.
    c.handle_event(SinkEvent::MetadataLoaded {
        load: LoadId(1),
        duration: Duration::from_secs(300),
    });
    assert_eq!(c.seek(Duration::from_secs(250)), Duration::from_secs(250));
}

#[test]
fn seek_after_end_keeps_new_position() {
    let mut c = controller();
    c.select_track(&track(1, 60)).unwrap();
    c.handle_event(SinkEvent::Ended { load: LoadId(1) });

    assert_eq!(c.seek_by(5), Duration::from_secs(5));
    assert_eq!(c.state().position, Duration::from_secs(5));
    assert_eq!(c.status(), PlayerStatus::Paused);

    c.toggle_play().unwrap();
    assert_eq!(c.status(), PlayerStatus::Playing);
    assert_eq!(
        &c.sink().transport_calls()[3..],
        &[Call::Seek(Duration::from_secs(5)), Call::Play]
    );
}

#[test]
fn seek_while_idle_does_nothing() {
    let mut c = controller();
    let before = c.sink().calls.len();
    c.seek(Duration::from_secs(10));
    assert_eq!(c.sink().calls.len(), before);
    assert_eq!(c.state().position, Duration::ZERO);
}

#[test]
fn volume_applies_in_any_state_and_zero_mutes() {
    let mut c = controller();

    c.set_volume(150);
    assert_eq!(c.state().volume, 100);
    assert!(!c.state().muted);

    c.set_volume(0);
    assert!(c.state().muted);
    assert_eq!(
        &c.sink().calls[c.sink().calls.len() - 2..],
        &[Call::Volume(0.0), Call::Muted(true)]
    );

    c.set_volume(30);
    assert!(!c.state().muted);

    c.toggle_mute();
    assert!(c.state().muted);
    assert_eq!(c.state().volume, 30);
    assert_eq!(c.sink().calls.last(), Some(&Call::Muted(true)));
    assert_eq!(c.status(), PlayerStatus::Idle);
}

#[test]
fn sink_events_update_position_and_duration() {
    let mut c = controller();
    c.select_track(&track(1, 0)).unwrap();
    let tx = c.sink().events();

    tx.send(SinkEvent::MetadataLoaded {
        load: LoadId(1),
        duration: Duration::from_secs(200),
    })
    .unwrap();
    tx.send(SinkEvent::TimeUpdate {
        load: LoadId(1),
        position: Duration::from_secs(12),
    })
    .unwrap();

    assert_eq!(c.pump(), 2);
    assert_eq!(c.state().duration, Duration::from_secs(200));
    assert_eq!(c.state().position, Duration::from_secs(12));
}

#[test]
fn ended_stops_without_advancing() {
    let mut c = controller();
    let t = track(1, 60);
    c.select_track(&t).unwrap();
    c.handle_event(SinkEvent::TimeUpdate {
        load: LoadId(1),
        position: Duration::from_secs(59),
    });

    c.handle_event(SinkEvent::Ended { load: LoadId(1) });

    assert!(!c.state().playing);
    assert_eq!(c.state().position, Duration::ZERO);
    assert_eq!(c.state().current.as_ref(), Some(&t));
}

#[test]
fn stale_events_from_previous_track_are_ignored() {
    let mut c = controller();
    c.select_track(&track(1, 60)).unwrap();
    c.select_track(&track(2, 90)).unwrap();

    c.handle_event(SinkEvent::MetadataLoaded {
        load: LoadId(1),
        duration: Duration::from_secs(999),
    });
    c.handle_event(SinkEvent::Ended { load: LoadId(1) });

    assert_eq!(c.state().duration, Duration::from_secs(90));
    assert_eq!(c.status(), PlayerStatus::Playing);
}

#[test]
fn progress_is_clamped_fraction() {
    let mut state = PlaybackState::default();
    assert_eq!(state.progress(), 0.0);
    state.duration = Duration::from_secs(100);
    state.position = Duration::from_secs(25);
    assert!((state.progress() - 0.25).abs() < f64::EPSILON);
}
