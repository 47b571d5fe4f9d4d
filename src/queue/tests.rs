use std::path::PathBuf;
use std::time::Duration;

use super::controller::progress_fraction;
use super::subscription::StreamKind;
use super::testing::{FakeEngine, Screen, queue, queue_with, queue_with_totals};
use super::*;
use crate::audio::{EngineError, EngineEvent, EngineState, PlaybackEngine};
use crate::error::PlayerError;
use crate::library::{MetaValue, Metadata, MetadataRow};

fn titled(title: &str) -> Metadata {
    let mut md = Metadata::new();
    md.insert("TrackTitle".into(), MetaValue::Text(title.into()));
    md
}

fn subscribed_handles(q: &QueueController<FakeEngine, Screen>) -> Vec<usize> {
    q.handles()
        .iter()
        .enumerate()
        .filter(|(_, h)| h.live_subscriptions() > 0)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn building_an_empty_queue_fails() {
    let handles: Vec<PlayerHandle<FakeEngine>> = Vec::new();
    let err = QueueController::new(handles, Screen::default())
        .err()
        .expect("empty queue must be rejected");
    assert!(matches!(err, PlayerError::EmptyQueue));
}

#[test]
fn start_activates_the_first_track_and_plays_it() {
    let mut q = queue(&["A", "B"]);
    q.start(0.5, true);

    assert_eq!(q.active_index(), 0);
    assert_eq!(q.active().engine().state(), EngineState::Playing);
    assert_eq!(q.active().engine().position(), Duration::ZERO);
    assert_eq!(q.active().engine().volume(), 0.5);
    assert_eq!(q.display().label, "A");
    assert_eq!(q.display().intent, Some(Intent::Playing));
    assert_eq!(q.handles()[1].engine().state(), EngineState::Idle);
}

#[test]
fn start_without_autoplay_waits_paused() {
    let mut q = queue(&["A"]);
    q.start(1.0, false);

    assert_eq!(q.intent(), Intent::Paused);
    assert_eq!(q.active().engine().state(), EngineState::Paused);
    assert_eq!(q.display().intent, Some(Intent::Paused));
}

#[test]
fn advancing_len_times_returns_to_the_start() {
    for n in 1..=5usize {
        let names: Vec<String> = (0..n).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();

        for start in 0..n {
            let mut q = queue(&refs);
            q.start(1.0, true);
            q.activate(start);
            for _ in 0..n {
                q.advance();
            }
            assert_eq!(q.active_index(), start, "n={n} start={start}");
        }
    }
}

#[test]
fn activate_moves_every_subscription_to_the_new_handle() {
    let mut q = queue(&["A", "B", "C"]);

    q.activate(1);
    assert_eq!(subscribed_handles(&q), vec![1]);
    assert!(q.handles()[1].is_subscribed(StreamKind::Position));
    assert!(q.handles()[1].is_subscribed(StreamKind::Metadata));

    q.activate(2);
    assert_eq!(q.handles()[1].live_subscriptions(), 0);
    assert_eq!(q.handles()[2].live_subscriptions(), 2);
    assert_eq!(subscribed_handles(&q), vec![2]);

    // Re-activating the same handle must not stack listeners.
    q.activate(2);
    assert_eq!(q.handles()[2].live_subscriptions(), 2);
}

#[test]
fn activate_wraps_out_of_range_indices() {
    let mut q = queue(&["A", "B", "C"]);
    q.activate(4);
    assert_eq!(q.active_index(), 1);
    assert_eq!(q.display().label, "B");
}

#[test]
fn activate_rewinds_the_incoming_track_and_pauses_the_outgoing_one() {
    let mut q = queue(&["A", "B"]);
    q.start(1.0, true);

    q.activate(1);
    assert_eq!(q.handles()[0].engine().state(), EngineState::Paused);
    assert_eq!(q.handles()[1].engine().position(), Duration::ZERO);
    assert_eq!(q.display().progress, 0.0);
}

#[test]
fn toggling_twice_restores_intent_and_label() {
    let mut q = queue(&["A", "B"]);
    q.start(1.0, true);

    let first = q.toggle_play_pause();
    assert_eq!(first, Intent::Paused);
    assert_eq!(q.active().engine().state(), EngineState::Paused);
    assert_eq!(q.display().intent.map(Intent::button_label), Some("Play"));

    let second = q.toggle_play_pause();
    assert_eq!(second, Intent::Playing);
    assert_eq!(q.active().engine().state(), EngineState::Playing);
    assert_eq!(q.display().intent.map(Intent::button_label), Some("Pause"));
}

#[test]
fn set_volume_clamps_and_touches_only_the_active_track() {
    let mut q = queue(&["A", "B"]);
    q.start(0.5, true);

    assert_eq!(q.set_volume(-5.0), 0.0);
    assert_eq!(q.active().engine().volume(), 0.0);

    assert_eq!(q.set_volume(150.0), 1.0);
    assert_eq!(q.active().engine().volume(), 1.0);

    assert_eq!(q.set_volume(f32::NAN), 0.0);

    q.set_volume(0.3);
    assert_eq!(q.handles()[1].engine().volume(), 1.0);

    // The chosen volume follows the queue to the next track.
    q.advance();
    assert_eq!(q.active().engine().volume(), 0.3);
}

#[test]
fn progress_never_divides_by_zero() {
    assert_eq!(progress_fraction(Duration::from_secs(5), None), 0.0);
    assert_eq!(progress_fraction(Duration::from_secs(5), Some(Duration::ZERO)), 0.0);
    assert_eq!(
        progress_fraction(Duration::from_secs(50), Some(Duration::from_secs(200))),
        0.25
    );
    assert_eq!(
        progress_fraction(Duration::from_secs(300), Some(Duration::from_secs(200))),
        1.0
    );
}

#[test]
fn position_updates_with_unknown_length_show_zero_progress() {
    let (mut q, _) = queue_with_totals(&["A"], None);
    q.start(1.0, true);

    q.handle_event(0, EngineEvent::PositionChanged(Duration::from_secs(30)));
    assert_eq!(q.display().progress, 0.0);
    assert!(!q.display().progress.is_nan());
}

#[test]
fn position_updates_drive_the_progress_bar() {
    let mut q = queue(&["A"]);
    q.start(1.0, true);

    q.handle_event(0, EngineEvent::PositionChanged(Duration::from_secs(100)));
    assert_eq!(q.display().progress, 0.5);
}

#[test]
fn stale_events_from_a_detached_handle_are_dropped() {
    let mut q = queue(&["A", "B"]);
    q.start(1.0, true);
    q.handle_event(1, EngineEvent::MetadataChanged(titled("Bee")));
    q.advance();
    q.handle_event(1, EngineEvent::PositionChanged(Duration::from_secs(20)));
    let progress = q.display().progress;
    let rows = q.display().rows.clone();

    q.handle_event(0, EngineEvent::PositionChanged(Duration::from_secs(150)));
    q.handle_event(0, EngineEvent::MetadataChanged(titled("Ghost")));

    assert_eq!(q.display().progress, progress);
    assert_eq!(q.display().rows, rows);
    // The outgoing handle still learns its own metadata.
    assert_eq!(
        q.handles()[0].metadata().get("TrackTitle"),
        Some(&MetaValue::Text("Ghost".into()))
    );
}

#[test]
fn metadata_learned_while_idle_shows_up_on_activation() {
    let mut q = queue(&["A", "B"]);
    q.start(1.0, true);

    q.handle_event(1, EngineEvent::MetadataChanged(titled("Later")));
    assert!(q.display().rows.is_empty());

    q.activate(1);
    assert_eq!(
        q.display().rows,
        vec![MetadataRow {
            name: "TrackTitle".into(),
            value: MetaValue::Text("Later".into()),
        }]
    );
}

#[test]
fn engine_errors_do_not_move_the_queue() {
    let mut q = queue(&["A", "B"]);
    q.start(1.0, true);

    q.handle_event(
        0,
        EngineEvent::Error(EngineError::Open {
            path: PathBuf::from("/music/A.mp3"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }),
    );

    assert_eq!(q.active_index(), 0);
    assert_eq!(q.intent(), Intent::Playing);
    assert_eq!(subscribed_handles(&q), vec![0]);
}

#[test]
fn end_of_an_inactive_track_is_ignored() {
    let mut q = queue(&["A", "B", "C"]);
    q.start(1.0, true);

    q.handle_event(2, EngineEvent::Ended);
    assert_eq!(q.active_index(), 0);
}

#[test]
fn single_track_queue_restarts_itself() {
    let mut q = queue(&["Only"]);
    q.start(1.0, true);
    let updates = q.display().label_updates;

    q.handle_event(0, EngineEvent::Ended);
    assert_eq!(q.active_index(), 0);
    assert_eq!(q.active().engine().state(), EngineState::Playing);
    assert_eq!(q.active().engine().position(), Duration::ZERO);
    assert_eq!(q.display().label_updates, updates + 1);
    assert_eq!(subscribed_handles(&q), vec![0]);
}

#[test]
fn play_after_stop_reattaches_the_display() {
    let mut q = queue(&["A", "B"]);
    q.start(1.0, true);

    q.stop();
    assert!(subscribed_handles(&q).is_empty());

    q.handle_event(0, EngineEvent::PositionChanged(Duration::from_secs(100)));
    assert_eq!(q.display().progress, 0.0);

    assert_eq!(q.toggle_play_pause(), Intent::Playing);
    assert_eq!(q.active_index(), 0);
    assert_eq!(q.active().engine().state(), EngineState::Playing);
    assert_eq!(subscribed_handles(&q), vec![0]);

    q.handle_event(0, EngineEvent::PositionChanged(Duration::from_secs(100)));
    assert_eq!(q.display().progress, 0.5);
}

#[test]
fn tick_dispatches_what_the_engines_report() {
    let (mut q, outboxes) = queue_with_totals(&["A", "B"], Some(Duration::from_secs(10)));
    q.start(1.0, true);

    outboxes[0]
        .borrow_mut()
        .push(EngineEvent::PositionChanged(Duration::from_secs(5)));
    q.tick();
    assert_eq!(q.display().progress, 0.5);

    outboxes[0].borrow_mut().push(EngineEvent::Ended);
    q.tick();
    assert_eq!(q.active_index(), 1);
    assert_eq!(q.display().label, "B");

    // Nothing queued: nothing changes.
    q.tick();
    assert_eq!(q.active_index(), 1);
}

#[test]
fn three_track_walkthrough() {
    let mut q = queue(&["A", "B", "C"]);
    q.start(1.0, true);
    q.handle_event(1, EngineEvent::MetadataChanged(titled("Bee")));
    assert_eq!(q.display().label, "A");

    // A finishes on its own.
    q.handle_event(0, EngineEvent::Ended);
    assert_eq!(q.active_index(), 1);
    assert_eq!(q.display().label, "B");
    assert_eq!(q.display().rows[0].value, MetaValue::Text("Bee".into()));
    assert_eq!(q.active().engine().state(), EngineState::Playing);

    // Pause, then skip: C comes up paused.
    assert_eq!(q.toggle_play_pause(), Intent::Paused);
    q.advance();
    assert_eq!(q.active_index(), 2);
    assert_eq!(q.display().label, "C");
    assert_eq!(q.active().engine().state(), EngineState::Paused);
    assert_eq!(q.handles()[1].engine().state(), EngineState::Stopped);

    // Stop on C keeps the position in the queue.
    q.stop();
    assert_eq!(q.active_index(), 2);
    assert_eq!(q.intent(), Intent::Paused);
    assert_eq!(q.display().intent, Some(Intent::Paused));
    assert_eq!(q.active().engine().state(), EngineState::Stopped);
    assert_eq!(q.active().engine().position(), Duration::ZERO);
}

#[test]
fn tags_read_while_rewinding_show_up_in_the_first_snapshot() {
    let (mut q, outboxes) = queue_with_totals(&["A", "B"], Some(Duration::from_secs(200)));
    q.start(1.0, true);

    // What B's engine learns when `activate` seeks it.
    outboxes[1]
        .borrow_mut()
        .push(EngineEvent::MetadataChanged(titled("Bee")));
    outboxes[1].borrow_mut().push(EngineEvent::Ended);

    q.activate(1);
    assert_eq!(q.display().rows[0].value, MetaValue::Text("Bee".into()));
    assert_eq!(q.active_index(), 1);
    assert!(outboxes[1].borrow().is_empty());
}

#[test]
fn pause_settles_intent_even_when_the_track_never_started() {
    let (mut q, _) = queue_with(&["A", "B"], Some(Duration::from_secs(200)), true);
    q.start(1.0, true);
    assert_eq!(q.intent(), Intent::Playing);
    assert_eq!(q.active().engine().state(), EngineState::Idle);
    let plays = q.active().engine().plays;

    q.pause();
    assert_eq!(q.intent(), Intent::Paused);
    assert_eq!(q.display().intent, Some(Intent::Paused));
    assert_eq!(q.active().engine().plays, plays);
    assert_ne!(q.active().engine().state(), EngineState::Playing);
}

#[test]
fn pause_after_stop_keeps_the_track_stopped() {
    let mut q = queue(&["A"]);
    q.start(1.0, true);
    q.stop();

    q.pause();
    assert_eq!(q.active().engine().state(), EngineState::Stopped);
    assert_eq!(q.intent(), Intent::Paused);
}
