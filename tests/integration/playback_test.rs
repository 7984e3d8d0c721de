//! Library-level tests: parse a generated script and play it onto a sink

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use shalltell::playback::{
    play, MemorySink, Pacing, PlaybackOutcome, Sequencer, SequencerState, SinkEvent,
};
use shalltell::{parse_transcript, Role, Roster, Session, SessionStatus};

use crate::helpers::load_fixture;

fn slow_pacing() -> Pacing {
    Pacing {
        char_delay: Duration::from_millis(30),
        line_pause: Duration::from_millis(1000),
        host_pause: Duration::from_millis(2000),
    }
}

#[test]
fn fixture_parses_to_known_cast_only() {
    let transcript = parse_transcript(&load_fixture("pun_roast.txt"), &Roster::studio());

    let speakers: Vec<_> = transcript.iter().map(|u| u.speaker.as_str()).collect();
    assert_eq!(
        speakers,
        vec![
            "Host",
            "Kind Mentor",
            "Tsundere Coach",
            "Logic Coach",
            "Sharp-Tongued Master",
            "Host",
        ]
    );
    assert_eq!(transcript.get(0).unwrap().role, Role::Host);
    assert_eq!(transcript.get(0).unwrap().icon, "🤖");
    assert_eq!(
        transcript.get(3).unwrap().text,
        "Pun density is 1:3 words. Score: 7."
    );
    assert_eq!(transcript.get(4).unwrap().text, "");
}

#[test]
fn fixture_plays_in_order_with_role_pauses() {
    let raw = load_fixture("pun_roast.txt");
    let roster = Roster::studio();
    let transcript = parse_transcript(&raw, &roster);
    let total_chars: usize = transcript.iter().map(|u| u.text.chars().count()).sum();

    let mut sequencer = Sequencer::new(slow_pacing());
    let mut sink = MemorySink::new();
    sequencer.start(transcript, &mut sink);

    let mut delays = Vec::new();
    let outcome = play(&mut sequencer, &mut sink, &AtomicBool::new(false), |d| {
        delays.push(d)
    });

    assert_eq!(outcome, PlaybackOutcome::Settled);
    assert_eq!(sequencer.state(), SequencerState::Settled);

    let count = |d: u64| delays.iter().filter(|x| **x == Duration::from_millis(d)).count();
    assert_eq!(count(30), total_chars);
    assert_eq!(count(2000), 2);
    assert_eq!(count(1000), 4);

    let finals: Vec<_> = sink.finals().into_iter().map(|(speaker, _)| speaker).collect();
    assert_eq!(finals.first(), Some(&"Host"));
    assert_eq!(finals.len(), 6);
    assert_eq!(sink.screen().len(), 6);
}

#[test]
fn text_is_revealed_one_character_at_a_time() {
    let mut sequencer = Sequencer::new(slow_pacing());
    let mut sink = MemorySink::new();
    sequencer.start(
        parse_transcript("Gyaru Teacher: Héy!", &Roster::studio()),
        &mut sink,
    );
    play(&mut sequencer, &mut sink, &AtomicBool::new(false), |_| {});

    let partials: Vec<_> = sink
        .events()
        .iter()
        .filter_map(|e| match e {
            SinkEvent::Partial(_, text) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(partials, vec!["H", "Hé", "Héy", "Héy!"]);
}

#[test]
fn cancel_during_playback_resets_everything() {
    let mut sequencer = Sequencer::new(slow_pacing());
    let mut sink = MemorySink::new();
    sequencer.start(
        parse_transcript(&load_fixture("pun_roast.txt"), &Roster::studio()),
        &mut sink,
    );

    let cancel = AtomicBool::new(false);
    let sleeps = Cell::new(0);
    let outcome = play(&mut sequencer, &mut sink, &cancel, |_| {
        sleeps.set(sleeps.get() + 1);
        if sleeps.get() == 10 {
            cancel.store(true, Ordering::SeqCst);
        }
    });

    assert_eq!(outcome, PlaybackOutcome::Interrupted);
    assert_eq!(sequencer.state(), SequencerState::Idle);
    assert!(sequencer.transcript().is_empty());
    assert!(sink.screen().is_empty());
    assert_eq!(sleeps.get(), 10);
}

#[test]
fn new_transcript_replaces_one_in_progress() {
    let roster = Roster::studio();
    let mut sequencer = Sequencer::new(Pacing::instant());
    let mut sink = MemorySink::new();

    sequencer.start(parse_transcript("Host: first show\nBig Sister: old", &roster), &mut sink);
    for _ in 0..5 {
        sequencer.step(&mut sink);
    }
    assert_eq!(sequencer.state(), SequencerState::Revealing(0));

    sequencer.start(parse_transcript("Logic Coach: second show", &roster), &mut sink);
    play(&mut sequencer, &mut sink, &AtomicBool::new(false), |_| {});

    assert_eq!(sink.screen(), vec!["Logic Coach: second show"]);
    assert!(!sink.finals().iter().any(|(speaker, _)| *speaker == "Big Sister"));
}

#[test]
fn script_without_dialogue_leaves_session_idle() {
    let mut session = Session::new(Roster::studio(), Pacing::instant());
    let mut sink = MemorySink::new();

    let count = session.load_raw("I'm sorry, I can't write that script.\n\n---", &mut sink);
    assert_eq!(count, 0);
    assert_eq!(session.status(), &SessionStatus::Empty);

    let outcome = session.play(&mut sink, &AtomicBool::new(false), |_| {});
    assert_eq!(outcome, PlaybackOutcome::Idle);
    assert!(session.empty_state_message().is_some());
    assert!(sink.finals().is_empty());
}

#[test]
fn redraw_mid_line_shows_prefix_without_advancing() {
    let mut sequencer = Sequencer::new(Pacing::instant());
    let mut sink = MemorySink::new();
    sequencer.start(
        parse_transcript("Host: hi\nKind Mentor: lovely", &Roster::studio()),
        &mut sink,
    );
    // Host line: two characters, final, pause, then three characters of the next
    for _ in 0..7 {
        sequencer.step(&mut sink);
    }
    assert_eq!(sequencer.state(), SequencerState::Revealing(1));

    let mut view = MemorySink::new();
    sequencer.redraw(&mut view);
    sequencer.redraw(&mut view);
    assert_eq!(view.screen(), vec!["Host: hi", "Kind Mentor: lov"]);
    assert_eq!(sequencer.state(), SequencerState::Revealing(1));
}
