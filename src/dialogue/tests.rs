//! Tests for the dialogue queue

use super::*;

fn script(lines: &[(&str, &str)]) -> Script {
    lines
        .iter()
        .map(|(text, speaker)| DialogueLine::new(*text, *speaker))
        .collect()
}

#[test]
fn reveals_short_line_within_one_second() {
    let mut queue = DialogueQueue::new(50.0);
    queue.start(script(&[("Hi", "A"), ("Bye", "B")]));

    queue.tick(1.0);

    assert_eq!(queue.revealed_text(), "Hi");
    assert!(queue.display().typing_complete);

    assert_eq!(queue.advance(), Advance::NextLine);
    let line = queue.current_line().unwrap();
    assert_eq!(line.text, "Bye");
    assert_eq!(line.speaker, "B");
    assert_eq!(queue.display().revealed_len, 0);
    assert!(!queue.display().typing_complete);
}

#[test]
fn reveal_follows_elapsed_time() {
    let mut queue = DialogueQueue::new(10.0);
    queue.start(script(&[("abcdefghijklmnopqrst", "A")]));

    queue.tick(0.25);
    assert_eq!(queue.display().revealed_len, 2);
    queue.tick(0.5);
    assert_eq!(queue.display().revealed_len, 7);
    assert_eq!(queue.revealed_text(), "abcdefg");
    assert_eq!(queue.phase(), DialoguePhase::Revealing);
}

#[test]
fn two_advances_per_line_reach_empty() {
    for n in 0..6 {
        let lines: Vec<DialogueLine> = (0..n)
            .map(|i| DialogueLine::new(format!("line {i}"), "A"))
            .collect();
        let mut queue = DialogueQueue::new(50.0);
        queue.start(Script::new(lines));

        for _ in 0..(2 * n) {
            queue.advance();
        }

        assert_eq!(queue.phase(), DialoguePhase::Empty, "n = {n}");
        assert!(!queue.is_visible());
        assert!(queue.current_line().is_none());
    }
}

#[test]
fn zero_tick_never_changes_reveal() {
    let mut queue = DialogueQueue::new(50.0);
    queue.start(script(&[("Dito ba talaga ang daan?", "???")]));

    queue.tick(0.1);
    let before = queue.display();
    queue.set_speed(Speed::Fastest);
    queue.tick(0.0);
    queue.tick(0.0);
    assert_eq!(queue.display(), before);
}

#[test]
fn reveal_is_monotonic_and_resets_on_line_change() {
    let mut queue = DialogueQueue::new(40.0);
    queue.start(script(&[
        ("Kaliwa ba o Kanan yung pupuntahan?", "???"),
        ("Opo!", "Flashback(???)"),
    ]));

    let mut last = 0;
    for (i, dt) in [0.01, 0.2, 0.0, 0.05, 0.3, 0.0, 0.7].iter().enumerate() {
        if i == 3 {
            queue.set_speed(Speed::Fast);
        }
        if i == 5 {
            queue.set_speed(Speed::Normal);
        }
        queue.tick(*dt);
        let revealed = queue.display().revealed_len;
        assert!(revealed >= last, "reveal went backwards at step {i}");
        last = revealed;
    }
    assert!(queue.display().typing_complete);

    queue.advance();
    assert_eq!(queue.display().revealed_len, 0);
    assert_eq!(queue.current_line().unwrap().text, "Opo!");
}

#[test]
fn advance_fast_forwards_unfinished_line() {
    let mut queue = DialogueQueue::new(50.0);
    queue.start(script(&[("Close your eyes.", "???"), ("Ang dilim.", "???")]));
    queue.tick(0.05);

    assert_eq!(queue.advance(), Advance::FastForward);
    assert_eq!(queue.revealed_text(), "Close your eyes.");
    assert_eq!(queue.phase(), DialoguePhase::Revealed);

    // further ticks keep the line fully shown
    queue.tick(0.5);
    assert_eq!(queue.current_line().unwrap().text, "Close your eyes.");

    assert_eq!(queue.advance(), Advance::NextLine);
    assert_eq!(queue.advance(), Advance::FastForward);
    assert_eq!(queue.advance(), Advance::Finished);
    assert_eq!(queue.advance(), Advance::Idle);
}

#[test]
fn empty_script_keeps_box_hidden() {
    let mut queue = DialogueQueue::new(50.0);
    queue.start(Script::default());

    assert!(!queue.is_visible());
    assert_eq!(queue.phase(), DialoguePhase::Empty);
    assert_eq!(queue.tick(1.0), None);
    assert_eq!(queue.advance(), Advance::Idle);
}

#[test]
fn start_replaces_pending_lines() {
    let mut queue = DialogueQueue::new(50.0);
    queue.start(script(&[("a", "A"), ("b", "A"), ("c", "A")]));
    queue.start(script(&[("x", "X")]));

    assert_eq!(queue.current_line().unwrap().text, "x");
    assert_eq!(queue.pending_len(), 0);
}

#[test]
fn empty_text_line_is_complete_on_load() {
    let mut queue = DialogueQueue::new(50.0);
    queue.start(script(&[("", "A"), ("next", "A")]));

    assert!(queue.display().typing_complete);
    assert_eq!(queue.advance(), Advance::NextLine);
}

#[test]
fn revealed_text_respects_multibyte_boundaries() {
    let mut queue = DialogueQueue::new(1.0);
    queue.start(script(&[("nasan–may", "???")]));

    queue.tick(6.0);
    assert_eq!(queue.revealed_text(), "nasan–");
}

#[test]
fn speed_multiplier_scales_reveal_rate() {
    let mut queue = DialogueQueue::new(10.0);
    queue.set_speed(Speed::Fastest);
    queue.start(script(&[("abcdefghijklmnopqrstuvwxyz0123456789", "A")]));

    assert_eq!(queue.chars_per_second(), 30.0);
    queue.tick(0.5);
    assert_eq!(queue.display().revealed_len, 15);
}

#[test]
fn auto_advance_moves_on_after_dwell() {
    let mut queue = DialogueQueue::new(50.0);
    queue.set_auto_advance(true);
    queue.start(script(&[("Hi", "A"), ("Bye", "B")]));

    assert_eq!(queue.tick(1.0), None);
    assert!(queue.display().typing_complete);
    assert_eq!(queue.tick(0.6), None);
    assert_eq!(queue.tick(0.5), Some(Advance::NextLine));
    assert_eq!(queue.current_line().unwrap().text, "Bye");
}

#[test]
fn auto_advance_disabled_waits_for_input() {
    let mut queue = DialogueQueue::new(50.0);
    queue.start(script(&[("Hi", "A"), ("Bye", "B")]));

    for _ in 0..10 {
        assert_eq!(queue.tick(1.0), None);
    }
    assert_eq!(queue.current_line().unwrap().text, "Hi");
    assert!(queue.toggle_auto_advance());
    assert_eq!(queue.tick(1.0), Some(Advance::NextLine));
}

#[test]
fn hide_drops_remaining_lines() {
    let mut queue = DialogueQueue::new(50.0);
    queue.start(script(&[("a", "A"), ("b", "A")]));
    queue.hide();

    assert_eq!(queue.phase(), DialoguePhase::Empty);
    assert_eq!(queue.pending_len(), 0);
    assert_eq!(queue.revealed_text(), "");
}

#[test]
fn sixty_frames_of_one_second_match_elapsed_formula() {
    let line = "x".repeat(100);
    let mut queue = DialogueQueue::new(50.0);
    queue.start(script(&[(line.as_str(), "A")]));

    for _ in 0..60 {
        queue.tick(1.0 / 60.0);
    }
    assert_eq!(queue.display().revealed_len, 50);

    let mut coarse = DialogueQueue::new(50.0);
    coarse.start(script(&[(line.as_str(), "A")]));
    for _ in 0..10 {
        coarse.tick(0.1);
    }
    assert_eq!(coarse.display(), queue.display());
}

#[test]
fn speed_change_keeps_shown_characters_and_continues_faster() {
    let mut queue = DialogueQueue::new(10.0);
    queue.start(script(&[("abcdefghijklmnopqrstuvwxyz", "A")]));

    queue.tick(0.5);
    assert_eq!(queue.display().revealed_len, 5);

    queue.set_speed(Speed::Fast);
    assert_eq!(queue.display().revealed_len, 5);
    queue.tick(0.5);
    assert_eq!(queue.display().revealed_len, 15);
}
