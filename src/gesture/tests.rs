use super::*;
use crate::note::{NoteList, NoteValue};
use crate::order::{InOrder, Step};
use crate::tempo::Fixed;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ==================== NOTE-DURATION INTEGRATOR ====================

#[test]
fn test_duration_constant_tempo() {
    let tempo = |_ts: f64, _beats: f64| 120.0;
    let d = note_duration(NoteValue::quarter(), 0.0, 0.0, &tempo);
    assert!(close(d, 0.5), "quarter at 120 bpm should take 0.5s, got {}", d);

    let d = note_duration(NoteValue::whole(), 0.0, 0.0, &tempo);
    assert!(close(d, 2.0));
}

#[test]
fn test_duration_start_offsets_are_irrelevant_at_constant_tempo() {
    let tempo = Fixed::new(90.0);
    let at_zero = note_duration(NoteValue::half(), 0.0, 0.0, &tempo);
    let deep_in = note_duration(NoteValue::half(), 1234.5, 617.25, &tempo);
    assert!(close(at_zero, deep_in));
}

#[test]
fn test_duration_linear_tempo_in_beats() {
    // Forward-Euler over 400 slices of ∫ 60/(60+x) dx on [0, 4]; the analytic
    // value is 60·ln(64/60), and the left-endpoint scheme lands just above it.
    let tempo = |_ts: f64, beats: f64| 60.0 + beats;
    let d = note_duration(NoteValue::whole(), 0.0, 0.0, &tempo);
    assert!(close(d, 3.872623785072847), "got {}", d);

    let analytic = 60.0 * (64.0_f64 / 60.0).ln();
    assert!((d - analytic).abs() < 5.0e-4);
    assert!(d > analytic);
}

#[test]
fn test_duration_exponential_tempo() {
    let tempo = |_ts: f64, beats: f64| 60.0_f64.powf(beats + 1.0);
    let d = note_duration(NoteValue::whole(), 0.0, 0.0, &tempo);
    assert!((d - 0.249273436).abs() < 1.0e-6, "got {}", d);
}

#[test]
fn test_duration_dotted_and_tied_notes() {
    let tempo = Fixed::new(90.0);
    // Dotted quarter = 1.5 beats; at 90 bpm a beat is 2/3 s.
    let d = note_duration(NoteValue::quarter().dotted(), 0.0, 0.0, &tempo);
    assert!(close(d, 1.0));

    let tied = NoteValue::tie(&[NoteValue::quarter(), NoteValue::eighth()]).unwrap();
    let d = note_duration(tied, 0.0, 0.0, &Fixed::new(120.0));
    assert!(close(d, 0.75));
}

#[test]
fn test_duration_zero_beats() {
    let tempo = Fixed::new(120.0);
    assert_eq!(note_duration(NoteValue::arbitrary(0.0, false), 0.0, 0.0, &tempo), 0.0);
    // Under a hundredth of a beat there are no slices at all.
    assert_eq!(note_duration(NoteValue::arbitrary(0.005, true), 0.0, 0.0, &tempo), 0.0);
}

// ==================== SCHEDULER ====================

fn quarters(n: usize) -> NoteList {
    NoteList::new(vec![NoteValue::quarter(); n])
}

#[test]
fn test_solo_steps_are_sequential() {
    let gesture = Gesture::new("Marimba", InOrder, quarters(2));
    let events = gesture.generate(2, 2, &Fixed::new(120.0), 10.0);

    assert_eq!(events.len(), 4);
    assert_eq!(events.iter().map(|e| e.player).collect::<Vec<_>>(), vec![0, 0, 1, 1]);
    assert!(events.iter().all(|e| e.instrument == "Marimba"));

    assert!(close(events[0].start, 10.0));
    assert!(close(events[1].start, 10.5));
    // Player 1 picks up where player 0's span ended.
    assert!(close(events[2].start, 11.0));
    assert!(close(events[3].stop, 12.0));
}

#[test]
fn test_rests_advance_time_but_are_flagged() {
    let notes = NoteList::new(vec![
        NoteValue::quarter(),
        NoteValue::eighth().rest(),
        NoteValue::quarter(),
    ]);
    let gesture = Gesture::new("Flute", InOrder, notes);
    let events = gesture.generate(1, 1, &Fixed::new(120.0), 0.0);

    assert_eq!(events.len(), 3);
    assert!(!events[0].is_rest);
    assert!(events[1].is_rest);
    assert!(!events[2].is_rest);
    // The rest still occupies its half beat.
    assert!(close(events[2].start, 0.75));
    assert!(close(span(&events), 1.25));
}

#[test]
fn test_group_players_share_a_start() {
    let order = |_n: usize| -> Vec<Step> { vec![Step::Group(vec![0, 1])] };
    let gesture = Gesture::new("Strings", order, quarters(1));
    let events = gesture.generate(2, 1, &Fixed::new(60.0), 5.0);

    assert_eq!(events.len(), 2);
    // Generation order, player within step: player 0's events before player
    // 1's even though they sound simultaneously.
    assert_eq!(events[0].player, 0);
    assert_eq!(events[1].player, 1);
    assert!(close(events[0].start, 5.0));
    assert!(close(events[1].start, 5.0));
}

#[test]
fn test_barrier_advances_by_longest_span() {
    let order = |_n: usize| -> Vec<Step> { vec![Step::Group(vec![0, 1]), Step::Solo(0)] };
    let notes = |_step: usize, player: usize| -> Vec<NoteValue> {
        if player == 0 {
            vec![NoteValue::quarter()]
        } else {
            vec![NoteValue::half()]
        }
    };
    let gesture = Gesture::new("Brass", order, notes);
    let events = gesture.generate(2, 2, &Fixed::new(60.0), 0.0);

    assert_eq!(events.len(), 3);
    // Step 0 spans: player 0 one second, player 1 two. The barrier waits for
    // the slowest, not the sum and not the first finisher.
    assert!(close(events[2].start, 2.0));
}

#[test]
fn test_barrier_tie_break_is_first_encountered() {
    // Both players span one quarter; the step lists player 1 first, so player
    // 1 must win the tie. The gap function leaks the winner's id into the
    // timeline.
    let order = |_n: usize| -> Vec<Step> { vec![Step::Group(vec![1, 0]), Step::Solo(0)] };
    let gesture = Gesture::new("Bells", order, quarters(1))
        .with_gap(|player: usize, _duration: f64| player as f64);
    let events = gesture.generate(2, 2, &Fixed::new(60.0), 0.0);

    assert_eq!(events.len(), 3);
    // One second of quarter note plus a gap of 1.0 (= winning player's id).
    assert!(close(events[2].start, 2.0));
}

#[test]
fn test_barrier_advances_beats_of_the_winning_player() {
    // Player 1 (listed first, longest) walks 2 beats, player 0 walks 1. After
    // the barrier the beat cursor must sit at 2, which flips the tempo for the
    // following step.
    let order = |_n: usize| -> Vec<Step> { vec![Step::Group(vec![1, 0]), Step::Solo(0)] };
    let notes = |_step: usize, player: usize| -> Vec<NoteValue> {
        if player == 1 {
            vec![NoteValue::half()]
        } else {
            vec![NoteValue::quarter()]
        }
    };
    let tempo = |_ts: f64, beats: f64| if beats < 2.0 { 60.0 } else { 120.0 };
    let gesture = Gesture::new("Reeds", order, notes);
    let events = gesture.generate(2, 2, &tempo, 0.0);

    assert_eq!(events.len(), 3);
    let step_two = &events[2];
    assert!(close(step_two.stop - step_two.start, 0.5), "expected the follow-up quarter at 120 bpm, got {}", step_two.stop - step_two.start);
}

#[test]
fn test_step_list_wraps_cyclically() {
    let gesture = Gesture::new("Marimba", InOrder, quarters(1));
    let events = gesture.generate(2, 5, &Fixed::new(60.0), 0.0);

    assert_eq!(events.iter().map(|e| e.player).collect::<Vec<_>>(), vec![0, 1, 0, 1, 0]);
    assert!(close(events[4].start, 4.0));
}

#[test]
fn test_zero_steps_yield_nothing() {
    let gesture = Gesture::new("Marimba", InOrder, quarters(4));
    let events = gesture.generate(4, 0, &Fixed::new(120.0), 0.0);
    assert!(events.is_empty());
    assert_eq!(span(&events), 0.0);
}

#[test]
fn test_empty_order_yields_nothing() {
    let order = |_n: usize| -> Vec<Step> { Vec::new() };
    let gesture = Gesture::new("Marimba", order, quarters(4));
    assert!(gesture.generate(4, 8, &Fixed::new(120.0), 0.0).is_empty());
}

#[test]
fn test_player_with_no_notes_contributes_nothing() {
    let order = |_n: usize| -> Vec<Step> { vec![Step::Group(vec![0, 1]), Step::Solo(1)] };
    let notes = |_step: usize, player: usize| -> Vec<NoteValue> {
        if player == 0 {
            Vec::new()
        } else {
            vec![NoteValue::quarter()]
        }
    };
    let gesture = Gesture::new("Winds", order, notes);
    let events = gesture.generate(2, 2, &Fixed::new(60.0), 0.0);

    // Only player 1 produced events; their span carried the cursor.
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].player, 1);
    assert!(close(events[1].start, 1.0));
}

#[test]
fn test_gap_runs_between_every_step() {
    let gesture = Gesture::new("Marimba", InOrder, quarters(1))
        .with_gap(|_player: usize, _duration: f64| 1.5);
    let events = gesture.generate(2, 3, &Fixed::new(120.0), 0.0);

    assert!(close(events[0].start, 0.0));
    assert!(close(events[1].start, 2.0));
    assert!(close(events[2].start, 4.0));
}

#[test]
fn test_gap_sees_the_step_duration() {
    // Doubling gap: every step is followed by silence as long as the step.
    let gesture = Gesture::new("Marimba", InOrder, quarters(1))
        .with_gap(|_player: usize, duration: f64| duration);
    let events = gesture.generate(2, 2, &Fixed::new(60.0), 0.0);

    assert!(close(events[1].start, 2.0));
}
