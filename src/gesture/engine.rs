//! Scheduling engine: turns a gesture plus a tempo curve and a start time
//! into a concrete event list.

use crate::note::{self, NoteSource, NoteValue};
use crate::order::PlayerOrder;
use crate::tempo::TempoCurve;

use super::types::{span, Event};

/// Integration slices per beat. Longer notes get proportionally more slices.
const SLICES_PER_BEAT: f64 = 100.0;

/// Seconds a note occupies when it begins `start_ts` seconds and `start_beat`
/// beats into a gesture governed by `tempo`.
///
/// The note is cut into `100 × beats` equal slices (count truncated) and each
/// slice is priced at the tempo in effect at its left edge, i.e. forward-Euler
/// integration of seconds-per-beat over the note's beat length. The result is
/// an approximation that tightens with the slice count. Zero-beat notes take
/// no time.
pub fn note_duration(
    note: NoteValue,
    start_ts: f64,
    start_beat: f64,
    tempo: &dyn TempoCurve,
) -> f64 {
    let beats = note.beats();
    let subdivide = SLICES_PER_BEAT * beats;
    let slices = subdivide as usize;
    if slices == 0 {
        return 0.0;
    }

    let slice_beats = beats / subdivide;
    let mut elapsed = 0.0;
    for slice in 0..slices {
        let beat_offset = beats * slice as f64 / subdivide;
        let bpm = tempo.bpm(start_ts + elapsed, start_beat + beat_offset);
        elapsed += 60.0 / bpm * slice_beats;
    }
    elapsed
}

/// Seconds inserted after a step, given the step's longest player and how long
/// they played.
pub trait StepGap {
    fn gap(&self, player: usize, duration: f64) -> f64;
}

impl<F> StepGap for F
where
    F: Fn(usize, f64) -> f64,
{
    fn gap(&self, player: usize, duration: f64) -> f64 {
        self(player, duration)
    }
}

/// No time between steps.
pub struct NoGap;

impl StepGap for NoGap {
    fn gap(&self, _player: usize, _duration: f64) -> f64 {
        0.0
    }
}

/// A reusable musical pattern (an instrument, a player order, and a note
/// sequence generator) not yet bound to a start time or a tempo.
pub struct Gesture {
    instrument: String,
    order: Box<dyn PlayerOrder>,
    notes: Box<dyn NoteSource>,
    gap: Box<dyn StepGap>,
}

impl Gesture {
    pub fn new(
        instrument: impl Into<String>,
        order: impl PlayerOrder + 'static,
        notes: impl NoteSource + 'static,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            order: Box::new(order),
            notes: Box::new(notes),
            gap: Box::new(NoGap),
        }
    }

    /// Replace the default zero inter-player gap.
    pub fn with_gap(mut self, gap: impl StepGap + 'static) -> Self {
        self.gap = Box::new(gap);
        self
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Generate the complete event list for one play of this gesture.
    ///
    /// The player order is resolved once; `steps` then cycles through it. All
    /// players of a step start from the shared cursor and walk their note
    /// sequences independently; the step's longest player (by event span,
    /// first maximal one on ties) carries the shared cursor forward, and every
    /// other player's timing beyond that span is discarded. Events come back
    /// in generation order: step, then player within step, then note.
    pub fn generate(
        &self,
        num_players: usize,
        steps: usize,
        tempo: &dyn TempoCurve,
        start_ts: f64,
    ) -> Vec<Event> {
        let order = self.order.steps(num_players);
        if order.is_empty() {
            return Vec::new();
        }

        let mut events = Vec::new();
        let mut cursor_ts = start_ts;
        let mut cursor_beat = 0.0;

        for step in 0..steps {
            let players = order[step % order.len()].players();
            if players.is_empty() {
                continue;
            }

            // Each player walks from a local copy of the shared cursor.
            let mut generated: Vec<(Vec<Event>, f64)> = Vec::with_capacity(players.len());
            for &player in players {
                let notes = self.notes.notes(step, player);
                let walked_beats = note::total_beats(&notes);
                let player_events =
                    self.player_events(player, &notes, cursor_ts, cursor_beat, tempo);
                generated.push((player_events, walked_beats));
            }

            // The slowest player sets the pace for the step.
            let mut longest = 0;
            for (index, (player_events, _)) in generated.iter().enumerate() {
                if span(player_events) > span(&generated[longest].0) {
                    longest = index;
                }
            }
            let longest_span = span(&generated[longest].0);
            cursor_ts += longest_span;
            cursor_beat += generated[longest].1;

            cursor_ts += self.gap.gap(players[longest], longest_span);

            for (player_events, _) in generated {
                events.extend(player_events);
            }
        }

        events
    }

    /// One player's events for one step, walking a local (time, beat) cursor
    /// through the note sequence. Rests advance the cursor and are recorded as
    /// rest events.
    fn player_events(
        &self,
        player: usize,
        notes: &[NoteValue],
        mut ts: f64,
        mut beat: f64,
        tempo: &dyn TempoCurve,
    ) -> Vec<Event> {
        let mut events = Vec::with_capacity(notes.len());
        for &note in notes {
            let duration = note_duration(note, ts, beat, tempo);
            events.push(Event {
                player,
                instrument: self.instrument.clone(),
                start: ts,
                stop: ts + duration,
                is_rest: note.is_rest(),
            });
            ts += duration;
            beat += note.beats();
        }
        events
    }
}
