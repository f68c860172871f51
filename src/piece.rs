//! # Piece Accumulation
//!
//! A [`Piece`] is the running state of one generation run: every event
//! produced so far, the instruments seen, the registry of named gesture
//! plays, and the piece length. It is an explicit context: gesture plays and
//! the timing queries that let later plays schedule themselves relative to
//! earlier ones all go through `&mut`/`&` methods, so one run is one value.
//!
//! Plays resolve each other strictly in declaration order: a play must be
//! registered before anything can ask when it starts, ends, or how long it
//! lasts, regardless of where the plays land on the timeline.

use std::collections::HashMap;

use crate::error::TactusError;
use crate::gesture::{span, Event, Gesture};
use crate::tempo::TempoCurve;

/// Timing facts recorded for one gesture play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayInfo {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
}

/// Accumulated state of one piece-generation run.
pub struct Piece {
    num_players: usize,
    events: Vec<Event>,
    instruments: Vec<String>,
    plays: HashMap<String, PlayInfo>,
    length_seconds: u64,
}

impl Piece {
    pub fn new(num_players: usize) -> Result<Self, TactusError> {
        if num_players == 0 {
            return Err(TactusError::NoPlayers);
        }
        Ok(Self {
            num_players,
            events: Vec::new(),
            instruments: Vec::new(),
            plays: HashMap::new(),
            length_seconds: 0,
        })
    }

    /// Play `gesture` starting at `start`: generate its events, fold them into
    /// the piece, and register the play's timing under `id`.
    ///
    /// Omitted ids are auto-named `unnamed_gesture_play_<N>` where N is the
    /// number of plays registered so far. A duplicate id aborts the run.
    pub fn play(
        &mut self,
        gesture: &Gesture,
        start: f64,
        steps: usize,
        tempo: &dyn TempoCurve,
        id: Option<&str>,
    ) -> Result<PlayInfo, TactusError> {
        let id = match id {
            Some(id) => id.to_string(),
            None => format!("unnamed_gesture_play_{}", self.plays.len()),
        };
        if self.plays.contains_key(&id) {
            return Err(TactusError::DuplicatePlayId(id));
        }

        if !self.instruments.iter().any(|i| i == gesture.instrument()) {
            self.instruments.push(gesture.instrument().to_string());
        }

        let events = gesture.generate(self.num_players, steps, tempo, start);

        // A zero-step play has no events; it starts where it was asked to and
        // lasts nothing.
        let play_start = events.first().map_or(start, |e| e.start);
        let duration = span(&events);
        let info = PlayInfo {
            start_time: play_start,
            end_time: play_start + duration,
            duration,
        };
        self.plays.insert(id, info);

        for event in &events {
            self.length_seconds = self.length_seconds.max(event.stop.ceil() as u64);
        }
        self.events.extend(events);

        Ok(info)
    }

    /// When the named play finishes.
    pub fn end_of(&self, play_id: &str) -> Result<f64, TactusError> {
        Ok(self.info(play_id)?.end_time)
    }

    /// When the named play begins.
    pub fn start_of(&self, play_id: &str) -> Result<f64, TactusError> {
        Ok(self.info(play_id)?.start_time)
    }

    /// How long the named play lasts.
    pub fn duration_of(&self, play_id: &str) -> Result<f64, TactusError> {
        Ok(self.info(play_id)?.duration)
    }

    /// When every play registered so far has finished.
    pub fn horizon(&self) -> Result<f64, TactusError> {
        self.plays
            .values()
            .map(|info| info.end_time)
            .reduce(f64::max)
            .ok_or(TactusError::NoPlays)
    }

    fn info(&self, play_id: &str) -> Result<&PlayInfo, TactusError> {
        self.plays.get(play_id).ok_or_else(|| TactusError::UnknownPlayId {
            play_id: play_id.to_string(),
        })
    }

    /// Every event generated so far, in play order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Distinct instrument labels, in first-seen order.
    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    /// Piece length in whole seconds, rounded up to cover the latest stop.
    pub fn length_seconds(&self) -> u64 {
        self.length_seconds
    }
}
