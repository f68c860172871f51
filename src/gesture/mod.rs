//! # Gesture Module
//!
//! The event-generation core: scheduling a gesture across players and through
//! a tempo curve into a list of absolutely-timed [`Event`]s.
//!
//! ## Sub-modules
//! - `types` - Event and event-list span
//! - `engine` - note-duration integration and the step scheduler
//!
//! ## Entry Point
//! [`Gesture::generate()`] - produce the event list for one play
//!
//! ## Example
//! ```rust
//! use tactus::gesture::Gesture;
//! use tactus::note::{NoteList, NoteValue};
//! use tactus::order::InOrder;
//! use tactus::tempo::Fixed;
//!
//! let pulse = Gesture::new(
//!     "Marimba",
//!     InOrder,
//!     NoteList::new(vec![NoteValue::quarter(), NoteValue::quarter()]),
//! );
//!
//! let events = pulse.generate(2, 2, &Fixed::new(120.0), 0.0);
//! assert_eq!(events.len(), 4);
//! assert_eq!(events[0].start, 0.0);
//! assert!((events[3].stop - 2.0).abs() < 1e-9);
//! ```

mod engine;
mod types;

#[cfg(test)]
mod tests;

pub use engine::{note_duration, Gesture, NoGap, StepGap};
pub use types::{span, Event};
