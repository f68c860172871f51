//! # Piece Descriptions
//!
//! A piece file is a declarative YAML document: the player count, a set of
//! named gesture definitions, and the plays in the order they should be
//! evaluated. There is no expression language: every statement maps directly
//! onto one library call, and relative start times resolve through the play
//! registry exactly as the API does.
//!
//! ```yaml
//! title: little piece
//! players: 4
//! gestures:
//!   pulse:
//!     instrument: Marimba
//!     order: in-order
//!     notes: [quarter, { rest: eighth }, { dotted: quarter }]
//! plays:
//!   - gesture: pulse
//!     start: 0.0
//!     steps: 8
//!     tempo: { fixed: 120 }
//!     id: opening
//!   - gesture: pulse
//!     start: { when-done: opening, offset: 2.0 }
//!     steps: 4
//!     tempo: { ramp-seconds: { from: 60, to: 120, over: 30 } }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::TactusError;
use crate::gesture::Gesture;
use crate::note::{NoteList, NoteValue};
use crate::order::{
    Bounce, EvenPlayers, Explode, InOrder, OddPlayers, OnePlayer, PlayerOrder, ReverseExplode,
    ReverseOrder, Step,
};
use crate::piece::Piece;
use crate::tempo::{self, TempoCurve};

/// A whole piece, as declared in a YAML document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PieceDescription {
    #[serde(default)]
    pub title: Option<String>,
    pub players: usize,
    pub gestures: HashMap<String, GestureDescription>,
    pub plays: Vec<PlayDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GestureDescription {
    pub instrument: String,
    #[serde(default)]
    pub order: OrderDescription,
    pub notes: Vec<NoteDescription>,
    /// Fixed seconds inserted after every step.
    #[serde(default)]
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderDescription {
    #[default]
    InOrder,
    Reverse,
    Evens,
    Odds,
    Bounce,
    Explode,
    ReverseExplode,
    Solo(usize),
}

impl OrderDescription {
    fn resolve(&self) -> impl PlayerOrder + 'static {
        let order = self.clone();
        move |num_players: usize| -> Vec<Step> {
            match &order {
                OrderDescription::InOrder => InOrder.steps(num_players),
                OrderDescription::Reverse => ReverseOrder.steps(num_players),
                OrderDescription::Evens => EvenPlayers.steps(num_players),
                OrderDescription::Odds => OddPlayers.steps(num_players),
                OrderDescription::Bounce => Bounce.steps(num_players),
                OrderDescription::Explode => Explode.steps(num_players),
                OrderDescription::ReverseExplode => ReverseExplode.steps(num_players),
                OrderDescription::Solo(player) => OnePlayer(*player).steps(num_players),
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteDescription {
    Sixteenth,
    TripletEighth,
    Eighth,
    TripletQuarter,
    Quarter,
    TripletHalf,
    Half,
    Whole,
    /// The wrapped duration, silent.
    Rest(Box<NoteDescription>),
    /// The wrapped duration, half again as long.
    Dotted(Box<NoteDescription>),
    /// Several sounding durations joined into one note.
    Tie(Vec<NoteDescription>),
    /// A duration given directly in beats.
    Beats(f64),
}

impl NoteDescription {
    fn resolve(&self) -> Result<NoteValue, TactusError> {
        Ok(match self {
            NoteDescription::Sixteenth => NoteValue::sixteenth(),
            NoteDescription::TripletEighth => NoteValue::triplet_eighth(),
            NoteDescription::Eighth => NoteValue::eighth(),
            NoteDescription::TripletQuarter => NoteValue::triplet_quarter(),
            NoteDescription::Quarter => NoteValue::quarter(),
            NoteDescription::TripletHalf => NoteValue::triplet_half(),
            NoteDescription::Half => NoteValue::half(),
            NoteDescription::Whole => NoteValue::whole(),
            NoteDescription::Rest(inner) => inner.resolve()?.rest(),
            NoteDescription::Dotted(inner) => inner.resolve()?.dotted(),
            NoteDescription::Tie(parts) => {
                let resolved: Vec<NoteValue> = parts
                    .iter()
                    .map(|part| part.resolve())
                    .collect::<Result<_, _>>()?;
                NoteValue::tie(&resolved)?
            }
            NoteDescription::Beats(beats) => NoteValue::arbitrary(*beats, false),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TempoDescription {
    Fixed(f64),
    RampSeconds { from: f64, to: f64, over: f64 },
    RampBeats { from: f64, to: f64, over: f64 },
    Sine { low: f64, high: f64 },
}

impl TempoDescription {
    fn resolve(&self) -> Result<Box<dyn TempoCurve>, TactusError> {
        Ok(match self {
            TempoDescription::Fixed(bpm) => Box::new(tempo::Fixed::new(*bpm)),
            TempoDescription::RampSeconds { from, to, over } => {
                Box::new(tempo::RampSeconds::new(*from, *to, *over))
            }
            TempoDescription::RampBeats { from, to, over } => {
                Box::new(tempo::RampBeats::new(*from, *to, *over))
            }
            TempoDescription::Sine { low, high } => Box::new(tempo::Sine::new(*low, *high)?),
        })
    }
}

/// Where a play starts: an absolute time, or a position relative to an
/// already-registered play.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StartDescription {
    At(f64),
    Relative(RelativeStart),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RelativeStart {
    /// Start when the named play has finished.
    #[serde(default)]
    pub when_done: Option<String>,
    /// Start together with the named play.
    #[serde(default, rename = "with")]
    pub with_play: Option<String>,
    /// Start when every play declared so far has finished.
    #[serde(default)]
    pub after_all: bool,
    /// Seconds added to the resolved time.
    #[serde(default)]
    pub offset: f64,
}

impl StartDescription {
    fn resolve(&self, piece: &Piece) -> Result<f64, TactusError> {
        match self {
            StartDescription::At(time) => Ok(*time),
            StartDescription::Relative(relative) => {
                let anchors = usize::from(relative.when_done.is_some())
                    + usize::from(relative.with_play.is_some())
                    + usize::from(relative.after_all);
                if anchors != 1 {
                    return Err(TactusError::Description(
                        "a relative start needs exactly one of `when-done`, `with`, or `after-all`"
                            .to_string(),
                    ));
                }

                let base = if let Some(id) = &relative.when_done {
                    piece.end_of(id)?
                } else if let Some(id) = &relative.with_play {
                    piece.start_of(id)?
                } else {
                    piece.horizon()?
                };
                Ok(base + relative.offset)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PlayDescription {
    pub gesture: String,
    pub start: StartDescription,
    pub steps: usize,
    pub tempo: TempoDescription,
    #[serde(default)]
    pub id: Option<String>,
}

/// Decode a YAML piece description.
pub fn parse(source: &str) -> Result<PieceDescription, TactusError> {
    serde_yaml::from_str(source).map_err(|e| TactusError::Description(e.to_string()))
}

/// Evaluate a description: build each gesture, then run the plays in
/// declaration order against a fresh [`Piece`].
pub fn evaluate(description: &PieceDescription) -> Result<Piece, TactusError> {
    let mut gestures: HashMap<&str, Gesture> = HashMap::new();
    for (name, gesture) in &description.gestures {
        gestures.insert(name.as_str(), build_gesture(gesture)?);
    }

    let mut piece = Piece::new(description.players)?;
    for play in &description.plays {
        let gesture = gestures
            .get(play.gesture.as_str())
            .ok_or_else(|| TactusError::UnknownGesture(play.gesture.clone()))?;
        let start = play.start.resolve(&piece)?;
        let tempo = play.tempo.resolve()?;
        piece.play(gesture, start, play.steps, tempo.as_ref(), play.id.as_deref())?;
    }
    Ok(piece)
}

fn build_gesture(description: &GestureDescription) -> Result<Gesture, TactusError> {
    let notes: Vec<NoteValue> = description
        .notes
        .iter()
        .map(|note| note.resolve())
        .collect::<Result<_, _>>()?;

    let mut gesture = Gesture::new(
        description.instrument.as_str(),
        description.order.resolve(),
        NoteList::new(notes),
    );
    if let Some(seconds) = description.gap {
        gesture = gesture.with_gap(move |_player: usize, _duration: f64| seconds);
    }
    Ok(gesture)
}
