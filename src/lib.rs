pub mod description;
pub mod error;
pub mod gesture;
pub mod html;
pub mod note;
pub mod order;
pub mod piece;
pub mod tempo;

pub use description::{evaluate, parse, PieceDescription};
pub use error::TactusError;
pub use gesture::{note_duration, span, Event, Gesture, StepGap};
pub use note::{NoteList, NoteSource, NoteValue};
pub use order::{PlayerOrder, Step};
pub use piece::{Piece, PlayInfo};
pub use tempo::TempoCurve;

/// Generate a piece from a YAML description and render its timing chart.
/// This is the main entry point for the library.
pub fn chart(source: &str) -> Result<String, TactusError> {
    let description = parse(source)?;
    let piece = evaluate(&description)?;
    let title = description.title.as_deref().unwrap_or("untitled piece");
    Ok(html::render(&piece, title))
}
