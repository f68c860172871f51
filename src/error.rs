use thiserror::Error;

#[derive(Error, Debug)]
pub enum TactusError {
    #[error("there is already a gesture play with the id '{0}'")]
    DuplicatePlayId(String),

    #[error(
        "no gesture play named '{play_id}' has been registered yet; either \
         '{play_id}' is mis-spelled, the earlier play is missing `id: {play_id}`, \
         or the play that defines '{play_id}' is declared after the one that \
         refers to it (plays resolve in declaration order, regardless of their \
         start times)"
    )]
    UnknownPlayId { play_id: String },

    #[error("no gesture plays have been registered yet")]
    NoPlays,

    #[error("a tie can only join sounding notes; note {index} is a rest")]
    RestInTie { index: usize },

    #[error("sine tempo needs low < high, got low={low} high={high}")]
    SineBounds { low: f64, high: f64 },

    #[error("a piece needs at least one player")]
    NoPlayers,

    #[error("no gesture named '{0}' is defined")]
    UnknownGesture(String),

    #[error("invalid piece description: {0}")]
    Description(String),
}
