use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the skiroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// "No route exists" is deliberately absent: the planner reports it as
/// `Ok(None)` so callers can tell it apart from malformed input.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a ski area id is not present in the backing store.
    #[error("ski area {id} not found")]
    ResortNotFound { id: i64 },

    /// Raised when a resort snapshot file does not exist.
    #[error("resort snapshot not found at {path}")]
    SnapshotNotFound { path: PathBuf },

    /// Raised when a point name could not be resolved within a resort.
    #[error("unknown point: {name}{}", format_suggestions(.suggestions))]
    UnknownPoint {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a lift name or id could not be resolved within a resort.
    #[error("unknown lift: {name}")]
    UnknownLift { name: String },

    /// Raised when a difficulty ceiling is not on the difficulty scale.
    #[error("unknown difficulty '{value}'; expected one of green, blue, blue-black, black, double_black")]
    InvalidDifficulty { value: String },

    /// Raised when an edge identifier is not of the form `lift-<id>` or `segment-<id>`.
    #[error("invalid edge id '{value}'")]
    InvalidEdgeId { value: String },

    /// Raised when an algorithm name is not recognised.
    #[error("unknown route algorithm '{value}'; expected dijkstra or a-star")]
    InvalidAlgorithm { value: String },

    /// Raised when attempting to load a database that lacks the resort tables.
    #[error("unsupported resort schema; expected points_of_interest, lifts, trails and trail_segments tables")]
    UnsupportedSchema,

    /// Raised when a search runs past the caller-supplied deadline.
    #[error("route search exceeded its deadline after expanding {expanded} points")]
    SearchDeadlineExceeded { expanded: usize },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for snapshot parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
