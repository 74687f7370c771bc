//! UCI protocol errors.

use sable_core::{FenError, MoveParseError};
use sable_engine::EngineError;

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// Failed to parse a FEN string.
    #[error("invalid FEN {fen:?}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
        #[source]
        source: FenError,
    },

    /// A move in the `position` command is malformed or illegal.
    #[error("invalid move in position command")]
    InvalidMove {
        #[from]
        source: MoveParseError,
    },

    /// A `go` parameter was given without its value.
    #[error("missing value for go parameter {param}")]
    MissingGoValue { param: String },

    /// A `go` parameter value is not a number.
    #[error("invalid value {value:?} for go parameter {param}")]
    InvalidGoValue { param: String, value: String },

    /// `setoption` without `name`.
    #[error("malformed setoption command")]
    MalformedSetOption,

    /// `setoption` for an option the engine does not have.
    #[error("unknown option {name:?}")]
    UnknownOption { name: String },

    /// An option value of the wrong type.
    #[error("invalid value {value:?} for option {name}")]
    InvalidOptionValue { name: String, value: String },

    /// The engine rejected a request.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
