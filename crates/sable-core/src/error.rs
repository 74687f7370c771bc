//! Error types for FEN parsing, board validation and move parsing.

use thiserror::Error;

/// Errors from parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },

    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    /// `rank_index` counts from the top of the FEN (0 = rank 8).
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength { rank_index: usize, length: usize },

    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },

    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },

    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },

    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },

    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },

    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
}

/// Structural problems with a set of bitboards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{color} has {count} kings, expected exactly 1")]
    InvalidKingCount { color: &'static str, count: u32 },

    #[error("pawn on back rank {square}")]
    PawnOnBackRank { square: String },

    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Errors from resolving a UCI move string against a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("malformed move \"{0}\"")]
    Malformed(String),

    #[error("illegal move \"{0}\"")]
    Illegal(String),
}
