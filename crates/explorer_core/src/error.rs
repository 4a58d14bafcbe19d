//! Error types for position decoding and exploration.
//!
//! Decoding errors describe malformed input. Exploration errors describe
//! resource exhaustion in the arena and misuse of handles that outlived the
//! arena generation they were issued for. Neither is retried: the computation
//! is deterministic, so a failed search fails the same way every time.

use thiserror::Error;

/// A square name could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square name: {0:?} (expected a1..h8)")]
pub struct ParseSquareError(pub String);

/// Errors raised while decoding a FEN string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// A mandatory field is absent.
    #[error("FEN is missing the {0} field")]
    MissingField(&'static str),

    /// The placement field does not describe 8 ranks of 8 files.
    #[error("invalid piece placement: {0}")]
    BadPlacement(String),

    /// Unknown piece letter in the placement field.
    #[error("invalid piece character {0:?}")]
    BadPiece(char),

    /// Side to move is neither `w` nor `b`.
    #[error("invalid side to move {0:?}")]
    BadSideToMove(String),

    /// Unknown character in the castling field.
    #[error("invalid castling character {0:?}")]
    BadCastling(char),

    /// En-passant field is neither `-` nor a square.
    #[error("invalid en-passant square {0:?}")]
    BadEnPassant(String),

    /// Half-move clock or full-move number is not a number.
    #[error("invalid move counter {0:?}")]
    BadCounter(String),
}

/// The two buffers owned by a [`crate::arena::PositionArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Positions,
    Moves,
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::Positions => write!(f, "positions"),
            Pool::Moves => write!(f, "moves"),
        }
    }
}

/// Errors raised while exploring or searching positions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExploreError {
    /// A pool reached its configured capacity.
    #[error("arena exhausted: {pool} pool is full ({capacity} slots)")]
    ArenaExhausted { pool: Pool, capacity: usize },

    /// The allocator refused to grow a pool.
    #[error("failed to reserve {requested} more slots in the {pool} pool")]
    AllocationFailed { pool: Pool, requested: usize },

    /// A position handle or move range was issued before the last arena
    /// reset.
    #[error("stale arena handle from generation {handle_generation} (arena is at {arena_generation})")]
    StaleHandle {
        handle_generation: u32,
        arena_generation: u32,
    },

    /// A handle points past the end of the position pool.
    #[error("no position at arena index {index}")]
    UnknownPosition { index: u32 },

    /// A move range reaches past the end of the move pool.
    #[error("no move records at arena slots {start}..{end}")]
    UnknownMoves { start: usize, end: usize },

    /// A move could not be matched against the legal moves of a position.
    #[error("illegal move {notation} in this position")]
    IllegalMove { notation: String },
}

/// Result type alias for exploration and search.
pub type ExploreResult<T> = Result<T, ExploreError>;
