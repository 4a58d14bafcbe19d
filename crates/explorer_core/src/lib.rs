pub mod arena;
pub mod attacks;
pub mod board;
pub mod error;
pub mod eval;
pub mod explore;
pub mod geometry;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod search;
pub mod types;

// Re-export the position model and the search entry points
pub use arena::{ArenaLimits, ArenaStats, MoveRecord, PositionArena, PositionId};
pub use board::*;
pub use error::*;
pub use eval::{evaluate, Evaluation, Winner, MATE_SCORE};
pub use explore::{classify, explore, Exploration, MoveRange, Status};
pub use movegen::{has_legal_move, legal_moves, Candidate};
pub use notation::{line_to_algebraic, parse_coordinate, to_algebraic, Disambiguation};
pub use perft::{divide, perft};
pub use search::{SearchConfig, SearchContext, SearchResult, SearchStats};
pub use types::*;
