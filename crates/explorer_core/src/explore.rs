//! Per-position memo of legal moves and check status.

use tracing::trace;

use crate::arena::{PositionArena, PositionId};
use crate::error::ExploreResult;
use crate::movegen::{has_legal_move, legal_children_into};

/// A contiguous slice of an arena's move pool.
///
/// Like [`PositionId`], a range is only valid for the arena generation it was
/// issued in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveRange {
    start: u32,
    len: u32,
    generation: u32,
}

impl MoveRange {
    pub(crate) fn new(start: usize, len: usize, generation: u32) -> Self {
        Self {
            start: start as u32,
            len: len as u32,
            generation,
        }
    }

    pub fn generation(self) -> u32 {
        self.generation
    }

    pub fn start(self) -> usize {
        self.start as usize
    }

    pub fn end(self) -> usize {
        self.start as usize + self.len as usize
    }

    pub fn len(self) -> usize {
        self.len as usize
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Check and end-of-game flags of a position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
}

impl Status {
    fn new(in_check: bool, has_moves: bool) -> Self {
        Self {
            in_check,
            checkmate: !has_moves && in_check,
            stalemate: !has_moves && !in_check,
        }
    }

    /// Checkmate or stalemate.
    pub fn is_terminal(&self) -> bool {
        self.checkmate || self.stalemate
    }
}

/// Everything derived from a position by exploring it. Set once, never
/// recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exploration {
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub moves: MoveRange,
}

impl Exploration {
    pub fn status(&self) -> Status {
        Status {
            in_check: self.in_check,
            checkmate: self.checkmate,
            stalemate: self.stalemate,
        }
    }

    /// Checkmate or stalemate.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}

/// Explores `id` on first call: generates its legal moves, commits the child
/// positions, and classifies check, checkmate and stalemate. Later calls
/// return the memo.
pub fn explore(arena: &mut PositionArena, id: PositionId) -> ExploreResult<Exploration> {
    if let Some(done) = arena.exploration(id)? {
        return Ok(done);
    }

    let position = *arena.position(id)?;
    let mut candidates = Vec::with_capacity(64);
    let rejected = legal_children_into(&position, &mut candidates);
    let moves = arena.commit_children(&candidates)?;

    let in_check = position.in_check();
    let status = Status::new(in_check, !moves.is_empty());
    let exploration = Exploration {
        in_check,
        checkmate: status.checkmate,
        stalemate: status.stalemate,
        moves,
    };
    trace!(
        index = id.index(),
        moves = moves.len(),
        rejected,
        in_check,
        "explored position"
    );
    arena.set_exploration(id, exploration, rejected)
}

/// Status of `id` without committing its children: the memo when the
/// position was explored, otherwise a generation pass that stops at the first
/// legal move. Nothing is stored.
pub fn classify(arena: &PositionArena, id: PositionId) -> ExploreResult<Status> {
    if let Some(done) = arena.exploration(id)? {
        return Ok(done.status());
    }
    let position = arena.position(id)?;
    Ok(Status::new(position.in_check(), has_legal_move(position)))
}

#[cfg(test)]
#[path = "explore_tests.rs"]
mod explore_tests;
