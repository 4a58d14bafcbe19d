//! Full-width fixed-depth minimax over the position arena.
//!
//! Every legal child is searched; nothing is pruned and nothing is shared
//! between transpositions. White maximizes and Black minimizes under
//! [`Evaluation::compare`]; among equally good children the first in
//! move-list order is kept.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arena::{ArenaLimits, ArenaStats, MoveRecord, PositionArena, PositionId};
use crate::board::Position;
use crate::error::ExploreResult;
use crate::eval::{evaluate, Evaluation};
use crate::explore::{self, Exploration};
use crate::types::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies to search. 0 evaluates the root statically.
    pub depth: u8,
    /// Whether to rebuild the best line while unwinding.
    pub principal_variation: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            principal_variation: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub positions_explored: u64,
    pub positions_allocated: u64,
    pub moves_allocated: u64,
    pub candidates_rejected: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub evaluation: Evaluation,
    pub depth: u8,
    /// Best line, root move first. `None` when not requested.
    pub principal_variation: Option<Vec<Move>>,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn best_move(&self) -> Option<Move> {
        self.principal_variation
            .as_ref()
            .and_then(|line| line.first().copied())
    }
}

/// Owns the arena and counters of one line of work.
///
/// Contexts share nothing, so independent contexts can run on separate
/// threads.
#[derive(Debug, Default)]
pub struct SearchContext {
    arena: PositionArena,
    config: SearchConfig,
    nodes_visited: u64,
}

impl SearchContext {
    pub fn new(config: SearchConfig, limits: ArenaLimits) -> Self {
        Self {
            arena: PositionArena::new(limits),
            config,
            nodes_visited: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn arena(&self) -> &PositionArena {
        &self.arena
    }

    /// Stores a position to search from.
    pub fn insert_root(&mut self, position: Position) -> ExploreResult<PositionId> {
        self.arena.insert(position)
    }

    pub fn position(&self, id: PositionId) -> ExploreResult<&Position> {
        self.arena.position(id)
    }

    pub fn explore(&mut self, id: PositionId) -> ExploreResult<Exploration> {
        explore::explore(&mut self.arena, id)
    }

    /// Explores `id` if needed and returns its legal moves in generation order.
    pub fn legal_moves(&mut self, id: PositionId) -> ExploreResult<&[MoveRecord]> {
        let exploration = self.explore(id)?;
        self.arena.records(exploration.moves)
    }

    /// Static evaluation of `id`, exploring it first.
    pub fn evaluate(&mut self, id: PositionId) -> ExploreResult<Evaluation> {
        let exploration = self.explore(id)?;
        Ok(evaluate(self.arena.position(id)?, exploration.status()))
    }

    /// Searches `root` to `depth` plies.
    pub fn search(&mut self, root: PositionId, depth: u8) -> ExploreResult<SearchResult> {
        let before = self.nodes_visited;
        let with_line = self.config.principal_variation;
        let (evaluation, mut line) = self.minimax(root, depth, with_line)?;
        line.reverse();

        let stats = SearchStats {
            nodes_visited: self.nodes_visited - before,
            ..self.stats()
        };
        debug!(
            depth,
            score = evaluation.score,
            winner = ?evaluation.winner,
            nodes = stats.nodes_visited,
            positions = stats.positions_allocated,
            "search finished"
        );
        Ok(SearchResult {
            evaluation,
            depth,
            principal_variation: with_line.then_some(line),
            stats,
        })
    }

    /// Searches `root` to the configured depth.
    pub fn search_configured(&mut self, root: PositionId) -> ExploreResult<SearchResult> {
        self.search(root, self.config.depth)
    }

    /// Counters for the current arena generation.
    pub fn stats(&self) -> SearchStats {
        let ArenaStats {
            positions_allocated,
            moves_allocated,
            positions_explored,
            candidates_rejected,
        } = self.arena.stats();
        SearchStats {
            nodes_visited: self.nodes_visited,
            positions_explored,
            positions_allocated,
            moves_allocated,
            candidates_rejected,
        }
    }

    /// Frees every position and invalidates all handles issued so far.
    pub fn reset(&mut self) {
        self.arena.reset();
        self.nodes_visited = 0;
    }

    /// Returns the evaluation of `id` and, leaf first, the moves leading to it.
    fn minimax(
        &mut self,
        id: PositionId,
        depth: u8,
        with_line: bool,
    ) -> ExploreResult<(Evaluation, Vec<Move>)> {
        // Leaves are classified without committing their children.
        if depth == 0 {
            let status = explore::classify(&self.arena, id)?;
            self.nodes_visited += 1;
            return Ok((evaluate(self.arena.position(id)?, status), Vec::new()));
        }

        let exploration = self.explore(id)?;
        self.nodes_visited += 1;
        let position = *self.arena.position(id)?;
        if exploration.is_terminal() {
            return Ok((evaluate(&position, exploration.status()), Vec::new()));
        }

        let side = position.side_to_move;
        let mut best: Option<(Evaluation, Vec<Move>)> = None;
        for i in 0..exploration.moves.len() {
            let record = self.arena.record(exploration.moves, i)?;
            let (evaluation, mut line) = self.minimax(record.leads_to, depth - 1, with_line)?;
            let better = match &best {
                Some((current, _)) => evaluation.is_better_for(current, side),
                None => true,
            };
            if better {
                if with_line {
                    line.push(record.mv);
                }
                best = Some((evaluation, line));
            }
        }

        match best {
            Some(found) => Ok(found),
            None => Ok((evaluate(&position, exploration.status()), Vec::new())),
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
