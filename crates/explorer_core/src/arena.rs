//! Generation-scoped storage for positions and move records.
//!
//! The arena owns two append-only pools: one node per position (the position
//! plus its memoized [`Exploration`]) and one record per legal move. Nothing is
//! freed individually. [`PositionArena::reset`] empties both pools and starts
//! a new generation, after which every older [`PositionId`] is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Position;
use crate::error::{ExploreError, ExploreResult, Pool};
use crate::explore::{Exploration, MoveRange};
use crate::movegen::Candidate;
use crate::types::Move;

/// Handle to a position stored in a [`PositionArena`].
///
/// Only valid for the arena generation it was issued in.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionId {
    index: u32,
    generation: u32,
}

impl PositionId {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PositionId({}@{})", self.index, self.generation)
    }
}

/// A legal move and the child position it leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub leads_to: PositionId,
}

/// Pool sizes. Pools start at the `initial_*` size and grow in chunks up to
/// the `max_*` size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaLimits {
    pub initial_positions: usize,
    pub max_positions: usize,
    pub initial_moves: usize,
    pub max_moves: usize,
}

impl Default for ArenaLimits {
    fn default() -> Self {
        Self {
            initial_positions: 4096,
            max_positions: 4_000_000,
            initial_moves: 16_384,
            max_moves: 16_000_000,
        }
    }
}

/// Counters for the current generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ArenaStats {
    pub positions_allocated: u64,
    pub moves_allocated: u64,
    pub positions_explored: u64,
    /// Pseudo-legal candidates dropped because they left the mover in check.
    pub candidates_rejected: u64,
}

#[derive(Clone, Debug)]
struct Node {
    position: Position,
    exploration: Option<Exploration>,
}

#[derive(Debug)]
pub struct PositionArena {
    generation: u32,
    nodes: Vec<Node>,
    moves: Vec<MoveRecord>,
    limits: ArenaLimits,
    stats: ArenaStats,
}

impl PositionArena {
    pub fn new(limits: ArenaLimits) -> Self {
        Self {
            generation: 0,
            nodes: Vec::new(),
            moves: Vec::new(),
            limits,
            stats: ArenaStats::default(),
        }
    }

    pub fn limits(&self) -> ArenaLimits {
        self.limits
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of positions stored in this generation.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    /// Stores a position and returns its handle.
    pub fn insert(&mut self, position: Position) -> ExploreResult<PositionId> {
        grow(
            &mut self.nodes,
            Pool::Positions,
            1,
            self.limits.initial_positions,
            self.limits.max_positions,
        )?;
        self.push_node(position)
    }

    pub fn position(&self, id: PositionId) -> ExploreResult<&Position> {
        let slot = self.slot(id)?;
        Ok(&self.nodes[slot].position)
    }

    /// The memoized exploration, or `None` if the position was never explored.
    pub fn exploration(&self, id: PositionId) -> ExploreResult<Option<Exploration>> {
        let slot = self.slot(id)?;
        Ok(self.nodes[slot].exploration)
    }

    /// Check status: `None` until the position has been explored.
    pub fn in_check(&self, id: PositionId) -> ExploreResult<Option<bool>> {
        Ok(self.exploration(id)?.map(|e| e.in_check))
    }

    /// Move records of an exploration from this generation.
    pub fn records(&self, range: MoveRange) -> ExploreResult<&[MoveRecord]> {
        if range.generation() != self.generation {
            return Err(ExploreError::StaleHandle {
                handle_generation: range.generation(),
                arena_generation: self.generation,
            });
        }
        self.moves
            .get(range.start()..range.end())
            .ok_or(ExploreError::UnknownMoves {
                start: range.start(),
                end: range.end(),
            })
    }

    /// The `i`th record of `range`.
    pub fn record(&self, range: MoveRange, i: usize) -> ExploreResult<MoveRecord> {
        self.records(range)?
            .get(i)
            .copied()
            .ok_or(ExploreError::UnknownMoves {
                start: range.start() + i,
                end: range.start() + i + 1,
            })
    }

    /// Stores every candidate's child position and appends one move record per
    /// candidate, contiguously. Both pools are grown before anything is
    /// written, so a failure leaves the arena unchanged.
    pub(crate) fn commit_children(&mut self, candidates: &[Candidate]) -> ExploreResult<MoveRange> {
        let n = candidates.len();
        grow(
            &mut self.nodes,
            Pool::Positions,
            n,
            self.limits.initial_positions,
            self.limits.max_positions,
        )?;
        grow(
            &mut self.moves,
            Pool::Moves,
            n,
            self.limits.initial_moves,
            self.limits.max_moves,
        )?;

        let start = self.moves.len();
        for candidate in candidates {
            let leads_to = self.push_node(candidate.child)?;
            self.moves.push(MoveRecord {
                mv: candidate.mv,
                leads_to,
            });
        }
        self.stats.moves_allocated += n as u64;
        Ok(MoveRange::new(start, n, self.generation))
    }

    /// Memoizes an exploration. An existing one is kept.
    pub(crate) fn set_exploration(
        &mut self,
        id: PositionId,
        exploration: Exploration,
        rejected: u64,
    ) -> ExploreResult<Exploration> {
        let slot = self.slot(id)?;
        let node = &mut self.nodes[slot];
        if let Some(existing) = node.exploration {
            return Ok(existing);
        }
        node.exploration = Some(exploration);
        self.stats.positions_explored += 1;
        self.stats.candidates_rejected += rejected;
        Ok(exploration)
    }

    /// Drops every position and move record and starts a new generation.
    pub fn reset(&mut self) {
        let positions = self.nodes.len();
        self.nodes.clear();
        self.moves.clear();
        self.stats = ArenaStats::default();
        self.generation = self.generation.wrapping_add(1);
        debug!(generation = self.generation, positions, "arena reset");
    }

    fn push_node(&mut self, position: Position) -> ExploreResult<PositionId> {
        let index = u32::try_from(self.nodes.len()).map_err(|_| ExploreError::ArenaExhausted {
            pool: Pool::Positions,
            capacity: self.nodes.len(),
        })?;
        self.nodes.push(Node {
            position,
            exploration: None,
        });
        self.stats.positions_allocated += 1;
        Ok(PositionId {
            index,
            generation: self.generation,
        })
    }

    fn slot(&self, id: PositionId) -> ExploreResult<usize> {
        if id.generation != self.generation {
            return Err(ExploreError::StaleHandle {
                handle_generation: id.generation,
                arena_generation: self.generation,
            });
        }
        let slot = id.index as usize;
        if slot >= self.nodes.len() {
            return Err(ExploreError::UnknownPosition { index: id.index });
        }
        Ok(slot)
    }
}

impl Default for PositionArena {
    fn default() -> Self {
        PositionArena::new(ArenaLimits::default())
    }
}

/// Makes room for `additional` more items, growing by at least `initial` and
/// otherwise doubling, never past `max`. Pools are indexed by `u32`.
fn grow<T>(
    buf: &mut Vec<T>,
    pool: Pool,
    additional: usize,
    initial: usize,
    max: usize,
) -> ExploreResult<()> {
    let max = max.min(u32::MAX as usize);
    let needed = buf.len().saturating_add(additional);
    if needed > max {
        warn!(%pool, capacity = max, needed, "arena pool exhausted");
        return Err(ExploreError::ArenaExhausted {
            pool,
            capacity: max,
        });
    }
    if needed <= buf.capacity() {
        return Ok(());
    }
    let chunk = buf
        .capacity()
        .max(initial)
        .max(additional)
        .min(max - buf.len());
    buf.try_reserve_exact(chunk)
        .map_err(|_| ExploreError::AllocationFailed {
            pool,
            requested: chunk,
        })
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod arena_tests;
