use super::*;
use crate::explore::explore;

fn tight(max_positions: usize, max_moves: usize) -> ArenaLimits {
    ArenaLimits {
        initial_positions: 2,
        max_positions,
        initial_moves: 2,
        max_moves,
    }
}

#[test]
fn test_insert_and_lookup() {
    let mut arena = PositionArena::default();
    assert!(arena.is_empty());

    let a = arena.insert(Position::startpos()).unwrap();
    let b = arena.insert(Position::empty()).unwrap();
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.len(), 2);
    assert_eq!(*arena.position(a).unwrap(), Position::startpos());
    assert_eq!(*arena.position(b).unwrap(), Position::empty());
    assert_eq!(arena.exploration(a).unwrap(), None);
    assert_eq!(arena.in_check(a).unwrap(), None);
}

#[test]
fn test_reset_rejects_stale_handles() {
    let mut arena = PositionArena::default();
    let old = arena.insert(Position::startpos()).unwrap();
    arena.reset();

    assert!(arena.is_empty());
    assert_eq!(arena.generation(), 1);
    assert_eq!(
        arena.position(old),
        Err(ExploreError::StaleHandle {
            handle_generation: 0,
            arena_generation: 1,
        })
    );

    // The slot is reused by the new generation without aliasing the old handle.
    let new = arena.insert(Position::empty()).unwrap();
    assert_eq!(new.index(), old.index());
    assert_ne!(new, old);
    assert!(arena.position(old).is_err());
    assert_eq!(arena.stats(), ArenaStats {
        positions_allocated: 1,
        ..ArenaStats::default()
    });
}

#[test]
fn test_reset_rejects_stale_move_ranges() {
    let mut arena = PositionArena::default();
    let root = arena
        .insert(Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap())
        .unwrap();
    let old = explore(&mut arena, root).unwrap();
    arena.reset();

    // The new generation fills the same move slots.
    let root = arena.insert(Position::startpos()).unwrap();
    let fresh = explore(&mut arena, root).unwrap();
    assert_eq!(fresh.moves.start(), old.moves.start());

    let stale = ExploreError::StaleHandle {
        handle_generation: 0,
        arena_generation: 1,
    };
    assert_eq!(arena.records(old.moves), Err(stale.clone()));
    assert_eq!(arena.record(old.moves, 0), Err(stale));
    assert_eq!(arena.records(fresh.moves).unwrap().len(), 20);
}

#[test]
fn test_out_of_bounds_range_is_rejected() {
    let mut arena = PositionArena::default();
    let root = arena.insert(Position::startpos()).unwrap();
    let exploration = explore(&mut arena, root).unwrap();

    assert_eq!(
        arena.records(MoveRange::new(10, 20, 0)),
        Err(ExploreError::UnknownMoves { start: 10, end: 30 })
    );
    assert_eq!(
        arena.record(exploration.moves, 20),
        Err(ExploreError::UnknownMoves { start: 20, end: 21 })
    );
    assert!(arena.record(exploration.moves, 19).is_ok());
}

#[test]
fn test_unknown_index_is_rejected() {
    let arena = PositionArena::default();
    let bogus = PositionId {
        index: 7,
        generation: 0,
    };
    assert_eq!(
        arena.exploration(bogus),
        Err(ExploreError::UnknownPosition { index: 7 })
    );
}

#[test]
fn test_position_pool_exhaustion() {
    let mut arena = PositionArena::new(tight(3, 100));
    for _ in 0..3 {
        arena.insert(Position::startpos()).unwrap();
    }
    assert_eq!(
        arena.insert(Position::startpos()),
        Err(ExploreError::ArenaExhausted {
            pool: Pool::Positions,
            capacity: 3,
        })
    );
}

#[test]
fn test_failed_commit_leaves_arena_unchanged() {
    // The start position needs 20 child slots.
    let mut arena = PositionArena::new(tight(10, 100));
    let root = arena.insert(Position::startpos()).unwrap();
    assert!(matches!(
        explore(&mut arena, root),
        Err(ExploreError::ArenaExhausted {
            pool: Pool::Positions,
            ..
        })
    ));
    assert_eq!(arena.len(), 1);
    assert_eq!(arena.move_count(), 0);
    assert_eq!(arena.exploration(root).unwrap(), None);

    let mut arena = PositionArena::new(tight(100, 5));
    let root = arena.insert(Position::startpos()).unwrap();
    assert_eq!(
        explore(&mut arena, root),
        Err(ExploreError::ArenaExhausted {
            pool: Pool::Moves,
            capacity: 5,
        })
    );
    assert_eq!(arena.len(), 1);
}

#[test]
fn test_pools_grow_past_initial_size() {
    let mut arena = PositionArena::new(tight(1000, 1000));
    let root = arena.insert(Position::startpos()).unwrap();
    let exploration = explore(&mut arena, root).unwrap();

    assert_eq!(exploration.moves.len(), 20);
    assert_eq!(arena.len(), 21);
    assert_eq!(arena.move_count(), 20);
    let records = arena.records(exploration.moves).unwrap();
    assert_eq!(records.len(), 20);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.leads_to.index() as usize, i + 1);
        assert_eq!(
            *arena.position(record.leads_to).unwrap(),
            Position::startpos().after(record.mv)
        );
    }
}

#[test]
fn test_stats_count_allocations() {
    let mut arena = PositionArena::default();
    let root = arena.insert(Position::startpos()).unwrap();
    explore(&mut arena, root).unwrap();
    explore(&mut arena, root).unwrap();

    let stats = arena.stats();
    assert_eq!(stats.positions_allocated, 21);
    assert_eq!(stats.moves_allocated, 20);
    assert_eq!(stats.positions_explored, 1);
    assert_eq!(stats.candidates_rejected, 0);
}
