use super::*;
use crate::board::Position;

fn explored(fen: &str) -> (PositionArena, PositionId, Exploration) {
    let mut arena = PositionArena::default();
    let id = arena.insert(Position::from_fen(fen).unwrap()).unwrap();
    let exploration = explore(&mut arena, id).unwrap();
    (arena, id, exploration)
}

#[test]
fn test_exploration_is_memoized() {
    let mut arena = PositionArena::default();
    let root = arena.insert(Position::startpos()).unwrap();
    assert_eq!(arena.in_check(root).unwrap(), None);

    let first = explore(&mut arena, root).unwrap();
    let allocated = arena.len();
    let second = explore(&mut arena, root).unwrap();

    assert_eq!(first, second);
    assert_eq!(arena.len(), allocated);
    assert_eq!(arena.in_check(root).unwrap(), Some(false));
}

#[test]
fn test_checkmate_classification() {
    // Back-rank mate.
    let (_, _, e) = explored("3R3k/6pp/8/8/8/8/8/K7 b - - 1 1");
    assert!(e.in_check);
    assert!(e.checkmate);
    assert!(!e.stalemate);
    assert!(e.moves.is_empty());
    assert!(e.is_terminal());
}

#[test]
fn test_stalemate_classification() {
    let (_, _, e) = explored("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!e.in_check);
    assert!(!e.checkmate);
    assert!(e.stalemate);
    assert!(e.is_terminal());
}

#[test]
fn test_check_with_escapes_is_not_terminal() {
    let (arena, _, e) = explored("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
    assert!(e.in_check);
    assert!(!e.is_terminal());
    // Only Ke7 stays on the e-file, and it is rejected.
    for record in arena.records(e.moves).unwrap() {
        assert_ne!(record.mv.to.file(), 4);
    }
    assert_eq!(arena.stats().candidates_rejected, 1);
}

#[test]
fn test_children_are_unexplored_until_needed() {
    let (mut arena, _, e) = explored(crate::board::STARTPOS_FEN);
    let child = arena.records(e.moves).unwrap()[0].leads_to;
    assert_eq!(arena.exploration(child).unwrap(), None);

    let child_exploration = explore(&mut arena, child).unwrap();
    assert_eq!(child_exploration.moves.len(), 20);
    assert_eq!(arena.stats().positions_explored, 2);
}

#[test]
fn test_classify_does_not_commit_children() {
    let mut arena = PositionArena::default();
    let mate = arena
        .insert(Position::from_fen("3R3k/6pp/8/8/8/8/8/K7 b - - 1 1").unwrap())
        .unwrap();
    let start = arena.insert(Position::startpos()).unwrap();

    let status = classify(&arena, mate).unwrap();
    assert!(status.checkmate && status.in_check && status.is_terminal());
    assert_eq!(classify(&arena, start).unwrap(), Status::default());
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.stats().positions_explored, 0);

    // An explored position answers from its memo.
    let e = explore(&mut arena, mate).unwrap();
    assert_eq!(classify(&arena, mate).unwrap(), e.status());
}
