use super::*;
use crate::arena::PositionArena;
use crate::explore::explore;

fn evaluate_fen(fen: &str) -> Evaluation {
    let mut arena = PositionArena::default();
    let id = arena.insert(Position::from_fen(fen).unwrap()).unwrap();
    let exploration = explore(&mut arena, id).unwrap();
    evaluate(arena.position(id).unwrap(), exploration.status())
}

#[test]
fn test_comparator_over_all_winner_pairings() {
    let samples = [
        Evaluation::win(Color::White),
        Evaluation::material(-12),
        Evaluation::material(0),
        Evaluation::draw(),
        Evaluation::material(7),
        Evaluation::win(Color::Black),
    ];
    for a in &samples {
        for b in &samples {
            assert_eq!(a.compare(b), b.compare(a).reverse(), "{a:?} vs {b:?}");
        }
    }

    let white = Evaluation::win(Color::White);
    let black = Evaluation::win(Color::Black);
    let even = Evaluation::material(0);
    assert_eq!(white.compare(&white), Ordering::Equal);
    assert_eq!(white.compare(&even), Ordering::Greater);
    assert_eq!(white.compare(&black), Ordering::Greater);
    assert_eq!(even.compare(&white), Ordering::Less);
    assert_eq!(even.compare(&even), Ordering::Equal);
    assert_eq!(even.compare(&black), Ordering::Greater);
    assert_eq!(black.compare(&white), Ordering::Less);
    assert_eq!(black.compare(&even), Ordering::Less);
    assert_eq!(black.compare(&black), Ordering::Equal);
}

#[test]
fn test_decisive_outranks_any_material() {
    let huge = Evaluation::material(MATE_SCORE - 1);
    assert!(Evaluation::win(Color::White).is_better_for(&huge, Color::White));
    assert!(Evaluation::win(Color::Black).is_better_for(&huge, Color::Black));
    assert!(!huge.is_better_for(&Evaluation::win(Color::White), Color::White));
}

#[test]
fn test_same_side_wins_are_not_better() {
    let mut slow = Evaluation::win(Color::White);
    slow.score -= 1;
    assert!(!slow.is_better_for(&Evaluation::win(Color::White), Color::White));
    assert!(!Evaluation::win(Color::White).is_better_for(&slow, Color::White));
}

#[test]
fn test_draw_compares_as_even_material() {
    let draw = Evaluation::draw();
    assert_eq!(draw.compare(&Evaluation::material(0)), Ordering::Equal);
    assert!(draw.is_better_for(&Evaluation::material(-1), Color::White));
    assert!(draw.is_better_for(&Evaluation::material(1), Color::Black));
}

#[test]
fn test_static_evaluation() {
    let mate = evaluate_fen("3R3k/6pp/8/8/8/8/8/K7 b - - 1 1");
    assert_eq!(mate, Evaluation::win(Color::White));
    assert_eq!(mate.score, MATE_SCORE);

    let stalemate = evaluate_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(stalemate.is_draw);
    assert_eq!(stalemate.score, 0);
    assert_eq!(stalemate.winner, Winner::Undecided);

    // Kings cancel out; White is a rook up.
    let material = evaluate_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    assert_eq!(material, Evaluation::material(5));
    assert!(!material.is_decided());
}
