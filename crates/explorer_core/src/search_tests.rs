use super::*;
use crate::error::ExploreError;
use crate::eval::{Winner, MATE_SCORE};
use crate::types::Color;

fn context() -> SearchContext {
    SearchContext::default()
}

fn search_fen(fen: &str, depth: u8) -> SearchResult {
    let mut ctx = context();
    let root = ctx.insert_root(Position::from_fen(fen).unwrap()).unwrap();
    ctx.search(root, depth).unwrap()
}

fn line(result: &SearchResult) -> Vec<String> {
    result
        .principal_variation
        .as_ref()
        .unwrap()
        .iter()
        .map(|m| m.to_string())
        .collect()
}

#[test]
fn test_depth_zero_is_static() {
    let result = search_fen("7k/6pp/8/8/8/8/8/K2R4 w - - 0 1", 0);
    assert_eq!(result.evaluation, Evaluation::material(3));
    assert_eq!(result.principal_variation, Some(vec![]));
    assert_eq!(result.stats.nodes_visited, 1);
}

#[test]
fn test_finds_back_rank_mate() {
    let result = search_fen("7k/6pp/8/8/8/8/8/K2R4 w - - 0 1", 1);
    assert_eq!(result.evaluation.winner, Winner::White);
    assert_eq!(result.evaluation.score, MATE_SCORE);
    assert_eq!(line(&result), ["d1d8"]);
    assert_eq!(result.best_move().map(|m| m.to_string()).as_deref(), Some("d1d8"));
}

#[test]
fn test_mate_line_is_not_extended_past_terminal() {
    let result = search_fen("7k/6pp/8/8/8/8/8/K2R4 w - - 0 1", 3);
    assert_eq!(result.evaluation, Evaluation::win(Color::White));
    assert_eq!(line(&result), ["d1d8"]);
}

#[test]
fn test_black_finds_mate() {
    let result = search_fen("k2r4/8/8/8/8/8/6PP/7K b - - 0 1", 1);
    assert_eq!(result.evaluation, Evaluation::win(Color::Black));
    assert_eq!(result.evaluation.score, -MATE_SCORE);
    assert_eq!(line(&result), ["d8d1"]);
}

#[test]
fn test_first_move_wins_ties() {
    // Bare kings: every reply keeps material level.
    let result = search_fen("k7/8/8/8/8/8/8/7K w - - 0 1", 1);
    assert_eq!(result.evaluation, Evaluation::material(0));
    assert_eq!(line(&result), ["h1h2"]);
}

#[test]
fn test_prefers_winning_material() {
    let result = search_fen("4k3/8/8/8/8/8/q7/R3K3 w - - 0 1", 1);
    assert_eq!(result.evaluation, Evaluation::material(5));
    assert_eq!(line(&result), ["a1a2"]);
}

#[test]
fn test_line_is_root_first() {
    let result = search_fen("4k3/8/8/8/8/8/q7/R3K3 w - - 0 1", 2);
    let moves = result.principal_variation.unwrap();
    assert_eq!(moves.len(), 2);

    // Replaying the line from the root is legal at every step.
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/q7/R3K3 w - - 0 1").unwrap();
    for mv in moves {
        assert!(crate::movegen::legal_moves(&pos).contains(&mv));
        pos = pos.after(mv);
    }
}

#[test]
fn test_terminal_root_is_not_searched() {
    let result = search_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3);
    assert_eq!(result.evaluation, Evaluation::draw());
    assert_eq!(result.principal_variation, Some(vec![]));
    assert_eq!(result.stats.nodes_visited, 1);
}

#[test]
fn test_search_is_deterministic() {
    let fen = "r1b2k1r/ppp1bppp/8/1B1Q4/5q2/2P5/PPP2PPP/R3R1K1 w - - 1 20";
    let a = search_fen(fen, 2);
    let b = search_fen(fen, 2);
    assert_eq!(a, b);
}

#[test]
fn test_stats_cover_the_whole_tree() {
    let result = search_fen(crate::board::STARTPOS_FEN, 1);
    assert_eq!(result.stats.nodes_visited, 21);
    // The twenty leaves are classified, not explored.
    assert_eq!(result.stats.positions_explored, 1);
    assert_eq!(result.stats.positions_allocated, 1 + 20);
    assert_eq!(result.stats.moves_allocated, 20);
}

#[test]
fn test_default_limits_cover_four_plies() {
    let result = search_fen(crate::board::STARTPOS_FEN, 4);
    assert_eq!(result.evaluation.winner, Winner::Undecided);
    assert_eq!(result.principal_variation.as_ref().map(Vec::len), Some(4));
    assert_eq!(result.stats.nodes_visited, 1 + 20 + 400 + 8902 + 197_281);
    assert_eq!(result.stats.positions_explored, 1 + 20 + 400 + 8902);
    assert_eq!(result.stats.positions_allocated, 1 + 20 + 400 + 8902 + 197_281);
}

#[test]
fn test_leaf_mate_is_scored_without_exploring() {
    // Fool's mate one ply away.
    let result = search_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2", 1);
    assert_eq!(result.evaluation, Evaluation::win(Color::Black));
    assert_eq!(line(&result), ["d8h4"]);
    assert_eq!(result.stats.positions_explored, 1);
}

#[test]
fn test_line_can_be_disabled() {
    let config = SearchConfig {
        depth: 1,
        principal_variation: false,
    };
    let mut ctx = SearchContext::new(config, ArenaLimits::default());
    let root = ctx
        .insert_root(Position::from_fen("7k/6pp/8/8/8/8/8/K2R4 w - - 0 1").unwrap())
        .unwrap();
    let result = ctx.search_configured(root).unwrap();
    assert_eq!(result.principal_variation, None);
    assert_eq!(result.best_move(), None);
    assert_eq!(result.evaluation.winner, Winner::White);
}

#[test]
fn test_reset_invalidates_roots() {
    let mut ctx = context();
    let root = ctx.insert_root(Position::startpos()).unwrap();
    ctx.search(root, 1).unwrap();
    ctx.reset();

    assert!(matches!(
        ctx.search(root, 1),
        Err(ExploreError::StaleHandle { .. })
    ));
    assert!(matches!(
        ctx.search(root, 0),
        Err(ExploreError::StaleHandle { .. })
    ));
    // Failed visits are not counted.
    assert_eq!(ctx.stats(), SearchStats::default());
}

#[test]
fn test_exhaustion_fails_the_search() {
    let limits = ArenaLimits {
        initial_positions: 16,
        max_positions: 100,
        initial_moves: 16,
        max_moves: 100,
    };
    let mut ctx = SearchContext::new(SearchConfig::default(), limits);
    let root = ctx.insert_root(Position::startpos()).unwrap();
    assert!(matches!(
        ctx.search(root, 2),
        Err(ExploreError::ArenaExhausted { .. })
    ));
}

#[test]
fn test_legal_moves_and_static_evaluation() {
    let mut ctx = context();
    let root = ctx.insert_root(Position::startpos()).unwrap();
    assert_eq!(ctx.legal_moves(root).unwrap().len(), 20);
    assert_eq!(ctx.evaluate(root).unwrap(), Evaluation::material(0));
}
