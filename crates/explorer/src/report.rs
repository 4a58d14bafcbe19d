//! Command results and their text and JSON renderings

use serde::Serialize;
use tracing::{info, warn};

use explorer_core::{
    divide, line_to_algebraic, to_algebraic, Color, Evaluation, Position, PositionId,
    SearchContext, SearchResult, SearchStats, Winner,
};

use crate::error::ExplorerError;
use crate::positions::BatchEntry;

/// How moves are spelled in reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveStyle {
    #[default]
    Algebraic,
    Coordinate,
}

/// Board, status flags and legal moves of one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionReport {
    pub fen: String,
    pub side_to_move: Color,
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub material: i32,
    pub moves: Vec<String>,
    #[serde(skip)]
    pub board: String,
}

impl PositionReport {
    pub fn build(
        ctx: &mut SearchContext,
        id: PositionId,
        style: MoveStyle,
    ) -> Result<Self, ExplorerError> {
        let exploration = ctx.explore(id)?;
        let position = *ctx.position(id)?;
        let legal: Vec<_> = ctx.legal_moves(id)?.iter().map(|r| r.mv).collect();

        let mut moves = Vec::with_capacity(legal.len());
        for mv in legal {
            moves.push(match style {
                MoveStyle::Coordinate => mv.to_string(),
                MoveStyle::Algebraic => to_algebraic(ctx, id, mv)?,
            });
        }

        Ok(Self {
            fen: position.to_fen(),
            side_to_move: position.side_to_move,
            in_check: exploration.in_check,
            checkmate: exploration.checkmate,
            stalemate: exploration.stalemate,
            material: position.material(),
            moves,
            board: position.to_string(),
        })
    }

    pub fn status(&self) -> &'static str {
        if self.checkmate {
            "checkmate"
        } else if self.stalemate {
            "stalemate"
        } else if self.in_check {
            "in check"
        } else {
            "-"
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.board));
        out.push_str(&format!("FEN: {}\n", self.fen));
        out.push_str(&format!("Side to move: {:?}\n", self.side_to_move));
        out.push_str(&format!("Status: {}\n", self.status()));
        out.push_str(&format!("Material: {:+}\n", self.material));
        out.push_str(&format!(
            "Legal moves ({}): {}",
            self.moves.len(),
            self.moves.join(" ")
        ));
        out
    }
}

/// One-line reading of an evaluation
pub fn evaluation_summary(evaluation: &Evaluation) -> String {
    match evaluation.winner {
        Winner::White => "White mates".to_string(),
        Winner::Black => "Black mates".to_string(),
        Winner::Undecided if evaluation.is_draw => "Draw (stalemate)".to_string(),
        Winner::Undecided if evaluation.score == 0 => "0 (level material)".to_string(),
        Winner::Undecided => format!("{:+} (material)", evaluation.score),
    }
}

/// Numbers a line of moves starting from `position`: `1. e4 e5 2. Nf3`, or
/// `1... e5 2. Nf3` when Black moves first.
pub fn numbered_line(position: &Position, moves: &[String]) -> String {
    let mut out = String::new();
    let mut number = position.fullmove_number;
    let mut side = position.side_to_move;
    for (i, mv) in moves.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match side {
            Color::White => out.push_str(&format!("{number}. ")),
            Color::Black if i == 0 => out.push_str(&format!("{number}... ")),
            Color::Black => {}
        }
        out.push_str(mv);
        if side == Color::Black {
            number = number.saturating_add(1);
        }
        side = side.other();
    }
    out
}

/// Outcome of a search, with the best line in algebraic form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub fen: String,
    pub depth: u8,
    pub score: i32,
    pub winner: Winner,
    pub is_draw: bool,
    pub best_move: Option<String>,
    pub principal_variation: Vec<String>,
    pub stats: SearchStats,
    #[serde(skip)]
    pub numbered_line: String,
}

impl SearchReport {
    pub fn build(
        ctx: &mut SearchContext,
        root: PositionId,
        result: &SearchResult,
    ) -> Result<Self, ExplorerError> {
        let position = *ctx.position(root)?;
        let line = match &result.principal_variation {
            Some(moves) => line_to_algebraic(ctx, root, moves)?,
            None => Vec::new(),
        };
        Ok(Self {
            fen: position.to_fen(),
            depth: result.depth,
            score: result.evaluation.score,
            winner: result.evaluation.winner,
            is_draw: result.evaluation.is_draw,
            best_move: line.first().cloned(),
            numbered_line: numbered_line(&position, &line),
            principal_variation: line,
            stats: result.stats,
        })
    }

    pub fn evaluation(&self) -> Evaluation {
        Evaluation {
            score: self.score,
            winner: self.winner,
            is_draw: self.is_draw,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("FEN: {}\n", self.fen));
        out.push_str(&format!("Depth: {}\n", self.depth));
        out.push_str(&format!(
            "Evaluation: {}\n",
            evaluation_summary(&self.evaluation())
        ));
        if let Some(best) = &self.best_move {
            out.push_str(&format!("Best move: {best}\n"));
            out.push_str(&format!("Line: {}\n", self.numbered_line));
        }
        out.push_str(&diagnostics(&self.stats));
        out
    }
}

/// Allocation and exploration counters as one line
pub fn diagnostics(stats: &SearchStats) -> String {
    format!(
        "Nodes: {}, explored: {}, allocated: {} positions / {} moves, rejected: {}",
        stats.nodes_visited,
        stats.positions_explored,
        stats.positions_allocated,
        stats.moves_allocated,
        stats.candidates_rejected
    )
}

/// Perft total and, optionally, the count below each root move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerftReport {
    pub fen: String,
    pub depth: u8,
    pub nodes: u64,
    pub divide: Vec<(String, u64)>,
}

impl PerftReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (mv, nodes) in &self.divide {
            out.push_str(&format!("{mv}: {nodes}\n"));
        }
        if !self.divide.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("Depth {}: {} nodes", self.depth, self.nodes));
        out
    }
}

/// One line of a batch run: a report or the reason it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    pub line: usize,
    pub fen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SearchReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub depth: u8,
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn failures(&self) -> usize {
        self.items.iter().filter(|item| item.error.is_some()).count()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Batch: {} positions, depth {} ===\n",
            self.items.len(),
            self.depth
        ));
        for item in &self.items {
            match (&item.report, &item.error) {
                (Some(report), _) => {
                    out.push_str(&format!(
                        "{:>4}: {:<24} {}\n",
                        item.line,
                        evaluation_summary(&report.evaluation()),
                        report.numbered_line
                    ));
                }
                (None, Some(error)) => {
                    out.push_str(&format!("{:>4}: error: {error}\n", item.line));
                }
                (None, None) => {}
            }
        }
        out.push_str(&format!("{} failed", self.failures()));
        out
    }
}

/// Decodes `fen`, explores it, and reports its legal moves.
pub fn analyze_moves(
    ctx: &mut SearchContext,
    fen: &str,
    style: MoveStyle,
) -> Result<PositionReport, ExplorerError> {
    let root = ctx.insert_root(Position::from_fen(fen)?)?;
    PositionReport::build(ctx, root, style)
}

/// Decodes `fen` and searches it `depth` plies deep.
pub fn analyze_search(
    ctx: &mut SearchContext,
    fen: &str,
    depth: u8,
) -> Result<SearchReport, ExplorerError> {
    let root = ctx.insert_root(Position::from_fen(fen)?)?;
    let result = ctx.search(root, depth)?;
    SearchReport::build(ctx, root, &result)
}

pub fn analyze_perft(
    ctx: &mut SearchContext,
    fen: &str,
    depth: u8,
    split: bool,
) -> Result<PerftReport, ExplorerError> {
    let root = ctx.insert_root(Position::from_fen(fen)?)?;
    let per_move = divide(ctx, root, depth)?;
    let nodes = if depth == 0 {
        1
    } else {
        per_move.iter().map(|&(_, n)| n).sum()
    };
    let divide = if split {
        per_move.into_iter().map(|(mv, n)| (mv.to_string(), n)).collect()
    } else {
        Vec::new()
    };
    Ok(PerftReport {
        fen: fen.to_string(),
        depth,
        nodes,
        divide,
    })
}

/// Searches every entry in a fresh arena generation. A failing entry is
/// recorded and the batch continues.
pub fn run_batch(ctx: &mut SearchContext, entries: &[BatchEntry], depth: u8) -> BatchReport {
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        ctx.reset();
        info!(line = entry.line, fen = %entry.fen, "searching batch position");
        let item = match analyze_search(ctx, &entry.fen, depth) {
            Ok(report) => BatchItem {
                line: entry.line,
                fen: entry.fen.clone(),
                report: Some(report),
                error: None,
            },
            Err(err) => {
                warn!(line = entry.line, error = %err, "batch position failed");
                BatchItem {
                    line: entry.line,
                    fen: entry.fen.clone(),
                    report: None,
                    error: Some(err.to_string()),
                }
            }
        };
        items.push(item);
    }
    ctx.reset();
    BatchReport { depth, items }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
