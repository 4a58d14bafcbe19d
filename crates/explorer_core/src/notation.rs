//! Move notation: coordinate (`e2e4`, `e7e8q`) and algebraic (`Nbd7`, `exd5`,
//! `e8=Q+`).
//!
//! Algebraic rendering needs the legal moves of the position for
//! disambiguation and the explored child for the check suffix, so it works
//! through a [`SearchContext`].

use crate::arena::{MoveRecord, PositionId};
use crate::board::Position;
use crate::error::{ExploreError, ExploreResult};
use crate::search::SearchContext;
use crate::types::{Move, PieceKind, Square};

/// Which part of the origin square an algebraic move must spell out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disambiguation {
    None,
    File,
    Rank,
    Both,
}

/// Picks the shortest origin qualifier that separates `mv` from the other
/// legal moves of the same piece kind to the same square.
///
/// The file is preferred, then the rank, then both.
pub fn disambiguation(position: &Position, mv: Move, legal: &[Move]) -> Disambiguation {
    let kind = position.piece_at(mv.from).kind();
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| other.to == mv.to && other.from != mv.from)
        .filter(|other| position.piece_at(other.from).kind() == kind)
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        Disambiguation::None
    } else if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        Disambiguation::File
    } else if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        Disambiguation::Rank
    } else {
        Disambiguation::Both
    }
}

/// Algebraic text of `mv` without the check suffix.
pub fn algebraic_body(position: &Position, mv: Move, legal: &[Move]) -> String {
    let mut out = String::new();
    let capture = !position.piece_at(mv.to).is_empty();
    let kind = position.piece_at(mv.from).kind().unwrap_or(PieceKind::Pawn);

    if kind == PieceKind::Pawn {
        if capture {
            out.push(mv.from.file_char());
        }
    } else {
        out.push(kind.letter());
        match disambiguation(position, mv, legal) {
            Disambiguation::None => {}
            Disambiguation::File => out.push(mv.from.file_char()),
            Disambiguation::Rank => out.push(mv.from.rank_char()),
            Disambiguation::Both => {
                out.push(mv.from.file_char());
                out.push(mv.from.rank_char());
            }
        }
    }
    if capture {
        out.push('x');
    }
    out.push_str(&mv.to.to_string());
    if let Some(promo) = mv.promotion {
        out.push('=');
        out.push(promo.letter());
    }
    out
}

/// Full algebraic text of a legal move of `id`, with `+` or `#` appended
/// when the move gives check or mate.
pub fn to_algebraic(ctx: &mut SearchContext, id: PositionId, mv: Move) -> ExploreResult<String> {
    let records: Vec<MoveRecord> = ctx.legal_moves(id)?.to_vec();
    let record = records
        .iter()
        .find(|r| r.mv == mv)
        .copied()
        .ok_or_else(|| ExploreError::IllegalMove {
            notation: mv.to_string(),
        })?;
    let legal: Vec<Move> = records.iter().map(|r| r.mv).collect();
    let mut text = algebraic_body(ctx.position(id)?, mv, &legal);

    let child = ctx.explore(record.leads_to)?;
    if child.checkmate {
        text.push('#');
    } else if child.in_check {
        text.push('+');
    }
    Ok(text)
}

/// Resolves coordinate notation against the legal moves of `id`.
///
/// A bare pawn move to the last rank is read as a queen promotion.
pub fn parse_coordinate(
    ctx: &mut SearchContext,
    id: PositionId,
    text: &str,
) -> ExploreResult<MoveRecord> {
    let illegal = || ExploreError::IllegalMove {
        notation: text.to_string(),
    };
    let text = text.trim();
    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        return Err(illegal());
    }
    let from: Square = text[0..2].parse().map_err(|_| illegal())?;
    let to: Square = text[2..4].parse().map_err(|_| illegal())?;
    let promotion = match text[4..].chars().next() {
        Some(c) => Some(PieceKind::from_letter(c).ok_or_else(illegal)?),
        None => None,
    };

    let records = ctx.legal_moves(id)?;
    let wanted = |r: &&MoveRecord| r.mv.from == from && r.mv.to == to;
    let found = match promotion {
        Some(kind) => records
            .iter()
            .filter(wanted)
            .find(|r| r.mv.promotion == Some(kind)),
        None => records
            .iter()
            .filter(wanted)
            .find(|r| matches!(r.mv.promotion, None | Some(PieceKind::Queen))),
    };
    found.copied().ok_or_else(illegal)
}

/// Replays `line` from `root` and renders each move algebraically.
pub fn line_to_algebraic(
    ctx: &mut SearchContext,
    root: PositionId,
    line: &[Move],
) -> ExploreResult<Vec<String>> {
    let mut out = Vec::with_capacity(line.len());
    let mut at = root;
    for &mv in line {
        out.push(to_algebraic(ctx, at, mv)?);
        let next = ctx
            .legal_moves(at)?
            .iter()
            .find(|r| r.mv == mv)
            .map(|r| r.leads_to)
            .ok_or_else(|| ExploreError::IllegalMove {
                notation: mv.to_string(),
            })?;
        at = next;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
