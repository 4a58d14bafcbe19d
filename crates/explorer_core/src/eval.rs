//! Static evaluation and the ordering used to pick the best child.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::explore::Status;
use crate::types::Color;

/// Score magnitude of a decided game.
pub const MATE_SCORE: i32 = 99_999_999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    White,
    Black,
    Undecided,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Material balance, positive for White, or `±MATE_SCORE` once decided.
    pub score: i32,
    pub winner: Winner,
    pub is_draw: bool,
}

impl Evaluation {
    pub fn material(score: i32) -> Self {
        Self {
            score,
            winner: Winner::Undecided,
            is_draw: false,
        }
    }

    pub fn win(color: Color) -> Self {
        let score = match color {
            Color::White => MATE_SCORE,
            Color::Black => -MATE_SCORE,
        };
        Self {
            score,
            winner: color.into(),
            is_draw: false,
        }
    }

    pub fn draw() -> Self {
        Self {
            score: 0,
            winner: Winner::Undecided,
            is_draw: true,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner != Winner::Undecided
    }

    /// Orders two evaluations from White's point of view.
    ///
    /// A White win beats everything undecided, which beats a Black win.
    /// Undecided results compare by score. Two wins for the same side are
    /// equal regardless of score.
    pub fn compare(&self, other: &Evaluation) -> Ordering {
        self.key().cmp(&other.key())
    }

    /// Whether `self` is strictly better than `other` for `side`.
    pub fn is_better_for(&self, other: &Evaluation, side: Color) -> bool {
        match side {
            Color::White => self.compare(other) == Ordering::Greater,
            Color::Black => self.compare(other) == Ordering::Less,
        }
    }

    fn key(&self) -> (i8, i32) {
        match self.winner {
            Winner::White => (1, 0),
            Winner::Undecided => (0, self.score),
            Winner::Black => (-1, 0),
        }
    }
}

/// Evaluates a classified position without looking ahead.
///
/// Checkmate is a win for the side not to move, stalemate a draw, anything
/// else the signed material sum.
pub fn evaluate(position: &Position, status: Status) -> Evaluation {
    if status.checkmate {
        Evaluation::win(position.side_to_move.other())
    } else if status.stalemate {
        Evaluation::draw()
    } else {
        Evaluation::material(position.material())
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
