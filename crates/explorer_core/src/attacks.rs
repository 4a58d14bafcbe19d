//! Check detection by ray casting from the attacked square.
//!
//! Each of the eight queen rays is walked until the first piece; that piece
//! attacks the square when it is an enemy slider matching the ray's geometry,
//! or an enemy king one step away. Knight leaps and the two pawn diagonals are
//! probed directly.

use crate::board::Position;
use crate::geometry::{pawn_capture_directions, Direction, KNIGHT_LEAPS, QUEEN_DIRECTIONS};
use crate::types::{Color, Piece, PieceKind, Square};

impl Position {
    /// Whether `target` is attacked by the opponent of `defender`.
    pub fn is_attacked(&self, target: Square, defender: Color) -> bool {
        for dir in QUEEN_DIRECTIONS {
            let mut sq = target;
            let mut distance = 0u8;
            while let Some(next) = dir.step(sq) {
                sq = next;
                distance += 1;
                let found = self.piece_at(sq);
                if found.is_empty() {
                    continue;
                }
                if found.color() == Some(defender) {
                    break;
                }
                let attacks = match found.kind() {
                    Some(PieceKind::Queen) => true,
                    Some(PieceKind::Rook) => dir.is_orthogonal(),
                    Some(PieceKind::Bishop) => dir.is_diagonal(),
                    Some(PieceKind::King) => distance == 1,
                    _ => false,
                };
                if attacks {
                    return true;
                }
                break;
            }
        }

        let attacker = defender.other();
        let enemy_at = |dirs: &[Direction], kind: PieceKind| {
            dirs.iter()
                .filter_map(|d| d.step(target))
                .any(|sq| self.piece_at(sq) == Piece::new(attacker, kind))
        };

        // A pawn attacks from the diagonals the defender's own pawns would capture along.
        enemy_at(&KNIGHT_LEAPS, PieceKind::Knight)
            || enemy_at(pawn_capture_directions(defender), PieceKind::Pawn)
    }

    /// Whether `color`'s king is attacked. A side without a king is never in check.
    pub fn king_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(ksq) => self.is_attacked(ksq, color),
            None => false,
        }
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.king_in_check(self.side_to_move)
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
