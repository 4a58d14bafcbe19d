//! Legal move generation.
//!
//! Each piece of the side to move walks the passes of its movement table.
//! Every candidate is played into a scratch child position and kept only if
//! the mover's king is not attacked there; the child travels with the move so
//! callers never replay it.

use crate::board::Position;
use crate::geometry::move_passes;
use crate::types::*;

/// A legal move and the position it produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub mv: Move,
    pub child: Position,
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_children_into(pos, &mut out);
    out.into_iter().map(|c| c.mv).collect()
}

/// Fills `out` with every legal move of the side to move, in generation
/// order, and returns how many pseudo-legal candidates were rejected.
///
/// Squares are scanned file by file (a1, a2, ... h8); within a piece, directions follow the movement
/// table; promotions fan out as rook, knight, bishop, queen.
pub fn legal_children_into(pos: &Position, out: &mut Vec<Candidate>) -> u64 {
    out.clear();
    scan(pos, out, false)
}

/// Whether the side to move has any legal move. Stops after the first piece
/// that has one.
pub fn has_legal_move(pos: &Position) -> bool {
    let mut out = Vec::new();
    scan(pos, &mut out, true);
    !out.is_empty()
}

fn scan(pos: &Position, out: &mut Vec<Candidate>, first_only: bool) -> u64 {
    let mut generator = Generator {
        pos,
        mover: pos.side_to_move,
        out,
        rejected: 0,
    };
    for (from, piece) in pos.pieces() {
        if piece.color() != Some(generator.mover) {
            continue;
        }
        if let Some(kind) = piece.kind() {
            generator.piece_moves(from, kind);
        }
        if first_only && !generator.out.is_empty() {
            break;
        }
    }
    generator.rejected
}

struct Generator<'a> {
    pos: &'a Position,
    mover: Color,
    out: &'a mut Vec<Candidate>,
    rejected: u64,
}

impl Generator<'_> {
    fn piece_moves(&mut self, from: Square, kind: PieceKind) {
        for pass in move_passes(self.mover, kind, from) {
            for &dir in pass.directions {
                let mut to = from;
                for _ in 0..pass.max_distance {
                    to = match dir.step(to) {
                        Some(next) => next,
                        None => break,
                    };
                    let target = self.pos.piece_at(to);
                    if target.is_empty() {
                        if !pass.quiet {
                            break;
                        }
                        self.emit(from, to, kind);
                        continue;
                    }
                    if target.color() != Some(self.mover) && pass.captures {
                        self.emit(from, to, kind);
                    }
                    break;
                }
            }
        }
    }

    fn emit(&mut self, from: Square, to: Square, kind: PieceKind) {
        if kind == PieceKind::Pawn && to.rank() == self.mover.promotion_rank() {
            for promo in PieceKind::PROMOTIONS {
                self.try_move(Move::promoting(from, to, promo));
            }
        } else {
            self.try_move(Move::new(from, to));
        }
    }

    fn try_move(&mut self, mv: Move) {
        let child = self.pos.after(mv);
        if child.king_in_check(self.mover) {
            self.rejected += 1;
        } else {
            self.out.push(Candidate { mv, child });
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
