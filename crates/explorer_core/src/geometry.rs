//! Direction table and per-piece movement rules.
//!
//! Movement is described as data: each piece kind maps to one or two
//! [`MovePass`]es naming the directions it walks, how far it may travel, and
//! whether it may land on empty squares and on enemy pieces. The generator and
//! the check detector both read these tables; neither branches on piece kind
//! beyond the lookup.

use crate::types::{Color, PieceKind, Square};

/// A single-step square transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
    /// Knight leaps, named by the long leg first.
    RightUp,
    UpRightLeap,
    RightDown,
    DownRightLeap,
    LeftUp,
    UpLeftLeap,
    LeftDown,
    DownLeftLeap,
}

impl Direction {
    /// `(file, rank)` delta of one step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpRight => (1, 1),
            Direction::UpLeft => (-1, 1),
            Direction::DownRight => (1, -1),
            Direction::DownLeft => (-1, -1),
            Direction::RightUp => (2, 1),
            Direction::UpRightLeap => (1, 2),
            Direction::RightDown => (2, -1),
            Direction::DownRightLeap => (1, -2),
            Direction::LeftUp => (-2, 1),
            Direction::UpLeftLeap => (-1, 2),
            Direction::LeftDown => (-2, -1),
            Direction::DownLeftLeap => (-1, -2),
        }
    }

    #[inline]
    pub fn step(self, from: Square) -> Option<Square> {
        let (df, dr) = self.delta();
        from.offset(df, dr)
    }

    pub fn is_orthogonal(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Down | Direction::Left | Direction::Right
        )
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpRight | Direction::UpLeft | Direction::DownRight | Direction::DownLeft
        )
    }
}

pub const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::UpRight,
    Direction::UpLeft,
    Direction::DownRight,
    Direction::DownLeft,
];

pub const QUEEN_DIRECTIONS: [Direction; 8] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::UpRight,
    Direction::UpLeft,
    Direction::DownRight,
    Direction::DownLeft,
];

pub const KNIGHT_LEAPS: [Direction; 8] = [
    Direction::RightUp,
    Direction::UpRightLeap,
    Direction::RightDown,
    Direction::DownRightLeap,
    Direction::LeftUp,
    Direction::UpLeftLeap,
    Direction::LeftDown,
    Direction::DownLeftLeap,
];

const WHITE_PAWN_ADVANCE: [Direction; 1] = [Direction::Up];
const BLACK_PAWN_ADVANCE: [Direction; 1] = [Direction::Down];
const WHITE_PAWN_CAPTURES: [Direction; 2] = [Direction::UpRight, Direction::UpLeft];
const BLACK_PAWN_CAPTURES: [Direction; 2] = [Direction::DownRight, Direction::DownLeft];

/// Longest walk possible on an 8x8 board.
pub const UNBOUNDED: u8 = 7;

/// Forward diagonals a pawn of `color` captures along.
pub fn pawn_capture_directions(color: Color) -> &'static [Direction] {
    match color {
        Color::White => &WHITE_PAWN_CAPTURES,
        Color::Black => &BLACK_PAWN_CAPTURES,
    }
}

/// One walk over a set of directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovePass {
    pub directions: &'static [Direction],
    /// Whether the walk may stop on an empty square.
    pub quiet: bool,
    /// Whether the walk may stop on an enemy piece.
    pub captures: bool,
    pub max_distance: u8,
}

impl MovePass {
    const fn full(directions: &'static [Direction], max_distance: u8) -> Self {
        Self {
            directions,
            quiet: true,
            captures: true,
            max_distance,
        }
    }
}

/// The passes a `kind` piece of `color` standing on `from` walks.
///
/// Pawns get a quiet advance (two squares from their starting rank) and a
/// separate capture pass; every other piece has a single pass.
pub fn move_passes(color: Color, kind: PieceKind, from: Square) -> impl Iterator<Item = MovePass> {
    let (first, second) = match kind {
        PieceKind::Rook => (MovePass::full(&ROOK_DIRECTIONS, UNBOUNDED), None),
        PieceKind::Bishop => (MovePass::full(&BISHOP_DIRECTIONS, UNBOUNDED), None),
        PieceKind::Queen => (MovePass::full(&QUEEN_DIRECTIONS, UNBOUNDED), None),
        PieceKind::King => (MovePass::full(&QUEEN_DIRECTIONS, 1), None),
        PieceKind::Knight => (MovePass::full(&KNIGHT_LEAPS, 1), None),
        PieceKind::Pawn => {
            let advance: &'static [Direction] = match color {
                Color::White => &WHITE_PAWN_ADVANCE,
                Color::Black => &BLACK_PAWN_ADVANCE,
            };
            let distance = if from.rank() == color.pawn_rank() { 2 } else { 1 };
            (
                MovePass {
                    directions: advance,
                    quiet: true,
                    captures: false,
                    max_distance: distance,
                },
                Some(MovePass {
                    directions: pawn_capture_directions(color),
                    quiet: false,
                    captures: true,
                    max_distance: 1,
                }),
            )
        }
    };
    std::iter::once(first).chain(second)
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;
