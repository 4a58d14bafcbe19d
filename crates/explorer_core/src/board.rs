use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FenError;
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Four independent castling-right bits.
///
/// Rights are tracked through move application but never consumed by the
/// move generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;

    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }
    pub fn insert(&mut self, bit: u8) {
        self.0 |= bit;
    }
    pub fn remove(&mut self, bit: u8) {
        self.0 &= !bit;
    }
    pub fn bits(self) -> u8 {
        self.0
    }

    /// The right lost when a piece leaves or is captured on `sq`, if any.
    fn touched_by(sq: Square) -> u8 {
        match (sq.file(), sq.rank()) {
            (0, 0) => Self::WHITE_QUEENSIDE,
            (7, 0) => Self::WHITE_KINGSIDE,
            (4, 0) => Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE,
            (0, 7) => Self::BLACK_QUEENSIDE,
            (7, 7) => Self::BLACK_KINGSIDE,
            (4, 7) => Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE,
            _ => 0,
        }
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (bit, c) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.has(bit) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// One chess position. Equality covers the board and every FEN field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Piece; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Position {
    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Position {
            board: [Piece::EMPTY; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::ALL;

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Piece::new(Color::White, kind);
            p.board[8 + f] = Piece::new(Color::White, PieceKind::Pawn);
            p.board[48 + f] = Piece::new(Color::Black, PieceKind::Pawn);
            p.board[56 + f] = Piece::new(Color::Black, kind);
        }
        p
    }

    /// Decodes Forsyth-Edwards Notation.
    ///
    /// The half-move clock and full-move number may be omitted; they default
    /// to 0 and 1.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let board_part = parts.next().ok_or(FenError::MissingField("placement"))?;
        let stm_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
        let castle_part = parts.next().ok_or(FenError::MissingField("castling"))?;
        let ep_part = parts.next().ok_or(FenError::MissingField("en passant"))?;
        let halfmove_part = parts.next().unwrap_or("0");
        let fullmove_part = parts.next().unwrap_or("1");

        let mut pos = Position::empty();

        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadPlacement(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if !(1..=8).contains(&d) {
                        return Err(FenError::BadPlacement(format!("bad run length {ch}")));
                    }
                    file += d as u8;
                } else {
                    let piece = Piece::from_fen_char(ch).ok_or(FenError::BadPiece(ch))?;
                    let sq = Square::new(file, rank).ok_or_else(|| {
                        FenError::BadPlacement(format!("too many files in rank {}", rank + 1))
                    })?;
                    pos.set_piece(sq, piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::BadPlacement(format!(
                        "too many files in rank {}",
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::BadPlacement(format!(
                    "not enough files in rank {}",
                    rank + 1
                )));
            }
        }

        pos.side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::BadSideToMove(stm_part.to_string())),
        };

        if castle_part != "-" {
            for c in castle_part.chars() {
                let bit = match c {
                    'K' => CastlingRights::WHITE_KINGSIDE,
                    'Q' => CastlingRights::WHITE_QUEENSIDE,
                    'k' => CastlingRights::BLACK_KINGSIDE,
                    'q' => CastlingRights::BLACK_QUEENSIDE,
                    _ => return Err(FenError::BadCastling(c)),
                };
                pos.castling.insert(bit);
            }
        }

        pos.en_passant = if ep_part == "-" {
            None
        } else {
            Some(
                ep_part
                    .parse()
                    .map_err(|_| FenError::BadEnPassant(ep_part.to_string()))?,
            )
        };

        pos.halfmove_clock = halfmove_part
            .parse()
            .map_err(|_| FenError::BadCounter(halfmove_part.to_string()))?;
        pos.fullmove_number = fullmove_part
            .parse()
            .map_err(|_| FenError::BadCounter(fullmove_part.to_string()))?;

        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut empties = 0;
            for file in 0..8u8 {
                let piece = self.board[rank as usize * 8 + file as usize];
                if piece.is_empty() {
                    empties += 1;
                    continue;
                }
                if empties > 0 {
                    out.push_str(&empties.to_string());
                    empties = 0;
                }
                out.push(piece.to_fen_char());
            }
            if empties > 0 {
                out.push_str(&empties.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self
            .en_passant
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{out} {side} {} {ep} {} {}",
            self.castling, self.halfmove_clock, self.fullmove_number
        )
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.board[sq.index()] = piece;
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::all().find(|&sq| self.piece_at(sq) == king)
    }

    /// Occupied squares with their pieces, file by file: a1, a2, ... a8, b1,
    /// ... h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8u8)
            .flat_map(|file| (0..8u8).filter_map(move |rank| Square::new(file, rank)))
            .map(move |sq| (sq, self.piece_at(sq)))
            .filter(|(_, piece)| !piece.is_empty())
    }

    /// Signed material sum over the whole board.
    pub fn material(&self) -> i32 {
        self.board.iter().map(|piece| piece.value()).sum()
    }

    /// The position reached by playing `mv`.
    ///
    /// The destination receives the promotion piece or the moved piece, the
    /// origin is cleared and the side to move flips. Castling rights, the
    /// en-passant target and the move counters are kept current; no rook
    /// is relocated and no en-passant victim is removed, since those moves
    /// are never generated.
    pub fn after(&self, mv: Move) -> Position {
        let mut next = *self;
        let moved = self.piece_at(mv.from);
        let captured = self.piece_at(mv.to);
        let mover = moved.color().unwrap_or(self.side_to_move);

        let placed = match mv.promotion {
            Some(kind) => Piece::new(mover, kind),
            None => moved,
        };
        next.set_piece(mv.to, placed);
        next.set_piece(mv.from, Piece::EMPTY);

        next.castling.remove(CastlingRights::touched_by(mv.from));
        next.castling.remove(CastlingRights::touched_by(mv.to));

        let is_pawn = moved.kind() == Some(PieceKind::Pawn);
        next.en_passant = None;
        if is_pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            next.en_passant = mv.from.offset(0, mover.forward());
        }

        next.halfmove_clock = if is_pawn || !captured.is_empty() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if self.side_to_move == Color::Black {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        next.side_to_move = self.side_to_move.other();
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

/// Board diagram, rank 8 at the top.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let piece = self.board[rank as usize * 8 + file as usize];
                write!(f, "{}", piece.to_fen_char())?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
