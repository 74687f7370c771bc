//! Moves packed into 16 bits.

use std::fmt;

use crate::board::Board;
use crate::error::MoveParseError;
use crate::movegen::generate_legal_moves;
use crate::piece::PieceKind;
use crate::square::Square;

const SRC_MASK: u16 = 0x003F;
const DST_SHIFT: u16 = 6;
const PROMO_SHIFT: u16 = 12;
const KIND_SHIFT: u16 = 14;

/// The category of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// The piece a pawn promotes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotionPiece {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl PromotionPiece {
    /// Strongest first, so move lists try the queen before the underpromotions.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Knight,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
    ];

    pub const fn to_piece_kind(self) -> PieceKind {
        match self {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }

    /// UCI suffix letter.
    pub const fn uci_char(self) -> char {
        self.to_piece_kind().fen_char()
    }
}

/// A move encoded in 16 bits.
///
/// ```text
/// bits  0-5:  source square
/// bits  6-11: destination square
/// bits 12-13: promotion piece (Knight, Bishop, Rook, Queen)
/// bits 14-15: move kind (Normal, Promotion, EnPassant, Castling)
/// ```
///
/// Castling is encoded as the king's two-square step.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// "No move". A1 to A1 is never legal, so the sentinel cannot collide.
    pub const NULL: Move = Move(0);

    const fn pack(source: Square, dest: Square, promo: u16, kind: MoveKind) -> Move {
        Move(
            source.index() as u16
                | (dest.index() as u16) << DST_SHIFT
                | promo << PROMO_SHIFT
                | (kind as u16) << KIND_SHIFT,
        )
    }

    /// A normal move (quiet, capture, or double pawn push).
    pub const fn new(source: Square, dest: Square) -> Move {
        Move::pack(source, dest, 0, MoveKind::Normal)
    }

    pub const fn new_promotion(source: Square, dest: Square, promo: PromotionPiece) -> Move {
        Move::pack(source, dest, promo as u16, MoveKind::Promotion)
    }

    pub const fn new_en_passant(source: Square, dest: Square) -> Move {
        Move::pack(source, dest, 0, MoveKind::EnPassant)
    }

    pub const fn new_castle(king_src: Square, king_dst: Square) -> Move {
        Move::pack(king_src, king_dst, 0, MoveKind::Castling)
    }

    /// Rebuild a move from [`Move::raw`].
    pub const fn from_raw(bits: u16) -> Move {
        Move(bits)
    }

    /// The packed 16-bit value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn source(self) -> Square {
        Square::from_index_unchecked((self.0 & SRC_MASK) as u8)
    }

    pub const fn dest(self) -> Square {
        Square::from_index_unchecked(((self.0 >> DST_SHIFT) & SRC_MASK) as u8)
    }

    pub const fn kind(self) -> MoveKind {
        match self.0 >> KIND_SHIFT {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        }
    }

    /// The promoted-to piece, for promotion moves only.
    pub const fn promotion(self) -> Option<PromotionPiece> {
        if !self.is_promotion() {
            return None;
        }
        Some(match (self.0 >> PROMO_SHIFT) & 0b11 {
            0 => PromotionPiece::Knight,
            1 => PromotionPiece::Bishop,
            2 => PromotionPiece::Rook,
            _ => PromotionPiece::Queen,
        })
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    pub const fn is_promotion(self) -> bool {
        matches!(self.kind(), MoveKind::Promotion)
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind(), MoveKind::EnPassant)
    }

    pub const fn is_castle(self) -> bool {
        matches!(self.kind(), MoveKind::Castling)
    }

    /// Resolve a UCI long-algebraic move (`e2e4`, `e7e8q`) against the legal moves of `board`.
    pub fn from_uci(text: &str, board: &Board) -> Result<Move, MoveParseError> {
        let malformed = || MoveParseError::Malformed(text.to_string());
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(malformed());
        }
        let source = Square::from_algebraic(&text[0..2]).ok_or_else(malformed)?;
        let dest = Square::from_algebraic(&text[2..4]).ok_or_else(malformed)?;
        let promo = match text[4..].chars().next() {
            None => None,
            Some(c) => Some(
                PromotionPiece::ALL
                    .into_iter()
                    .find(|p| p.uci_char() == c)
                    .ok_or_else(malformed)?,
            ),
        };

        generate_legal_moves(board)
            .iter()
            .copied()
            .find(|mv| mv.source() == source && mv.dest() == dest && mv.promotion() == promo)
            .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.source(), self.dest())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.uci_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.kind())
    }
}
