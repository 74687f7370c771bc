//! The board: piece placement, side to move, castling, en passant, move counters.

use std::fmt;

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::error::BoardError;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;
use crate::zobrist;

/// Squares attacked by one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackMaps {
    /// Squares attacked by that side's pawns.
    pub pawn: Bitboard,
    /// Squares attacked by any of that side's pieces, pawns included.
    pub all: Bitboard,
}

/// Complete position state. `Copy`, so making a move produces a new value.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pieces: [Bitboard; PieceKind::COUNT],
    sides: [Bitboard; Color::COUNT],
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
    /// Plies since the last capture or pawn move.
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// An empty board with White to move. Hash covers the empty castling set.
    pub(crate) fn empty() -> Board {
        Board {
            pieces: [Bitboard::EMPTY; PieceKind::COUNT],
            sides: [Bitboard::EMPTY; Color::COUNT],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: zobrist::castling(0),
        }
    }

    /// The standard starting position.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            let file = file as u8;
            board.toggle_piece(Square::from_index_unchecked(file), Piece::new(kind, Color::White));
            board.toggle_piece(Square::from_index_unchecked(8 + file), Piece::new(PieceKind::Pawn, Color::White));
            board.toggle_piece(Square::from_index_unchecked(48 + file), Piece::new(PieceKind::Pawn, Color::Black));
            board.toggle_piece(Square::from_index_unchecked(56 + file), Piece::new(kind, Color::Black));
        }
        board.set_castling(CastleRights::ALL);
        board
    }

    /// Return the piece kind on `sq`, if any.
    pub fn piece_on(&self, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[kind.index()].contains(sq))
    }

    /// Return the color of the piece on `sq`, if any.
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|color| self.sides[color.index()].contains(sq))
    }

    /// Return the colored piece on `sq`, if any.
    pub fn colored_piece_on(&self, sq: Square) -> Option<Piece> {
        Some(Piece::new(self.piece_on(sq)?, self.color_on(sq)?))
    }

    /// Bitboard of `kind` for both colors.
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Bitboard of `kind` for one color.
    #[inline]
    pub fn colored_pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.pieces[kind.index()] & self.sides[color.index()]
    }

    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.sides[0] | self.sides[1]
    }

    /// Square of `color`'s king.
    ///
    /// Boards built through FEN parsing or [`Board::starting_position`] always
    /// have exactly one king per side; an empty king set maps to A1.
    pub fn king_square(&self, color: Color) -> Square {
        self.colored_pieces(PieceKind::King, color)
            .lsb()
            .unwrap_or(Square::A1)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last capture or pawn move (the fifty-move counter).
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist hash of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// XOR a piece into or out of `sq`, keeping the hash in step.
    #[inline]
    pub(crate) fn toggle_piece(&mut self, sq: Square, piece: Piece) {
        let mask = sq.bitboard();
        self.pieces[piece.kind().index()] ^= mask;
        self.sides[piece.color().index()] ^= mask;
        self.hash ^= zobrist::piece_square(piece, sq);
    }

    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.hash ^= zobrist::castling(self.castling.bits()) ^ zobrist::castling(rights.bits());
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= zobrist::en_passant(old.file().index());
        }
        if let Some(new) = sq {
            self.hash ^= zobrist::en_passant(new.file().index());
        }
        self.en_passant = sq;
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        if color != self.side_to_move {
            self.hash ^= zobrist::side_to_move();
        }
        self.side_to_move = color;
    }

    pub(crate) fn set_counters(&mut self, halfmove_clock: u16, fullmove_number: u16) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// All pieces of either color that attack `sq`, given `occupied` for slider rays.
    pub fn attackers_to(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let rook_like = self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Queen);
        let bishop_like = self.pieces(PieceKind::Bishop) | self.pieces(PieceKind::Queen);
        (knight_attacks(sq) & self.pieces(PieceKind::Knight))
            | (king_attacks(sq) & self.pieces(PieceKind::King))
            | (pawn_attacks(Color::White, sq) & self.colored_pieces(PieceKind::Pawn, Color::Black))
            | (pawn_attacks(Color::Black, sq) & self.colored_pieces(PieceKind::Pawn, Color::White))
            | (rook_attacks(sq, occupied) & rook_like)
            | (bishop_attacks(sq, occupied) & bishop_like)
    }

    /// Return `true` if `sq` is attacked by any piece of `by`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        (self.attackers_to(sq, self.occupied()) & self.side(by)).is_nonempty()
    }

    /// Return `true` if the side to move is in check.
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_square_attacked(self.king_square(us), us.flip())
    }

    /// Squares attacked by `color`, split into pawn attacks and all attacks.
    pub fn attack_maps(&self, color: Color) -> AttackMaps {
        let occupied = self.occupied();
        let pawn = self
            .colored_pieces(PieceKind::Pawn, color)
            .fold(Bitboard::EMPTY, |acc, sq| acc | pawn_attacks(color, sq));

        let mut all = pawn;
        for sq in self.colored_pieces(PieceKind::Knight, color) {
            all |= knight_attacks(sq);
        }
        for sq in self.colored_pieces(PieceKind::Bishop, color) {
            all |= bishop_attacks(sq, occupied);
        }
        for sq in self.colored_pieces(PieceKind::Rook, color) {
            all |= rook_attacks(sq, occupied);
        }
        for sq in self.colored_pieces(PieceKind::Queen, color) {
            all |= queen_attacks(sq, occupied);
        }
        for sq in self.colored_pieces(PieceKind::King, color) {
            all |= king_attacks(sq);
        }
        AttackMaps { pawn, all }
    }

    /// Attack maps of the side that is not to move.
    pub fn opponent_attack_maps(&self) -> AttackMaps {
        self.attack_maps(self.side_to_move.flip())
    }

    /// The piece kind `mv` captures, if any. En passant captures a pawn.
    pub fn captured_piece(&self, mv: Move) -> Option<PieceKind> {
        if mv.is_en_passant() {
            Some(PieceKind::Pawn)
        } else if mv.is_castle() {
            None
        } else {
            self.piece_on(mv.dest())
        }
    }

    /// Return `true` if `mv` removes an enemy piece.
    pub fn is_capture(&self, mv: Move) -> bool {
        self.captured_piece(mv).is_some()
    }

    /// The same position with colors swapped and the board flipped top to bottom.
    pub fn mirrored(&self) -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                for sq in self.colored_pieces(kind, color) {
                    board.toggle_piece(sq.flip_rank(), Piece::new(kind, color.flip()));
                }
            }
        }
        board.set_side_to_move(self.side_to_move.flip());
        board.set_castling(self.castling.swap_colors());
        board.set_en_passant(self.en_passant.map(Square::flip_rank));
        board.set_counters(self.halfmove_clock, self.fullmove_number);
        board
    }

    /// Check the structural integrity of the position.
    pub fn validate(&self) -> Result<(), BoardError> {
        for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
            let count = self.colored_pieces(PieceKind::King, color).count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color: name, count });
            }
        }

        let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
        if let Some(sq) = (self.pieces(PieceKind::Pawn) & back_ranks).lsb() {
            return Err(BoardError::PawnOnBackRank { square: sq.to_string() });
        }

        let them = self.side_to_move.flip();
        if self.is_square_attacked(self.king_square(them), self.side_to_move) {
            return Err(BoardError::OpponentInCheck);
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{self}\")")
    }
}
