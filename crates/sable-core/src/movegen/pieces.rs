//! Knight, slider and king moves, plus castling.

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::piece::{Color, PieceKind};
use crate::square::Square;

use super::{GenKind, MoveList};

/// Generate pseudo-legal moves for every non-pawn piece.
pub(super) fn gen_pieces<K: GenKind>(board: &Board, list: &mut MoveList) {
    let us = board.side_to_move();
    let occupied = board.occupied();
    let targets = if K::NOISY_ONLY {
        board.side(us.flip())
    } else {
        !board.side(us)
    };

    let kinds: [(PieceKind, fn(Square, Bitboard) -> Bitboard); 5] = [
        (PieceKind::Knight, |sq, _| knight_attacks(sq)),
        (PieceKind::Bishop, bishop_attacks),
        (PieceKind::Rook, rook_attacks),
        (PieceKind::Queen, queen_attacks),
        (PieceKind::King, |sq, _| king_attacks(sq)),
    ];

    for (kind, attacks) in kinds {
        for src in board.colored_pieces(kind, us) {
            for dst in attacks(src, occupied) & targets {
                list.push(Move::new(src, dst));
            }
        }
    }
}

struct CastlePath {
    right: CastleRights,
    rook_from: Square,
    king_to: Square,
    /// Squares that must be empty.
    empty: Bitboard,
    /// Squares the king passes over, which must not be attacked.
    transit: [Square; 2],
}

const fn squares(list: &[Square]) -> Bitboard {
    let mut bits = 0u64;
    let mut i = 0;
    while i < list.len() {
        bits |= 1u64 << list[i].index();
        i += 1;
    }
    Bitboard::new(bits)
}

const WHITE_PATHS: [CastlePath; 2] = [
    CastlePath {
        right: CastleRights::WHITE_KING,
        rook_from: Square::H1,
        king_to: Square::G1,
        empty: squares(&[Square::F1, Square::G1]),
        transit: [Square::F1, Square::G1],
    },
    CastlePath {
        right: CastleRights::WHITE_QUEEN,
        rook_from: Square::A1,
        king_to: Square::C1,
        empty: squares(&[Square::B1, Square::C1, Square::D1]),
        transit: [Square::D1, Square::C1],
    },
];

const BLACK_PATHS: [CastlePath; 2] = [
    CastlePath {
        right: CastleRights::BLACK_KING,
        rook_from: Square::H8,
        king_to: Square::G8,
        empty: squares(&[Square::F8, Square::G8]),
        transit: [Square::F8, Square::G8],
    },
    CastlePath {
        right: CastleRights::BLACK_QUEEN,
        rook_from: Square::A8,
        king_to: Square::C8,
        empty: squares(&[Square::B8, Square::C8, Square::D8]),
        transit: [Square::D8, Square::C8],
    },
];

/// Generate castling moves. The landing square is re-checked by the legality filter.
pub(super) fn gen_castling(board: &Board, list: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.flip();
    let (home, paths) = match us {
        Color::White => (Square::E1, &WHITE_PATHS),
        Color::Black => (Square::E8, &BLACK_PATHS),
    };
    if board.king_square(us) != home || board.is_square_attacked(home, them) {
        return;
    }
    let occupied = board.occupied();
    for path in paths {
        if board.castling().contains(path.right)
            && board.colored_pieces(PieceKind::Rook, us).contains(path.rook_from)
            && (occupied & path.empty).is_empty()
            && path.transit.iter().all(|&sq| !board.is_square_attacked(sq, them))
        {
            list.push(Move::new_castle(home, path.king_to));
        }
    }
}
