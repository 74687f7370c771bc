//! Pawn pushes, captures, promotions and en passant.

use crate::attacks::pawn_attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, PromotionPiece};
use crate::piece::{Color, PieceKind};
use crate::square::Square;

use super::{GenKind, MoveList};

fn push_promotions(list: &mut MoveList, src: Square, dst: Square) {
    for promo in PromotionPiece::ALL {
        list.push(Move::new_promotion(src, dst, promo));
    }
}

/// Generate pseudo-legal pawn moves.
pub(super) fn gen_pawns<K: GenKind>(board: &Board, list: &mut MoveList) {
    let us = board.side_to_move();
    let enemy = board.side(us.flip());
    let empty = !board.occupied();
    let pawns = board.colored_pieces(PieceKind::Pawn, us);

    let (promo_rank, double_rank, back) = match us {
        Color::White => (Bitboard::RANK_8, Bitboard::RANK_4, -1),
        Color::Black => (Bitboard::RANK_1, Bitboard::RANK_5, 1),
    };
    let forward = |bb: Bitboard| match us {
        Color::White => bb.north(),
        Color::Black => bb.south(),
    };

    let single = forward(pawns) & empty;
    for dst in single {
        let Some(src) = dst.offset(back, 0) else { continue };
        if promo_rank.contains(dst) {
            push_promotions(list, src, dst);
        } else if !K::NOISY_ONLY {
            list.push(Move::new(src, dst));
        }
    }

    if !K::NOISY_ONLY {
        for dst in forward(single) & empty & double_rank {
            if let Some(src) = dst.offset(2 * back, 0) {
                list.push(Move::new(src, dst));
            }
        }
    }

    for src in pawns {
        for dst in pawn_attacks(us, src) & enemy {
            if promo_rank.contains(dst) {
                push_promotions(list, src, dst);
            } else {
                list.push(Move::new(src, dst));
            }
        }
    }

    if let Some(ep) = board.en_passant() {
        // Our pawns that attack the target are exactly those the target "attacks" as an enemy pawn.
        for src in pawn_attacks(us.flip(), ep) & pawns {
            list.push(Move::new_en_passant(src, ep));
        }
    }
}
