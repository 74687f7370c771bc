//! Move ordering by a cheap capture/promotion/safety guess.

use sable_core::{AttackMaps, Board, Move, PieceKind};

/// Ordering values indexed by [`PieceKind::index`]. The king is large so
/// that moving it onto an attacked square sorts last.
const PIECE_VALUES: [i32; PieceKind::COUNT] = [100, 300, 300, 500, 900, 10_000];

#[inline]
fn value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.index()]
}

/// Guess how promising `mv` is. Higher is searched first.
///
/// Captures score `10 * victim - mover`, promotions add the new piece's
/// value, and landing on a square the opponent attacks costs the mover's
/// value.
pub fn score_move(board: &Board, mv: Move, opponent: &AttackMaps) -> i32 {
    let Some(mover) = board.piece_on(mv.source()) else {
        return 0;
    };
    let mut score = 0;

    if let Some(victim) = board.captured_piece(mv) {
        score = 10 * value(victim) - value(mover);
    }

    if let Some(promo) = mv.promotion() {
        score += value(promo.to_piece_kind());
    }

    if (opponent.pawn | opponent.all).contains(mv.dest()) {
        score -= value(mover);
    }

    score
}

/// Sort `moves` by descending [`score_move`].
pub fn order_moves(board: &Board, moves: &mut [Move], opponent: &AttackMaps) {
    moves.sort_by_cached_key(|&mv| std::cmp::Reverse(score_move(board, mv, opponent)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::{PromotionPiece, Square, generate_legal_moves};

    #[test]
    fn cheap_attacker_takes_queen_first() {
        // Pawn and rook can both take the queen on d5.
        let board: Board = "4k3/8/8/3q4/4P3/8/8/3RK3 w - - 0 1".parse().unwrap();
        let mut moves = generate_legal_moves(&board);
        order_moves(&board, moves.as_mut_slice(), &board.opponent_attack_maps());
        assert_eq!(moves[0], Move::new(Square::E4, Square::D5));
        assert_eq!(moves[1], Move::new(Square::D1, Square::D5));
    }

    #[test]
    fn hanging_moves_sort_last() {
        let board: Board = "4k3/8/8/8/8/2p5/8/1N2K3 w - - 0 1".parse().unwrap();
        let maps = board.opponent_attack_maps();
        let into_pawn = score_move(&board, Move::new(Square::B1, Square::D2), &maps);
        let safe = score_move(&board, Move::new(Square::B1, Square::A3), &maps);
        assert_eq!(into_pawn, -300);
        assert_eq!(safe, 0);
    }

    #[test]
    fn promotion_adds_piece_value() {
        let board: Board = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let maps = board.opponent_attack_maps();
        let queen = Move::new_promotion(Square::A7, Square::A8, PromotionPiece::Queen);
        let knight = Move::new_promotion(Square::A7, Square::A8, PromotionPiece::Knight);
        assert_eq!(score_move(&board, queen, &maps), 900);
        assert_eq!(score_move(&board, knight, &maps), 300);
    }

    #[test]
    fn en_passant_counts_as_pawn_capture() {
        let board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let maps = board.opponent_attack_maps();
        let ep = Move::new_en_passant(Square::E5, Square::D6);
        assert_eq!(score_move(&board, ep, &maps), 10 * 100 - 100);
    }
}
