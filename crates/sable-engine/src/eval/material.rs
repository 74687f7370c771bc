//! Material counting and the endgame transition factor.

use sable_core::{Board, Color, PieceKind};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 300;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

const QUEEN_ENDGAME_WEIGHT: i32 = 45;
const ROOK_ENDGAME_WEIGHT: i32 = 20;
const BISHOP_ENDGAME_WEIGHT: i32 = 10;
const KNIGHT_ENDGAME_WEIGHT: i32 = 10;

/// Weighted non-pawn material of a full army.
const ENDGAME_START_WEIGHT: i32 =
    2 * ROOK_ENDGAME_WEIGHT + 2 * BISHOP_ENDGAME_WEIGHT + 2 * KNIGHT_ENDGAME_WEIGHT + QUEEN_ENDGAME_WEIGHT;

/// Piece counts for one side and what follows from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialInfo {
    pub pawns: u32,
    pub knights: u32,
    pub bishops: u32,
    pub rooks: u32,
    pub queens: u32,
    /// Sum of piece values in centipawns.
    pub score: i32,
    /// 0.0 with a full army of pieces, 1.0 with none left.
    pub endgame_t: f32,
}

impl MaterialInfo {
    pub fn new(board: &Board, color: Color) -> MaterialInfo {
        let count = |kind| board.colored_pieces(kind, color).count();
        let pawns = count(PieceKind::Pawn);
        let knights = count(PieceKind::Knight);
        let bishops = count(PieceKind::Bishop);
        let rooks = count(PieceKind::Rook);
        let queens = count(PieceKind::Queen);

        let score = pawns as i32 * PAWN_VALUE
            + knights as i32 * KNIGHT_VALUE
            + bishops as i32 * BISHOP_VALUE
            + rooks as i32 * ROOK_VALUE
            + queens as i32 * QUEEN_VALUE;

        let weight = queens as i32 * QUEEN_ENDGAME_WEIGHT
            + rooks as i32 * ROOK_ENDGAME_WEIGHT
            + bishops as i32 * BISHOP_ENDGAME_WEIGHT
            + knights as i32 * KNIGHT_ENDGAME_WEIGHT;
        let endgame_t = 1.0 - (weight as f32 / ENDGAME_START_WEIGHT as f32).min(1.0);

        MaterialInfo {
            pawns,
            knights,
            bishops,
            rooks,
            queens,
            score,
            endgame_t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_army_is_not_endgame() {
        let info = MaterialInfo::new(&Board::starting_position(), Color::White);
        assert_eq!(info.score, 8 * 100 + 2 * 300 + 2 * 300 + 2 * 500 + 900);
        assert_eq!(info.endgame_t, 0.0);
    }

    #[test]
    fn bare_king_is_full_endgame() {
        let board: Board = "4k3/pppp4/8/8/8/8/8/4K2R w - - 0 1".parse().unwrap();
        let black = MaterialInfo::new(&board, Color::Black);
        assert_eq!(black.pawns, 4);
        assert_eq!(black.score, 400);
        assert_eq!(black.endgame_t, 1.0);

        let white = MaterialInfo::new(&board, Color::White);
        assert_eq!(white.rooks, 1);
        assert!((white.endgame_t - (1.0 - 20.0 / 125.0)).abs() < 1e-6);
    }

    #[test]
    fn extra_queens_clamp_to_zero() {
        let board: Board = "4k3/8/8/8/8/8/8/QQQQK3 w - - 0 1".parse().unwrap();
        assert_eq!(MaterialInfo::new(&board, Color::White).endgame_t, 0.0);
    }
}
