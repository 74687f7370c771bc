//! Static evaluation: material, piece-square tables and an endgame mop-up term.

pub mod material;
pub mod pst;

use sable_core::{Board, Color, PieceKind};

use material::{MaterialInfo, PAWN_VALUE};

/// One side's evaluation terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SideEval {
    material: f32,
    piece_square: f32,
    mop_up: f32,
}

impl SideEval {
    fn sum(self) -> f32 {
        self.material + self.piece_square + self.mop_up
    }
}

/// Evaluate `board` in centipawns from the side to move's point of view.
///
/// Each side's piece-square tables are blended by the opponent's endgame
/// factor, so a side starts playing for the endgame once the enemy army has
/// been thinned out.
///
/// The blended and mop-up terms are fractional. They are summed in `f32` and
/// only the final white-minus-black difference is rounded to the nearest
/// whole centipawn, halves away from zero. Sub-centipawn differences between
/// positions are therefore lost.
pub fn evaluate(board: &Board) -> i32 {
    let white_material = MaterialInfo::new(board, Color::White);
    let black_material = MaterialInfo::new(board, Color::Black);

    let white = SideEval {
        material: white_material.score as f32,
        piece_square: piece_square_score(board, Color::White, black_material.endgame_t),
        mop_up: mop_up_score(board, Color::White, &white_material, &black_material),
    };
    let black = SideEval {
        material: black_material.score as f32,
        piece_square: piece_square_score(board, Color::Black, white_material.endgame_t),
        mop_up: mop_up_score(board, Color::Black, &black_material, &white_material),
    };

    let perspective = board.side_to_move().sign() as f32;
    ((white.sum() - black.sum()) * perspective).round() as i32
}

fn table_sum(board: &Board, table: &[i32; 64], kind: PieceKind, color: Color) -> f32 {
    board
        .colored_pieces(kind, color)
        .map(|sq| pst::read(table, sq, color))
        .sum::<i32>() as f32
}

fn piece_square_score(board: &Board, color: Color, endgame_t: f32) -> f32 {
    let mut value = table_sum(board, &pst::ROOKS, PieceKind::Rook, color)
        + table_sum(board, &pst::KNIGHTS, PieceKind::Knight, color)
        + table_sum(board, &pst::BISHOPS, PieceKind::Bishop, color)
        + table_sum(board, &pst::QUEENS, PieceKind::Queen, color);

    let pawns_early = table_sum(board, &pst::PAWNS, PieceKind::Pawn, color);
    let pawns_late = table_sum(board, &pst::PAWNS_END, PieceKind::Pawn, color);
    value += pawns_early * (1.0 - endgame_t);
    value += pawns_late * endgame_t;

    let king = board.king_square(color);
    value += pst::read(&pst::KING_START, king, color) as f32 * (1.0 - endgame_t);
    value += pst::read(&pst::KING_END, king, color) as f32 * endgame_t;

    value
}

/// Reward a side that is well ahead for herding the enemy king to the edge
/// and approaching it with its own king.
fn mop_up_score(board: &Board, color: Color, mine: &MaterialInfo, theirs: &MaterialInfo) -> f32 {
    if mine.score <= theirs.score + PAWN_VALUE * 2 || theirs.endgame_t <= 0.0 {
        return 0.0;
    }
    let own_king = board.king_square(color);
    let enemy_king = board.king_square(!color);

    let closeness = (14 - own_king.manhattan_distance(enemy_king) as i32) * 4;
    let edge = enemy_king.centre_distance() as i32 * 10;
    (closeness + edge) as f32 * theirs.endgame_t
}
