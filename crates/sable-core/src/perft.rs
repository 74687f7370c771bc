//! Leaf-node counting used to check move generation against known totals.

use crate::board::Board;
use crate::movegen::generate_legal_moves;

/// Count the leaf nodes of the legal move tree `depth` plies deep.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&mv| perft(&board.make_move(mv), depth - 1))
        .sum()
}

/// Per-root-move leaf counts, sorted by move text.
pub fn divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut split: Vec<(String, u64)> = generate_legal_moves(board)
        .iter()
        .map(|&mv| (mv.to_string(), perft(&board.make_move(mv), depth.saturating_sub(1))))
        .collect();
    split.sort();
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one_node() {
        assert_eq!(perft(&Board::starting_position(), 0), 1);
    }

    #[test]
    fn divide_sums_to_perft() {
        let board = Board::starting_position();
        let split = divide(&board, 2);
        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|(_, n)| *n == 20));
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), perft(&board, 2));
    }
}
