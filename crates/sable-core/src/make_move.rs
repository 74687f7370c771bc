//! Move execution via copy-make.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Rook source and destination for a castling king step, keyed by the king's destination.
const fn castling_rook(king_dst: Square) -> Option<(Square, Square)> {
    match king_dst.index() {
        6 => Some((Square::H1, Square::F1)),
        2 => Some((Square::A1, Square::D1)),
        62 => Some((Square::H8, Square::F8)),
        58 => Some((Square::A8, Square::D8)),
        _ => None,
    }
}

impl Board {
    /// Apply `mv` and return the resulting board; `self` is untouched.
    ///
    /// `mv` must be pseudo-legal for this position. A move from an empty
    /// square returns an unchanged copy.
    pub fn make_move(&self, mv: Move) -> Board {
        let mut b = *self;
        let us = self.side_to_move();
        let them = us.flip();
        let (src, dst) = (mv.source(), mv.dest());

        let Some(moving) = self.piece_on(src) else {
            return b;
        };
        let captured = self.captured_piece(mv);

        b.set_en_passant(None);

        match mv.kind() {
            MoveKind::Normal | MoveKind::Promotion => {
                if let Some(kind) = captured {
                    b.toggle_piece(dst, Piece::new(kind, them));
                }
                b.toggle_piece(src, Piece::new(moving, us));
                let placed = mv.promotion().map_or(moving, |p| p.to_piece_kind());
                b.toggle_piece(dst, Piece::new(placed, us));

                if moving == PieceKind::Pawn && src.index().abs_diff(dst.index()) == 16 {
                    let skipped = (src.index() + dst.index()) / 2;
                    b.set_en_passant(Square::from_index(skipped as u8));
                }
            }
            MoveKind::EnPassant => {
                let victim = match us {
                    Color::White => dst.offset(-1, 0),
                    Color::Black => dst.offset(1, 0),
                };
                if let Some(victim) = victim {
                    b.toggle_piece(victim, Piece::new(PieceKind::Pawn, them));
                }
                b.toggle_piece(src, Piece::new(PieceKind::Pawn, us));
                b.toggle_piece(dst, Piece::new(PieceKind::Pawn, us));
            }
            MoveKind::Castling => {
                b.toggle_piece(src, Piece::new(PieceKind::King, us));
                b.toggle_piece(dst, Piece::new(PieceKind::King, us));
                if let Some((rook_src, rook_dst)) = castling_rook(dst) {
                    b.toggle_piece(rook_src, Piece::new(PieceKind::Rook, us));
                    b.toggle_piece(rook_dst, Piece::new(PieceKind::Rook, us));
                }
            }
        }

        b.set_castling(
            self.castling()
                .remove(CastleRights::revoked_by(src))
                .remove(CastleRights::revoked_by(dst)),
        );

        let halfmove = if moving == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock() + 1
        };
        let fullmove = self.fullmove_number() + u16::from(us == Color::Black);
        b.set_counters(halfmove, fullmove);
        b.set_side_to_move(them);
        b
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::chess_move::{Move, PromotionPiece};
    use crate::piece::{Color, PieceKind};
    use crate::square::Square;
    use crate::zobrist::hash_from_scratch;

    fn play(board: Board, moves: &[Move]) -> Board {
        moves.iter().fold(board, |b, &mv| {
            let next = b.make_move(mv);
            assert_eq!(next.hash(), hash_from_scratch(&next), "hash drift after {mv}");
            next
        })
    }

    #[test]
    fn double_push_sets_en_passant() {
        let after = play(Board::starting_position(), &[Move::new(Square::E2, Square::E4)]);
        assert_eq!(after.piece_on(Square::E4), Some(PieceKind::Pawn));
        assert_eq!(after.en_passant(), Some(Square::E3));
        assert_eq!(after.side_to_move(), Color::Black);
        assert_eq!(after.halfmove_clock(), 0);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let board = play(
            Board::starting_position(),
            &[
                Move::new(Square::E2, Square::E4),
                Move::new(Square::A7, Square::A6),
                Move::new(Square::E4, Square::E5),
                Move::new(Square::D7, Square::D5),
                Move::new_en_passant(Square::E5, Square::D6),
            ],
        );
        assert_eq!(board.piece_on(Square::D6), Some(PieceKind::Pawn));
        assert_eq!(board.piece_on(Square::D5), None);
        assert_eq!(board.fullmove_number(), 3);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10".parse().unwrap();
        let after = play(board, &[Move::new_castle(Square::E1, Square::G1)]);
        assert_eq!(after.piece_on(Square::G1), Some(PieceKind::King));
        assert_eq!(after.piece_on(Square::F1), Some(PieceKind::Rook));
        assert_eq!(after.piece_on(Square::H1), None);
        assert_eq!(after.castling().to_string(), "kq");
        assert_eq!(after.halfmove_clock(), 4);
    }

    #[test]
    fn capturing_a_rook_revokes_its_right() {
        let board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let after = play(board, &[Move::new(Square::A1, Square::A8)]);
        assert_eq!(after.castling().to_string(), "Kk");
        assert_eq!(after.halfmove_clock(), 0);
    }

    #[test]
    fn promotion_with_capture() {
        let board: Board = "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let after = play(board, &[Move::new_promotion(Square::A7, Square::B8, PromotionPiece::Queen)]);
        assert_eq!(after.piece_on(Square::B8), Some(PieceKind::Queen));
        assert_eq!(after.color_on(Square::B8), Some(Color::White));
        assert_eq!(after.pieces(PieceKind::Knight).count(), 0);
        assert_eq!(after.pieces(PieceKind::Pawn).count(), 0);
    }
}
