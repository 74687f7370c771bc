use sable_core::perft::perft;
use sable_core::{Board, Move, Position, Square};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const PROMOTIONS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

fn board(fen: &str) -> Board {
    fen.parse().unwrap()
}

#[test]
fn startpos() {
    let b = Board::starting_position();
    assert_eq!(perft(&b, 1), 20);
    assert_eq!(perft(&b, 2), 400);
    assert_eq!(perft(&b, 3), 8_902);
}

#[test]
fn kiwipete() {
    let b = board(KIWIPETE);
    assert_eq!(perft(&b, 1), 48);
    assert_eq!(perft(&b, 2), 2_039);
}

#[test]
fn rook_and_pawn_endgame() {
    let b = board(ENDGAME);
    assert_eq!(perft(&b, 1), 14);
    assert_eq!(perft(&b, 2), 191);
    assert_eq!(perft(&b, 3), 2_812);
}

#[test]
fn promotions_and_checks() {
    let b = board(PROMOTIONS);
    assert_eq!(perft(&b, 1), 6);
    assert_eq!(perft(&b, 2), 264);
}

#[test]
fn unmake_restores_every_board_along_the_tree() {
    fn walk(pos: &mut Position, depth: u32) {
        if depth == 0 {
            return;
        }
        let before = *pos.board();
        for mv in sable_core::generate_legal_moves(&before).iter().copied() {
            {
                let mut child = pos.play(mv);
                walk(&mut child, depth - 1);
            }
            assert_eq!(pos.board(), &before);
        }
    }
    let mut pos = Position::from_fen(KIWIPETE).unwrap();
    walk(&mut pos, 2);
    assert!(pos.repetition_history().is_empty());
}

#[test]
fn game_moves_accumulate_history() {
    let mut pos = Position::default();
    pos.make_move(Move::new(Square::G1, Square::F3));
    pos.make_move(Move::new(Square::B8, Square::C6));
    assert_eq!(pos.repetition_history().len(), 2);
    assert_eq!(pos.repetition_history()[0], Board::starting_position().hash());
}
