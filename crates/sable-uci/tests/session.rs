//! Whole UCI sessions driven through `run_with`.

use std::io::Cursor;

use sable_engine::EngineConfig;
use sable_uci::UciEngine;

fn run_session(input: &str) -> Vec<String> {
    let config = EngineConfig {
        hash_mb: 2,
        ..EngineConfig::default()
    };
    let engine = UciEngine::new(config).unwrap();
    let mut out = Vec::new();
    engine
        .run_with(Cursor::new(input.as_bytes().to_vec()), &mut out)
        .unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn handshake() {
    let lines = run_session("uci\nisready\nquit\n");
    assert!(lines[0].starts_with("id name sable"));
    assert!(lines.iter().any(|l| l == "option name Hash type spin default 64 min 1 max 65536"));
    let uciok = lines.iter().position(|l| l == "uciok").unwrap();
    assert_eq!(lines[uciok + 1], "readyok");
}

#[test]
fn go_depth_reports_each_iteration_and_one_bestmove() {
    let lines = run_session("position startpos moves e2e4 e7e5\ngo depth 3\n");
    let infos: Vec<_> = lines.iter().filter(|l| l.starts_with("info depth")).collect();
    assert_eq!(infos.len(), 3);
    assert!(infos[0].starts_with("info depth 1 score cp "));
    assert!(infos[2].contains(" pv "));
    let bestmoves: Vec<_> = lines.iter().filter(|l| l.starts_with("bestmove ")).collect();
    assert_eq!(bestmoves.len(), 1);
    assert_eq!(lines.last(), Some(bestmoves[0]));
}

#[test]
fn mate_is_reported_in_moves() {
    let lines = run_session(
        "position fen r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4\ngo depth 5\n",
    );
    assert!(lines.iter().any(|l| l.starts_with("info depth 2 score mate 1 ")));
    assert_eq!(lines.last().map(String::as_str), Some("bestmove h5f7"));
}

#[test]
fn checkmated_side_answers_null_move() {
    let lines = run_session("position fen 7k/6Q1/5K2/8/8/8/8/8 b - - 0 1\ngo depth 2\n");
    assert_eq!(lines.last().map(String::as_str), Some("bestmove 0000"));
}

#[test]
fn bad_input_is_ignored() {
    let lines = run_session(
        "position fen not a fen\nsetoption name Threads value 8\ngo depth x\nfoobar\nisready\nquit\n",
    );
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn quit_stops_infinite_search_with_a_move() {
    let lines = run_session("position startpos\ngo infinite\nquit\n");
    let bestmoves: Vec<_> = lines.iter().filter(|l| l.starts_with("bestmove ")).collect();
    assert_eq!(bestmoves.len(), 1);
    assert_ne!(bestmoves[0], "bestmove 0000");
}

#[test]
fn end_of_input_stops_infinite_search() {
    let lines = run_session("position startpos\ngo infinite\n");
    assert_eq!(lines.iter().filter(|l| l.starts_with("bestmove ")).count(), 1);
}

#[test]
fn oversized_hash_is_ignored() {
    let lines = run_session("setoption name Hash value 17592186044415\nisready\nquit\n");
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn go_nodes_finishes_on_its_own() {
    let lines = run_session("position startpos\ngo nodes 3000\n");
    let bestmoves: Vec<_> = lines.iter().filter(|l| l.starts_with("bestmove ")).collect();
    assert_eq!(bestmoves.len(), 1);
    assert_ne!(bestmoves[0], "bestmove 0000");
    assert!(lines.iter().any(|l| l.starts_with("info depth 1 ")));
}
