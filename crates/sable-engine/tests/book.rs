//! Opening book loading through the engine configuration.

use std::path::PathBuf;

use sable_core::{Move, Position, Square};
use sable_engine::{
    BookError, EngineConfig, EngineError, MoveSource, OpeningBook, SearchControl, SearchLimits,
    Searcher,
};

const BOOK: &str = "\
pos rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -
e2e4 12

pos rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -
e7e5 7
";

/// Write `contents` to a file unique to this test run.
fn temp_book(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sable-{}-{name}.txt", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn book_config(path: PathBuf) -> EngineConfig {
    EngineConfig {
        hash_mb: 1,
        own_book: true,
        book_path: Some(path),
        ..EngineConfig::default()
    }
}

#[test]
fn load_from_file() {
    let path = temp_book("load", BOOK);
    let book = OpeningBook::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(book.len(), 2);
}

#[test]
fn book_move_skips_search() {
    let path = temp_book("skip", BOOK);
    let mut searcher = Searcher::new(&book_config(path.clone())).unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut infos = 0;
    let result = searcher.think(
        &Position::default(),
        &SearchLimits::fixed_depth(5),
        &SearchControl::unbounded(),
        |_| infos += 1,
    );
    assert_eq!(result.source, MoveSource::Book);
    assert_eq!(result.best_move, Move::new(Square::E2, Square::E4));
    assert_eq!(result.nodes, 0);
    assert_eq!(infos, 0);
}

#[test]
fn out_of_book_position_is_searched() {
    let path = temp_book("miss", BOOK);
    let mut searcher = Searcher::new(&book_config(path.clone())).unwrap();
    std::fs::remove_file(&path).unwrap();

    let position = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    let result = searcher.think(
        &position,
        &SearchLimits::fixed_depth(2),
        &SearchControl::unbounded(),
        |_| {},
    );
    assert_eq!(result.source, MoveSource::Search);
    assert!(result.nodes > 0);
}

#[test]
fn disabled_book_is_not_loaded() {
    let config = EngineConfig {
        own_book: false,
        ..book_config(PathBuf::from("/nonexistent/sable-book.txt"))
    };
    assert!(Searcher::new(&config).is_ok());
}

#[test]
fn missing_file_is_reported() {
    let err = Searcher::new(&book_config(PathBuf::from("/nonexistent/sable-book.txt"))).unwrap_err();
    assert!(matches!(err, EngineError::Book(BookError::Io { .. })));
}
