//! Background search lifecycle.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use sable_core::{Position, generate_legal_moves};
use sable_engine::{Coordinator, EngineConfig, EngineError, MAX_HASH_MB, MoveSource, SearchLimits, TtError};

const RECV_TIMEOUT: Duration = Duration::from_secs(30);

fn coordinator() -> Coordinator {
    let config = EngineConfig {
        hash_mb: 4,
        ..EngineConfig::default()
    };
    Coordinator::new(&config).unwrap()
}

#[test]
fn zero_sized_table_is_rejected() {
    let config = EngineConfig {
        hash_mb: 0,
        ..EngineConfig::default()
    };
    let err = Coordinator::new(&config).unwrap_err();
    assert!(matches!(err, EngineError::Tt(TtError::ZeroCapacity { size_mb: 0 })));
}

#[test]
fn oversized_table_is_rejected() {
    let config = EngineConfig {
        hash_mb: MAX_HASH_MB + 1,
        ..EngineConfig::default()
    };
    let err = Coordinator::new(&config).unwrap_err();
    assert!(matches!(err, EngineError::Tt(TtError::TooLarge { .. })));

    let mut coord = coordinator();
    assert!(coord.resize(usize::MAX / (1024 * 1024)).is_err());
}

#[test]
fn node_limit_ends_the_search() {
    let mut coord = coordinator();
    let (tx, rx) = mpsc::channel();
    let limits = SearchLimits {
        nodes: Some(5_000),
        ..SearchLimits::infinite()
    };
    coord
        .start(&Position::default(), limits, |_| {}, move |result| {
            tx.send(result).unwrap();
        })
        .unwrap();

    let result = rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert_eq!(result.source, MoveSource::Search);
    assert!(result.nodes >= 5_000);
    assert!(result.depth >= 1);
    coord.wait().unwrap();
}

#[test]
fn completion_fires_exactly_once() {
    let mut coord = coordinator();
    let (tx, rx) = mpsc::channel();
    coord
        .start(&Position::default(), SearchLimits::fixed_depth(3), |_| {}, move |result| {
            tx.send(result).unwrap();
        })
        .unwrap();

    let result = rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(!result.best_move.is_null());
    coord.wait().unwrap();
    assert!(!coord.is_thinking());
    // The sender went away with the completion callback.
    assert!(matches!(rx.try_recv(), Err(mpsc::TryRecvError::Disconnected)));
}

#[test]
fn second_start_while_busy_is_rejected() {
    let mut coord = coordinator();
    let (tx, rx) = mpsc::channel();
    coord
        .start(&Position::default(), SearchLimits::infinite(), |_| {}, move |result| {
            tx.send(result).unwrap();
        })
        .unwrap();
    assert!(coord.is_thinking());

    let err = coord
        .start(&Position::default(), SearchLimits::fixed_depth(1), |_| {}, |_| {})
        .unwrap_err();
    assert!(matches!(err, EngineError::SearchInProgress));

    coord.stop();
    rx.recv_timeout(RECV_TIMEOUT).unwrap();
    coord.wait().unwrap();

    // Idle again, so a new search is accepted.
    coord
        .start(&Position::default(), SearchLimits::fixed_depth(1), |_| {}, |_| {})
        .unwrap();
    coord.wait().unwrap();
}

#[test]
fn stop_still_reports_a_legal_move() {
    let mut coord = coordinator();
    let position = Position::default();
    let (tx, rx) = mpsc::channel();
    coord
        .start(&position, SearchLimits::infinite(), |_| {}, move |result| {
            tx.send(result).unwrap();
        })
        .unwrap();

    thread::sleep(Duration::from_millis(30));
    coord.stop();
    let result = rx.recv_timeout(RECV_TIMEOUT).unwrap();
    let legal = generate_legal_moves(position.board());
    assert!(legal.iter().any(|&mv| mv == result.best_move));
}

#[test]
fn think_time_ends_the_search() {
    let mut coord = coordinator();
    let (tx, rx) = mpsc::channel();
    let started = Instant::now();
    coord
        .start(
            &Position::default(),
            SearchLimits::fixed_time(Duration::from_millis(100)),
            |_| {},
            move |result| {
                tx.send(result).unwrap();
            },
        )
        .unwrap();

    let result = rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(started.elapsed() >= Duration::from_millis(100));
    assert!(!result.best_move.is_null());
}

#[test]
fn info_arrives_before_completion() {
    let mut coord = coordinator();
    let (tx, rx) = mpsc::channel();
    let info_tx = tx.clone();
    coord
        .start(
            &Position::default(),
            SearchLimits::fixed_depth(3),
            move |info| {
                info_tx.send(Some(info.depth)).unwrap();
            },
            move |_| {
                tx.send(None).unwrap();
            },
        )
        .unwrap();

    let events: Vec<_> = (0..4).map(|_| rx.recv_timeout(RECV_TIMEOUT).unwrap()).collect();
    assert_eq!(events, vec![Some(1), Some(2), Some(3), None]);
    coord.wait().unwrap();
}

#[test]
fn new_game_clear_is_deferred_until_idle() {
    let mut coord = coordinator();
    coord
        .start(&Position::default(), SearchLimits::infinite(), |_| {}, |_| {})
        .unwrap();
    coord.clear_for_new_game();
    coord.stop();
    coord.wait().unwrap();

    // A cleared table gives the same first iteration as a fresh engine.
    let (tx, rx) = mpsc::channel();
    coord
        .start(&Position::default(), SearchLimits::fixed_depth(1), move |info| {
            tx.send(info.nodes).unwrap();
        }, |_| {})
        .unwrap();
    let nodes = rx.recv_timeout(RECV_TIMEOUT).unwrap();
    coord.wait().unwrap();

    let mut fresh = coordinator();
    let (tx, rx) = mpsc::channel();
    fresh
        .start(&Position::default(), SearchLimits::fixed_depth(1), move |info| {
            tx.send(info.nodes).unwrap();
        }, |_| {})
        .unwrap();
    assert_eq!(rx.recv_timeout(RECV_TIMEOUT).unwrap(), nodes);
    fresh.wait().unwrap();
}
