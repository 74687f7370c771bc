//! Event-driven UCI engine.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::sync::mpsc;

use tracing::{debug, info, warn};

use sable_core::Position;
use sable_engine::{
    Coordinator, EngineConfig, OpeningBook, SearchInfo, SearchLimits, SearchResult,
};

use crate::command::{Command, UciOption, parse_command};
use crate::error::UciError;

/// Events processed by the main engine loop.
enum EngineEvent {
    UciCommand(Result<Command, UciError>),
    SearchInfo(SearchInfo),
    SearchDone(SearchResult),
    InputClosed,
}

/// The UCI engine: current position, configuration and the search
/// coordinator.
///
/// Runs an event-driven loop on the calling thread. Input is read on a
/// separate thread and search progress arrives from the search thread;
/// both feed one channel, so every line of output is written here.
pub struct UciEngine {
    position: Position,
    coordinator: Coordinator,
    config: EngineConfig,
    /// Limits of the running search, `None` when idle.
    active: Option<SearchLimits>,
}

impl UciEngine {
    /// Create an engine at the starting position.
    pub fn new(config: EngineConfig) -> Result<Self, UciError> {
        let coordinator = Coordinator::new(&config)?;
        Ok(Self {
            position: Position::default(),
            coordinator,
            config,
            active: None,
        })
    }

    /// Run the UCI event loop on stdin and stdout until `quit` or end of
    /// input.
    pub fn run(self) -> Result<(), UciError> {
        let stdout = io::stdout();
        self.run_with(io::stdin(), &mut stdout.lock())
    }

    /// Run the event loop on arbitrary input and output.
    pub fn run_with<R, W>(mut self, input: R, out: &mut W) -> Result<(), UciError>
    where
        R: Read + Send + 'static,
        W: Write,
    {
        let (tx, rx) = mpsc::channel::<EngineEvent>();

        let input_tx = tx.clone();
        std::thread::spawn(move || {
            for line in BufReader::new(input).lines() {
                let Ok(line) = line else {
                    break;
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                debug!(cmd = %trimmed, "received UCI command");
                if input_tx.send(EngineEvent::UciCommand(parse_command(trimmed))).is_err() {
                    return;
                }
            }
            let _ = input_tx.send(EngineEvent::InputClosed);
        });

        while let Ok(event) = rx.recv() {
            match event {
                EngineEvent::UciCommand(Ok(cmd)) => match cmd {
                    Command::Uci => self.handle_uci(out)?,
                    Command::IsReady => writeln!(out, "readyok")?,
                    Command::UciNewGame => self.handle_ucinewgame(),
                    Command::Position(position) => self.position = position,
                    Command::Go(params) => {
                        let limits = SearchLimits::from_go(&params, self.position.board().side_to_move());
                        self.handle_go(limits, &tx);
                    }
                    Command::SetOption(option) => self.handle_setoption(option),
                    Command::Stop => self.coordinator.stop(),
                    Command::Quit => {
                        self.coordinator.stop();
                        self.drain_search(&rx, out)?;
                        break;
                    }
                    Command::Unknown(cmd) => debug!(cmd = %cmd, "ignoring unknown command"),
                },
                EngineEvent::UciCommand(Err(e)) => {
                    warn!(error = %e, "UCI parse error");
                }
                EngineEvent::SearchInfo(search_info) => write_info(out, &search_info)?,
                EngineEvent::SearchDone(result) => self.finish_search(out, &result)?,
                EngineEvent::InputClosed => {
                    // Nobody is left to send `stop`.
                    if self.active.is_some_and(|limits| limits.is_unbounded()) {
                        self.coordinator.stop();
                    }
                    self.drain_search(&rx, out)?;
                    break;
                }
            }
            out.flush()?;
        }

        out.flush()?;
        info!("sable shutting down");
        Ok(())
    }

    fn handle_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name sable {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author the sable developers")?;
        writeln!(
            out,
            "option name Hash type spin default {} min 1 max {}",
            sable_engine::DEFAULT_HASH_MB,
            sable_engine::MAX_HASH_MB
        )?;
        writeln!(out, "option name OwnBook type check default false")?;
        writeln!(out, "option name BookFile type string default <empty>")?;
        writeln!(out, "uciok")
    }

    fn handle_ucinewgame(&mut self) {
        self.position = Position::default();
        self.coordinator.clear_for_new_game();
    }

    fn handle_setoption(&mut self, option: UciOption) {
        match option {
            UciOption::Hash(mb) => match self.coordinator.resize(mb) {
                Ok(()) => self.config.hash_mb = mb,
                Err(e) => warn!(error = %e, hash_mb = mb, "cannot resize transposition table"),
            },
            UciOption::OwnBook(enabled) => {
                self.config.own_book = enabled;
                self.reload_book();
            }
            UciOption::BookFile(path) => {
                self.config.book_path = path;
                self.reload_book();
            }
        }
    }

    fn reload_book(&mut self) {
        let book = match self.config.enabled_book_path().map(OpeningBook::load) {
            Some(Ok(book)) => Some(book),
            Some(Err(e)) => {
                warn!(error = %e, "opening book disabled");
                None
            }
            None => None,
        };
        self.coordinator.set_book(book);
    }

    fn handle_go(&mut self, limits: SearchLimits, tx: &mpsc::Sender<EngineEvent>) {
        if self.active.is_some() {
            warn!("go received while searching, ignoring");
            return;
        }

        let info_tx = tx.clone();
        let done_tx = tx.clone();
        let started = self.coordinator.start(
            &self.position,
            limits,
            move |search_info| {
                let _ = info_tx.send(EngineEvent::SearchInfo(search_info.clone()));
            },
            move |result| {
                let _ = done_tx.send(EngineEvent::SearchDone(result));
            },
        );

        match started {
            Ok(()) => self.active = Some(limits),
            Err(e) => warn!(error = %e, "could not start search"),
        }
    }

    /// Print everything the running search still reports, up to its
    /// best move.
    fn drain_search<W: Write>(
        &mut self,
        rx: &mpsc::Receiver<EngineEvent>,
        out: &mut W,
    ) -> Result<(), UciError> {
        while self.active.is_some() {
            match rx.recv() {
                Ok(EngineEvent::SearchInfo(search_info)) => write_info(out, &search_info)?,
                Ok(EngineEvent::SearchDone(result)) => self.finish_search(out, &result)?,
                Ok(_) => {}
                Err(_) => break,
            }
        }
        Ok(())
    }

    fn finish_search<W: Write>(&mut self, out: &mut W, result: &SearchResult) -> Result<(), UciError> {
        self.active = None;
        self.coordinator.wait()?;
        // Null prints as 0000.
        writeln!(out, "bestmove {}", result.best_move)?;
        Ok(())
    }
}

/// One `info` line per completed iteration.
fn write_info<W: Write>(out: &mut W, search_info: &SearchInfo) -> io::Result<()> {
    let elapsed_ms = search_info.elapsed.as_millis().max(1);
    let nps = (search_info.nodes as u128 * 1000) / elapsed_ms;
    let score = match search_info.mate_in() {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {}", search_info.score),
    };

    write!(
        out,
        "info depth {} score {} nodes {} nps {} time {}",
        search_info.depth, score, search_info.nodes, nps, elapsed_ms
    )?;
    if !search_info.best_move.is_null() {
        write!(out, " pv {}", search_info.best_move)?;
    }
    writeln!(out)
}
