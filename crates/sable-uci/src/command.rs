//! UCI command parsing.

use std::path::PathBuf;
use std::time::Duration;

use sable_core::{Move, Position};
use sable_engine::{GoParams, MAX_HASH_MB};

use crate::error::UciError;

/// An option set with `setoption`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciOption {
    /// Transposition table size in megabytes.
    Hash(usize),
    /// Consult the opening book before searching.
    OwnBook(bool),
    /// Path of the opening book; `<empty>` clears it.
    BookFile(Option<PathBuf>),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- the position after applying any listed moves, with
    /// their history.
    Position(Position),
    /// `go` -- start searching with given parameters.
    Go(GoParams),
    /// `setoption name <id> value <x>`.
    SetOption(UciOption),
    /// `stop` -- halt the current search.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (ignored, as UCI requires).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&first, rest)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match first {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "position" => parse_position(rest),
        "go" => parse_go(rest),
        "setoption" => parse_setoption(rest),
        _ => Ok(Command::Unknown(first.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let moves_at = tokens.iter().position(|&t| t == "moves").unwrap_or(tokens.len());
    let (setup, moves) = tokens.split_at(moves_at);

    let mut position = match setup {
        ["startpos"] => Position::default(),
        ["fen", fields @ ..] => {
            let fen = fields.join(" ");
            Position::from_fen(&fen).map_err(|source| UciError::InvalidFen { fen, source })?
        }
        _ => return Err(UciError::MalformedPosition),
    };

    for uci_move in moves.iter().skip(1) {
        let mv = Move::from_uci(uci_move, position.board())?;
        position.make_move(mv);
    }

    Ok(Command::Position(position))
}

/// Parse the `go` command arguments.
///
/// Supports: wtime, btime, winc, binc, movestogo, depth, nodes, movetime,
/// infinite. Unknown tokens are silently skipped.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        let value = tokens.get(i + 1);
        match tokens[i] {
            "wtime" => params.wtime = Some(parse_millis(value, "wtime")?),
            "btime" => params.btime = Some(parse_millis(value, "btime")?),
            "winc" => params.winc = Some(parse_millis(value, "winc")?),
            "binc" => params.binc = Some(parse_millis(value, "binc")?),
            "movestogo" => params.movestogo = Some(parse_int(value, "movestogo")?),
            "depth" => params.depth = Some(parse_int(value, "depth")?),
            "nodes" => params.nodes = Some(parse_int(value, "nodes")?),
            "movetime" => params.movetime = Some(parse_millis(value, "movetime")?),
            "infinite" => {
                params.infinite = true;
                i += 1;
                continue;
            }
            _ => {
                // Unknown token -- skip per UCI convention
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    Ok(Command::Go(params))
}

/// Parse `name <id...> [value <x...>]`. Names are case-insensitive.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    let Some(("name", rest)) = tokens.split_first().map(|(&first, rest)| (first, rest)) else {
        return Err(UciError::MalformedSetOption);
    };
    let value_at = rest.iter().position(|&t| t == "value").unwrap_or(rest.len());
    let name = rest[..value_at].join(" ");
    let value = rest.get(value_at + 1..).unwrap_or_default().join(" ");

    let invalid = || UciError::InvalidOptionValue {
        name: name.clone(),
        value: value.clone(),
    };

    let option = match name.to_ascii_lowercase().as_str() {
        "hash" => match value.parse() {
            Ok(mb) if (1..=MAX_HASH_MB).contains(&mb) => UciOption::Hash(mb),
            _ => return Err(invalid()),
        },
        "ownbook" => UciOption::OwnBook(match value.as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(invalid()),
        }),
        "bookfile" => UciOption::BookFile(match value.as_str() {
            "" | "<empty>" => None,
            path => Some(PathBuf::from(path)),
        }),
        _ => return Err(UciError::UnknownOption { name }),
    };

    Ok(Command::SetOption(option))
}

/// Parse a millisecond value from a token.
fn parse_millis(token: Option<&&str>, param: &str) -> Result<Duration, UciError> {
    Ok(Duration::from_millis(parse_int(token, param)?))
}

/// Parse an integer value from a token.
fn parse_int<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Result<T, UciError> {
    let value = token.ok_or_else(|| UciError::MissingGoValue {
        param: param.to_string(),
    })?;
    value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
