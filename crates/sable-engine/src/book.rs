//! Plain-text opening book.
//!
//! ```text
//! pos rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -
//! e2e4 1520
//! d2d4 1105
//! pos rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -
//! c7c5 812
//! ```
//!
//! Each record starts with `pos` and a FEN without its move counters,
//! followed by one `<uci-move> <times-played>` line per candidate.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use rand::seq::SliceRandom;
use sable_core::{Board, Move};
use tracing::{debug, info};

use crate::error::BookError;

/// A candidate move as written in the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMove {
    pub uci: String,
    pub times_played: u32,
}

/// Candidate moves keyed by position.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    positions: HashMap<String, Vec<BookMove>>,
}

impl OpeningBook {
    /// Read and parse the book at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let book: OpeningBook = text.parse()?;
        info!(path = %path.display(), positions = book.len(), "opening book loaded");
        Ok(book)
    }

    /// Number of positions in the book.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Candidates for `board`, if the position is in the book.
    pub fn moves(&self, board: &Board) -> Option<&[BookMove]> {
        let key = board.position_key();
        self.positions
            .get(&key)
            .or_else(|| {
                // Books list positions after a double push without the en-passant square.
                board.en_passant()?;
                let (rest, _) = key.rsplit_once(' ')?;
                self.positions.get(&format!("{rest} -"))
            })
            .map(Vec::as_slice)
    }

    /// Pick one listed move for `board` uniformly at random.
    ///
    /// Returns `None` when the position is unknown or the picked move is
    /// not legal here.
    pub fn try_get_move(&self, board: &Board) -> Option<Move> {
        let picked = self.moves(board)?.choose(&mut rand::thread_rng())?;
        match Move::from_uci(&picked.uci, board) {
            Ok(mv) => Some(mv),
            Err(e) => {
                debug!(error = %e, "ignoring unusable book move");
                None
            }
        }
    }
}

impl FromStr for OpeningBook {
    type Err = BookError;

    fn from_str(text: &str) -> Result<Self, BookError> {
        let mut positions: HashMap<String, Vec<BookMove>> = HashMap::new();
        let mut current: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix("pos") {
                let key = rest.split_whitespace().collect::<Vec<_>>().join(" ");
                if positions.insert(key.clone(), Vec::new()).is_some() {
                    return Err(BookError::DuplicatePosition { line: line_no, key });
                }
                current = Some(key);
                continue;
            }

            let malformed = || BookError::MalformedEntry {
                line: line_no,
                text: line.to_string(),
            };
            let Some(key) = &current else {
                return Err(malformed());
            };
            let mut fields = line.split_whitespace();
            let (Some(uci), Some(count), None) = (fields.next(), fields.next(), fields.next()) else {
                return Err(malformed());
            };
            let times_played = count.parse().map_err(|_| malformed())?;
            positions.entry(key.clone()).or_default().push(BookMove {
                uci: uci.to_string(),
                times_played,
            });
        }

        positions.retain(|_, moves| !moves.is_empty());
        Ok(Self { positions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::Square;

    const BOOK: &str = "\
pos rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -
e2e4 10

pos rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -
c7c5 4
e7e5 3
";

    #[test]
    fn parses_records() {
        let book: OpeningBook = BOOK.parse().unwrap();
        assert_eq!(book.len(), 2);
        let moves = book.moves(&Board::starting_position()).unwrap();
        assert_eq!(
            moves,
            &[BookMove {
                uci: "e2e4".into(),
                times_played: 10
            }]
        );
    }

    #[test]
    fn returns_listed_move() {
        let book: OpeningBook = BOOK.parse().unwrap();
        assert_eq!(
            book.try_get_move(&Board::starting_position()),
            Some(Move::new(Square::E2, Square::E4))
        );
    }

    #[test]
    fn matches_after_double_push_without_en_passant_square() {
        let book: OpeningBook = BOOK.parse().unwrap();
        let board = Board::starting_position().make_move(Move::new(Square::E2, Square::E4));
        assert_eq!(board.en_passant(), Some(Square::E3));
        let mv = book.try_get_move(&board).unwrap();
        assert!(mv == Move::new(Square::C7, Square::C5) || mv == Move::new(Square::E7, Square::E5));
    }

    #[test]
    fn unknown_position_has_no_move() {
        let book: OpeningBook = BOOK.parse().unwrap();
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(book.try_get_move(&board), None);
    }

    #[test]
    fn illegal_book_move_is_ignored() {
        let book: OpeningBook = "pos rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -\ne2e5 1\n"
            .parse()
            .unwrap();
        assert_eq!(book.try_get_move(&Board::starting_position()), None);
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = "pos 8/8/8/8/8/8/8/8 w - -\ne2e4 many\n".parse::<OpeningBook>().unwrap_err();
        assert!(matches!(err, BookError::MalformedEntry { line: 2, .. }));

        let err = "e2e4 1\n".parse::<OpeningBook>().unwrap_err();
        assert!(matches!(err, BookError::MalformedEntry { line: 1, .. }));

        let err = "pos a w - -\ne2e4 1\npos a w - -\n".parse::<OpeningBook>().unwrap_err();
        assert!(matches!(err, BookError::DuplicatePosition { line: 3, .. }));
    }
}
