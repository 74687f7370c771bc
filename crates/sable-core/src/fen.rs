//! FEN parsing and rendering for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::error::FenError;
use crate::piece::{Color, Piece};
use crate::square::Square;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, color, castling, en_passant, halfmove, fullmove] = fields[..] else {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        };

        let mut board = Board::empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_index, rank_text) in ranks.iter().enumerate() {
            let rank_base = (7 - rank_index as u8) * 8;
            let mut file: u8 = 0;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file += skip as u8;
                    continue;
                }
                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                if file >= 8 {
                    return Err(FenError::BadRankLength { rank_index, length: file as usize + 1 });
                }
                board.toggle_piece(Square::from_index_unchecked(rank_base + file), piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength { rank_index, length: file as usize });
            }
        }

        let side_to_move = match color {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidColor { found: other.to_string() }),
        };
        board.set_side_to_move(side_to_move);
        board.set_castling(CastleRights::from_fen(castling)?);

        let ep = match en_passant {
            "-" => None,
            text => Some(
                Square::from_algebraic(text)
                    .ok_or_else(|| FenError::InvalidEnPassant { found: text.to_string() })?,
            ),
        };
        board.set_en_passant(ep);

        let counter = |field: &'static str, text: &str| {
            text.parse::<u16>()
                .map_err(|_| FenError::InvalidMoveCounter { field, found: text.to_string() })
        };
        board.set_counters(counter("halfmove clock", halfmove)?, counter("fullmove number", fullmove)?);

        board.validate()?;
        Ok(board)
    }
}

impl Board {
    /// The first four FEN fields: placement, side, castling, en passant.
    pub fn position_key(&self) -> String {
        let fen = self.to_string();
        fen.rsplitn(3, ' ').nth(2).unwrap_or(&fen).to_string()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty = 0;
            for file in 0u8..8 {
                match self.colored_piece_on(Square::from_index_unchecked(rank * 8 + file)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }

        write!(f, " {} {} ", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
