//! Castling rights as a 4-bit set.

use std::fmt;

use crate::error::FenError;
use crate::square::Square;

/// Castling rights: bit 0 = White king-side, 1 = White queen-side,
/// 2 = Black king-side, 3 = Black queen-side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);
    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    const FEN_ORDER: [(CastleRights, char); 4] = [
        (Self::WHITE_KING, 'K'),
        (Self::WHITE_QUEEN, 'Q'),
        (Self::BLACK_KING, 'k'),
        (Self::BLACK_QUEEN, 'q'),
    ];

    /// Raw bits, used to index zobrist keys.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if every right in `other` is held.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Rights lost when a piece leaves or lands on `sq`.
    pub const fn revoked_by(sq: Square) -> CastleRights {
        match sq.index() {
            0 => Self::WHITE_QUEEN,
            4 => CastleRights(0b0011),
            7 => Self::WHITE_KING,
            56 => Self::BLACK_QUEEN,
            60 => CastleRights(0b1100),
            63 => Self::BLACK_KING,
            _ => Self::NONE,
        }
    }

    /// The same rights with colors exchanged.
    pub const fn swap_colors(self) -> CastleRights {
        CastleRights((self.0 >> 2) | ((self.0 & 0b0011) << 2))
    }

    /// Parse the FEN castling field (`"KQkq"`, `"Kq"`, `"-"`).
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }
        s.chars().try_fold(CastleRights::NONE, |rights, c| {
            Self::FEN_ORDER
                .iter()
                .find(|(_, letter)| *letter == c)
                .map(|(flag, _)| rights.insert(*flag))
                .ok_or(FenError::InvalidCastlingChar { character: c })
        })
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (flag, letter) in Self::FEN_ORDER {
            if self.contains(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::CastleRights;
    use crate::square::Square;

    #[test]
    fn fen_round_trip() {
        for text in ["KQkq", "Kq", "k", "-"] {
            let rights = CastleRights::from_fen(text).unwrap();
            assert_eq!(rights.to_string(), text);
        }
    }

    #[test]
    fn rejects_unknown_letter() {
        assert!(CastleRights::from_fen("KX").is_err());
    }

    #[test]
    fn king_move_revokes_both_sides() {
        let rights = CastleRights::ALL.remove(CastleRights::revoked_by(Square::E1));
        assert_eq!(rights.to_string(), "kq");
        let rights = rights.remove(CastleRights::revoked_by(Square::H8));
        assert_eq!(rights.to_string(), "q");
    }

    #[test]
    fn swap_colors_exchanges_sides() {
        let rights = CastleRights::from_fen("Kq").unwrap();
        assert_eq!(rights.swap_colors().to_string(), "Qk");
    }
}
