//! Chess rules for the sable engine: board representation, legal move
//! generation, FEN, zobrist hashing and make/unmake with repetition history.

pub mod attacks;
mod bitboard;
mod board;
mod castle_rights;
mod chess_move;
mod error;
mod fen;
mod make_move;
mod movegen;
pub mod perft;
mod piece;
mod position;
mod square;
mod zobrist;

pub use bitboard::Bitboard;
pub use board::{AttackMaps, Board};
pub use castle_rights::CastleRights;
pub use chess_move::{Move, MoveKind, PromotionPiece};
pub use error::{BoardError, FenError, MoveParseError};
pub use fen::STARTING_FEN;
pub use movegen::{generate_legal_moves, generate_noisy_moves, MoveList};
pub use piece::{Color, Piece, PieceKind};
pub use position::{MoveGuard, Position, FIFTY_MOVE_PLIES};
pub use square::{File, Rank, Square};
pub use zobrist::hash_from_scratch;
