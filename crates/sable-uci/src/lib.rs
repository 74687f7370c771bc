//! UCI protocol handling for sable.

pub mod command;
pub mod engine;
pub mod error;

pub use command::{Command, UciOption, parse_command};
pub use engine::UciEngine;
pub use error::UciError;
pub use sable_engine::GoParams;
