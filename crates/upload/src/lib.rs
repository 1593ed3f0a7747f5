//! The `upload` subcommand

mod core;
mod interface;

pub use crate::core::*;
pub use interface::*;
