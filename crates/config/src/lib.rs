//! The `config` subcommand

mod core;
mod interface;
mod utils;

pub use crate::core::*;
pub use interface::*;
pub(crate) use utils::*;
