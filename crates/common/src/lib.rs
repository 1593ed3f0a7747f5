//! Shared building blocks for pinning chakra assets to IPFS through Pinata: credentials, pin
//! options, asset enumeration, file discovery and the pinning client itself.

mod core;
mod interface;
mod utils;

pub use crate::core::*;
pub use interface::*;
pub use utils::*;
