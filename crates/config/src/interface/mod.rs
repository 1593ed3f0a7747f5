mod args;
mod config;

pub use args::*;
pub use config::*;
