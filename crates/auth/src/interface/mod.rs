mod args;

pub use args::*;
