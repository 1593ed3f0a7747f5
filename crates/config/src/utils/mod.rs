/// ANSI color constants used by the interactive wizard
pub(crate) mod constants;
