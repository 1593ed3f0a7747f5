/// ANSI color for purple
pub(crate) const PURPLE_ANSI_COLOR: &str = "\x1b[35m";
/// ANSI color for red
pub(crate) const RED_ANSI_COLOR: &str = "\x1b[31m";
/// ANSI color for green
pub(crate) const GREEN_ANSI_COLOR: &str = "\x1b[32m";
/// Reset the ANSI color to the default
pub(crate) const RESET_ANSI_COLOR: &str = "\x1b[0m";
