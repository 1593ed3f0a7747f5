/// Pinata endpoints, headers and defaults
pub mod constants;
/// Recursive file discovery for directory pins
pub mod walk;
/// HTTP transport abstraction
pub mod transport;
/// In-memory transport for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use transport::*;
pub use walk::*;
#[cfg(any(test, feature = "test-utils"))]
pub use testing::*;
