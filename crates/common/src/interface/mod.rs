mod args;
mod asset;
mod credentials;
mod error;
mod options;
mod request;
mod response;

pub use args::*;
pub use asset::*;
pub use credentials::*;
pub use error::*;
pub use options::*;
pub use request::*;
pub use response::*;
