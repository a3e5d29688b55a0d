pub mod check;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod resolver;
pub mod store;
pub mod types;

pub use error::{HintError, Result};
pub use resolver::{resolve, Query, ResolvedHint};
pub use store::{HintStore, ResourceStore};
