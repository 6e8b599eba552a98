pub mod chain;
pub mod config;
pub mod error;
pub mod events;
pub mod modules;
pub mod providers;
pub mod types;

pub use chain::{ChainBase, Dispatcher, Outcome};
pub use config::Config;
pub use error::{ChainError, ChainResult};
pub use types::*;
