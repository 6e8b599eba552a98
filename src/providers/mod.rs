pub mod filter;
pub mod naming;

pub use filter::RuleFilterModule;
pub use naming::ReleaseNameModule;

use std::sync::Arc;

use crate::config::Config;
use crate::error::ChainResult;
use crate::modules::{FilterTorrents, ModuleManager, PrepareRecognize};

/// Registers the modules that ship with the crate.
pub fn register_builtin(manager: &ModuleManager, config: &Config) -> ChainResult<()> {
    manager.register::<dyn PrepareRecognize>(Arc::new(ReleaseNameModule::new()));
    manager.register::<dyn FilterTorrents>(Arc::new(RuleFilterModule::new(&config.filter)?));
    Ok(())
}
