//! Process-wide chain instance.
//!
//! Code that can take a `&ChainBase` should; this is for call sites that
//! cannot have one passed in. The instance is installed once, explicitly, and
//! lives for the rest of the process.

use once_cell::sync::OnceCell;

use super::ChainBase;
use crate::error::{ChainError, ChainResult};

static CHAIN: OnceCell<ChainBase> = OnceCell::new();

/// Installs `chain` as the process-wide instance.
pub fn init(chain: ChainBase) -> ChainResult<&'static ChainBase> {
    CHAIN
        .set(chain)
        .map_err(|_| ChainError::AlreadyInitialized)?;
    log::debug!("Global chain initialized");
    CHAIN.get().ok_or(ChainError::AlreadyInitialized)
}

pub fn get() -> Option<&'static ChainBase> {
    CHAIN.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventManager;
    use crate::modules::ModuleManager;
    use std::sync::Arc;

    fn chain() -> ChainBase {
        ChainBase::new(Arc::new(ModuleManager::default()), EventManager::new())
    }

    // One test owns the global so the assertions do not race.
    #[test]
    fn test_init_once() {
        let first = init(chain()).unwrap();
        assert!(std::ptr::eq(first, get().unwrap()));

        let err = init(chain()).unwrap_err();
        assert!(matches!(err, ChainError::AlreadyInitialized));
        assert!(std::ptr::eq(first, get().unwrap()));
    }
}
