use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use super::Capability;
use crate::config::ModulesConfig;

/// Source of the modules implementing a capability, in the order they must be asked.
pub trait ModuleRegistry: Send + Sync {
    /// Returns a snapshot; later registrations do not affect it.
    fn get_modules<C: Capability + ?Sized>(&self) -> Vec<Arc<C>>;
}

struct Entry {
    name: String,
    // Always an `Arc<C>` for the capability the entry is filed under.
    handle: Box<dyn Any + Send + Sync>,
}

/// In-memory registry ordered by the configured module priority.
///
/// Modules named in `priority` come first in that order, the rest follow in
/// registration order. Disabled modules are never handed out.
pub struct ModuleManager {
    config: ModulesConfig,
    modules: RwLock<HashMap<&'static str, Vec<Entry>>>,
}

impl ModuleManager {
    pub fn new(config: ModulesConfig) -> Self {
        Self {
            config,
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Files `module` under capability `C`. A module registered again under
    /// the same capability replaces the earlier registration in place.
    pub fn register<C: Capability + ?Sized>(&self, module: Arc<C>) {
        let name = module.name().to_string();
        let mut modules = self.modules.write().unwrap_or_else(PoisonError::into_inner);
        let entries = modules.entry(C::NAME).or_default();

        let entry = Entry {
            name: name.clone(),
            handle: Box::new(module),
        };

        match entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => {
                log::warn!("Module {} re-registered for {}", name, C::NAME);
                *existing = entry;
            }
            None => {
                log::debug!("Registered module {} for {}", name, C::NAME);
                entries.push(entry);
            }
        }
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.config.disabled.iter().any(|d| d == name)
    }

    /// Capability names mapped to the names of their enabled modules, in dispatch order.
    pub fn capabilities(&self) -> BTreeMap<&'static str, Vec<String>> {
        let modules = self.modules.read().unwrap_or_else(PoisonError::into_inner);
        modules
            .iter()
            .map(|(capability, entries)| {
                let names = self
                    .ordered(entries)
                    .into_iter()
                    .map(|e| e.name.clone())
                    .collect();
                (*capability, names)
            })
            .collect()
    }

    fn priority_of(&self, name: &str) -> usize {
        self.config
            .priority
            .iter()
            .position(|p| p == name)
            .unwrap_or(usize::MAX)
    }

    fn ordered<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let mut enabled: Vec<&Entry> = entries
            .iter()
            .filter(|e| !self.is_disabled(&e.name))
            .collect();
        // Stable, so unlisted modules keep their registration order.
        enabled.sort_by_key(|e| self.priority_of(&e.name));
        enabled
    }
}

impl Default for ModuleManager {
    fn default() -> Self {
        Self::new(ModulesConfig::default())
    }
}

impl ModuleRegistry for ModuleManager {
    fn get_modules<C: Capability + ?Sized>(&self) -> Vec<Arc<C>> {
        let modules = self.modules.read().unwrap_or_else(PoisonError::into_inner);
        let Some(entries) = modules.get(C::NAME) else {
            return Vec::new();
        };

        self.ordered(entries)
            .into_iter()
            .filter_map(|e| e.handle.downcast_ref::<Arc<C>>().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{Module, RemoveTorrents, TvdbInfo};
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::Value;

    struct Named(&'static str);

    impl Module for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[async_trait]
    impl RemoveTorrents for Named {
        async fn remove_torrents(&self, _hashs: &[String]) -> Result<bool> {
            Ok(true)
        }
    }

    #[async_trait]
    impl TvdbInfo for Named {
        async fn tvdb_info(&self, _tvdbid: i64) -> Result<Option<Value>> {
            Ok(None)
        }
    }

    fn names<C: Capability + ?Sized>(manager: &ModuleManager) -> Vec<String> {
        manager
            .get_modules::<C>()
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    }

    #[test]
    fn test_unknown_capability_is_empty() {
        let manager = ModuleManager::default();
        assert!(manager.get_modules::<dyn RemoveTorrents>().is_empty());
    }

    #[test]
    fn test_registration_order_without_priority() {
        let manager = ModuleManager::default();
        manager.register::<dyn RemoveTorrents>(Arc::new(Named("qbittorrent")));
        manager.register::<dyn RemoveTorrents>(Arc::new(Named("transmission")));

        assert_eq!(
            names::<dyn RemoveTorrents>(&manager),
            vec!["qbittorrent", "transmission"]
        );
    }

    #[test]
    fn test_priority_then_registration_order() {
        let manager = ModuleManager::new(ModulesConfig {
            priority: vec!["c".to_string(), "a".to_string()],
            disabled: vec![],
        });
        for name in ["a", "b", "c", "d"] {
            manager.register::<dyn RemoveTorrents>(Arc::new(Named(name)));
        }

        assert_eq!(names::<dyn RemoveTorrents>(&manager), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_disabled_modules_are_hidden() {
        let manager = ModuleManager::new(ModulesConfig {
            priority: vec![],
            disabled: vec!["b".to_string()],
        });
        for name in ["a", "b"] {
            manager.register::<dyn RemoveTorrents>(Arc::new(Named(name)));
        }

        assert!(manager.is_disabled("b"));
        assert_eq!(names::<dyn RemoveTorrents>(&manager), vec!["a"]);
    }

    #[test]
    fn test_one_module_under_several_capabilities() {
        let manager = ModuleManager::default();
        let module = Arc::new(Named("tvdb"));
        manager.register::<dyn RemoveTorrents>(module.clone());
        manager.register::<dyn TvdbInfo>(module);

        let capabilities = manager.capabilities();
        assert_eq!(capabilities.len(), 2);
        assert_eq!(capabilities["tvdb_info"], vec!["tvdb"]);
        assert_eq!(capabilities["remove_torrents"], vec!["tvdb"]);
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let manager = ModuleManager::default();
        manager.register::<dyn RemoveTorrents>(Arc::new(Named("a")));
        manager.register::<dyn RemoveTorrents>(Arc::new(Named("b")));
        manager.register::<dyn RemoveTorrents>(Arc::new(Named("a")));

        assert_eq!(names::<dyn RemoveTorrents>(&manager), vec!["a", "b"]);
    }
}
