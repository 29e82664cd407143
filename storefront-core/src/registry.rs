use std::sync::Arc;

use dashmap::DashMap;

use crate::config::ServerConfig;
use crate::store::ItemStore;

/// Runtime registry holding one store per resource name.
///
/// Stores are created empty at startup and live as long as the registry.
pub struct StoreRegistry {
    stores: DashMap<String, Arc<ItemStore>>,
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            stores: DashMap::new(),
        }
    }

    /// Build a registry with an empty store for each configured resource.
    pub fn from_config(config: &ServerConfig) -> Self {
        let registry = Self::new();
        for resource in &config.resources {
            tracing::info!(
                "Registered resource '{}' (replace: {:?})",
                resource.name,
                resource.replace
            );
            registry.insert(&resource.name, ItemStore::with_strategy(resource.replace));
        }
        registry
    }

    /// Insert a store under the given resource name, replacing any previous one.
    pub fn insert(&self, name: &str, store: ItemStore) {
        self.stores.insert(name.to_string(), Arc::new(store));
    }

    /// Get a store by resource name.
    pub fn get(&self, name: &str) -> Option<Arc<ItemStore>> {
        self.stores.get(name).map(|r| r.value().clone())
    }

    /// All registered resource names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stores.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceConfig;
    use crate::store::ReplaceStrategy;

    #[test]
    fn test_from_default_config() {
        let registry = StoreRegistry::from_config(&ServerConfig::default());
        assert_eq!(registry.names(), vec!["categories", "products"]);
        assert!(registry.get("categories").unwrap().is_empty());
        assert!(registry.get("orders").is_none());
    }

    #[test]
    fn test_strategy_carried_into_store() {
        let config = ServerConfig {
            resources: vec![ResourceConfig {
                name: "products".to_string(),
                replace: ReplaceStrategy::InsertThenRemove,
            }],
            ..ServerConfig::default()
        };
        let registry = StoreRegistry::from_config(&config);
        assert_eq!(
            registry.get("products").unwrap().replace_strategy(),
            ReplaceStrategy::InsertThenRemove
        );
    }

    #[test]
    fn test_stores_are_independent() {
        let registry = StoreRegistry::from_config(&ServerConfig::default());
        registry.get("categories").unwrap().append(Some("books".to_string()));
        assert_eq!(registry.get("categories").unwrap().len(), 1);
        assert!(registry.get("products").unwrap().is_empty());
    }

    #[test]
    fn test_get_returns_shared_store() {
        let registry = StoreRegistry::new();
        registry.insert("tags", ItemStore::new());
        registry.get("tags").unwrap().append(Some("a".to_string()));
        assert_eq!(
            registry.get("tags").unwrap().list(),
            vec![Some("a".to_string())]
        );
    }
}
