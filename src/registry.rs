//! Participant registry
//!
//! Ordered list of display names. Names are appended in entry order and that
//! order is the one the race iterates in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Name is required")]
    NameRequired,
}

/// Ordered participant names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    names: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Append a name (trimmed). Blank names are rejected.
    ///
    /// Duplicates are accepted; returns the updated list.
    pub fn add(&mut self, name: &str) -> Result<&[String], RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::NameRequired);
        }
        self.names.push(name.to_string());
        log::debug!("Registered participant {:?} ({} total)", name, self.names.len());
        Ok(&self.names)
    }

    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_entry_order() {
        let mut registry = Registry::new();
        registry.add("Ada").unwrap();
        registry.add("Grace").unwrap();
        let list = registry.add("Linus").unwrap();
        assert_eq!(list, ["Ada", "Grace", "Linus"]);
    }

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut registry = Registry::new();
        assert_eq!(registry.add(""), Err(RegistryError::NameRequired));
        assert_eq!(registry.add("   \t"), Err(RegistryError::NameRequired));
        assert!(registry.is_empty());

        registry.add("  Ada ").unwrap();
        assert_eq!(registry.list(), ["Ada"]);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut registry = Registry::new();
        registry.add("Ada").unwrap();
        registry.add("Ada").unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut registry = Registry::new();
        registry.add("Ada").unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }
}
