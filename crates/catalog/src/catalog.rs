//! Immutable module catalog.

use crate::builtin;
use crate::module::ModuleDescriptor;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use studyhall_core::{Error, Result, ResultExt};

/// Read-only table of module descriptors in declaration order.
///
/// Built once and shared behind an `Arc`; there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<ModuleDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(modules: Vec<ModuleDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(modules.len());
        for (position, module) in modules.iter().enumerate() {
            if index.insert(module.id.clone(), position).is_some() {
                return Err(Error::duplicate_module(&module.id));
            }
        }
        Ok(Self { modules, index })
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin::modules())
    }

    /// Load descriptors from a JSON array.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(Error::from)
            .context(format!("Reading catalog {}", path.display()))?;
        let modules: Vec<ModuleDescriptor> = serde_json::from_str(&content)
            .map_err(Error::from)
            .context(format!("Parsing catalog {}", path.display()))
            .with_suggestion("A catalog file is a JSON array of module objects")?;
        Self::new(modules)
    }

    #[must_use]
    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.index.get(id).map(|&position| &self.modules[position])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Every `(module id, missing prerequisite id)` pair in catalog order.
    #[must_use]
    pub fn dangling_prerequisites(&self) -> Vec<(String, String)> {
        self.modules
            .iter()
            .flat_map(|module| {
                module
                    .prerequisites
                    .iter()
                    .filter(|id| !self.contains(id))
                    .map(|missing| (module.id.clone(), missing.clone()))
            })
            .collect()
    }

    /// Fail on the first prerequisite that does not resolve.
    pub fn validate_prerequisites(&self) -> Result<()> {
        match self.dangling_prerequisites().into_iter().next() {
            Some((module, missing)) => Err(Error::dangling_prerequisite(&module, &missing)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use studyhall_core::ErrorCode;
    use tempfile::TempDir;

    fn module(id: &str, level: u8) -> ModuleDescriptor {
        ModuleDescriptor::new(id, id, level, Category::Fundamentals)
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(vec![module("a", 1), module("a", 2)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateModuleId);
    }

    #[test]
    fn test_lookup_preserves_order() {
        let catalog = Catalog::new(vec![module("b", 1), module("a", 1)]).unwrap();
        let ids: Vec<_> = catalog.modules().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(catalog.get("a").map(|m| m.id.as_str()), Some("a"));
        assert!(catalog.get("c").is_none());
    }

    #[test]
    fn test_dangling_prerequisites() {
        let catalog = Catalog::new(vec![
            module("a", 1),
            module("b", 2).with_prerequisites(["a", "missing_id"]),
        ])
        .unwrap();

        assert_eq!(
            catalog.dangling_prerequisites(),
            vec![("b".to_string(), "missing_id".to_string())]
        );
        let err = catalog.validate_prerequisites().unwrap_err();
        assert_eq!(err.code, ErrorCode::DanglingPrerequisite);
    }

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.validate_prerequisites().is_ok());
        assert_eq!(catalog.get("launched_effect").map(|m| m.level), Some(7));
        assert_eq!(catalog.get("button").map(|m| m.level), Some(4));
    }

    #[test]
    fn test_from_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        let modules = vec![module("text", 1), module("row", 2).with_prerequisites(["text"])];
        fs::write(&path, serde_json::to_string(&modules).unwrap()).unwrap();

        let catalog = Catalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("row").unwrap().prerequisites, vec!["text".to_string()]);
    }

    #[test]
    fn test_from_json_file_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Catalog::from_json_file(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogParseError);
        assert!(err.context.is_some());
        assert!(err.suggestion.as_deref().is_some_and(|s| s.contains("JSON array")));
    }
}
