use crate::schema::ConfigSchema;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A named transform kind with its declarative config schema. Immutable
/// after construction; looked up by the `op` key of a Transform node's
/// config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformDefinition {
    pub name: String,
    pub description: String,
    pub schema: ConfigSchema,
}

impl TransformDefinition {
    pub fn new(name: &str, description: &str, schema: ConfigSchema) -> Self {
        TransformDefinition {
            name: name.to_string(),
            description: description.to_string(),
            schema,
        }
    }

    pub fn validate_config(&self, config: &Value) -> Vec<String> {
        self.schema.check(&self.name, config)
    }
}

/// Catalog of transform kinds. Built once at startup and read-only
/// afterwards; `register` exists so embedders can extend the catalog
/// before handing the registry out.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    definitions: BTreeMap<String, TransformDefinition>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of built-in transform kinds.
    pub fn built_in() -> Self {
        crate::builtin::catalog()
    }

    pub fn register(&mut self, definition: TransformDefinition) {
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&TransformDefinition> {
        self.definitions.get(name)
    }

    pub fn list(&self) -> Vec<&TransformDefinition> {
        self.definitions.values().collect()
    }

    /// Validate a config against the named transform's schema. An
    /// unregistered name is itself a diagnostic, not a panic.
    pub fn validate_config(&self, name: &str, config: &Value) -> Vec<String> {
        match self.definitions.get(name) {
            Some(definition) => definition.validate_config(config),
            None => vec![format!("Unknown transform: {name}")],
        }
    }
}

lazy_static! {
    /// Shared built-in catalog. Most callers validate against this
    /// instance; tests that need a custom catalog construct their own.
    pub static ref BUILT_IN: TransformRegistry = TransformRegistry::built_in();
}
