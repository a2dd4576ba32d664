use crate::registry::{TransformDefinition, TransformRegistry};
use crate::schema::{ConfigSchema, FieldKind};

/// Build the catalog of built-in transform kinds. Field names are the keys
/// pipeline authors write in node configs.
pub fn catalog() -> TransformRegistry {
    let mut registry = TransformRegistry::new();
    for definition in definitions() {
        registry.register(definition);
    }
    registry
}

fn definitions() -> Vec<TransformDefinition> {
    vec![
        TransformDefinition::new(
            "filter",
            "Keep only rows matching a condition expression",
            ConfigSchema::new().required("condition", FieldKind::String),
        ),
        TransformDefinition::new(
            "map",
            "Derive new field values from per-field expressions",
            ConfigSchema::new().required("mappings", FieldKind::Object),
        ),
        TransformDefinition::new(
            "aggregate",
            "Group rows and compute aggregate values per group",
            ConfigSchema::new()
                .required("groupBy", FieldKind::Array)
                .required("aggregations", FieldKind::Object),
        ),
        TransformDefinition::new(
            "join",
            "Combine two inputs on matching key fields",
            ConfigSchema::new()
                .required("leftKey", FieldKind::String)
                .required("rightKey", FieldKind::String)
                .required("joinType", FieldKind::String)
                .one_of("joinType", &["inner", "left", "right", "full"]),
        ),
        TransformDefinition::new(
            "dedupe",
            "Drop duplicate rows over a set of key fields",
            ConfigSchema::new()
                .required("keys", FieldKind::Array)
                .optional("keepFirst", FieldKind::Boolean),
        ),
        TransformDefinition::new(
            "sort",
            "Order rows by one or more fields",
            ConfigSchema::new().required("fields", FieldKind::Array),
        ),
        TransformDefinition::new(
            "limit",
            "Truncate the row stream, optionally after skipping a prefix",
            ConfigSchema::new()
                .required("count", FieldKind::Number)
                .optional("offset", FieldKind::Number),
        ),
        TransformDefinition::new(
            "select",
            "Project a subset of fields",
            ConfigSchema::new().required("fields", FieldKind::Array),
        ),
        TransformDefinition::new(
            "rename",
            "Rename fields according to an old-name to new-name map",
            ConfigSchema::new().required("mappings", FieldKind::Object),
        ),
        TransformDefinition::new(
            "union",
            "Concatenate inputs with identical shape",
            ConfigSchema::new().optional("deduplicateAfter", FieldKind::Boolean),
        ),
    ]
}
