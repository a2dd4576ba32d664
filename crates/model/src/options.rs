use serde::{Deserialize, Serialize};

/// Name of the tenant/environment setting that controls strict transform
/// validation. The core never reads the process environment itself; the
/// control layer looks this up and passes the raw value in.
pub const STRICT_VALIDATION_VAR: &str = "PIPELINES_STRICT_VALIDATION";

/// Per-call validation policy, threaded explicitly into `validate`/`plan`
/// so concurrent callers with differing strictness cannot interfere.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationOptions {
    /// When set, every Transform node's config is checked against the
    /// transform registry. Off by default.
    pub strict: bool,
}

impl ValidationOptions {
    pub fn lenient() -> Self {
        ValidationOptions { strict: false }
    }

    pub fn strict() -> Self {
        ValidationOptions { strict: true }
    }

    /// Interpret a raw setting value: `"true"` (case-insensitive) enables
    /// strict mode, anything else (including absence) disables it.
    pub fn from_env_value(value: Option<&str>) -> Self {
        let strict = value
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        ValidationOptions { strict }
    }
}
