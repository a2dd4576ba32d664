use serde::{Deserialize, Serialize};

/// Result of a structural validation pass. `topo_order` is present iff the
/// graph is valid, and then contains every node id exactly once in
/// dependency order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topo_order: Option<Vec<String>>,
}

impl ValidationOutcome {
    pub fn ok(topo_order: Vec<String>) -> Self {
        ValidationOutcome {
            valid: true,
            errors: Vec::new(),
            topo_order: Some(topo_order),
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        ValidationOutcome {
            valid: false,
            errors,
            topo_order: None,
        }
    }
}
