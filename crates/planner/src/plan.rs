use serde::{Deserialize, Serialize};

/// Placeholder per-stage latency. The estimate is deliberately coarse and
/// independent of how wide each stage is.
pub const STAGE_DURATION_MS: u64 = 100;

/// Ordered execution stages. Nodes within a stage have no mutual ordering
/// and may run concurrently; stage `i` must be fully complete before stage
/// `i + 1` starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionPlan {
    pub stages: Vec<Vec<String>>,
    pub estimated_duration_ms: u64,
}

impl ExecutionPlan {
    pub fn from_stages(stages: Vec<Vec<String>>) -> Self {
        let estimated_duration_ms = stages.len() as u64 * STAGE_DURATION_MS;
        ExecutionPlan {
            stages,
            estimated_duration_ms,
        }
    }

    /// Stage index the node was placed in.
    pub fn stage_of(&self, id: &str) -> Option<usize> {
        self.stages
            .iter()
            .position(|stage| stage.iter().any(|n| n == id))
    }

    /// Stable content hash, usable as a cache key by the control layer.
    pub fn fingerprint(&self) -> String {
        let serialized = serde_json::to_string(self).expect("Failed to serialize ExecutionPlan");
        format!("{:x}", md5::compute(serialized))
    }
}

/// Result of a planning call. `plan` is present iff the graph validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanResult {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<ExecutionPlan>,
}

impl PlanResult {
    pub fn planned(plan: ExecutionPlan) -> Self {
        PlanResult {
            valid: true,
            errors: Vec::new(),
            plan: Some(plan),
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        PlanResult {
            valid: false,
            errors,
            plan: None,
        }
    }
}
