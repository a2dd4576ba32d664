use crate::plan::{ExecutionPlan, PlanResult};
use dag_validator::topo::Adjacency;
use dag_validator::validator;
use model::{
    error::GraphContractError, graph::PipelineGraph, options::ValidationOptions,
};
use tracing::debug;
use transform_registry::registry::TransformRegistry;

/// Partitions a validated pipeline graph into ordered stages of mutually
/// independent nodes, maximizing safe parallelism.
pub struct ExecutionPlanner<'a> {
    registry: &'a TransformRegistry,
    options: ValidationOptions,
}

impl<'a> ExecutionPlanner<'a> {
    pub fn new(registry: &'a TransformRegistry, options: ValidationOptions) -> Self {
        ExecutionPlanner { registry, options }
    }

    pub fn plan(&self, graph: &PipelineGraph) -> Result<PlanResult, GraphContractError> {
        // Validation re-runs on every call; a cached outcome is never
        // trusted.
        let outcome = validator::validate(graph, self.registry, self.options)?;
        if !outcome.valid {
            return Ok(PlanResult::failed(outcome.errors));
        }

        let adjacency = Adjacency::build(graph);
        let plan = ExecutionPlan::from_stages(level_stages(graph, &adjacency));
        debug!(
            stages = plan.stages.len(),
            duration_ms = plan.estimated_duration_ms,
            "computed execution plan"
        );

        Ok(PlanResult::planned(plan))
    }
}

/// Longest-path leveling: a node's stage is 0 with no predecessors, else
/// one past the latest predecessor stage. Each pass collects every node
/// whose predecessors are all placed, so independent branches land in the
/// same stage and the stage count equals the critical path length. Within
/// a stage, nodes keep declaration order.
fn level_stages(graph: &PipelineGraph, adjacency: &Adjacency) -> Vec<Vec<String>> {
    let total = graph.nodes.len();
    let mut assigned = vec![false; total];
    let mut placed = 0;
    let mut stages = Vec::new();

    while placed < total {
        let eligible: Vec<usize> = (0..total)
            .filter(|&index| {
                !assigned[index]
                    && adjacency.predecessors[index]
                        .iter()
                        .all(|&pred| assigned[pred])
            })
            .collect();

        // Unreachable on a validated graph; guards against looping forever
        // if called on a cyclic one.
        if eligible.is_empty() {
            break;
        }

        for &index in &eligible {
            assigned[index] = true;
        }
        placed += eligible.len();
        stages.push(
            eligible
                .into_iter()
                .map(|index| graph.nodes[index].id.clone())
                .collect(),
        );
    }

    stages
}

/// Validate and plan in one call.
pub fn plan(
    graph: &PipelineGraph,
    registry: &TransformRegistry,
    options: ValidationOptions,
) -> Result<PlanResult, GraphContractError> {
    ExecutionPlanner::new(registry, options).plan(graph)
}
