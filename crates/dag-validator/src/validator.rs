use crate::topo::{self, Adjacency};
use model::{
    error::GraphContractError,
    graph::{NodeRole, PipelineGraph},
    issue::{ValidationIssue, ValidationIssueKind, ValidationReport},
    options::ValidationOptions,
    outcome::ValidationOutcome,
};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};
use transform_registry::registry::TransformRegistry;

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Structural validator for pipeline graphs. Checks are ordered so that
/// every problem in a submitted graph surfaces in a single pass: structural
/// integrity, cycles, required roles, then (strict mode only) per-node
/// transform configs.
pub struct DagValidator<'a> {
    registry: &'a TransformRegistry,
    options: ValidationOptions,
    report: ValidationReport,
}

impl<'a> DagValidator<'a> {
    pub fn new(registry: &'a TransformRegistry, options: ValidationOptions) -> Self {
        DagValidator {
            registry,
            options,
            report: ValidationReport::new(),
        }
    }

    pub fn validate(
        &mut self,
        graph: &PipelineGraph,
    ) -> Result<ValidationOutcome, GraphContractError> {
        if graph.nodes.is_empty() {
            return Err(GraphContractError::EmptyGraph);
        }

        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            strict = self.options.strict,
            "validating pipeline graph"
        );

        self.check_structure(graph);
        let adjacency = Adjacency::build(graph);
        self.check_cycles(graph, &adjacency);
        self.check_required_roles(graph);
        if self.options.strict {
            self.check_transform_configs(graph);
        }
        self.check_isolated_nodes(graph, &adjacency);

        for warning in &self.report.warnings {
            warn!("{warning}");
        }

        if self.report.has_errors() {
            warn!(
                errors = self.report.errors.len(),
                "pipeline graph failed validation"
            );
            return Ok(ValidationOutcome::failed(self.report.error_messages()));
        }

        Ok(ValidationOutcome::ok(topo::kahn_order(graph, &adjacency)))
    }

    /// Duplicate ids and dangling edges. Ids are used as map keys
    /// everywhere downstream, so both are hard errors rather than
    /// silent drops.
    fn check_structure(&mut self, graph: &PipelineGraph) {
        let mut seen: HashSet<&str> = HashSet::with_capacity(graph.nodes.len());
        for node in &graph.nodes {
            if !seen.insert(node.id.as_str()) {
                self.report
                    .add_error(ValidationIssue::error(ValidationIssueKind::DuplicateNodeId {
                        id: node.id.clone(),
                    }));
            }
        }

        for edge in &graph.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains(endpoint.as_str()) {
                    self.report
                        .add_error(ValidationIssue::error(ValidationIssueKind::DanglingEdge {
                            from: edge.from.clone(),
                            to: edge.to.clone(),
                            missing: endpoint.clone(),
                        }));
                }
            }
        }
    }

    /// Depth-first traversal with an on-stack marker. Every back edge
    /// reports the offending chain; traversal continues so independent
    /// cycles each get their own diagnostic.
    fn check_cycles(&mut self, graph: &PipelineGraph, adjacency: &Adjacency) {
        let mut marks = vec![Mark::Unvisited; graph.nodes.len()];
        let mut path = Vec::new();
        for start in 0..graph.nodes.len() {
            if marks[start] == Mark::Unvisited {
                self.visit(start, graph, adjacency, &mut marks, &mut path);
            }
        }
    }

    fn visit(
        &mut self,
        node: usize,
        graph: &PipelineGraph,
        adjacency: &Adjacency,
        marks: &mut Vec<Mark>,
        path: &mut Vec<usize>,
    ) {
        marks[node] = Mark::OnStack;
        path.push(node);

        for &next in &adjacency.successors[node] {
            match marks[next] {
                Mark::OnStack => {
                    // Back edge: everything from `next` to the top of the
                    // path is the cycle.
                    let start = path.iter().position(|&p| p == next).unwrap_or(0);
                    let mut chain: Vec<String> = path[start..]
                        .iter()
                        .map(|&index| graph.nodes[index].id.clone())
                        .collect();
                    chain.push(graph.nodes[next].id.clone());
                    self.report
                        .add_error(ValidationIssue::error(ValidationIssueKind::CycleDetected {
                            chain,
                        }));
                }
                Mark::Unvisited => self.visit(next, graph, adjacency, marks, path),
                Mark::Done => {}
            }
        }

        path.pop();
        marks[node] = Mark::Done;
    }

    /// Every pipeline needs at least one Extract and one Load node; both
    /// errors may appear together.
    fn check_required_roles(&mut self, graph: &PipelineGraph) {
        for role in [NodeRole::Extract, NodeRole::Load] {
            if !graph.nodes.iter().any(|n| n.role == role) {
                self.report
                    .add_error(ValidationIssue::error(ValidationIssueKind::MissingRole {
                        role,
                    }));
            }
        }
    }

    /// Strict mode only: each Transform node's `op` selects a registry
    /// entry and the remaining config fields are checked against its
    /// schema. Every registry message is prefixed with the node id so the
    /// node and the offending field are both substring-locatable.
    fn check_transform_configs(&mut self, graph: &PipelineGraph) {
        for node in graph.nodes.iter().filter(|n| n.role == NodeRole::Transform) {
            let Some(op) = node.config.get("op").and_then(Value::as_str) else {
                self.report.add_error(ValidationIssue::error(
                    ValidationIssueKind::UnknownTransformOp {
                        node: node.id.clone(),
                    },
                ));
                continue;
            };

            let mut rest = node.config.clone();
            rest.remove("op");
            for message in self.registry.validate_config(op, &Value::Object(rest)) {
                self.report
                    .add_error(ValidationIssue::error(ValidationIssueKind::TransformConfig {
                        node: node.id.clone(),
                        message,
                    }));
            }
        }
    }

    /// Advisory only: a node touched by no edge in a multi-node graph is
    /// probably an authoring mistake, but it does not make the graph
    /// invalid.
    fn check_isolated_nodes(&mut self, graph: &PipelineGraph, adjacency: &Adjacency) {
        if graph.nodes.len() < 2 {
            return;
        }
        for (index, node) in graph.nodes.iter().enumerate() {
            if adjacency.successors[index].is_empty() && adjacency.predecessors[index].is_empty() {
                self.report
                    .add_warning(ValidationIssue::warning(ValidationIssueKind::IsolatedNode {
                        id: node.id.clone(),
                    }));
            }
        }
    }
}

/// Validate a pipeline graph against the given registry and options.
pub fn validate(
    graph: &PipelineGraph,
    registry: &TransformRegistry,
    options: ValidationOptions,
) -> Result<ValidationOutcome, GraphContractError> {
    DagValidator::new(registry, options).validate(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::graph::{PipelineEdge, PipelineNode};
    use serde_json::json;

    fn node(id: &str, role: NodeRole) -> PipelineNode {
        PipelineNode::new(id, role)
    }

    fn transform(id: &str, config: serde_json::Value) -> PipelineNode {
        let config = config.as_object().cloned().unwrap_or_default();
        PipelineNode::new(id, NodeRole::Transform).with_config(config)
    }

    fn edge(from: &str, to: &str) -> PipelineEdge {
        PipelineEdge::new(from, to)
    }

    fn run(graph: &PipelineGraph, options: ValidationOptions) -> ValidationOutcome {
        let registry = TransformRegistry::built_in();
        validate(graph, &registry, options).unwrap()
    }

    #[test]
    fn test_empty_graph_is_a_contract_error() {
        let registry = TransformRegistry::built_in();
        let graph = PipelineGraph::new(vec![], vec![]);

        assert_eq!(
            validate(&graph, &registry, ValidationOptions::lenient()),
            Err(GraphContractError::EmptyGraph)
        );
    }

    #[test]
    fn test_duplicate_node_id_is_reported() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                node("e1", NodeRole::Extract),
                node("l1", NodeRole::Load),
            ],
            vec![edge("e1", "l1")],
        );

        let outcome = run(&graph, ValidationOptions::lenient());
        assert!(!outcome.valid);
        assert!(outcome.errors.iter().any(|e| e.contains("duplicate") && e.contains("e1")));
    }

    #[test]
    fn test_dangling_edge_names_missing_node() {
        let graph = PipelineGraph::new(
            vec![node("e1", NodeRole::Extract), node("l1", NodeRole::Load)],
            vec![edge("e1", "l1"), edge("e1", "ghost")],
        );

        let outcome = run(&graph, ValidationOptions::lenient());
        assert!(!outcome.valid);
        assert!(outcome.errors.iter().any(|e| e.contains("ghost")));
    }

    #[test]
    fn test_cycle_reports_chain_and_blocks_topo_order() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                node("a", NodeRole::Transform),
                node("b", NodeRole::Transform),
                node("l1", NodeRole::Load),
            ],
            vec![
                edge("e1", "a"),
                edge("a", "b"),
                edge("b", "a"),
                edge("b", "l1"),
            ],
        );

        let outcome = run(&graph, ValidationOptions::lenient());
        assert!(!outcome.valid);
        assert!(outcome.topo_order.is_none());
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.to_lowercase().contains("cycle") && e.contains("a -> b -> a")));
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                node("t1", NodeRole::Transform),
                node("l1", NodeRole::Load),
            ],
            vec![edge("e1", "t1"), edge("t1", "t1"), edge("t1", "l1")],
        );

        let outcome = run(&graph, ValidationOptions::lenient());
        assert!(outcome.errors.iter().any(|e| e.to_lowercase().contains("cycle")));
    }

    #[test]
    fn test_missing_roles_both_reported() {
        let graph = PipelineGraph::new(
            vec![transform("t1", json!({ "op": "filter" }))],
            vec![],
        );

        let outcome = run(&graph, ValidationOptions::lenient());
        assert!(!outcome.valid);
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.errors.iter().any(|e| e.contains("Extract")));
        assert!(outcome.errors.iter().any(|e| e.contains("Load")));
    }

    #[test]
    fn test_lenient_mode_skips_transform_configs() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                transform("t1", json!({ "op": "filter" })),
                node("l1", NodeRole::Load),
            ],
            vec![edge("e1", "t1"), edge("t1", "l1")],
        );

        let outcome = run(&graph, ValidationOptions::lenient());
        assert!(outcome.valid);
        assert_eq!(
            outcome.topo_order,
            Some(vec!["e1".to_string(), "t1".to_string(), "l1".to_string()])
        );
    }

    #[test]
    fn test_strict_mode_prefixes_registry_messages_with_node_id() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                transform("t1", json!({ "op": "filter" })),
                node("l1", NodeRole::Load),
            ],
            vec![edge("e1", "t1"), edge("t1", "l1")],
        );

        let outcome = run(&graph, ValidationOptions::strict());
        assert!(!outcome.valid);
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.contains("t1") && e.contains("condition")));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_op() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                transform("t1", json!({ "op": "explode" })),
                node("l1", NodeRole::Load),
            ],
            vec![edge("e1", "t1"), edge("t1", "l1")],
        );

        let outcome = run(&graph, ValidationOptions::strict());
        assert!(!outcome.valid);
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.contains("t1") && e.to_lowercase().contains("unknown")));
    }

    #[test]
    fn test_strict_mode_rejects_missing_op_key() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                transform("t1", json!({ "condition": "age > 18" })),
                node("l1", NodeRole::Load),
            ],
            vec![edge("e1", "t1"), edge("t1", "l1")],
        );

        let outcome = run(&graph, ValidationOptions::strict());
        assert!(!outcome.valid);
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.contains("t1") && e.to_lowercase().contains("unknown")));
    }

    #[test]
    fn test_strict_mode_accepts_well_formed_config() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                transform("t1", json!({ "op": "filter", "condition": "age > 18" })),
                node("l1", NodeRole::Load),
            ],
            vec![edge("e1", "t1"), edge("t1", "l1")],
        );

        let outcome = run(&graph, ValidationOptions::strict());
        assert!(outcome.valid, "errors: {:?}", outcome.errors);
    }

    #[test]
    fn test_isolated_node_is_a_warning_not_an_error() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                node("l1", NodeRole::Load),
                node("stray", NodeRole::Validate),
            ],
            vec![edge("e1", "l1")],
        );

        let registry = TransformRegistry::built_in();
        let mut validator = DagValidator::new(&registry, ValidationOptions::lenient());
        let outcome = validator.validate(&graph).unwrap();

        assert!(outcome.valid);
        assert!(validator
            .report
            .warnings
            .iter()
            .any(|w| w.message.contains("stray")));
    }

    #[test]
    fn test_topo_order_is_a_permutation_respecting_edges() {
        let graph = PipelineGraph::new(
            vec![
                node("e1", NodeRole::Extract),
                node("e2", NodeRole::Extract),
                transform("t1", json!({ "op": "join" })),
                transform("t2", json!({ "op": "sort" })),
                node("v1", NodeRole::Validate),
                node("l1", NodeRole::Load),
            ],
            vec![
                edge("e1", "t1"),
                edge("e2", "t1"),
                edge("t1", "t2"),
                edge("t1", "v1"),
                edge("t2", "l1"),
                edge("v1", "l1"),
            ],
        );

        let outcome = run(&graph, ValidationOptions::lenient());
        let order = outcome.topo_order.unwrap();
        assert_eq!(order.len(), graph.nodes.len());

        let position = |id: &str| order.iter().position(|n| n == id).unwrap();
        for edge in &graph.edges {
            assert!(position(&edge.from) < position(&edge.to), "{edge:?}");
        }
    }

    #[test]
    fn test_cycle_runs_even_when_roles_are_missing() {
        let graph = PipelineGraph::new(
            vec![node("a", NodeRole::Transform), node("b", NodeRole::Transform)],
            vec![edge("a", "b"), edge("b", "a")],
        );

        let outcome = run(&graph, ValidationOptions::lenient());
        assert!(outcome.errors.iter().any(|e| e.to_lowercase().contains("cycle")));
        assert!(outcome.errors.iter().any(|e| e.contains("Extract")));
        assert!(outcome.errors.iter().any(|e| e.contains("Load")));
    }
}
