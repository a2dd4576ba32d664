use model::graph::PipelineGraph;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Index-based adjacency over a pipeline graph. Node indices are positions
/// in `graph.nodes`; edges whose endpoints do not resolve to a node are
/// skipped (the validator reports them separately).
#[derive(Debug, Clone)]
pub struct Adjacency {
    pub successors: Vec<Vec<usize>>,
    pub predecessors: Vec<Vec<usize>>,
}

impl Adjacency {
    pub fn build(graph: &PipelineGraph) -> Self {
        let mut position: HashMap<&str, usize> = HashMap::with_capacity(graph.nodes.len());
        for (index, node) in graph.nodes.iter().enumerate() {
            // First declaration wins when an id is duplicated.
            position.entry(node.id.as_str()).or_insert(index);
        }

        let mut successors = vec![Vec::new(); graph.nodes.len()];
        let mut predecessors = vec![Vec::new(); graph.nodes.len()];
        for edge in &graph.edges {
            let (Some(&from), Some(&to)) = (
                position.get(edge.from.as_str()),
                position.get(edge.to.as_str()),
            ) else {
                continue;
            };
            successors[from].push(to);
            predecessors[to].push(from);
        }

        Adjacency {
            successors,
            predecessors,
        }
    }
}

/// Kahn's algorithm over an acyclic graph. Among simultaneously eligible
/// nodes the one declared earliest in `graph.nodes` is emitted first, which
/// makes the order fully deterministic for a given input.
pub fn kahn_order(graph: &PipelineGraph, adjacency: &Adjacency) -> Vec<String> {
    let mut in_degree: Vec<usize> = adjacency.predecessors.iter().map(Vec::len).collect();

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(index, _)| Reverse(index))
        .collect();

    let mut order = Vec::with_capacity(graph.nodes.len());
    while let Some(Reverse(node)) = ready.pop() {
        order.push(graph.nodes[node].id.clone());
        for &next in &adjacency.successors[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    order
}
