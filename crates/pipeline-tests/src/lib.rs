#![allow(dead_code)]

use model::graph::{NodeRole, PipelineEdge, PipelineGraph, PipelineNode};
use serde_json::Value;


pub fn node(id: &str, role: NodeRole) -> PipelineNode {
    PipelineNode::new(id, role)
}

pub fn transform(id: &str, config: Value) -> PipelineNode {
    let config = config.as_object().cloned().unwrap_or_default();
    PipelineNode::new(id, NodeRole::Transform).with_config(config)
}

pub fn edge(from: &str, to: &str) -> PipelineEdge {
    PipelineEdge::new(from, to)
}

pub fn graph(nodes: Vec<PipelineNode>, edges: Vec<PipelineEdge>) -> PipelineGraph {
    PipelineGraph::new(nodes, edges)
}

/// Extract -> Transform -> Load chain, the simplest complete pipeline.
pub fn linear_pipeline() -> PipelineGraph {
    graph(
        vec![
            node("e", NodeRole::Extract),
            transform("t", serde_json::json!({ "op": "filter", "condition": "age > 18" })),
            node("l", NodeRole::Load),
        ],
        vec![edge("e", "t"), edge("t", "l")],
    )
}

/// E -> {T1, T2} -> L diamond with two independent middle branches.
pub fn diamond_pipeline() -> PipelineGraph {
    graph(
        vec![
            node("e", NodeRole::Extract),
            transform("t1", serde_json::json!({ "op": "sort", "fields": ["id"] })),
            transform("t2", serde_json::json!({ "op": "select", "fields": ["id", "email"] })),
            node("l", NodeRole::Load),
        ],
        vec![
            edge("e", "t1"),
            edge("e", "t2"),
            edge("t1", "l"),
            edge("t2", "l"),
        ],
    )
}
