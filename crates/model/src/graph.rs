use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Processing role a node plays within a pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Extract,
    Transform,
    Validate,
    Load,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Extract => write!(f, "Extract"),
            NodeRole::Transform => write!(f, "Transform"),
            NodeRole::Validate => write!(f, "Validate"),
            NodeRole::Load => write!(f, "Load"),
        }
    }
}

/// A single processing node. `config` is only interpreted for Transform
/// nodes, and only under strict validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineNode {
    pub id: String,
    pub role: NodeRole,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl PipelineNode {
    pub fn new(id: impl Into<String>, role: NodeRole) -> Self {
        PipelineNode {
            id: id.into(),
            role,
            config: Map::new(),
        }
    }

    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }
}

/// Directed dependency: `from` must complete before `to` starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineEdge {
    pub from: String,
    pub to: String,
}

impl PipelineEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        PipelineEdge {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A pipeline definition as submitted by the authoring layer. Transient;
/// supplied fresh per validation or planning call, never retained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineGraph {
    pub nodes: Vec<PipelineNode>,
    pub edges: Vec<PipelineEdge>,
}

impl PipelineGraph {
    pub fn new(nodes: Vec<PipelineNode>, edges: Vec<PipelineEdge>) -> Self {
        PipelineGraph { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&PipelineNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
