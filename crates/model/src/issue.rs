use crate::graph::NodeRole;
use std::fmt;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Type of graph validation issue. Every variant renders to a message that
/// embeds the offending node id and/or field name as literal substrings, so
/// callers can assert on specific problems without structured error codes.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssueKind {
    // Structural problems
    DuplicateNodeId { id: String },
    DanglingEdge { from: String, to: String, missing: String },
    CycleDetected { chain: Vec<String> },

    // Required node roles
    MissingRole { role: NodeRole },

    // Strict transform validation
    TransformConfig { node: String, message: String },
    UnknownTransformOp { node: String },

    // Advisory (warnings)
    IsolatedNode { id: String },
}

impl fmt::Display for ValidationIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssueKind::DuplicateNodeId { id } => {
                write!(f, "duplicate node id '{}'", id)
            }
            ValidationIssueKind::DanglingEdge { from, to, missing } => {
                write!(
                    f,
                    "edge '{}' -> '{}' references missing node '{}'",
                    from, to, missing
                )
            }
            ValidationIssueKind::CycleDetected { chain } => {
                write!(f, "dependency cycle detected: {}", chain.join(" -> "))
            }
            ValidationIssueKind::MissingRole { role } => {
                write!(f, "pipeline must contain at least one {} node", role)
            }
            ValidationIssueKind::TransformConfig { node, message } => {
                write!(f, "node '{}': {}", node, message)
            }
            ValidationIssueKind::UnknownTransformOp { node } => {
                write!(f, "node '{}': unknown transform op", node)
            }
            ValidationIssueKind::IsolatedNode { id } => {
                write!(f, "node '{}' is not connected to any edge", id)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: ValidationIssueKind,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(kind: ValidationIssueKind) -> Self {
        let message = kind.to_string();
        Self {
            severity: Severity::Error,
            kind,
            message,
        }
    }

    pub fn warning(kind: ValidationIssueKind) -> Self {
        let message = kind.to_string();
        Self {
            severity: Severity::Warning,
            kind,
            message,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Accumulator for issues found during a single validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Render accumulated errors to the flat string list of the public
    /// result contract.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}
