use thiserror::Error;

/// Caller contract violations. Unlike validation diagnostics, which are
/// accumulated and reported in the result object, these indicate a misuse
/// of the API and fail fast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphContractError {
    #[error("pipeline graph has no nodes")]
    EmptyGraph,
}
