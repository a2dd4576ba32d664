pub mod error;
pub mod graph;
pub mod issue;
pub mod options;
pub mod outcome;
