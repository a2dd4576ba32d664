pub mod plan;
pub mod planner;
