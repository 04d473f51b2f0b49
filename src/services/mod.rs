pub mod ai;
pub mod details;
pub mod edit_gate;
pub mod planner;
