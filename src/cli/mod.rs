//! Command-line workflow, separated from clap parsing in `main.rs`

pub mod orchestration;

pub use orchestration::{run_bump_workflow, BumpArgs, RunContext, WorkflowOutcome};
