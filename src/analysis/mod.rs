//! Survey scoring and analysis.
//!
//! The submodules are pure functions over the survey data; the
//! orchestrator composes them and owns the remote insight call.

pub mod aggregator;
pub mod insight;
pub mod orchestrator;
pub mod recommendations;
pub mod risk;

pub use orchestrator::{analyze_json, failed_analysis};
