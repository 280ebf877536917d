//! tokenscope runtime
//!
//! Wires the stages together for one analysis run: validation, concurrent
//! metadata and market resolution, mention search, verification, engagement
//! and the final recommendation.

pub mod pipeline;
pub mod report;

pub use pipeline::*;
pub use report::*;
