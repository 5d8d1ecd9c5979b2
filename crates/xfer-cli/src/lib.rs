//! CLI library components for the `xfer` mapping planner.

pub mod logging;
pub mod plan;
