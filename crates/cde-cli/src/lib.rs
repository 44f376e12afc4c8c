//! CLI library components for the CDE table validator.

pub mod inputs;
pub mod logging;
pub mod pipeline;
pub mod template;
pub mod types;
