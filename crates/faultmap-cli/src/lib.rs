//! CLI library components for the fault mapper.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
pub mod summary;
pub mod types;
