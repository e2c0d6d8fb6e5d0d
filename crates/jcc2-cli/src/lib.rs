//! CLI components for the JCC2 survey processor.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
