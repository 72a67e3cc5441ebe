//! Command implementations.

pub mod analyze;
pub mod config;
pub mod labels;
pub mod output;
pub mod setup;
pub mod tags;
