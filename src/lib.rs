//! BMS duplicate checker - shared modules for the CLI binary.

pub mod duplicates;
pub mod links;
pub mod loader;
pub mod models;
pub mod progress;
pub mod report;
