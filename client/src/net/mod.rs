//! Browser adapters for the core's transport, storage and navigation seams.

pub mod browser;
