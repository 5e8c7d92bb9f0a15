//! casf-common — Shared types and errors used across the CASF benchmark crates.

pub mod error;
pub mod pose;

// Re-export commonly used types
pub use error::{CasfError, Result};
pub use pose::PoseRecord;
