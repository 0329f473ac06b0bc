//! Core types and constants for the orbital ground-track estimator

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
