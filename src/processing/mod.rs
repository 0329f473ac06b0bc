//! Sequential fix processing

pub mod tracker;

pub use tracker::{GroundTracker, TrackUpdate};
