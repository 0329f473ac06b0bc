//! Core estimation algorithms

pub mod trajectory;

pub use trajectory::{central_angle, estimate, initial_bearing, round_to, TrajectoryEstimator};
