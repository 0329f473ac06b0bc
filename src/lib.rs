//! Orbital Ground-Track Estimator
//!
//! Estimates the speed and heading of an orbiting craft from two
//! time-stamped sub-satellite fixes, with a rolling tracker, crew roster
//! enrichment and output formatting around it.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod crew;
pub mod api;

// Re-export commonly used types
pub use crate::core::{
    CompassDirection, NominalEstimate, PositionSample, TrajectoryEstimate, EARTH_RADIUS_KM,
    ORBITAL_ALTITUDE_KM,
};
pub use algorithms::{estimate, TrajectoryEstimator};
pub use processing::{GroundTracker, TrackUpdate};
pub use validation::{OrderingPolicy, SampleValidator, TrackingError, TrackingResult};
pub use utils::{ConfigError, ConfigurationManager, TrackerConfig};
pub use api::{EstimateFormatter, FormattedEstimate, JsonFormatter, OutputFormat, TextFormatter};
