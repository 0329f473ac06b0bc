//! Sample validation and error types

pub mod data;
pub mod error;

pub use data::{OrderingPolicy, SampleValidator, ValidationConfig};
pub use error::{TrackingError, TrackingResult};
