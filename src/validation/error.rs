use thiserror::Error;

/// Result type for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Errors raised when a fix or a pair of fixes cannot be used for estimation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackingError {
    /// Latitude outside [-90, 90] degrees
    #[error("Invalid latitude {value}: must be within [-90, 90] degrees")]
    InvalidLatitude { value: f64 },

    /// Longitude outside [-180, 180] degrees
    #[error("Invalid longitude {value}: must be within [-180, 180] degrees")]
    InvalidLongitude { value: f64 },

    /// NaN or infinite coordinate
    #[error("Non-finite {field} in position sample")]
    NonFiniteCoordinate { field: &'static str },

    /// Second fix is older than the first
    #[error("Samples out of order: second fix at {second} precedes first fix at {first}")]
    OutOfOrder { first: i64, second: i64 },

    /// Fixes are further apart in time than allowed
    #[error("Sample gap of {gap_s} s exceeds the allowed {max_gap_s} s")]
    SampleGapExceeded { gap_s: i64, max_gap_s: i64 },
}
