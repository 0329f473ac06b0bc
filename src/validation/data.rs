use crate::core::PositionSample;
use crate::validation::error::{TrackingError, TrackingResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How a pair of fixes with reversed timestamps is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Feed the pair as given; reversed input yields a reversed bearing and zero speed
    #[default]
    Trust,
    /// Reject a pair whose second fix precedes the first
    Reject,
    /// Reorder the pair chronologically before estimating
    Swap,
}

/// Configuration for sample validation
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    pub ordering: OrderingPolicy,
    /// Largest accepted time between two fixes (seconds)
    pub max_sample_gap_s: Option<i64>,
}

/// Validates fixes before they reach the estimator
#[derive(Debug, Clone, Default)]
pub struct SampleValidator {
    config: ValidationConfig,
}

impl SampleValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check that a single fix is finite and within the degree ranges
    pub fn validate_sample(&self, sample: &PositionSample) -> TrackingResult<()> {
        if !sample.latitude.is_finite() {
            return Err(TrackingError::NonFiniteCoordinate { field: "latitude" });
        }
        if !sample.longitude.is_finite() {
            return Err(TrackingError::NonFiniteCoordinate { field: "longitude" });
        }
        if !(-90.0..=90.0).contains(&sample.latitude) {
            return Err(TrackingError::InvalidLatitude { value: sample.latitude });
        }
        if !(-180.0..=180.0).contains(&sample.longitude) {
            return Err(TrackingError::InvalidLongitude { value: sample.longitude });
        }
        Ok(())
    }

    /// Validate both fixes and return them in the order they should be estimated.
    pub fn validate_pair(
        &self,
        first: PositionSample,
        second: PositionSample,
    ) -> TrackingResult<(PositionSample, PositionSample)> {
        self.validate_sample(&first)?;
        self.validate_sample(&second)?;

        let (first, second) = if second.timestamp < first.timestamp {
            match self.config.ordering {
                OrderingPolicy::Trust => {
                    debug!(first = first.timestamp, second = second.timestamp, "passing reversed pair through");
                    (first, second)
                }
                OrderingPolicy::Reject => {
                    return Err(TrackingError::OutOfOrder {
                        first: first.timestamp,
                        second: second.timestamp,
                    });
                }
                OrderingPolicy::Swap => {
                    warn!(first = first.timestamp, second = second.timestamp, "swapping out-of-order fixes");
                    (second, first)
                }
            }
        } else {
            (first, second)
        };

        if let Some(max_gap_s) = self.config.max_sample_gap_s {
            let gap_s = second.timestamp.saturating_sub(first.timestamp).saturating_abs();
            if gap_s > max_gap_s {
                return Err(TrackingError::SampleGapExceeded { gap_s, max_gap_s });
            }
        }

        Ok((first, second))
    }
}
