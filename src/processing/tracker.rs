use crate::algorithms::TrajectoryEstimator;
use crate::core::{NominalEstimate, PositionSample, TrajectoryEstimate};
use crate::utils::config::TrackerConfig;
use crate::validation::{SampleValidator, TrackingResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Outcome of feeding one fix to the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackUpdate {
    /// Estimate from this fix and the previous one
    Measured(TrajectoryEstimate),
    /// First fix, reported at the assumed orbital speed
    Nominal(NominalEstimate),
    /// First fix with the nominal fallback disabled
    Pending,
}

/// Rolling tracker over a stream of fixes.
///
/// Keeps the last accepted fix and a bounded, in-memory history of measured
/// estimates (oldest evicted first).
pub struct GroundTracker {
    config: TrackerConfig,
    estimator: TrajectoryEstimator,
    validator: SampleValidator,
    last_sample: Option<PositionSample>,
    history: VecDeque<TrajectoryEstimate>,
}

impl Default for GroundTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl GroundTracker {
    pub fn new(config: TrackerConfig) -> Self {
        let capacity = config.history_capacity.max(1);
        Self {
            estimator: TrajectoryEstimator::from_config(&config),
            validator: SampleValidator::new(config.validation_config()),
            last_sample: None,
            history: VecDeque::with_capacity(capacity),
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Feed the next fix.
    ///
    /// A fix that fails validation leaves the tracker untouched.
    pub fn observe(&mut self, sample: PositionSample) -> TrackingResult<TrackUpdate> {
        let Some(previous) = self.last_sample else {
            self.validator.validate_sample(&sample)?;
            self.last_sample = Some(sample);
            debug!(timestamp = sample.timestamp, "first fix recorded");

            if self.config.nominal_fallback {
                let nominal = self
                    .estimator
                    .estimate_nominal(&sample, self.config.nominal_speed_kmh);
                return Ok(TrackUpdate::Nominal(nominal));
            }
            return Ok(TrackUpdate::Pending);
        };

        let (first, second) = self.validator.validate_pair(previous, sample)?;
        let estimate = self.estimator.estimate(&first, &second);

        info!(
            speed_kmh = estimate.speed_kmh,
            bearing = estimate.bearing_degrees,
            direction = %estimate.direction,
            "ground track updated"
        );

        // a swapped pair leaves the newer fix as the reference for the next one
        self.last_sample = Some(second);
        self.push_history(estimate.clone());
        Ok(TrackUpdate::Measured(estimate))
    }

    fn push_history(&mut self, estimate: TrajectoryEstimate) {
        let capacity = self.config.history_capacity.max(1);
        while self.history.len() >= capacity {
            self.history.pop_front();
        }
        self.history.push_back(estimate);
    }

    /// Most recent measured estimate
    pub fn latest(&self) -> Option<&TrajectoryEstimate> {
        self.history.back()
    }

    pub fn last_sample(&self) -> Option<&PositionSample> {
        self.last_sample.as_ref()
    }

    /// Measured estimates, oldest first
    pub fn history(&self) -> impl Iterator<Item = &TrajectoryEstimate> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Mean speed over the history, ignoring estimates with no elapsed time
    pub fn mean_speed_kmh(&self) -> Option<f64> {
        let speeds: Vec<f64> = self
            .history
            .iter()
            .filter(|e| e.elapsed_s > 0)
            .map(|e| e.speed_kmh)
            .collect();

        if speeds.is_empty() {
            None
        } else {
            Some(speeds.iter().sum::<f64>() / speeds.len() as f64)
        }
    }

    /// Arc length covered by the estimates still in history (km)
    pub fn total_distance_km(&self) -> f64 {
        self.history.iter().map(|e| e.distance_km).sum()
    }

    pub fn reset(&mut self) {
        self.last_sample = None;
        self.history.clear();
    }
}
