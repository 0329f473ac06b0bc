//! Ground-track velocity and heading estimation from two geodetic fixes
//!
//! The craft is modelled on a circular orbit at a fixed altitude: the
//! great-circle angle between the two sub-satellite points is scaled by the
//! orbital radius to approximate the arc actually flown. Heading is the
//! initial great-circle bearing, bucketed into an eight-point compass.

use crate::core::{
    CompassDirection, NominalEstimate, PositionSample, TrajectoryEstimate,
    DEFAULT_OUTPUT_PRECISION, EARTH_RADIUS_KM, ORBITAL_ALTITUDE_KM, SECONDS_PER_HOUR,
};
use crate::utils::config::TrackerConfig;
use crate::validation::{OrderingPolicy, SampleValidator, TrackingResult, ValidationConfig};
use tracing::trace;

/// Stateless estimator over pairs of fixes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryEstimator {
    /// Mean Earth radius (km)
    pub earth_radius_km: f64,
    /// Altitude of the orbit above the mean radius (km)
    pub orbital_altitude_km: f64,
    /// Decimal places kept on speeds and bearing; `None` keeps full precision
    pub precision: Option<u8>,
}

impl Default for TrajectoryEstimator {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            orbital_altitude_km: ORBITAL_ALTITUDE_KM,
            precision: Some(DEFAULT_OUTPUT_PRECISION),
        }
    }
}

impl TrajectoryEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator that leaves outputs unrounded
    pub fn full_precision() -> Self {
        Self {
            precision: None,
            ..Default::default()
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            earth_radius_km: config.earth_radius_km,
            orbital_altitude_km: config.orbital_altitude_km,
            precision: Some(config.output_precision),
        }
    }

    /// Radius used to turn the ground-track angle into distance (km)
    pub fn orbital_radius_km(&self) -> f64 {
        self.earth_radius_km + self.orbital_altitude_km
    }

    /// Estimate speed and heading between two fixes.
    ///
    /// `second` is taken as the current position. Speed is zero whenever the
    /// second timestamp does not come after the first. Coordinates must be
    /// finite and within their degree ranges; use [`Self::estimate_checked`]
    /// when the input has not been validated.
    pub fn estimate(&self, first: &PositionSample, second: &PositionSample) -> TrajectoryEstimate {
        let distance_km = self.orbital_radius_km() * central_angle(first, second);
        let elapsed_s = second.timestamp.saturating_sub(first.timestamp);

        let speed_kms = if elapsed_s > 0 {
            distance_km / elapsed_s as f64
        } else {
            0.0
        };
        let speed_kmh = speed_kms * SECONDS_PER_HOUR;

        let bearing = initial_bearing(first, second);
        let direction = CompassDirection::from_bearing(bearing);

        trace!(distance_km, elapsed_s, speed_kms, bearing, "estimated ground track");

        TrajectoryEstimate {
            latitude: second.latitude,
            longitude: second.longitude,
            speed_kmh: self.round(speed_kmh),
            speed_kms: self.round(speed_kms),
            bearing_degrees: normalize_bearing(self.round(bearing)),
            direction,
            altitude_km: self.orbital_altitude_km,
            timestamp: second.timestamp,
            distance_km,
            elapsed_s,
        }
    }

    /// Validate both fixes, reject reversed timestamps, then estimate.
    pub fn estimate_checked(
        &self,
        first: &PositionSample,
        second: &PositionSample,
    ) -> TrackingResult<TrajectoryEstimate> {
        let validator = SampleValidator::new(ValidationConfig {
            ordering: OrderingPolicy::Reject,
            max_sample_gap_s: None,
        });
        let (first, second) = validator.validate_pair(*first, *second)?;
        Ok(self.estimate(&first, &second))
    }

    /// Estimate from a single fix by assuming the craft flies at `nominal_speed_kmh`.
    pub fn estimate_nominal(&self, sample: &PositionSample, nominal_speed_kmh: f64) -> NominalEstimate {
        NominalEstimate {
            latitude: sample.latitude,
            longitude: sample.longitude,
            speed_kmh: self.round(nominal_speed_kmh),
            speed_kms: self.round(nominal_speed_kmh / SECONDS_PER_HOUR),
            altitude_km: self.orbital_altitude_km,
            timestamp: sample.timestamp,
        }
    }

    fn round(&self, value: f64) -> f64 {
        match self.precision {
            Some(places) => round_to(value, places),
            None => value,
        }
    }
}

/// Estimate with the default orbital model and two-decimal outputs
pub fn estimate(first: &PositionSample, second: &PositionSample) -> TrajectoryEstimate {
    TrajectoryEstimator::default().estimate(first, second)
}

/// Great-circle central angle between two fixes (radians), via the haversine formula
pub fn central_angle(first: &PositionSample, second: &PositionSample) -> f64 {
    let lat1 = first.latitude.to_radians();
    let lat2 = second.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (second.longitude - first.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial great-circle bearing from `first` to `second`, degrees in [0, 360)
pub fn initial_bearing(first: &PositionSample, second: &PositionSample) -> f64 {
    let lat1 = first.latitude.to_radians();
    let lat2 = second.latitude.to_radians();
    let dlon = (second.longitude - first.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: u8) -> f64 {
    let multiplier = 10_f64.powi(places as i32);
    (value * multiplier).round() / multiplier
}

fn normalize_bearing(bearing: f64) -> f64 {
    let normalized = (bearing + 360.0) % 360.0;
    if normalized >= 360.0 || normalized < 0.0 {
        0.0
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ORBITAL_RADIUS_KM;
    use crate::validation::TrackingError;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_samples() {
        let sample = PositionSample::new(12.34, 56.78, 1000);
        let result = estimate(&sample, &sample);

        assert_eq!(result.distance_km, 0.0);
        assert_eq!(result.speed_kmh, 0.0);
        assert_eq!(result.speed_kms, 0.0);
        assert_eq!(result.bearing_degrees, 0.0);
        assert_eq!(result.direction, CompassDirection::North);
        assert_eq!(result.altitude_km, 420.0);
        assert_eq!(result.timestamp, 1000);
    }

    #[test]
    fn test_equator_one_degree_east() {
        let first = PositionSample::new(0.0, 0.0, 1000);
        let second = PositionSample::new(0.0, 1.0, 1005);
        let result = TrajectoryEstimator::full_precision().estimate(&first, &second);

        let expected_distance = ORBITAL_RADIUS_KM * 1.0_f64.to_radians();
        assert_relative_eq!(result.distance_km, expected_distance, max_relative = 1e-12);
        assert_relative_eq!(result.distance_km, 118.5, epsilon = 0.1);
        assert_relative_eq!(result.speed_kms, expected_distance / 5.0, max_relative = 1e-12);
        assert_relative_eq!(result.speed_kmh, expected_distance / 5.0 * 3600.0, max_relative = 1e-12);
        assert_relative_eq!(result.bearing_degrees, 90.0, epsilon = 1e-9);
        assert_eq!(result.direction, CompassDirection::East);
        assert_eq!(result.elapsed_s, 5);
        assert_eq!((result.latitude, result.longitude), (0.0, 1.0));
    }

    #[test]
    fn test_london_to_paris_heads_southeast() {
        let first = PositionSample::new(51.5, -0.1, 0);
        let second = PositionSample::new(48.8, 2.3, 300);
        let result = estimate(&first, &second);

        assert!(result.bearing_degrees >= 112.5 && result.bearing_degrees < 157.5);
        assert_eq!(result.direction, CompassDirection::Southeast);
        assert!(result.speed_kms > 0.0);
    }

    #[test]
    fn test_non_positive_elapsed_time_gives_zero_speed() {
        let first = PositionSample::new(0.0, 0.0, 2000);
        let same_time = PositionSample::new(0.0, 5.0, 2000);
        let earlier = PositionSample::new(0.0, 5.0, 1990);

        let result = estimate(&first, &same_time);
        assert!(result.distance_km > 0.0);
        assert_eq!(result.speed_kms, 0.0);
        assert_eq!(result.speed_kmh, 0.0);

        let result = estimate(&first, &earlier);
        assert_eq!(result.speed_kms, 0.0);
        assert_eq!(result.speed_kmh, 0.0);
        assert_eq!(result.elapsed_s, -10);
    }

    #[test]
    fn test_reversed_pair_reverses_bearing() {
        let a = PositionSample::new(0.0, 0.0, 0);
        let b = PositionSample::new(0.0, 1.0, 10);
        let forward = estimate(&a, &b);
        let backward = estimate(&b, &a);

        assert_eq!(forward.direction, CompassDirection::East);
        assert_eq!(backward.direction, CompassDirection::West);
        assert_relative_eq!(backward.bearing_degrees, 270.0, epsilon = 0.01);
    }

    #[test]
    fn test_cardinal_bearings() {
        let origin = PositionSample::new(10.0, 10.0, 0);
        let cases = [
            (PositionSample::new(11.0, 10.0, 60), CompassDirection::North),
            (PositionSample::new(9.0, 10.0, 60), CompassDirection::South),
            (PositionSample::new(10.0, 9.0, 60), CompassDirection::West),
            (PositionSample::new(11.0, 11.0, 60), CompassDirection::Northeast),
            (PositionSample::new(9.0, 9.0, 60), CompassDirection::Southwest),
            (PositionSample::new(11.0, 9.0, 60), CompassDirection::Northwest),
        ];
        for (target, expected) in cases {
            assert_eq!(estimate(&origin, &target).direction, expected);
        }
    }

    #[test]
    fn test_bearing_always_normalized() {
        let mut timestamp = 0;
        for lat in [-89.0, -45.0, 0.0, 30.0, 89.0] {
            for lon in [-179.0, -90.0, 0.0, 90.0, 179.5] {
                let a = PositionSample::new(lat, lon, timestamp);
                let b = PositionSample::new(-lat * 0.5, -lon, timestamp + 7);
                timestamp += 1;
                let bearing = initial_bearing(&a, &b);
                assert!((0.0..360.0).contains(&bearing), "bearing {} out of range", bearing);
                let rounded = estimate(&a, &b).bearing_degrees;
                assert!((0.0..360.0).contains(&rounded), "rounded bearing {} out of range", rounded);
            }
        }
    }

    #[test]
    fn test_crossing_antimeridian_takes_short_way() {
        let a = PositionSample::new(0.0, 179.5, 0);
        let b = PositionSample::new(0.0, -179.5, 10);
        let result = TrajectoryEstimator::full_precision().estimate(&a, &b);

        assert_relative_eq!(result.distance_km, ORBITAL_RADIUS_KM * 1.0_f64.to_radians(), max_relative = 1e-9);
        assert_eq!(result.direction, CompassDirection::East);
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        let a = PositionSample::new(0.0, 0.0, 0);
        let b = PositionSample::new(0.0, 180.0, 100);
        let angle = central_angle(&a, &b);
        assert!(angle.is_finite());
        assert_relative_eq!(angle, std::f64::consts::PI, epsilon = 1e-9);
    }

    #[test]
    fn test_outputs_rounded_to_two_places() {
        let first = PositionSample::new(0.0, 0.0, 1000);
        let second = PositionSample::new(0.0, 1.0, 1005);
        let result = estimate(&first, &second);

        assert_eq!(result.speed_kms, round_to(result.speed_kms, 2));
        assert_eq!(result.speed_kmh, round_to(result.speed_kmh, 2));
        assert_relative_eq!(result.speed_kms, 23.71, epsilon = 1e-9);
    }

    #[test]
    fn test_direction_follows_unrounded_bearing() {
        let estimator = TrajectoryEstimator {
            precision: Some(1),
            ..Default::default()
        };
        // raw bearing is about 22.468 degrees
        let result = estimator.estimate(
            &PositionSample::new(0.0, 0.0, 0),
            &PositionSample::new(1.0, 0.4136, 10),
        );

        assert_eq!(result.bearing_degrees, 22.5);
        assert_eq!(result.direction, CompassDirection::North);
        assert_eq!(CompassDirection::from_bearing(result.bearing_degrees), CompassDirection::Northeast);
    }

    #[test]
    fn test_round_to_is_idempotent() {
        for value in [0.0, 1.005, 85338.2261, 359.999, -12.3456, 23.705] {
            let once = round_to(value, 2);
            assert_eq!(round_to(once, 2), once);
        }
    }

    #[test]
    fn test_custom_altitude_scales_distance() {
        let first = PositionSample::new(0.0, 0.0, 0);
        let second = PositionSample::new(0.0, 1.0, 10);
        let ground = TrajectoryEstimator {
            orbital_altitude_km: 0.0,
            precision: None,
            ..Default::default()
        };
        let result = ground.estimate(&first, &second);

        assert_relative_eq!(result.distance_km, EARTH_RADIUS_KM * 1.0_f64.to_radians(), max_relative = 1e-12);
        assert_eq!(result.altitude_km, 0.0);
    }

    #[test]
    fn test_estimate_checked_rejects_bad_input() {
        let estimator = TrajectoryEstimator::default();
        let good = PositionSample::new(0.0, 0.0, 10);

        let err = estimator
            .estimate_checked(&good, &PositionSample::new(95.0, 0.0, 20))
            .unwrap_err();
        assert_eq!(err, TrackingError::InvalidLatitude { value: 95.0 });

        let err = estimator
            .estimate_checked(&good, &PositionSample::new(0.0, 1.0, 5))
            .unwrap_err();
        assert_eq!(err, TrackingError::OutOfOrder { first: 10, second: 5 });

        assert!(estimator.estimate_checked(&good, &PositionSample::new(0.0, 1.0, 15)).is_ok());
    }

    #[test]
    fn test_nominal_estimate() {
        let sample = PositionSample::new(-33.9, 151.2, 1700000000);
        let result = TrajectoryEstimator::default().estimate_nominal(&sample, 27600.0);

        assert_eq!(result.speed_kmh, 27600.0);
        assert_eq!(result.speed_kms, 7.67);
        assert_eq!(result.altitude_km, 420.0);
        assert_eq!(result.timestamp, 1700000000);
        assert_eq!((result.latitude, result.longitude), (-33.9, 151.2));
    }
}
