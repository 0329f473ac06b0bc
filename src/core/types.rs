//! Core data types for ground-track estimation

use serde::{Deserialize, Serialize};
use std::fmt;

/// One time-stamped geodetic fix.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180] degrees;
/// `timestamp` is epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
}

impl PositionSample {
    pub fn new(latitude: f64, longitude: f64, timestamp: i64) -> Self {
        Self { latitude, longitude, timestamp }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Eight-point compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl CompassDirection {
    /// All directions in bearing order, starting at North
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::Northeast,
        CompassDirection::East,
        CompassDirection::Southeast,
        CompassDirection::South,
        CompassDirection::Southwest,
        CompassDirection::West,
        CompassDirection::Northwest,
    ];

    /// Width of each sector in degrees
    pub const SECTOR_WIDTH_DEG: f64 = 45.0;

    /// Map a bearing to its 45° sector.
    ///
    /// Sectors are centred on the cardinal and intercardinal points, so the
    /// boundaries sit at odd multiples of 22.5°. A boundary value belongs to
    /// the sector clockwise of it. Bearings outside [0, 360) are wrapped first.
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let wrapped = bearing_deg.rem_euclid(360.0);
        let shifted = (wrapped + Self::SECTOR_WIDTH_DEG / 2.0).rem_euclid(360.0);
        let index = (shifted / Self::SECTOR_WIDTH_DEG).floor() as usize;
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompassDirection::North => "North",
            CompassDirection::Northeast => "Northeast",
            CompassDirection::East => "East",
            CompassDirection::Southeast => "Southeast",
            CompassDirection::South => "South",
            CompassDirection::Southwest => "Southwest",
            CompassDirection::West => "West",
            CompassDirection::Northwest => "Northwest",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of estimating motion between two fixes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryEstimate {
    /// Current latitude (degrees), taken from the second fix
    pub latitude: f64,
    /// Current longitude (degrees), taken from the second fix
    pub longitude: f64,
    pub speed_kmh: f64,
    pub speed_kms: f64,
    /// Initial bearing from the first fix to the second, in [0, 360)
    pub bearing_degrees: f64,
    /// Sector of the unrounded bearing; near a sector boundary it can differ
    /// from `CompassDirection::from_bearing(bearing_degrees)`
    pub direction: CompassDirection,
    pub altitude_km: f64,
    /// Epoch seconds of the second fix
    pub timestamp: i64,
    /// Arc length flown at orbital radius (km)
    pub distance_km: f64,
    /// Seconds between the two fixes; may be zero or negative
    pub elapsed_s: i64,
}

/// Single-fix estimate that assumes a constant orbital speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalEstimate {
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: f64,
    pub speed_kms: f64,
    pub altitude_km: f64,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_sector_centres() {
        for (i, direction) in CompassDirection::ALL.iter().enumerate() {
            let centre = i as f64 * 45.0;
            assert_eq!(CompassDirection::from_bearing(centre), *direction);
        }
    }

    #[test]
    fn test_direction_boundaries_belong_to_clockwise_sector() {
        let boundaries = [22.5, 67.5, 112.5, 157.5, 202.5, 247.5, 292.5, 337.5];
        for (i, boundary) in boundaries.iter().enumerate() {
            let expected = CompassDirection::ALL[(i + 1) % 8];
            assert_eq!(CompassDirection::from_bearing(*boundary), expected);

            let before = CompassDirection::from_bearing(boundary - 1e-9);
            assert_eq!(before, CompassDirection::ALL[i]);
        }
    }

    #[test]
    fn test_direction_wraps_out_of_range_bearings() {
        assert_eq!(CompassDirection::from_bearing(359.99), CompassDirection::North);
        assert_eq!(CompassDirection::from_bearing(360.0), CompassDirection::North);
        assert_eq!(CompassDirection::from_bearing(-90.0), CompassDirection::West);
        assert_eq!(CompassDirection::from_bearing(450.0), CompassDirection::East);
    }

    #[test]
    fn test_direction_serializes_as_label() {
        let json = serde_json::to_string(&CompassDirection::Southwest).unwrap();
        assert_eq!(json, "\"Southwest\"");
        assert_eq!(CompassDirection::Northwest.to_string(), "Northwest");
    }

    #[test]
    fn test_sample_finiteness() {
        assert!(PositionSample::new(10.0, 20.0, 0).is_finite());
        assert!(!PositionSample::new(f64::NAN, 20.0, 0).is_finite());
        assert!(!PositionSample::new(10.0, f64::INFINITY, 0).is_finite());
    }
}
