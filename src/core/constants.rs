//! Physical constants and model parameters

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fixed orbital altitude assumed for the tracked craft (km)
pub const ORBITAL_ALTITUDE_KM: f64 = 420.0;

/// Radius of the orbit the ground-track angle is scaled by (km)
pub const ORBITAL_RADIUS_KM: f64 = EARTH_RADIUS_KM + ORBITAL_ALTITUDE_KM;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Assumed orbital speed when only a single fix is available (km/h)
pub const NOMINAL_ORBITAL_SPEED_KMH: f64 = 27600.0;

/// Decimal places kept on speed and bearing outputs
pub const DEFAULT_OUTPUT_PRECISION: u8 = 2;
