use crate::core::{
    DEFAULT_OUTPUT_PRECISION, EARTH_RADIUS_KM, NOMINAL_ORBITAL_SPEED_KMH, ORBITAL_ALTITUDE_KM,
};
use crate::validation::{OrderingPolicy, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Highest accepted output precision (decimal places)
pub const MAX_OUTPUT_PRECISION: u8 = 12;

/// Tracker configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Mean Earth radius (km)
    pub earth_radius_km: f64,
    /// Orbital altitude of the tracked craft (km)
    pub orbital_altitude_km: f64,
    /// Speed assumed when only one fix is available (km/h)
    pub nominal_speed_kmh: f64,
    /// Decimal places kept on speeds and bearing
    pub output_precision: u8,
    /// Handling of fixes that arrive out of chronological order
    pub ordering: OrderingPolicy,
    /// Number of estimates kept in the tracker's rolling history
    pub history_capacity: usize,
    /// Report a nominal-speed estimate for the very first fix
    pub nominal_fallback: bool,
    /// Largest accepted gap between consecutive fixes (seconds)
    pub max_sample_gap_s: Option<i64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            orbital_altitude_km: ORBITAL_ALTITUDE_KM,
            nominal_speed_kmh: NOMINAL_ORBITAL_SPEED_KMH,
            output_precision: DEFAULT_OUTPUT_PRECISION,
            ordering: OrderingPolicy::Trust,
            history_capacity: 32,
            nominal_fallback: true,
            max_sample_gap_s: None,
        }
    }
}

impl TrackerConfig {
    /// Validation settings derived from this configuration
    pub fn validation_config(&self) -> ValidationConfig {
        ValidationConfig {
            ordering: self.ordering,
            max_sample_gap_s: self.max_sample_gap_s,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("Invalid value '{value}' for {parameter}: {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    #[error("Configuration I/O error: {message}")]
    IoError { message: String },
    /// JSON serialization/deserialization error
    #[error("Configuration serialization error: {message}")]
    SerializationError { message: String },
}

/// Configuration validation result
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

/// Owns the active configuration and its backing file
pub struct ConfigurationManager {
    config: TrackerConfig,
    config_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Replace the whole configuration after validating it
    pub fn update_config(&mut self, config: TrackerConfig) -> Result<(), ConfigError> {
        let validation = self.validate_config(&config);
        if let Some(error) = validation.errors.into_iter().next() {
            return Err(error);
        }
        for warning in &validation.warnings {
            warn!("{}", warning);
        }
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let config: TrackerConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path.display(), e),
            })?;

        self.update_config(config)?;
        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        info!(path = %path.display(), "loaded tracker configuration");
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path.display(), e),
        })?;

        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::IoError {
                message: "No file path set for saving configuration".to_string(),
            }),
        }
    }

    /// Check if configuration has been modified since last load or save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    // Runtime parameter adjustment; each setter returns the previous value

    pub fn set_orbital_altitude(&mut self, altitude_km: f64) -> Result<f64, ConfigError> {
        if !altitude_km.is_finite() || altitude_km < 0.0 {
            return Err(invalid("orbital_altitude_km", altitude_km, "Altitude must be a non-negative number of kilometres"));
        }
        let old_value = self.config.orbital_altitude_km;
        self.config.orbital_altitude_km = altitude_km;
        self.is_modified = true;
        Ok(old_value)
    }

    pub fn set_nominal_speed(&mut self, speed_kmh: f64) -> Result<f64, ConfigError> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(invalid("nominal_speed_kmh", speed_kmh, "Nominal speed must be positive"));
        }
        let old_value = self.config.nominal_speed_kmh;
        self.config.nominal_speed_kmh = speed_kmh;
        self.is_modified = true;
        Ok(old_value)
    }

    pub fn set_output_precision(&mut self, precision: u8) -> Result<u8, ConfigError> {
        if precision > MAX_OUTPUT_PRECISION {
            return Err(invalid("output_precision", precision, "Precision must not exceed 12 decimal places"));
        }
        let old_value = self.config.output_precision;
        self.config.output_precision = precision;
        self.is_modified = true;
        Ok(old_value)
    }

    pub fn set_history_capacity(&mut self, capacity: usize) -> Result<usize, ConfigError> {
        if capacity == 0 {
            return Err(invalid("history_capacity", capacity, "History must hold at least one estimate"));
        }
        let old_value = self.config.history_capacity;
        self.config.history_capacity = capacity;
        self.is_modified = true;
        Ok(old_value)
    }

    pub fn set_ordering_policy(&mut self, ordering: OrderingPolicy) -> OrderingPolicy {
        let old_value = self.config.ordering;
        self.config.ordering = ordering;
        self.is_modified = true;
        old_value
    }

    pub fn validate_config(&self, config: &TrackerConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !config.earth_radius_km.is_finite() || config.earth_radius_km <= 0.0 {
            errors.push(invalid("earth_radius_km", config.earth_radius_km, "Earth radius must be positive"));
        }

        if !config.orbital_altitude_km.is_finite() || config.orbital_altitude_km < 0.0 {
            errors.push(invalid(
                "orbital_altitude_km",
                config.orbital_altitude_km,
                "Altitude must be a non-negative number of kilometres",
            ));
        } else if config.orbital_altitude_km > 2000.0 {
            warnings.push("Orbital altitude is above low Earth orbit".to_string());
        }

        if !config.nominal_speed_kmh.is_finite() || config.nominal_speed_kmh <= 0.0 {
            errors.push(invalid("nominal_speed_kmh", config.nominal_speed_kmh, "Nominal speed must be positive"));
        } else if !(20_000.0..=30_000.0).contains(&config.nominal_speed_kmh) {
            warnings.push("Nominal speed is outside the usual low Earth orbit range".to_string());
        }

        if config.output_precision > MAX_OUTPUT_PRECISION {
            errors.push(invalid(
                "output_precision",
                config.output_precision,
                "Precision must not exceed 12 decimal places",
            ));
        }

        if config.history_capacity == 0 {
            errors.push(invalid("history_capacity", config.history_capacity, "History must hold at least one estimate"));
        }

        if let Some(gap) = config.max_sample_gap_s {
            if gap <= 0 {
                errors.push(invalid("max_sample_gap_s", gap, "Sample gap limit must be positive"));
            }
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
