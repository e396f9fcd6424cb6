use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::{OrreryError, OrreryResult};
use crate::core::kepler::{KeplerSolver, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::core::time::{j2000_epoch, EphemerisClock};
use crate::systems::orbit_path::PathSettings;
use crate::systems::scaling::{ProfileTable, ScalingProfile};
use crate::systems::visibility::MagnitudeThresholds;

/// Configuration for the orrery, provided by the host at startup.
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrreryConfig {
    /// Reference epoch of the catalog's mean longitudes (default: J2000.0).
    #[serde(default = "j2000_epoch")]
    pub epoch: DateTime<Utc>,
    /// Kepler solver convergence tolerance in radians (default: 1e-6).
    #[serde(default = "default_tolerance")]
    pub solver_tolerance: f64,
    /// Kepler solver iteration budget (default: 20).
    #[serde(default = "default_max_iterations")]
    pub solver_max_iterations: u32,
    /// Parameters of the three scaling profiles.
    #[serde(default)]
    pub profiles: ProfileTable,
    /// Orbit path segment counts per level of detail.
    #[serde(default)]
    pub orbit_paths: PathSettings,
    /// Magnitude bounds of the visibility tiers.
    #[serde(default)]
    pub visibility: MagnitudeThresholds,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

impl OrreryConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> OrreryResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make scaling or solving non-finite.
    pub fn validate(&self) -> OrreryResult<()> {
        if !(self.solver_tolerance > 0.0) {
            return Err(invalid("solver_tolerance must be positive".to_string()));
        }
        if self.solver_max_iterations == 0 {
            return Err(invalid("solver_max_iterations must be at least 1".to_string()));
        }
        for profile in ScalingProfile::ALL {
            let s = self.profiles.settings(profile);
            let scales = [
                ("distance_scale_factor", s.distance_scale_factor),
                ("base_size_scale_factor", s.base_size_scale_factor),
                ("central_size_scale_factor", s.central_size_scale_factor),
            ];
            for (name, value) in scales {
                if !(value > 0.0 && value.is_finite()) {
                    return Err(invalid(format!("{profile:?}: {name} must be positive, got {value}")));
                }
            }
            let floors = [
                ("minimum_radius_floor", s.minimum_radius_floor),
                ("central_minimum_radius_floor", s.central_minimum_radius_floor),
            ];
            for (name, value) in floors {
                if !(value >= 0.0 && value.is_finite()) {
                    return Err(invalid(format!("{profile:?}: {name} must be non-negative, got {value}")));
                }
            }
            if !(s.maximum_enhancement_factor >= 1.0) {
                return Err(invalid(format!(
                    "{profile:?}: maximum_enhancement_factor must be at least 1, got {}",
                    s.maximum_enhancement_factor
                )));
            }
        }
        Ok(())
    }

    pub fn solver(&self) -> KeplerSolver {
        KeplerSolver::new(self.solver_tolerance, self.solver_max_iterations)
    }

    pub fn clock(&self) -> EphemerisClock {
        EphemerisClock::new(self.epoch)
    }
}

fn invalid(reason: String) -> OrreryError {
    log::warn!("config: {}", reason);
    OrreryError::InvalidConfig(reason)
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            epoch: j2000_epoch(),
            solver_tolerance: DEFAULT_TOLERANCE,
            solver_max_iterations: DEFAULT_MAX_ITERATIONS,
            profiles: ProfileTable::default(),
            orbit_paths: PathSettings::default(),
            visibility: MagnitudeThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::scaling::ProfileSettings;

    #[test]
    fn empty_json_is_default() {
        let config = OrreryConfig::from_json("{}").unwrap();
        assert_eq!(config, OrreryConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.solver().max_iterations, 20);
        assert_eq!(config.solver().tolerance, 1e-6);
    }

    #[test]
    fn rejects_zero_distance_scale() {
        let json = r#"{ "profiles": { "exploration": {
            "distance_scale_factor": 0.0,
            "base_size_scale_factor": 1e-5,
            "minimum_radius_floor": 0.5,
            "maximum_enhancement_factor": 100.0,
            "central_size_scale_factor": 2e-6,
            "central_minimum_radius_floor": 1.0
        } } }"#;
        assert!(matches!(OrreryConfig::from_json(json), Err(OrreryError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bad_size_scales_and_solver() {
        let mut config = OrreryConfig::default();
        config.profiles.artistic.base_size_scale_factor = -1.0;
        assert!(matches!(config.validate(), Err(OrreryError::InvalidConfig(_))));

        let mut config = OrreryConfig::default();
        config.profiles.true_scale.central_size_scale_factor = 0.0;
        assert!(matches!(config.validate(), Err(OrreryError::InvalidConfig(_))));

        let mut config = OrreryConfig::default();
        config.profiles.exploration.maximum_enhancement_factor = 0.5;
        assert!(matches!(config.validate(), Err(OrreryError::InvalidConfig(_))));

        let mut config = OrreryConfig::default();
        config.solver_max_iterations = 0;
        assert!(matches!(config.validate(), Err(OrreryError::InvalidConfig(_))));
    }

    #[test]
    fn bad_json_is_json_error() {
        assert!(matches!(OrreryConfig::from_json("{ nope"), Err(OrreryError::Json(_))));
    }

    #[test]
    fn partial_overrides() {
        let json = r#"{
            "epoch": "2000-01-02T12:00:00Z",
            "solver_max_iterations": 40,
            "orbit_paths": { "high": 384 },
            "profiles": {
                "artistic": {
                    "distance_scale_factor": 10.0,
                    "base_size_scale_factor": 1e-4,
                    "minimum_radius_floor": 2.0,
                    "maximum_enhancement_factor": 50.0,
                    "central_size_scale_factor": 1e-5,
                    "central_minimum_radius_floor": 4.0
                }
            }
        }"#;
        let config = OrreryConfig::from_json(json).unwrap();
        assert_eq!(config.solver_max_iterations, 40);
        assert_eq!(config.orbit_paths.high, 384);
        assert_eq!(config.orbit_paths.low, 64);
        assert_eq!(config.profiles.artistic.distance_scale_factor, 10.0);
        assert_eq!(config.profiles.exploration, ProfileSettings::exploration());
        assert_eq!(config.clock().days_since_epoch(j2000_epoch()), -1.0);
    }
}
