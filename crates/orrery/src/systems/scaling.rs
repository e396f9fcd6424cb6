// systems/scaling.rs
//
// Physical units (km, AU) to scene-length units under one of three
// visualization profiles. Pure functions over the active profile's settings.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::orbit::AU_KM;

/// Scene units per AU shared by the true-scale and exploration profiles.
pub const DEFAULT_UNITS_PER_AU: f64 = 100.0;

/// Visualization policy. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingProfile {
    /// Sizes and distances share one scale; planets may be sub-pixel.
    TrueScale,
    /// Linear distances, small bodies lifted toward a visible floor.
    #[default]
    Exploration,
    /// Compressed distances, strongly exaggerated sizes.
    Artistic,
}

impl ScalingProfile {
    /// Every profile, in toggle order.
    pub const ALL: [ScalingProfile; 3] = [
        ScalingProfile::TrueScale,
        ScalingProfile::Exploration,
        ScalingProfile::Artistic,
    ];
}

/// Numeric parameters of one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Scene units per AU.
    pub distance_scale_factor: f64,
    /// Scene units per km of physical radius (orbiting bodies).
    pub base_size_scale_factor: f64,
    /// Radius below which enhancement kicks in (scene units).
    pub minimum_radius_floor: f64,
    /// Upper bound on the enhancement multiplier; 1 disables enhancement.
    pub maximum_enhancement_factor: f64,
    /// Scene units per km for the central body.
    pub central_size_scale_factor: f64,
    /// Visibility floor for the central body (scene units).
    pub central_minimum_radius_floor: f64,
}

impl ProfileSettings {
    /// One scale for everything; no enhancement.
    pub fn true_scale() -> Self {
        let km_scale = DEFAULT_UNITS_PER_AU / AU_KM;
        Self {
            distance_scale_factor: DEFAULT_UNITS_PER_AU,
            base_size_scale_factor: km_scale,
            minimum_radius_floor: 0.0,
            maximum_enhancement_factor: 1.0,
            central_size_scale_factor: km_scale,
            central_minimum_radius_floor: 0.0,
        }
    }

    pub fn exploration() -> Self {
        Self {
            distance_scale_factor: DEFAULT_UNITS_PER_AU,
            base_size_scale_factor: 1.0e-5,
            minimum_radius_floor: 0.5,
            maximum_enhancement_factor: 100.0,
            central_size_scale_factor: 2.0e-6,
            central_minimum_radius_floor: 1.0,
        }
    }

    pub fn artistic() -> Self {
        Self {
            distance_scale_factor: 40.0,
            base_size_scale_factor: 5.0e-5,
            minimum_radius_floor: 1.0,
            maximum_enhancement_factor: 200.0,
            central_size_scale_factor: 1.0e-5,
            central_minimum_radius_floor: 3.0,
        }
    }
}

/// Settings for all three profiles, selectable by variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileTable {
    #[serde(default = "ProfileSettings::true_scale")]
    pub true_scale: ProfileSettings,
    #[serde(default = "ProfileSettings::exploration")]
    pub exploration: ProfileSettings,
    #[serde(default = "ProfileSettings::artistic")]
    pub artistic: ProfileSettings,
}

impl ProfileTable {
    pub fn settings(&self, profile: ScalingProfile) -> &ProfileSettings {
        match profile {
            ScalingProfile::TrueScale => &self.true_scale,
            ScalingProfile::Exploration => &self.exploration,
            ScalingProfile::Artistic => &self.artistic,
        }
    }

    /// Scaling engine for the given profile.
    pub fn engine(&self, profile: ScalingProfile) -> ScalingEngine {
        ScalingEngine::new(profile, *self.settings(profile))
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self {
            true_scale: ProfileSettings::true_scale(),
            exploration: ProfileSettings::exploration(),
            artistic: ProfileSettings::artistic(),
        }
    }
}

/// A scaled radius together with the multiplier that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledRadius {
    /// Scene-length radius.
    pub radius: f64,
    /// 1 when no enhancement was applied.
    pub enhancement: f64,
}

/// Maps physical lengths into scene units for one active profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingEngine {
    profile: ScalingProfile,
    settings: ProfileSettings,
}

impl ScalingEngine {
    pub fn new(profile: ScalingProfile, settings: ProfileSettings) -> Self {
        Self { profile, settings }
    }

    pub fn profile(&self) -> ScalingProfile {
        self.profile
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    /// AU to scene units. Uniform for every body.
    #[inline]
    pub fn scaled_distance(&self, distance_au: f64) -> f64 {
        distance_au * self.settings.distance_scale_factor
    }

    /// Heliocentric position (AU) to scene coordinates.
    #[inline]
    pub fn scaled_position(&self, position_au: DVec3) -> DVec3 {
        position_au * self.settings.distance_scale_factor
    }

    /// Scene coordinates back to AU.
    #[inline]
    pub fn unscaled_position(&self, scene: DVec3) -> DVec3 {
        scene / self.settings.distance_scale_factor
    }

    /// Radius of an orbiting body.
    pub fn body_radius(&self, physical_radius_km: f64) -> ScaledRadius {
        enhance(
            physical_radius_km * self.settings.base_size_scale_factor,
            self.settings.minimum_radius_floor,
            self.settings.maximum_enhancement_factor,
        )
    }

    /// Radius of the central body, on its own scale and floor.
    pub fn central_radius(&self, physical_radius_km: f64) -> ScaledRadius {
        enhance(
            physical_radius_km * self.settings.central_size_scale_factor,
            self.settings.central_minimum_radius_floor,
            self.settings.maximum_enhancement_factor,
        )
    }

    /// Dispatch on whether the body is the central one.
    pub fn scaled_radius(&self, physical_radius_km: f64, is_central: bool) -> ScaledRadius {
        if is_central {
            self.central_radius(physical_radius_km)
        } else {
            self.body_radius(physical_radius_km)
        }
    }
}

/// Lift `base` toward `floor`, multiplying by at most `max_enhancement`.
/// Bodies already at or above the floor are untouched.
fn enhance(base: f64, floor: f64, max_enhancement: f64) -> ScaledRadius {
    let enhancement = if base < floor {
        // base == 0 gives +inf here, which the min() caps.
        max_enhancement.min(floor / base).max(1.0)
    } else {
        1.0
    };
    ScaledRadius {
        radius: base * enhancement,
        enhancement,
    }
}
