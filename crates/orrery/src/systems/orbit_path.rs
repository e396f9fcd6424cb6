// systems/orbit_path.rs
//
// Time-independent orbit shapes as scaled polylines. A path is rebuilt
// wholesale whenever the level of detail or the scaling profile changes.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::orbit::{OrbitCalculator, OrbitalElements};
use crate::systems::scaling::ScalingEngine;

/// Eccentricity above which an orbit counts as visibly non-circular and
/// gets proportionally more segments.
pub const VISIBLY_ECCENTRIC: f64 = 0.05;

/// Path resolution tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelOfDetail {
    Low,
    #[default]
    Medium,
    High,
}

/// One polyline vertex in scene units. Must stay 3 floats = 12 bytes so a
/// path can be handed to a vertex buffer as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OrbitPathPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl OrbitPathPoint {
    pub const FLOATS: usize = 3;

    pub fn from_scene(p: DVec3) -> Self {
        Self {
            x: p.x as f32,
            y: p.y as f32,
            z: p.z as f32,
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Segment counts per level of detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_low")]
    pub low: usize,
    #[serde(default = "default_medium")]
    pub medium: usize,
    #[serde(default = "default_high")]
    pub high: usize,
    /// Hard cap after the eccentricity boost.
    #[serde(default = "default_max_segments")]
    pub max_segments: usize,
}

fn default_low() -> usize {
    64
}

fn default_medium() -> usize {
    128
}

fn default_high() -> usize {
    256
}

fn default_max_segments() -> usize {
    512
}

impl PathSettings {
    pub fn base_segments(&self, lod: LevelOfDetail) -> usize {
        match lod {
            LevelOfDetail::Low => self.low,
            LevelOfDetail::Medium => self.medium,
            LevelOfDetail::High => self.high,
        }
    }

    /// Segments for an orbit of the given eccentricity: the tier's base count,
    /// scaled by (1 + e) when visibly eccentric, capped at `max_segments`.
    pub fn segments_for(&self, lod: LevelOfDetail, eccentricity: f64) -> usize {
        let base = self.base_segments(lod);
        let boosted = if eccentricity > VISIBLY_ECCENTRIC {
            (base as f64 * (1.0 + eccentricity)).ceil() as usize
        } else {
            base
        };
        boosted.min(self.max_segments)
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
            max_segments: default_max_segments(),
        }
    }
}

/// Samples orbit shapes by sweeping the mean anomaly through one revolution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitPathSampler {
    calculator: OrbitCalculator,
    settings: PathSettings,
}

impl OrbitPathSampler {
    pub fn new(calculator: OrbitCalculator, settings: PathSettings) -> Self {
        Self { calculator, settings }
    }

    pub fn settings(&self) -> &PathSettings {
        &self.settings
    }

    /// Unscaled ecliptic positions (AU) at `M = 360°·i/segments`.
    pub fn sample_au(&self, elements: &OrbitalElements, segments: usize) -> Vec<DVec3> {
        (0..segments)
            .map(|i| {
                let m = 360.0 * i as f64 / segments as f64;
                self.calculator.position_at_mean_anomaly(elements, m).position
            })
            .collect()
    }

    /// Scaled polyline with an explicit segment count.
    pub fn sample(
        &self,
        elements: &OrbitalElements,
        segments: usize,
        engine: &ScalingEngine,
    ) -> Vec<OrbitPathPoint> {
        self.sample_au(elements, segments)
            .into_iter()
            .map(|p| OrbitPathPoint::from_scene(engine.scaled_position(p)))
            .collect()
    }

    /// Scaled polyline at a level of detail.
    pub fn path(
        &self,
        elements: &OrbitalElements,
        lod: LevelOfDetail,
        engine: &ScalingEngine,
    ) -> Vec<OrbitPathPoint> {
        let segments = self.settings.segments_for(lod, elements.eccentricity);
        self.sample(elements, segments, engine)
    }
}
