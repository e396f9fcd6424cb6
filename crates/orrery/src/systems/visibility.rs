// systems/visibility.rs
//
// Apparent brightness of a body seen from an arbitrary observer. Degenerate
// geometry is clamped, never reported.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Distances (AU) are clamped to at least this before any log or division.
pub const MIN_DISTANCE_AU: f64 = 1e-9;
/// Phase angle (degrees) above which the phase penalty applies.
pub const PHASE_PENALTY_ONSET: f64 = 90.0;
/// Magnitudes added per degree of phase angle above the onset.
pub const PHASE_PENALTY_PER_DEGREE: f64 = 0.04;

/// Coarse visibility class, brightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityTier {
    Bright,
    Visible,
    Faint,
    Telescopic,
    Invisible,
}

/// Upper magnitude bound of each tier (a magnitude strictly below the bound
/// belongs to the tier). Anything at or above `telescopic` is invisible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeThresholds {
    pub bright: f64,
    pub visible: f64,
    /// Naked-eye limit under dark skies.
    pub faint: f64,
    pub telescopic: f64,
}

impl MagnitudeThresholds {
    pub fn classify(&self, magnitude: f64) -> VisibilityTier {
        if magnitude < self.bright {
            VisibilityTier::Bright
        } else if magnitude < self.visible {
            VisibilityTier::Visible
        } else if magnitude < self.faint {
            VisibilityTier::Faint
        } else if magnitude < self.telescopic {
            VisibilityTier::Telescopic
        } else {
            VisibilityTier::Invisible
        }
    }
}

impl Default for MagnitudeThresholds {
    fn default() -> Self {
        Self {
            bright: 0.0,
            visible: 4.0,
            faint: 6.5,
            telescopic: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityReport {
    pub apparent_magnitude: f64,
    /// Sun–body–observer angle (degrees, [0, 180]).
    pub phase_angle: f64,
    pub tier: VisibilityTier,
    /// Body to observer (AU).
    pub distance_to_observer: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisibilityEstimator {
    thresholds: MagnitudeThresholds,
}

impl VisibilityEstimator {
    pub fn new(thresholds: MagnitudeThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &MagnitudeThresholds {
        &self.thresholds
    }

    /// Reflecting body at `body` (AU) lit by the central body at `central`.
    /// `base_magnitude` is the body's absolute magnitude H.
    pub fn estimate(
        &self,
        base_magnitude: f64,
        body: DVec3,
        observer: DVec3,
        central: DVec3,
    ) -> VisibilityReport {
        let to_observer = observer - body;
        let to_central = central - body;
        let d_observer = to_observer.length().max(MIN_DISTANCE_AU);
        let d_central = to_central.length().max(MIN_DISTANCE_AU);

        let phase_angle = angle_between(to_central, to_observer);
        let apparent_magnitude =
            base_magnitude + 5.0 * (d_observer * d_central).log10() + phase_correction(phase_angle);

        VisibilityReport {
            apparent_magnitude,
            phase_angle,
            tier: self.thresholds.classify(apparent_magnitude),
            distance_to_observer: d_observer,
        }
    }

    /// Self-luminous central body: `base_magnitude` is its apparent
    /// magnitude at 1 AU; brightness falls off with distance only.
    pub fn estimate_central(&self, base_magnitude: f64, central: DVec3, observer: DVec3) -> VisibilityReport {
        let d_observer = (observer - central).length().max(MIN_DISTANCE_AU);
        let apparent_magnitude = base_magnitude + 5.0 * d_observer.log10();
        VisibilityReport {
            apparent_magnitude,
            phase_angle: 0.0,
            tier: self.thresholds.classify(apparent_magnitude),
            distance_to_observer: d_observer,
        }
    }
}

/// Piecewise-linear dimming: zero up to 90°, then linear in the excess angle.
pub fn phase_correction(phase_angle_deg: f64) -> f64 {
    (phase_angle_deg - PHASE_PENALTY_ONSET).max(0.0) * PHASE_PENALTY_PER_DEGREE
}

/// Angle between two vectors in degrees; 0 if either is degenerate.
fn angle_between(a: DVec3, b: DVec3) -> f64 {
    let la = a.length();
    let lb = b.length();
    if la < MIN_DISTANCE_AU || lb < MIN_DISTANCE_AU {
        return 0.0;
    }
    (a.dot(b) / (la * lb)).clamp(-1.0, 1.0).acos().to_degrees()
}
