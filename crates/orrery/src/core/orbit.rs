//! Keplerian orbital elements and heliocentric position.
//!
//! f64 throughout; angles are stored in degrees and only converted to radians
//! at the trigonometry. Conversion to f32 happens at the vertex boundary in
//! `systems::orbit_path`.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::core::kepler::KeplerSolver;

/// Kilometres per astronomical unit.
pub const AU_KM: f64 = 149_597_870.7;
/// Heliocentric gravitational parameter GM☉ (km³/s²).
pub const GM_SUN_KM3_S2: f64 = 1.327_124_400_18e11;

/// Classical elements of one heliocentric orbit, referred to a fixed epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU).
    pub semi_major_axis: f64,
    /// Eccentricity, `0 ≤ e < 1`.
    pub eccentricity: f64,
    /// Inclination to the ecliptic (degrees).
    pub inclination: f64,
    /// Longitude of the ascending node Ω (degrees).
    pub longitude_of_ascending_node: f64,
    /// Longitude of perihelion ϖ = Ω + ω (degrees).
    pub longitude_of_perihelion: f64,
    /// Mean longitude L at the reference epoch (degrees).
    pub mean_longitude_at_epoch: f64,
    /// Sidereal period (days).
    pub orbital_period: f64,
}

impl OrbitalElements {
    /// Mean motion in degrees per day.
    pub fn mean_motion(&self) -> f64 {
        360.0 / self.orbital_period
    }

    /// Argument of perihelion ω = ϖ − Ω (degrees).
    pub fn argument_of_perihelion(&self) -> f64 {
        self.longitude_of_perihelion - self.longitude_of_ascending_node
    }

    /// Mean anomaly in [0, 360) at `days` since the reference epoch.
    pub fn mean_anomaly_at(&self, days: f64) -> f64 {
        let mean_longitude = self.mean_longitude_at_epoch + self.mean_motion() * days;
        normalize_degrees(mean_longitude - self.longitude_of_perihelion)
    }

    pub fn perihelion_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn aphelion_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Rotation from the perifocal frame (x toward perihelion) into the
    /// ecliptic frame: R_z(Ω) · R_x(i) · R_z(ω).
    pub fn perifocal_to_ecliptic(&self) -> DMat3 {
        DMat3::from_rotation_z(self.longitude_of_ascending_node.to_radians())
            * DMat3::from_rotation_x(self.inclination.to_radians())
            * DMat3::from_rotation_z(self.argument_of_perihelion().to_radians())
    }
}

/// Derived state of a body at one instant. Never stored; recompute on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricPosition {
    /// Ecliptic cartesian position (AU).
    pub position: DVec3,
    /// Distance from the central body (AU).
    pub distance: f64,
    /// Mean anomaly (degrees, [0, 360)).
    pub mean_anomaly: f64,
    /// Eccentric anomaly (degrees).
    pub eccentric_anomaly: f64,
    /// True anomaly (degrees).
    pub true_anomaly: f64,
    /// Instantaneous orbital speed (km/s).
    pub speed_km_s: f64,
    /// False when the Kepler solve ran out of iterations; the position is
    /// then the solver's best estimate.
    pub converged: bool,
}

impl HeliocentricPosition {
    /// State of the central body: pinned at the origin, at rest.
    pub const ORIGIN: Self = Self {
        position: DVec3::ZERO,
        distance: 0.0,
        mean_anomaly: 0.0,
        eccentric_anomaly: 0.0,
        true_anomaly: 0.0,
        speed_km_s: 0.0,
        converged: true,
    };
}

/// Turns orbital elements and a time into a heliocentric state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitCalculator {
    pub solver: KeplerSolver,
}

impl OrbitCalculator {
    pub fn new(solver: KeplerSolver) -> Self {
        Self { solver }
    }

    /// State at `days` since the reference epoch.
    pub fn position(&self, elements: &OrbitalElements, days: f64) -> HeliocentricPosition {
        self.position_at_mean_anomaly(elements, elements.mean_anomaly_at(days))
    }

    /// State at an explicit mean anomaly (degrees, any real value), holding
    /// every other element fixed.
    pub fn position_at_mean_anomaly(
        &self,
        elements: &OrbitalElements,
        mean_anomaly_deg: f64,
    ) -> HeliocentricPosition {
        let m = normalize_degrees(mean_anomaly_deg);
        let e = elements.eccentricity;
        let solution = self.solver.solve(m, e);
        let ea = solution.eccentric_anomaly;

        let true_anomaly = 2.0
            * ((1.0 + e).sqrt() * (ea / 2.0).sin())
                .atan2((1.0 - e).sqrt() * (ea / 2.0).cos());

        let distance = elements.semi_major_axis * (1.0 - e * ea.cos());
        let in_plane = DVec3::new(
            distance * true_anomaly.cos(),
            distance * true_anomaly.sin(),
            0.0,
        );
        let position = elements.perifocal_to_ecliptic() * in_plane;

        HeliocentricPosition {
            position,
            distance,
            mean_anomaly: m,
            eccentric_anomaly: ea.to_degrees(),
            true_anomaly: normalize_degrees(true_anomaly.to_degrees()),
            speed_km_s: orbital_speed(elements, distance),
            converged: solution.converged,
        }
    }
}

/// Vis-viva speed `v = √(GM☉·(2/r − 1/a))` in km/s, with `r` in AU.
pub fn orbital_speed(elements: &OrbitalElements, distance_au: f64) -> f64 {
    let r = distance_au * AU_KM;
    let a = elements.semi_major_axis * AU_KM;
    // Clamped so r ≈ 2a rounding can never produce NaN.
    (GM_SUN_KM3_S2 * (2.0 / r - 1.0 / a)).max(0.0).sqrt()
}

/// Wrap an angle in degrees to [0, 360).
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}
