//! Body descriptors and the embedded solar-system table.
//!
//! Orbital elements are the JPL J2000 mean elements (Standish, 1992) with the
//! sidereal period in days. Physical data from IAU/NASA fact sheets.

use serde::{Deserialize, Serialize};

use crate::core::orbit::OrbitalElements;
use crate::core::rotation;

/// Static description of one body. Built once at startup, read-only after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBodyDescriptor {
    /// Catalog key (e.g., "earth").
    pub id: String,
    /// Display name (e.g., "Earth").
    pub name: String,
    /// Mean physical radius (km).
    pub physical_radius: f64,
    /// Sidereal rotation period (hours, negative = retrograde).
    #[serde(default)]
    pub rotation_period: f64,
    /// Obliquity of the spin axis to the orbit (degrees).
    #[serde(default)]
    pub axial_tilt: f64,
    /// Absolute magnitude H for planets; apparent magnitude at 1 AU for the
    /// central body.
    #[serde(default)]
    pub base_magnitude: f64,
    /// None for the central body, which is pinned at the origin.
    #[serde(default)]
    pub elements: Option<OrbitalElements>,
}

impl CelestialBodyDescriptor {
    pub fn is_central(&self) -> bool {
        self.elements.is_none()
    }

    /// Spin angle in [0, 360) after `days`.
    pub fn rotation_angle(&self, days: f64) -> f64 {
        rotation::rotation_angle(self.rotation_period, days)
    }

    /// Unit spin axis in the ecliptic frame.
    pub fn spin_axis(&self) -> glam::DVec3 {
        rotation::spin_axis(self.axial_tilt)
    }
}

/// Catalog ids of the embedded table.
pub const SUN: &str = "sun";
pub const MERCURY: &str = "mercury";
pub const VENUS: &str = "venus";
pub const EARTH: &str = "earth";
pub const MARS: &str = "mars";
pub const JUPITER: &str = "jupiter";
pub const SATURN: &str = "saturn";
pub const URANUS: &str = "uranus";
pub const NEPTUNE: &str = "neptune";
pub const PLUTO: &str = "pluto";

fn body(
    id: &str,
    name: &str,
    physical_radius: f64,
    rotation_period: f64,
    axial_tilt: f64,
    base_magnitude: f64,
    elements: Option<OrbitalElements>,
) -> CelestialBodyDescriptor {
    CelestialBodyDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        physical_radius,
        rotation_period,
        axial_tilt,
        base_magnitude,
        elements,
    }
}

fn elements(a: f64, e: f64, i: f64, node: f64, peri: f64, l: f64, period: f64) -> Option<OrbitalElements> {
    Some(OrbitalElements {
        semi_major_axis: a,
        eccentricity: e,
        inclination: i,
        longitude_of_ascending_node: node,
        longitude_of_perihelion: peri,
        mean_longitude_at_epoch: l,
        orbital_period: period,
    })
}

/// Sun, the eight planets and Pluto.
pub fn solar_system_bodies() -> Vec<CelestialBodyDescriptor> {
    // elements(a AU, e, i°, Ω°, ϖ°, L°, period days)
    vec![
        body(SUN, "Sun", 696_340.0, 609.12, 7.25, -26.74, None),
        body(MERCURY, "Mercury", 2_439.7, 1_407.6, 0.034, -0.42,
            elements(0.38709893, 0.20563069, 7.00487, 48.33167, 77.45645, 252.25084, 87.969)),
        body(VENUS, "Venus", 6_051.8, -5_832.5, 177.36, -4.40,
            elements(0.72333199, 0.00677323, 3.39471, 76.68069, 131.53298, 181.97973, 224.701)),
        body(EARTH, "Earth", 6_371.0, 23.9345, 23.44, -3.86,
            elements(1.00000011, 0.01671022, 0.00005, -11.26064, 102.94719, 100.46435, 365.256)),
        body(MARS, "Mars", 3_389.5, 24.6229, 25.19, -1.52,
            elements(1.52366231, 0.09341233, 1.85061, 49.57854, 336.04084, 355.45332, 686.980)),
        body(JUPITER, "Jupiter", 69_911.0, 9.925, 3.13, -9.40,
            elements(5.20336301, 0.04839266, 1.30530, 100.55615, 14.75385, 34.40438, 4_332.589)),
        body(SATURN, "Saturn", 58_232.0, 10.656, 26.73, -8.88,
            elements(9.53707032, 0.05415060, 2.48446, 113.71504, 92.43194, 49.94432, 10_759.22)),
        body(URANUS, "Uranus", 25_362.0, -17.24, 97.77, -7.19,
            elements(19.19126393, 0.04716771, 0.76986, 74.22988, 170.96424, 313.23218, 30_685.4)),
        body(NEPTUNE, "Neptune", 24_622.0, 16.11, 28.32, -6.87,
            elements(30.06896348, 0.00858587, 1.76917, 131.72169, 44.97135, 304.88003, 60_189.0)),
        body(PLUTO, "Pluto", 1_188.3, -153.29, 122.53, -1.0,
            elements(39.48168677, 0.24880766, 17.14175, 110.30347, 224.06676, 238.92881, 90_560.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_central_body() {
        let bodies = solar_system_bodies();
        assert_eq!(bodies.iter().filter(|b| b.is_central()).count(), 1);
        assert_eq!(bodies[0].id, SUN);
    }

    #[test]
    fn elements_within_invariants() {
        for b in solar_system_bodies().iter().filter(|b| !b.is_central()) {
            let el = b.elements.as_ref().unwrap();
            assert!(el.eccentricity >= 0.0 && el.eccentricity < 0.25, "{}", b.id);
            assert!(el.semi_major_axis > 0.0, "{}", b.id);
            assert!(el.orbital_period > 0.0, "{}", b.id);
        }
    }

    #[test]
    fn kepler_third_law_holds() {
        for b in solar_system_bodies().iter().filter(|b| !b.is_central()) {
            let el = b.elements.as_ref().unwrap();
            let years = el.orbital_period / 365.25;
            let ratio = years * years / el.semi_major_axis.powi(3);
            assert!((ratio - 1.0).abs() < 0.01, "{}: P²/a³ = {ratio}", b.id);
        }
    }

    #[test]
    fn descriptor_parses_without_optional_fields() {
        let json = r#"{ "id": "vesta", "name": "Vesta", "physical_radius": 262.7 }"#;
        let d: CelestialBodyDescriptor = serde_json::from_str(json).unwrap();
        assert!(d.is_central());
        assert_eq!(d.rotation_period, 0.0);
        assert_eq!(d.rotation_angle(10.0), 0.0);
    }
}
