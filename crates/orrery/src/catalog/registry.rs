use std::collections::HashMap;

use crate::api::error::{OrreryError, OrreryResult};
use crate::catalog::bodies::{self, CelestialBodyDescriptor};
use crate::catalog::manifest::CatalogManifest;
use crate::core::orbit::OrbitalElements;

/// Days per Julian year, the unit of Kepler's third-law check.
const DAYS_PER_YEAR: f64 = 365.25;
/// Allowed relative deviation of P²/a³ from 1 before a warning is logged.
const KEPLER_THIRD_LAW_TOLERANCE: f64 = 0.01;

/// Immutable body catalog, built once from a manifest and shared by reference.
/// Lookup is by catalog id; iteration keeps manifest order.
#[derive(Debug, Clone)]
pub struct Catalog {
    bodies: Vec<CelestialBodyDescriptor>,
    index: HashMap<String, usize>,
    central: usize,
}

impl Catalog {
    /// Build and validate a catalog from a parsed manifest.
    pub fn from_manifest(manifest: CatalogManifest) -> OrreryResult<Self> {
        let catalog = Self::from_bodies(manifest.bodies)?;
        log::info!("catalog '{}': {} bodies loaded", manifest.name, catalog.len());
        Ok(catalog)
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> OrreryResult<Self> {
        Self::from_manifest(CatalogManifest::from_json(json)?)
    }

    /// The embedded Sun + planets + Pluto table. Its validity is covered by
    /// tests, so it is indexed without re-validation.
    pub fn solar_system() -> Self {
        let bodies = bodies::solar_system_bodies();
        let index = bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id.clone(), i))
            .collect();
        let central = bodies
            .iter()
            .position(CelestialBodyDescriptor::is_central)
            .unwrap_or_default();
        Self { bodies, index, central }
    }

    fn from_bodies(bodies: Vec<CelestialBodyDescriptor>) -> OrreryResult<Self> {
        let mut index = HashMap::with_capacity(bodies.len());
        let mut central = None;

        for (i, body) in bodies.iter().enumerate() {
            validate_body(body)?;
            if index.insert(body.id.clone(), i).is_some() {
                return Err(invalid(body, "duplicate id"));
            }
            if body.is_central() {
                if central.is_some() {
                    return Err(invalid(body, "second body without orbital elements"));
                }
                central = Some(i);
            } else if let Some(ratio) = body.elements.as_ref().map(kepler_third_law_ratio) {
                if (ratio - 1.0).abs() > KEPLER_THIRD_LAW_TOLERANCE {
                    log::warn!(
                        "catalog: '{}' deviates from Kepler's third law (P²/a³ = {:.4})",
                        body.id,
                        ratio,
                    );
                }
            }
        }

        let central = central.ok_or_else(|| {
            log::warn!("catalog: no central body");
            OrreryError::InvalidElements {
                body: "<catalog>".to_string(),
                reason: "no central body".to_string(),
            }
        })?;

        Ok(Self { bodies, index, central })
    }

    /// Look up a body by id.
    pub fn get(&self, id: &str) -> OrreryResult<&CelestialBodyDescriptor> {
        self.index
            .get(id)
            .map(|&i| &self.bodies[i])
            .ok_or_else(|| OrreryError::BodyNotFound(id.to_string()))
    }

    /// Orbital elements of a body; None for the central body.
    pub fn elements(&self, id: &str) -> OrreryResult<Option<&OrbitalElements>> {
        Ok(self.get(id)?.elements.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The body pinned at the origin.
    pub fn central(&self) -> &CelestialBodyDescriptor {
        &self.bodies[self.central]
    }

    /// Bodies in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &CelestialBodyDescriptor> {
        self.bodies.iter()
    }

    /// Bodies that have orbits, in manifest order.
    pub fn orbiting(&self) -> impl Iterator<Item = (&CelestialBodyDescriptor, &OrbitalElements)> {
        self.bodies
            .iter()
            .filter_map(|b| b.elements.as_ref().map(|el| (b, el)))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Serialize back into a manifest.
    pub fn to_manifest(&self, name: &str) -> CatalogManifest {
        CatalogManifest {
            name: name.to_string(),
            bodies: self.bodies.clone(),
        }
    }
}

/// (period in Julian years)² / (semi-major axis in AU)³; 1 for a heliocentric orbit.
pub fn kepler_third_law_ratio(elements: &OrbitalElements) -> f64 {
    let years = elements.orbital_period / DAYS_PER_YEAR;
    years * years / elements.semi_major_axis.powi(3)
}

fn validate_body(body: &CelestialBodyDescriptor) -> OrreryResult<()> {
    if body.id.is_empty() {
        return Err(invalid(body, "empty id"));
    }
    if !(body.physical_radius > 0.0) {
        return Err(invalid(body, "physical radius must be positive"));
    }
    if let Some(el) = &body.elements {
        if !(0.0..1.0).contains(&el.eccentricity) {
            return Err(invalid(body, &format!("eccentricity {} outside [0, 1)", el.eccentricity)));
        }
        if !(el.semi_major_axis > 0.0) {
            return Err(invalid(body, "semi-major axis must be positive"));
        }
        if !(el.orbital_period > 0.0) {
            return Err(invalid(body, "orbital period must be positive"));
        }
        let angles = [
            el.inclination,
            el.longitude_of_ascending_node,
            el.longitude_of_perihelion,
            el.mean_longitude_at_epoch,
        ];
        if angles.iter().any(|a| !a.is_finite()) {
            return Err(invalid(body, "non-finite angle"));
        }
    }
    Ok(())
}

fn invalid(body: &CelestialBodyDescriptor, reason: &str) -> OrreryError {
    log::warn!("catalog: rejecting '{}': {}", body.id, reason);
    OrreryError::InvalidElements {
        body: body.id.clone(),
        reason: reason.to_string(),
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::solar_system()
    }
}
