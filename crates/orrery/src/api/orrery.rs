use chrono::{DateTime, Utc};
use glam::DVec3;

use crate::api::config::OrreryConfig;
use crate::api::error::{OrreryError, OrreryResult};
use crate::catalog::registry::Catalog;
use crate::core::orbit::{HeliocentricPosition, OrbitCalculator};
use crate::core::time::EphemerisClock;
use crate::systems::orbit_path::{LevelOfDetail, OrbitPathPoint, OrbitPathSampler};
use crate::systems::scaling::{ScalingEngine, ScalingProfile};
use crate::systems::visibility::{VisibilityEstimator, VisibilityReport};

/// One body's orbit polyline, tagged with what it was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    pub body: String,
    pub profile: ScalingProfile,
    pub lod: LevelOfDetail,
    pub points: Vec<OrbitPathPoint>,
}

/// Entry point for render and UI layers: an immutable catalog plus the
/// configured calculators. Every query is a pure function of its arguments,
/// so one `Orrery` can be shared across threads by reference.
#[derive(Debug, Clone)]
pub struct Orrery {
    catalog: Catalog,
    config: OrreryConfig,
    clock: EphemerisClock,
    calculator: OrbitCalculator,
    sampler: OrbitPathSampler,
    estimator: VisibilityEstimator,
}

impl Orrery {
    pub fn new(catalog: Catalog, config: OrreryConfig) -> Self {
        let calculator = OrbitCalculator::new(config.solver());
        Self {
            clock: config.clock(),
            sampler: OrbitPathSampler::new(calculator, config.orbit_paths),
            estimator: VisibilityEstimator::new(config.visibility),
            calculator,
            catalog,
            config,
        }
    }

    /// Embedded solar system with default configuration.
    pub fn solar_system() -> Self {
        Self::new(Catalog::solar_system(), OrreryConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    /// Clock converting wall-clock instants to the `days` argument below.
    pub fn clock(&self) -> &EphemerisClock {
        &self.clock
    }

    /// Scaling engine for a profile.
    pub fn scaling(&self, profile: ScalingProfile) -> ScalingEngine {
        self.config.profiles.engine(profile)
    }

    /// Heliocentric state of a body `days` after the epoch.
    /// The central body is always at the origin, at rest.
    pub fn position(&self, id: &str, days: f64) -> OrreryResult<HeliocentricPosition> {
        Ok(match self.catalog.elements(id)? {
            Some(elements) => self.calculator.position(elements, days),
            None => HeliocentricPosition::ORIGIN,
        })
    }

    /// Heliocentric state of a body at a wall-clock instant.
    pub fn position_at(&self, id: &str, instant: DateTime<Utc>) -> OrreryResult<HeliocentricPosition> {
        self.position(id, self.clock.days_since_epoch(instant))
    }

    /// Scene-length radius of a body under a profile.
    pub fn scaled_radius(&self, id: &str, profile: ScalingProfile) -> OrreryResult<f64> {
        let body = self.catalog.get(id)?;
        Ok(self
            .scaling(profile)
            .scaled_radius(body.physical_radius, body.is_central())
            .radius)
    }

    /// Scene-length distance from the central body `days` after the epoch.
    pub fn scaled_distance(&self, id: &str, days: f64, profile: ScalingProfile) -> OrreryResult<f64> {
        let state = self.position(id, days)?;
        Ok(self.scaling(profile).scaled_distance(state.distance))
    }

    /// Scene-length semi-major axis (0 for the central body).
    pub fn scaled_orbit_radius(&self, id: &str, profile: ScalingProfile) -> OrreryResult<f64> {
        let a = self
            .catalog
            .elements(id)?
            .map_or(0.0, |el| el.semi_major_axis);
        Ok(self.scaling(profile).scaled_distance(a))
    }

    /// Scene coordinates of a body `days` after the epoch.
    pub fn scaled_position(&self, id: &str, days: f64, profile: ScalingProfile) -> OrreryResult<DVec3> {
        let state = self.position(id, days)?;
        Ok(self.scaling(profile).scaled_position(state.position))
    }

    /// Orbit polyline of one body. The central body has no orbit.
    pub fn orbit_path(
        &self,
        id: &str,
        profile: ScalingProfile,
        lod: LevelOfDetail,
    ) -> OrreryResult<Vec<OrbitPathPoint>> {
        let elements = self
            .catalog
            .elements(id)?
            .ok_or_else(|| OrreryError::NoOrbit(id.to_string()))?;
        Ok(self.sampler.path(elements, lod, &self.scaling(profile)))
    }

    /// Orbit polylines of every orbiting body, rebuilt from scratch. Call on
    /// a profile or level-of-detail change.
    pub fn orbit_paths(&self, profile: ScalingProfile, lod: LevelOfDetail) -> Vec<OrbitPath> {
        let engine = self.scaling(profile);
        let paths: Vec<OrbitPath> = self
            .catalog
            .orbiting()
            .map(|(body, elements)| OrbitPath {
                body: body.id.clone(),
                profile,
                lod,
                points: self.sampler.path(elements, lod, &engine),
            })
            .collect();
        log::info!(
            "orbit paths rebuilt: {} bodies, profile {:?}, lod {:?}, {} vertices",
            paths.len(),
            profile,
            lod,
            paths.iter().map(|p| p.points.len()).sum::<usize>(),
        );
        paths
    }

    /// Brightness of a body `days` after the epoch, seen from `observer`
    /// given in scene units of `profile`.
    pub fn visibility(
        &self,
        id: &str,
        days: f64,
        observer: DVec3,
        profile: ScalingProfile,
    ) -> OrreryResult<VisibilityReport> {
        let body = self.catalog.get(id)?;
        let observer_au = self.scaling(profile).unscaled_position(observer);
        let central = HeliocentricPosition::ORIGIN.position;
        Ok(match &body.elements {
            Some(elements) => {
                let state = self.calculator.position(elements, days);
                self.estimator
                    .estimate(body.base_magnitude, state.position, observer_au, central)
            }
            None => self
                .estimator
                .estimate_central(body.base_magnitude, central, observer_au),
        })
    }
}

impl Default for Orrery {
    fn default() -> Self {
        Self::solar_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::bodies::{EARTH, JUPITER, MARS, NEPTUNE, SUN};
    use crate::systems::visibility::VisibilityTier;

    #[test]
    fn earth_at_epoch() {
        let orrery = Orrery::solar_system();
        let state = orrery.position(EARTH, 0.0).unwrap();
        assert!((state.distance - 1.0).abs() < 0.02);
    }

    #[test]
    fn wall_clock_and_day_count_agree() {
        let orrery = Orrery::solar_system();
        let instant = orrery.clock().instant_at(1000.0);
        assert_eq!(
            orrery.position_at(MARS, instant).unwrap(),
            orrery.position(MARS, 1000.0).unwrap()
        );
    }

    #[test]
    fn sun_is_pinned_at_origin() {
        let orrery = Orrery::solar_system();
        let state = orrery.position(SUN, 1234.0).unwrap();
        assert_eq!(state.position, DVec3::ZERO);
        assert_eq!(state.speed_km_s, 0.0);
        assert_eq!(orrery.scaled_distance(SUN, 1234.0, ScalingProfile::Artistic).unwrap(), 0.0);
    }

    #[test]
    fn unknown_body_is_reported_everywhere() {
        let orrery = Orrery::solar_system();
        let p = ScalingProfile::Exploration;
        assert!(matches!(orrery.position("vulcan", 0.0), Err(OrreryError::BodyNotFound(_))));
        assert!(matches!(orrery.scaled_radius("vulcan", p), Err(OrreryError::BodyNotFound(_))));
        assert!(matches!(orrery.scaled_distance("vulcan", 0.0, p), Err(OrreryError::BodyNotFound(_))));
        assert!(matches!(
            orrery.orbit_path("vulcan", p, LevelOfDetail::Low),
            Err(OrreryError::BodyNotFound(_))
        ));
        assert!(matches!(
            orrery.visibility("vulcan", 0.0, DVec3::X, p),
            Err(OrreryError::BodyNotFound(_))
        ));
    }

    #[test]
    fn central_body_has_no_orbit_path() {
        let orrery = Orrery::solar_system();
        assert!(matches!(
            orrery.orbit_path(SUN, ScalingProfile::TrueScale, LevelOfDetail::High),
            Err(OrreryError::NoOrbit(_))
        ));
    }

    #[test]
    fn neptune_scenarios() {
        let orrery = Orrery::solar_system();
        let factor = orrery.config().profiles.true_scale.distance_scale_factor;
        assert_eq!(
            orrery.scaled_orbit_radius(NEPTUNE, ScalingProfile::TrueScale).unwrap(),
            30.06896348 * factor
        );
        let floor = orrery.config().profiles.exploration.minimum_radius_floor;
        let r = orrery.scaled_radius(NEPTUNE, ScalingProfile::Exploration).unwrap();
        assert!(r >= floor - 1e-12, "r = {r}");
    }

    #[test]
    fn every_body_reaches_the_exploration_floor() {
        let orrery = Orrery::solar_system();
        let floor = orrery.config().profiles.exploration.minimum_radius_floor;
        for body in orrery.catalog().iter().filter(|b| !b.is_central()) {
            let r = orrery.scaled_radius(&body.id, ScalingProfile::Exploration).unwrap();
            assert!(r >= floor - 1e-12, "{}: {r}", body.id);
        }
    }

    #[test]
    fn queries_are_idempotent() {
        let orrery = Orrery::solar_system();
        let p = ScalingProfile::Artistic;
        for id in [EARTH, MARS, NEPTUNE] {
            assert_eq!(orrery.position(id, 4321.0).unwrap(), orrery.position(id, 4321.0).unwrap());
            assert_eq!(orrery.scaled_radius(id, p).unwrap(), orrery.scaled_radius(id, p).unwrap());
            assert_eq!(
                orrery.scaled_distance(id, 4321.0, p).unwrap(),
                orrery.scaled_distance(id, 4321.0, p).unwrap()
            );
        }
    }

    #[test]
    fn scaled_position_matches_scaled_distance() {
        let orrery = Orrery::solar_system();
        let p = ScalingProfile::Exploration;
        let pos = orrery.scaled_position(MARS, 500.0, p).unwrap();
        let dist = orrery.scaled_distance(MARS, 500.0, p).unwrap();
        assert!((pos.length() - dist).abs() < 1e-9);
    }

    #[test]
    fn whole_catalog_paths() {
        let orrery = Orrery::solar_system();
        let paths = orrery.orbit_paths(ScalingProfile::Exploration, LevelOfDetail::Low);
        assert_eq!(paths.len(), 9);
        assert!(paths.iter().all(|p| p.points.len() >= 64 && p.points.len() <= 512));
        let mars = paths.iter().find(|p| p.body == MARS).unwrap();
        assert_eq!(
            mars.points,
            orrery.orbit_path(MARS, ScalingProfile::Exploration, LevelOfDetail::Low).unwrap()
        );
    }

    #[test]
    fn jupiter_seen_from_earth_is_bright() {
        let orrery = Orrery::solar_system();
        let profile = ScalingProfile::TrueScale;
        let days = 8766.0;
        let earth = orrery.scaled_position(EARTH, days, profile).unwrap();
        let report = orrery.visibility(JUPITER, days, earth, profile).unwrap();
        assert!(report.distance_to_observer > 3.9 && report.distance_to_observer < 6.5);
        assert!(report.phase_angle < 12.0, "phase = {}", report.phase_angle);
        assert_eq!(report.tier, VisibilityTier::Bright);
    }

    #[test]
    fn sun_visibility_from_earth() {
        let orrery = Orrery::solar_system();
        let profile = ScalingProfile::Exploration;
        let earth = orrery.scaled_position(EARTH, 0.0, profile).unwrap();
        let report = orrery.visibility(SUN, 0.0, earth, profile).unwrap();
        assert!((report.apparent_magnitude + 26.74).abs() < 0.1);
    }
}
