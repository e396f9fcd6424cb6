pub mod api;
pub mod core;
pub mod catalog;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::OrreryConfig;
pub use api::error::{OrreryError, OrreryResult};
pub use api::orrery::{Orrery, OrbitPath};
pub use crate::core::kepler::{solve_kepler, KeplerSolution, KeplerSolver};
pub use crate::core::orbit::{
    orbital_speed, HeliocentricPosition, OrbitCalculator, OrbitalElements, AU_KM, GM_SUN_KM3_S2,
};
pub use crate::core::rotation::{rotation_angle, spin_axis};
pub use crate::core::time::{j2000_epoch, EphemerisClock, SimulationClock};
pub use catalog::bodies::CelestialBodyDescriptor;
pub use catalog::manifest::CatalogManifest;
pub use catalog::registry::Catalog;
pub use systems::orbit_path::{LevelOfDetail, OrbitPathPoint, OrbitPathSampler, PathSettings};
pub use systems::scaling::{ProfileSettings, ProfileTable, ScaledRadius, ScalingEngine, ScalingProfile};
pub use systems::visibility::{
    MagnitudeThresholds, VisibilityEstimator, VisibilityReport, VisibilityTier,
};
