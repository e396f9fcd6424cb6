pub mod orbit_path;
pub mod scaling;
pub mod visibility;
