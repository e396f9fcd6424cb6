pub mod kepler;
pub mod orbit;
pub mod rotation;
pub mod time;
