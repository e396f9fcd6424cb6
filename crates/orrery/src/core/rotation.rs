//! Body spin: rotation angle about the spin axis and the axis itself.

use glam::{DMat3, DVec3};

use crate::core::orbit::normalize_degrees;

/// Rotation angle in [0, 360) after `days`, for a sidereal rotation period in
/// hours. Negative periods spin retrograde. A zero period yields 0.
pub fn rotation_angle(rotation_period_hours: f64, days: f64) -> f64 {
    if rotation_period_hours == 0.0 {
        return 0.0;
    }
    let turns = days * 24.0 / rotation_period_hours;
    normalize_degrees(turns.fract() * 360.0)
}

/// Unit spin axis in the ecliptic frame: +Z tilted about +X by `axial_tilt_deg`.
pub fn spin_axis(axial_tilt_deg: f64) -> DVec3 {
    DMat3::from_rotation_x(axial_tilt_deg.to_radians()) * DVec3::Z
}
