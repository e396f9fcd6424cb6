//! Kepler's equation solver. Pure math, no catalog or scene dependencies.
//!
//! Works in radians internally; callers pass mean anomaly in degrees because
//! every catalog angle is stored in degrees.

/// Default convergence tolerance on the Kepler residual (radians).
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Default Newton-Raphson iteration budget.
pub const DEFAULT_MAX_ITERATIONS: u32 = 20;

/// Outcome of one Kepler solve.
///
/// An unconverged solution is still the best available estimate and is safe
/// to use; `converged` only reports whether the tolerance was met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in radians.
    pub eccentric_anomaly: f64,
    /// Newton steps actually taken.
    pub iterations: u32,
    /// Whether the residual dropped below the tolerance within the budget.
    pub converged: bool,
}

/// Newton-Raphson settings for Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl KeplerSolver {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self { tolerance, max_iterations }
    }

    /// Solve `E - e·sin(E) = M` for E.
    /// `mean_anomaly_deg` may be any real value; the result is in radians and
    /// lies on the same branch as the input (no wrapping is applied).
    pub fn solve(&self, mean_anomaly_deg: f64, eccentricity: f64) -> KeplerSolution {
        let m = mean_anomaly_deg.to_radians();
        let mut ea = m; // E₀ = M
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            let delta = (ea - eccentricity * ea.sin() - m) / (1.0 - eccentricity * ea.cos());
            ea -= delta;
            iterations += 1;
            if delta.abs() < self.tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            log::debug!(
                "kepler: no convergence after {} iterations (M={:.6}°, e={:.6}, residual={:.3e})",
                iterations,
                mean_anomaly_deg,
                eccentricity,
                residual(ea, eccentricity, m),
            );
        }

        KeplerSolution { eccentric_anomaly: ea, iterations, converged }
    }
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

/// Solve Kepler's equation with the default tolerance and budget.
/// Returns the eccentric anomaly in radians.
pub fn solve_kepler(mean_anomaly_deg: f64, eccentricity: f64) -> f64 {
    KeplerSolver::default()
        .solve(mean_anomaly_deg, eccentricity)
        .eccentric_anomaly
}

/// `E - e·sin(E) - M`, all in radians.
#[inline]
pub fn residual(eccentric_anomaly: f64, eccentricity: f64, mean_anomaly_rad: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly_rad
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_orbit_is_identity() {
        // For e=0, eccentric anomaly = mean anomaly
        let ea = solve_kepler(57.0, 0.0);
        assert!((ea - 57.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn mercury_eccentricity_converges() {
        let solution = KeplerSolver::default().solve(86.0, 0.20563069);
        assert!(solution.converged);
        let r = residual(solution.eccentric_anomaly, 0.20563069, 86.0_f64.to_radians());
        assert!(r.abs() < 1e-6, "residual = {r}");
    }

    #[test]
    fn converges_over_catalog_eccentricity_range() {
        let solver = KeplerSolver::default();
        for ei in 0..=25 {
            let e = ei as f64 * 0.01;
            // Whole turns on both sides of zero, plus off-grid angles.
            let mut m = -720.0;
            while m <= 720.0 {
                let s = solver.solve(m, e);
                let r = residual(s.eccentric_anomaly, e, m.to_radians());
                assert!(s.converged, "no convergence at e={e}, M={m}");
                assert!(s.iterations <= DEFAULT_MAX_ITERATIONS);
                assert!(r.abs() < 1e-6, "residual {r} at e={e}, M={m}");
                m += 7.3;
            }
        }
    }

    #[test]
    fn apsides_are_fixed_points() {
        let ea = solve_kepler(0.0, 0.0167);
        assert!(ea.abs() < 1e-12);
        let ea = solve_kepler(180.0, 0.0167);
        assert!((ea - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn exhausted_budget_returns_estimate() {
        // A single Newton step cannot hit 1e-15 at high eccentricity.
        let solver = KeplerSolver::new(1e-15, 1);
        let s = solver.solve(10.0, 0.9);
        assert!(!s.converged);
        assert_eq!(s.iterations, 1);
        assert!(s.eccentric_anomaly.is_finite());
    }
}
