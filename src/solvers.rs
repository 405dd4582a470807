use core::f64::consts::{PI, TAU};

use crate::{
    keplers_equation, keplers_equation_derivative, DEFAULT_MAX_ITERS, DEFAULT_TOLERANCE,
    HIGH_ECCENTRICITY_SEED,
};

/// Stopping criteria for the Newton-Raphson Kepler solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverOptions {
    /// The solve stops once the largest correction across the batch
    /// drops below this value, in radians.
    pub tolerance: f64,

    /// The solve stops after this many iterations even if it has
    /// not converged. The last estimate is returned in that case.
    pub max_iterations: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERS,
        }
    }
}

/// How a batched Kepler solve went.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveReport {
    /// The number of Newton-Raphson steps applied to every element.
    pub iterations: u32,

    /// The largest absolute correction applied in the final step, in radians.
    pub max_correction: f64,

    /// Whether the largest correction fell below the tolerance
    /// before the iteration budget ran out.
    pub converged: bool,
}

/// Picks the starting guess for the eccentric anomaly.
///
/// Highly eccentric orbits converge poorly when seeded with the mean
/// anomaly itself, so they start from the apoapsis instead.
#[inline]
fn initial_guess(mean_anomaly: f64, eccentricity: f64) -> f64 {
    if eccentricity < HIGH_ECCENTRICITY_SEED {
        mean_anomaly
    } else {
        PI
    }
}

/// Solves Kepler's equation `E - e sin(E) = M` for the eccentric anomaly `E`.
///
/// This is the single-value form of
/// [`solve_eccentric_anomalies`]; both share the same stopping rules.
///
/// # Unchecked Operation
/// This function does not check whether the orbit is elliptic (`0 <= e < 1`).
/// Open orbits yield nonsensical values.
///
/// # Example
/// ```
/// use kepler_orrery::{solve_eccentric_anomaly, SolverOptions};
///
/// let e = solve_eccentric_anomaly(1.0, 0.0, SolverOptions::default());
/// assert_eq!(e, 1.0);
/// ```
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64, options: SolverOptions) -> f64 {
    let mut eccentric_anomaly = initial_guess(mean_anomaly, eccentricity);

    for _ in 0..options.max_iterations {
        let f = keplers_equation(mean_anomaly, eccentric_anomaly, eccentricity);
        let fp = keplers_equation_derivative(eccentric_anomaly, eccentricity);
        let correction = f / fp;
        eccentric_anomaly -= correction;

        if correction.abs() < options.tolerance {
            break;
        }
    }

    eccentric_anomaly
}

/// Solves Kepler's equation for a whole batch of mean anomalies at once.
///
/// Every element receives the same number of Newton-Raphson steps: the
/// solve stops when the *largest* correction in the batch drops below
/// the tolerance, or when the iteration budget runs out. In the latter
/// case the last estimates are returned and the report says so.
///
/// # Unchecked Operation
/// This function does not check whether the orbit is elliptic (`0 <= e < 1`).
///
/// # Example
/// ```
/// use kepler_orrery::{solve_eccentric_anomalies, SolverOptions};
///
/// let means = [0.0, 1.0, 2.0, 3.0];
/// let (eccs, report) = solve_eccentric_anomalies(&means, 0.5, SolverOptions::default());
///
/// assert!(report.converged);
/// for (m, e) in means.iter().zip(&eccs) {
///     assert!((e - 0.5 * e.sin() - m).abs() < 1e-6);
/// }
/// ```
pub fn solve_eccentric_anomalies(
    mean_anomalies: &[f64],
    eccentricity: f64,
    options: SolverOptions,
) -> (Vec<f64>, SolveReport) {
    let mut eccentric_anomalies: Vec<f64> = mean_anomalies
        .iter()
        .map(|&m| initial_guess(m, eccentricity))
        .collect();

    let mut report = SolveReport {
        iterations: 0,
        max_correction: 0.0,
        converged: mean_anomalies.is_empty(),
    };

    while !report.converged && report.iterations < options.max_iterations {
        let mut max_correction: f64 = 0.0;

        for (ecc_anom, &mean_anom) in eccentric_anomalies.iter_mut().zip(mean_anomalies) {
            let f = keplers_equation(mean_anom, *ecc_anom, eccentricity);
            let fp = keplers_equation_derivative(*ecc_anom, eccentricity);
            let correction = f / fp;
            *ecc_anom -= correction;

            // A NaN correction sticks, so the batch reports as not converged
            if correction.is_nan() || correction.abs() > max_correction {
                max_correction = correction.abs();
            }
        }

        report.iterations += 1;
        report.max_correction = max_correction;
        report.converged = max_correction < options.tolerance;
    }

    (eccentric_anomalies, report)
}

/// Gets the true anomaly at a given eccentric anomaly, in `[0, tau)`.
///
/// Uses the two-argument arctangent so the quadrant is right over the
/// whole orbit, then wraps the result so it is continuous through the
/// apoapsis (`E = pi`).
///
/// # Example
/// ```
/// use core::f64::consts::PI;
/// use kepler_orrery::true_anomaly;
///
/// assert_eq!(true_anomaly(0.0, 0.3), 0.0);
/// assert!((true_anomaly(PI, 0.3) - PI).abs() < 1e-12);
/// ```
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let (sin, cos) = eccentric_anomaly.sin_cos();
    let y = (1.0 - eccentricity * eccentricity).sqrt() * sin;
    let x = cos - eccentricity;

    y.atan2(x).rem_euclid(TAU)
}

/// Batch form of [`true_anomaly`].
pub fn true_anomalies(eccentric_anomalies: &[f64], eccentricity: f64) -> Vec<f64> {
    eccentric_anomalies
        .iter()
        .map(|&e| true_anomaly(e, eccentricity))
        .collect()
}
