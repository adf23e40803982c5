//! Newton-Raphson root finding with a bounded admissible band
//!
//! Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and never fails:
//! every exit reports the best estimate and whether it converged.

use super::SolverConfig;

/// Outcome of a root search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSearch {
    /// Final estimate (last in-band iterate on early exits)
    pub root: f64,
    pub converged: bool,
    /// Newton steps taken before stopping
    pub iterations: u32,
    /// `f(root)`, the residual at the returned estimate
    pub residual: f64,
}

/// Find a root of `f` starting from `config.initial_guess`
///
/// Stops with `converged = true` once `|f(x)| < config.tolerance`. Stops
/// unconverged, keeping the current estimate, when the derivative is exactly
/// zero, when the next step would leave `(lower_bound, upper_bound)`, or when
/// `max_iterations` steps have been taken. Only the `|f(x)|` check at the top
/// of an iteration can report convergence.
pub fn newton_raphson<F, DF>(f: F, df: DF, config: &SolverConfig) -> RootSearch
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = config.initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return RootSearch {
                root: x,
                converged: true,
                iterations: iteration,
                residual: fx,
            };
        }

        let dfx = df(x);
        if dfx == 0.0 {
            log::debug!("Zero derivative at x = {} after {} iterations", x, iteration);
            return RootSearch {
                root: x,
                converged: false,
                iterations: iteration,
                residual: fx,
            };
        }

        let next = x - fx / dfx;
        if !config.in_bounds(next) {
            log::debug!(
                "Step to {} leaves ({}, {}) after {} iterations",
                next,
                config.lower_bound,
                config.upper_bound,
                iteration
            );
            return RootSearch {
                root: x,
                converged: false,
                iterations: iteration + 1,
                residual: fx,
            };
        }

        x = next;
    }

    log::debug!("No convergence after {} iterations, x = {}", config.max_iterations, x);
    RootSearch {
        root: x,
        converged: false,
        iterations: config.max_iterations,
        residual: f(x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let config = SolverConfig::default().with_initial_guess(1.5);
        let result = newton_raphson(|x| x * x - 2.0, |x| 2.0 * x, &config);

        assert!(result.converged);
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_already_at_root_takes_no_steps() {
        let config = SolverConfig::default().with_initial_guess(0.25);
        let result = newton_raphson(|x| x - 0.25, |_| 1.0, &config);
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_zero_derivative_stops_unconverged() {
        let config = SolverConfig::default();
        let result = newton_raphson(|_| 1.0, |_| 0.0, &config);
        assert!(!result.converged);
        assert_eq!(result.root, config.initial_guess);
    }

    #[test]
    fn test_leaving_band_returns_last_in_band_value() {
        // Root at 20 sits above the band; the first step jumps straight to it
        let config = SolverConfig::default();
        let result = newton_raphson(|x| x - 20.0, |_| 1.0, &config);
        assert!(!result.converged);
        assert_eq!(result.root, config.initial_guess);
        assert!(config.in_bounds(result.root));
    }

    #[test]
    fn test_iteration_cap() {
        // x^2 + 1 has no real root; Newton wanders without converging
        let config = SolverConfig::default().with_initial_guess(0.5).with_max_iterations(25);
        let result = newton_raphson(|x| x * x + 1.0, |x| 2.0 * x, &config);
        assert!(!result.converged);
        assert!(result.iterations <= 25);
    }

    #[test]
    fn test_root_reached_on_last_step_is_unconverged() {
        // One step lands exactly on the root, but the cap leaves no iteration to check it
        let config = SolverConfig::default().with_initial_guess(0.1).with_max_iterations(1);
        let result = newton_raphson(|x| x - 0.25, |_| 1.0, &config);

        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert_relative_eq!(result.root, 0.25);
        assert_relative_eq!(result.residual, 0.0);

        let config = config.with_max_iterations(2);
        let result = newton_raphson(|x| x - 0.25, |_| 1.0, &config);
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
    }
}
