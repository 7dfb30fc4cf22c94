use crate::errors::RiemannSolverError;

/// Outcome of a 2x2 nonlinear system solve.
#[derive(Debug, Clone, Copy)]
pub struct RootSolution {
    pub x: [f64; 2],
    pub iterations: usize,
    pub converged: bool,
    pub message: &'static str,
}

/// Narrow interface to the nonlinear system solver: residual plus initial
/// guess in, solution plus convergence flag out. Implementations must treat
/// the residual as a black box and propagate its errors unchanged.
pub trait RootSolver {
    fn solve<F>(&self, residual: F, guess: [f64; 2]) -> Result<RootSolution, RiemannSolverError>
    where
        F: FnMut([f64; 2]) -> Result<[f64; 2], RiemannSolverError>;
}

/// Newton-Raphson iteration with a finite-difference Jacobian.
///
/// The Jacobian is probed with backward differences: the star-state residual
/// is kinked along the coordinate axes (wave-curve branch switches), and
/// probing backward from a kink keeps the two one-sided slopes from
/// cancelling in the determinant.
#[derive(Debug, Clone, Copy)]
pub struct NewtonRaphson {
    tolerance: f64,
    max_iterations: usize,
}

impl NewtonRaphson {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self::new(1e-10, 100)
    }
}

impl RootSolver for NewtonRaphson {
    fn solve<F>(
        &self,
        mut residual: F,
        guess: [f64; 2],
    ) -> Result<RootSolution, RiemannSolverError>
    where
        F: FnMut([f64; 2]) -> Result<[f64; 2], RiemannSolverError>,
    {
        let [mut x0, mut x1] = guess;
        for iteration in 0..self.max_iterations {
            let [f0, f1] = residual([x0, x1])?;
            // Residual check first: at a degenerate root the Jacobian may be
            // singular even though the guess is already the solution.
            if f0.abs().max(f1.abs()) <= self.tolerance {
                return Ok(RootSolution {
                    x: [x0, x1],
                    iterations: iteration,
                    converged: true,
                    message: "converged",
                });
            }

            let h0 = 1e-8 * x0.abs().max(1.);
            let h1 = 1e-8 * x1.abs().max(1.);
            let [g0, g1] = residual([x0 - h0, x1])?;
            let j00 = (f0 - g0) / h0;
            let j10 = (f1 - g1) / h0;
            let [g0, g1] = residual([x0, x1 - h1])?;
            let j01 = (f0 - g0) / h1;
            let j11 = (f1 - g1) / h1;

            let det = j00 * j11 - j01 * j10;
            if det == 0. {
                return Ok(RootSolution {
                    x: [x0, x1],
                    iterations: iteration,
                    converged: false,
                    message: "singular Jacobian",
                });
            }

            let dx0 = (f0 * j11 - f1 * j01) / det;
            let dx1 = (f1 * j00 - f0 * j10) / det;
            x0 -= dx0;
            x1 -= dx1;

            if dx0.abs().max(dx1.abs()) <= self.tolerance * (1. + x0.abs().max(x1.abs())) {
                return Ok(RootSolution {
                    x: [x0, x1],
                    iterations: iteration + 1,
                    converged: true,
                    message: "converged",
                });
            }
        }

        Ok(RootSolution {
            x: [x0, x1],
            iterations: self.max_iterations,
            converged: false,
            message: "iteration limit reached",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use float_cmp::assert_approx_eq;

    #[test]
    fn test_known_root() {
        let solver = NewtonRaphson::default();
        let solution = solver
            .solve(
                |x| Ok([x[0] * x[0] + x[1] * x[1] - 4., x[0] - x[1]]),
                [1., 1.],
            )
            .unwrap();
        assert!(solution.converged);
        assert_approx_eq!(f64, solution.x[0], std::f64::consts::SQRT_2, epsilon = 1e-9);
        assert_approx_eq!(f64, solution.x[1], std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_root_at_guess() {
        let solver = NewtonRaphson::default();
        let solution = solver
            .solve(|x| Ok([x[0] - 2., x[1] - 3.]), [2., 3.])
            .unwrap();
        assert!(solution.converged);
        assert_eq!(solution.iterations, 0);
    }

    #[test]
    fn test_singular_jacobian_reported() {
        let solver = NewtonRaphson::default();
        let solution = solver.solve(|_x| Ok([1., 1.]), [0., 0.]).unwrap();
        assert!(!solution.converged);
        assert_eq!(solution.message, "singular Jacobian");
    }

    #[test]
    fn test_residual_error_propagates() {
        let solver = NewtonRaphson::default();
        let result = solver.solve(
            |_x| {
                Err(RiemannSolverError::Domain(
                    "probe outside admissible range".to_string(),
                ))
            },
            [0., 0.],
        );
        assert!(result.is_err());
    }
}
