use std::{
    error::Error,
    fmt::{Debug, Display},
};

/// Errors surfaced by the exact Riemann solver.
///
/// Every failure is all-or-nothing: no partial solution is ever returned.
#[derive(Debug, Clone, PartialEq)]
pub enum RiemannSolverError {
    /// Zero (or negative) density, or zero quadratic stiffness. Rejected
    /// before any computation starts.
    InvalidCoefficient(&'static str),
    /// The root solver did not converge on the star-state system.
    Convergence {
        iterations: usize,
        message: &'static str,
    },
    /// A stress derivative or Hugoniot radicand went negative, or a
    /// rarefaction came out with head > tail.
    Domain(String),
}

impl Display for RiemannSolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiemannSolverError::InvalidCoefficient(what) => {
                write!(f, "Invalid material coefficient: {}", what)
            }
            RiemannSolverError::Convergence {
                iterations,
                message,
            } => {
                write!(
                    f,
                    "Root solver failed to converge after {} iterations: {}",
                    iterations, message
                )
            }
            RiemannSolverError::Domain(what) => {
                write!(f, "Evaluation outside admissible range: {}", what)
            }
        }
    }
}

impl Error for RiemannSolverError {}
