use crate::errors::RiemannSolverError;

/// Quadratic stress law of one side of the medium:
/// `sigma(eps) = k1 * eps + k2 * eps^2`.
///
/// The coefficients are validated once at construction; all evaluation
/// methods are pure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialLaw {
    rho: f64,
    k1: f64,
    k2: f64,
}

impl MaterialLaw {
    pub fn new(rho: f64, k1: f64, k2: f64) -> Result<Self, RiemannSolverError> {
        if rho <= 0. {
            return Err(RiemannSolverError::InvalidCoefficient(
                "density must be strictly positive",
            ));
        }
        if k2 == 0. {
            return Err(RiemannSolverError::InvalidCoefficient(
                "quadratic stiffness must be nonzero",
            ));
        }
        Ok(Self { rho, k1, k2 })
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn k1(&self) -> f64 {
        self.k1
    }

    pub fn k2(&self) -> f64 {
        self.k2
    }

    pub fn stress(&self, strain: f64) -> f64 {
        self.k1 * strain + self.k2 * strain * strain
    }

    /// Derivative of stress w.r.t. strain.
    pub fn stress_derivative(&self, strain: f64) -> f64 {
        self.k1 + 2. * self.k2 * strain
    }

    /// Local sound speed `sqrt(sigma'(eps) / rho)`.
    ///
    /// Fails when the stress derivative is negative (the medium does not
    /// propagate waves there).
    pub fn sound_speed(&self, strain: f64) -> Result<f64, RiemannSolverError> {
        let dsigma = self.stress_derivative(strain);
        if dsigma < 0. {
            return Err(RiemannSolverError::Domain(format!(
                "negative stress derivative {:e} at strain {:e}",
                dsigma, strain
            )));
        }
        Ok((dsigma / self.rho).sqrt())
    }
}
