use crate::errors::RiemannSolverError;
use crate::material::MaterialLaw;
use crate::physical_quantities::{Primitive, State};

/// The two nonlinear characteristic families: `Left` is the 1-wave
/// (propagating into the left medium), `Right` the 2-wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveFamily {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    Shock,
    Rarefaction,
}

/// Wave curve of one family through a given far state: the velocity a
/// candidate intermediate strain is connected at, either along the integral
/// curve (rarefaction) or the Hugoniot locus (shock).
#[derive(Debug, Clone, Copy)]
pub struct WaveCurve {
    family: WaveFamily,
    far: State<Primitive>,
    material: MaterialLaw,
    sigma_far: f64,
    // sigma'(eps_far)^(3/2), the integral curve's far-state term.
    dsigma_far_pow32: f64,
}

impl WaveCurve {
    pub fn new(
        family: WaveFamily,
        far: State<Primitive>,
        material: MaterialLaw,
    ) -> Result<Self, RiemannSolverError> {
        let dsigma_far = material.stress_derivative(far.strain());
        if dsigma_far < 0. {
            return Err(RiemannSolverError::Domain(format!(
                "negative stress derivative {:e} at far-state strain {:e}",
                dsigma_far,
                far.strain()
            )));
        }
        Ok(Self {
            family,
            far,
            material,
            sigma_far: material.stress(far.strain()),
            dsigma_far_pow32: dsigma_far.powf(1.5),
        })
    }

    pub fn family(&self) -> WaveFamily {
        self.family
    }

    pub fn far(&self) -> &State<Primitive> {
        &self.far
    }

    pub fn material(&self) -> &MaterialLaw {
        &self.material
    }

    fn orientation(&self) -> f64 {
        match self.family {
            WaveFamily::Left => 1.,
            WaveFamily::Right => -1.,
        }
    }

    /// Velocity along the integral curve of this family at the given strain.
    pub fn integral_curve(&self, strain: f64) -> Result<f64, RiemannSolverError> {
        let dsigma = self.material.stress_derivative(strain);
        if dsigma < 0. {
            return Err(RiemannSolverError::Domain(format!(
                "negative stress derivative {:e} on integral curve at strain {:e}",
                dsigma, strain
            )));
        }
        let scale = 3. * self.material.k2() * self.material.rho().sqrt();
        Ok(self.far.velocity()
            + self.orientation() * (dsigma.powf(1.5) - self.dsigma_far_pow32) / scale)
    }

    /// Velocity along the Hugoniot locus of this family at the given strain.
    pub fn hugoniot_locus(&self, strain: f64) -> Result<f64, RiemannSolverError> {
        let radicand = (self.material.stress(strain) - self.sigma_far)
            * (strain - self.far.strain())
            / self.material.rho();
        if radicand < 0. {
            return Err(RiemannSolverError::Domain(format!(
                "negative Hugoniot radicand {:e} at strain {:e}",
                radicand, strain
            )));
        }
        Ok(self.far.velocity() - radicand.sqrt())
    }

    /// The active branch at the given candidate strain: strain increase over
    /// the far state means a shock (Hugoniot locus), decrease a rarefaction
    /// (integral curve).
    ///
    /// The branch is re-selected at every call; the root solver probes both
    /// sides of the far strain before converging.
    pub fn velocity(&self, strain: f64) -> Result<f64, RiemannSolverError> {
        if strain >= self.far.strain() {
            self.hugoniot_locus(strain)
        } else {
            self.integral_curve(strain)
        }
    }

    /// Classification of the converged wave.
    pub fn kind(&self, strain_star: f64) -> WaveKind {
        if strain_star > self.far.strain() {
            WaveKind::Shock
        } else {
            WaveKind::Rarefaction
        }
    }

    /// Shock propagation speed from the Rankine-Hugoniot conditions.
    ///
    /// Only meaningful when `kind(strain_star)` is a shock (the jump must be
    /// nonzero).
    pub fn shock_speed(&self, strain_star: f64) -> Result<f64, RiemannSolverError> {
        let radicand = (self.material.stress(strain_star) - self.sigma_far)
            / (self.material.rho() * (strain_star - self.far.strain()));
        if radicand < 0. {
            return Err(RiemannSolverError::Domain(format!(
                "negative shock speed radicand {:e} at strain {:e}",
                radicand, strain_star
            )));
        }
        Ok(radicand.sqrt())
    }

    /// Strain inside the rarefaction fan at similarity coordinate `xi`,
    /// inverting `|xi| = sound_speed(eps)`.
    pub fn fan_strain(&self, xi: f64) -> f64 {
        (self.material.rho() * xi * xi - self.material.k1()) / (2. * self.material.k2())
    }

    /// Primitive state inside the rarefaction fan at similarity coordinate
    /// `xi`.
    ///
    /// At the fan strain the stress derivative equals `rho * xi^2 >= 0`
    /// identically, so this cannot leave the admissible range.
    pub fn fan_state(&self, xi: f64) -> State<Primitive> {
        let strain = self.fan_strain(xi);
        let dsigma = self.material.rho() * xi * xi;
        let scale = 3. * self.material.k2() * self.material.rho().sqrt();
        let velocity = self.far.velocity()
            + self.orientation() * (dsigma.powf(1.5) - self.dsigma_far_pow32) / scale;
        State::<Primitive>::new(strain, velocity)
    }
}
