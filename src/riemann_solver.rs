use rayon::prelude::*;

use crate::errors::RiemannSolverError;
use crate::material::MaterialLaw;
use crate::physical_quantities::{Conserved, Primitive, State};
use crate::root_finder::{NewtonRaphson, RootSolver};
use crate::wave_curves::{WaveCurve, WaveFamily, WaveKind};

/// One entry of the wave record. Shocks travel at a single speed,
/// rarefactions span a fan between their head and tail characteristics and
/// the contact sits at the material interface, `xi = 0`, by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wave {
    Shock { speed: f64 },
    Rarefaction { head: f64, tail: f64 },
    Contact,
}

impl Wave {
    /// Leading edge of the wave; equals `tail()` for a shock.
    pub fn head(&self) -> f64 {
        match self {
            Wave::Shock { speed } => *speed,
            Wave::Rarefaction { head, .. } => *head,
            Wave::Contact => 0.,
        }
    }

    /// Trailing edge of the wave.
    pub fn tail(&self) -> f64 {
        match self {
            Wave::Shock { speed } => *speed,
            Wave::Rarefaction { tail, .. } => *tail,
            Wave::Contact => 0.,
        }
    }
}

/// A single Riemann problem: two conserved far states and the material law
/// on either side of the interface.
#[derive(Debug, Clone, Copy)]
pub struct RiemannProblem {
    pub left: State<Conserved>,
    pub right: State<Conserved>,
    pub material_l: MaterialLaw,
    pub material_r: MaterialLaw,
}

/// Exact Riemann solver for the variable-coefficient nonlinear elasticity
/// equations:
///
/// ```text
///     eps_t - u_x = 0
///     (rho(x) u)_t - sigma(eps, x)_x = 0
/// ```
///
/// The two intermediate states are connected to the far states along an
/// integral curve or Hugoniot locus and to each other by continuity of
/// velocity and stress across the stationary material interface.
pub struct ExactRiemannSolver<S: RootSolver = NewtonRaphson> {
    material_l: MaterialLaw,
    material_r: MaterialLaw,
    root_solver: S,
}

impl ExactRiemannSolver {
    pub fn new(material_l: MaterialLaw, material_r: MaterialLaw) -> Self {
        Self::with_root_solver(material_l, material_r, NewtonRaphson::default())
    }
}

impl<S: RootSolver> ExactRiemannSolver<S> {
    /// Swap in a different nonlinear system solver for the star-state
    /// root-find.
    pub fn with_root_solver(
        material_l: MaterialLaw,
        material_r: MaterialLaw,
        root_solver: S,
    ) -> Self {
        Self {
            material_l,
            material_r,
            root_solver,
        }
    }

    /// Solve the Riemann problem between the given conserved states.
    pub fn solve(
        &self,
        q_l: State<Conserved>,
        q_r: State<Conserved>,
    ) -> Result<RiemannSolution, RiemannSolverError> {
        let left = State::<Primitive>::from_conserved(&q_l, self.material_l.rho());
        let right = State::<Primitive>::from_conserved(&q_r, self.material_r.rho());
        let curve_l = WaveCurve::new(WaveFamily::Left, left, self.material_l)?;
        let curve_r = WaveCurve::new(WaveFamily::Right, right, self.material_r)?;

        // Star strains from continuity of velocity and stress at the contact.
        let guess = 0.5 * (left.strain() + right.strain());
        let solution = self.root_solver.solve(
            |strain| {
                Ok([
                    curve_l.velocity(strain[0])? - curve_r.velocity(strain[1])?,
                    self.material_l.stress(strain[0]) - self.material_r.stress(strain[1]),
                ])
            },
            [guess, guess],
        )?;
        if !solution.converged {
            return Err(RiemannSolverError::Convergence {
                iterations: solution.iterations,
                message: solution.message,
            });
        }
        let [strain_star_l, strain_star_r] = solution.x;

        let u_star_l = curve_l.velocity(strain_star_l)?;
        let u_star_r = curve_r.velocity(strain_star_r)?;
        debug_assert!(
            (u_star_l - u_star_r).abs() <= 1e-8 * (1. + u_star_l.abs()),
            "Velocity mismatch across the contact after convergence!"
        );

        let star_l = State::<Primitive>::new(strain_star_l, u_star_l);
        let star_r = State::<Primitive>::new(strain_star_r, u_star_r);

        let waves = [
            self.left_wave(&curve_l, left.strain(), strain_star_l)?,
            Wave::Contact,
            self.right_wave(&curve_r, right.strain(), strain_star_r)?,
        ];

        let states = [
            q_l,
            State::<Conserved>::from_primitives(&star_l, self.material_l.rho()),
            State::<Conserved>::from_primitives(&star_r, self.material_r.rho()),
            q_r,
        ];

        Ok(RiemannSolution {
            states,
            waves,
            star_l,
            star_r,
            curve_l,
            curve_r,
        })
    }

    fn left_wave(
        &self,
        curve: &WaveCurve,
        strain_far: f64,
        strain_star: f64,
    ) -> Result<Wave, RiemannSolverError> {
        match curve.kind(strain_star) {
            WaveKind::Shock => Ok(Wave::Shock {
                speed: curve.shock_speed(strain_star)?,
            }),
            WaveKind::Rarefaction => {
                let head = -self.material_l.sound_speed(strain_far)?;
                let tail = -self.material_l.sound_speed(strain_star)?;
                if head > tail {
                    return Err(RiemannSolverError::Domain(format!(
                        "left rarefaction head {:e} exceeds tail {:e}",
                        head, tail
                    )));
                }
                Ok(Wave::Rarefaction { head, tail })
            }
        }
    }

    fn right_wave(
        &self,
        curve: &WaveCurve,
        strain_far: f64,
        strain_star: f64,
    ) -> Result<Wave, RiemannSolverError> {
        match curve.kind(strain_star) {
            WaveKind::Shock => Ok(Wave::Shock {
                speed: curve.shock_speed(strain_star)?,
            }),
            WaveKind::Rarefaction => {
                let head = self.material_r.sound_speed(strain_star)?;
                let tail = self.material_r.sound_speed(strain_far)?;
                if head > tail {
                    return Err(RiemannSolverError::Domain(format!(
                        "right rarefaction head {:e} exceeds tail {:e}",
                        head, tail
                    )));
                }
                Ok(Wave::Rarefaction { head, tail })
            }
        }
    }
}

/// The self-similar solution of one Riemann problem: the four-state
/// sequence, the wave record and a sampling interface over the similarity
/// coordinate `xi = x / t`.
///
/// Solutions are immutable; sampling never mutates and can run from
/// multiple threads at once.
#[derive(Debug, Clone)]
pub struct RiemannSolution {
    states: [State<Conserved>; 4],
    waves: [Wave; 3],
    star_l: State<Primitive>,
    star_r: State<Primitive>,
    curve_l: WaveCurve,
    curve_r: WaveCurve,
}

impl RiemannSolution {
    /// The conserved states `[q_l, q*_l, q*_r, q_r]`, ordered left to right.
    pub fn states(&self) -> &[State<Conserved>; 4] {
        &self.states
    }

    /// The wave record `[1-wave, contact, 2-wave]`.
    pub fn waves(&self) -> &[Wave; 3] {
        &self.waves
    }

    /// The intermediate strains `(eps*_l, eps*_r)`.
    pub fn star_strains(&self) -> (f64, f64) {
        (self.star_l.strain(), self.star_r.strain())
    }

    /// The common velocity of the two star states.
    pub fn star_velocity(&self) -> f64 {
        self.star_l.velocity()
    }

    /// The wave curves through the left and right far states, e.g. for
    /// phase-plane plots of the solution.
    pub fn curves(&self) -> (&WaveCurve, &WaveCurve) {
        (&self.curve_l, &self.curve_r)
    }

    /// Sample the conserved state at `xi = x / t`.
    ///
    /// The six intervals below are ordered, mutually exclusive and cover the
    /// whole real line; a shock collapses its fan interval to the empty set.
    pub fn sample(&self, xi: f64) -> State<Conserved> {
        let (primitives, rho) = if xi <= self.waves[0].head() {
            (*self.curve_l.far(), self.material_l().rho())
        } else if xi <= self.waves[0].tail() {
            (self.curve_l.fan_state(xi), self.material_l().rho())
        } else if xi <= 0. {
            (self.star_l, self.material_l().rho())
        } else if xi <= self.waves[2].head() {
            (self.star_r, self.material_r().rho())
        } else if xi <= self.waves[2].tail() {
            (self.curve_r.fan_state(xi), self.material_r().rho())
        } else {
            (*self.curve_r.far(), self.material_r().rho())
        };
        let conserved = State::<Conserved>::from_primitives(&primitives, rho);
        debug_assert!(conserved.is_finite(), "Sampled a non-finite state!");
        conserved
    }

    /// Elementwise [`sample`](Self::sample) over a slice of similarity
    /// coordinates.
    pub fn sample_many(&self, xi: &[f64]) -> Vec<State<Conserved>> {
        xi.iter().map(|&xi| self.sample(xi)).collect()
    }

    /// A reusable evaluator closure over the similarity coordinate.
    pub fn evaluator(&self) -> impl Fn(f64) -> State<Conserved> + '_ {
        move |xi| self.sample(xi)
    }

    fn material_l(&self) -> &MaterialLaw {
        self.curve_l.material()
    }

    fn material_r(&self) -> &MaterialLaw {
        self.curve_r.material()
    }
}

/// Solve a batch of independent Riemann problems in parallel.
///
/// Each solve is a pure function of its inputs, so the batch needs no
/// synchronization beyond the join.
pub fn solve_batch(
    problems: &[RiemannProblem],
) -> Vec<Result<RiemannSolution, RiemannSolverError>> {
    problems
        .par_iter()
        .map(|problem| {
            ExactRiemannSolver::new(problem.material_l, problem.material_r)
                .solve(problem.left, problem.right)
        })
        .collect()
}
