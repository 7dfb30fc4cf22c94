use std::{
    marker::PhantomData,
    ops::{Add, AddAssign, Index, Mul, Sub, SubAssign},
};

use glam::DVec2;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Primitive;
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Conserved;

/// A two-component state vector of the elasticity system.
///
/// The first component is always the strain; the second is the velocity for
/// `State<Primitive>` and the momentum for `State<Conserved>`.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct State<T>(DVec2, PhantomData<T>);

impl<T> Add for State<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0, PhantomData)
    }
}

impl<T> AddAssign for State<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl<T> Sub for State<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0, PhantomData)
    }
}

impl<T> SubAssign for State<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl<T> Mul<State<T>> for f64 {
    type Output = State<T>;

    fn mul(self, rhs: State<T>) -> Self::Output {
        State::<T>(self * rhs.0, PhantomData)
    }
}

impl<T> State<T> {
    pub fn strain(&self) -> f64 {
        self.0.x
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl<T> Index<usize> for State<T> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.0.x,
            1 => &self.0.y,
            _ => panic!("Index out of bounds for StateVector!"),
        }
    }
}

impl State<Primitive> {
    pub fn new(strain: f64, velocity: f64) -> Self {
        Self(DVec2::new(strain, velocity), PhantomData)
    }

    pub fn velocity(&self) -> f64 {
        self.0.y
    }

    /// Conserved to primitive representation; `rho` is the local density.
    pub fn from_conserved(conserved: &State<Conserved>, rho: f64) -> Self {
        debug_assert!(rho > 0., "Velocity is undefined for vanishing density!");
        Self::new(conserved.strain(), conserved.momentum() / rho)
    }
}

impl State<Conserved> {
    pub fn new(strain: f64, momentum: f64) -> Self {
        Self(DVec2::new(strain, momentum), PhantomData)
    }

    pub fn momentum(&self) -> f64 {
        self.0.y
    }

    /// Primitive to conserved representation; `rho` is the local density.
    pub fn from_primitives(primitives: &State<Primitive>, rho: f64) -> Self {
        Self::new(primitives.strain(), rho * primitives.velocity())
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use super::{Conserved, Primitive, State};

    #[test]
    fn test_conversions() {
        let primitives = State::<Primitive>::new(0.75, 0.4);
        let rho = 2.5;
        let conserved = State::<Conserved>::from_primitives(&primitives, rho);
        let primitives_new = State::<Primitive>::from_conserved(&conserved, rho);

        assert_approx_eq!(f64, conserved.momentum(), 1.);
        assert_approx_eq!(f64, primitives.strain(), primitives_new.strain());
        assert_approx_eq!(f64, primitives.velocity(), primitives_new.velocity());
    }

    #[test]
    fn test_state_vector_algebra() {
        let a = State::<Conserved>::new(1., -2.);
        let b = State::<Conserved>::new(0.5, 1.);
        let mid = 0.5 * (a + b);
        assert_approx_eq!(f64, mid.strain(), 0.75);
        assert_approx_eq!(f64, mid.momentum(), -0.5);

        let diff = a - b;
        assert_approx_eq!(f64, diff[0], 0.5);
        assert_approx_eq!(f64, diff[1], -3.);
        assert!(diff.is_finite());
    }
}
