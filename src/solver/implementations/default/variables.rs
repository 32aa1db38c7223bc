use super::*;
use crate::{
    algebra::*,
    solver::core::traits::{ProblemData, Variables},
};

// ---------------
// Variables type for default problem format
// ---------------

/// Standard-form solver type implementing the [`Variables`](crate::solver::core::traits::Variables) trait
///
/// When used as a step right hand side, each block holds the RHS of
/// the Newton equation associated with it: `x` the dual residual rows,
/// `v` the equality rows, `u` the inequality rows and `y` the
/// complementarity rows.

#[derive(Debug, Clone)]
pub struct DefaultVariables<T> {
    /// primal variables
    pub x: Vec<T>,
    /// inequality slacks
    pub y: Vec<T>,
    /// inequality multipliers
    pub u: Vec<T>,
    /// equality multipliers
    pub v: Vec<T>,
}

impl<T> DefaultVariables<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize, p: usize) -> Self {
        let x = vec![T::zero(); n];
        let y = vec![T::zero(); m];
        let u = vec![T::zero(); m];
        let v = vec![T::zero(); p];

        Self { x, y, u, v }
    }
}

impl<T> Variables<T> for DefaultVariables<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type R = DefaultResiduals<T>;

    fn calc_mu(&self) -> T {
        let m = self.y.len();
        if m == 0 {
            return T::zero();
        }
        self.y.dot(&self.u) / m.as_T()
    }

    fn interior_start(&mut self, data: &DefaultProblemData<T>) -> bool {
        self.x.copy_from(&data.x0);
        self.v.set(T::zero());

        // y = h - Gx must be strictly positive
        self.y.copy_from(&data.h);
        data.G.gemv(&mut self.y, &self.x, -T::one(), T::one());

        if !data.has_inequalities() {
            return true;
        }
        if !(self.y.minimum() > T::zero()) {
            return false;
        }

        // keep slacks away from zero for early conditioning
        self.y.scalarop(|s| T::max(T::abs(s), T::one()));
        self.u.scalarop_from(T::recip, &self.y);
        true
    }

    fn affine_step_rhs(&mut self, residuals: &DefaultResiduals<T>, variables: &DefaultVariables<T>) {
        self.x.scalarop_from(|r| -r, &residuals.r_dual);
        self.v.scalarop_from(|r| -r, &residuals.r_eq);
        self.u.scalarop_from(|r| -r, &residuals.r_in);

        // complementarity rows: -(u⊙y)
        for (rhs, (&y, &u)) in self.y.iter_mut().zip(variables.y.iter().zip(&variables.u)) {
            *rhs = -(y * u);
        }
    }

    fn combined_step_rhs(
        &mut self,
        residuals: &DefaultResiduals<T>,
        variables: &DefaultVariables<T>,
        affine_step: &DefaultVariables<T>,
        σ: T,
        μ: T,
    ) {
        self.x.scalarop_from(|r| -r, &residuals.r_dual);
        self.v.scalarop_from(|r| -r, &residuals.r_eq);
        self.u.scalarop_from(|r| -r, &residuals.r_in);

        // complementarity rows: -(u⊙y + dy⊙du - σμ)
        let σμ = σ * μ;
        let iter = variables
            .y
            .iter()
            .zip(&variables.u)
            .zip(affine_step.y.iter().zip(&affine_step.u));
        for (rhs, ((&y, &u), (&dy, &du))) in self.y.iter_mut().zip(iter) {
            *rhs = -(y * u + dy * du - σμ);
        }
    }

    fn centering_step_rhs(
        &mut self,
        residuals: &DefaultResiduals<T>,
        variables: &DefaultVariables<T>,
        σ: T,
        μ: T,
    ) {
        self.affine_step_rhs(residuals, variables);
        let σμ = σ * μ;
        self.y.scalarop(|r| r + σμ);
    }

    fn calc_step_length(&self, step: &DefaultVariables<T>, αmax: T) -> T {
        let αy = _step_to_boundary(&self.y, &step.y);
        let αu = _step_to_boundary(&self.u, &step.u);
        T::min(αmax, T::min(αy, αu))
    }

    fn calc_mu_shifted(&self, step: &DefaultVariables<T>, α: T) -> T {
        let m = self.y.len();
        if m == 0 {
            return T::zero();
        }
        <[T]>::dot_shifted(&self.y, &self.u, &step.y, &step.u, α) / m.as_T()
    }

    fn add_step(&mut self, step: &DefaultVariables<T>, α: T) {
        self.x.axpby(α, &step.x, T::one());
        self.y.axpby(α, &step.y, T::one());
        self.u.axpby(α, &step.u, T::one());
        self.v.axpby(α, &step.v, T::one());
    }

    fn copy_from(&mut self, src: &DefaultVariables<T>) {
        self.x.copy_from(&src.x);
        self.y.copy_from(&src.y);
        self.u.copy_from(&src.u);
        self.v.copy_from(&src.v);
    }
}

// largest α with z + α dz ≥ 0, or infinity if no entry decreases
fn _step_to_boundary<T: FloatT>(z: &[T], dz: &[T]) -> T {
    z.iter()
        .zip(dz)
        .filter(|&(_, &dzi)| dzi < T::zero())
        .fold(T::infinity(), |α, (&zi, &dzi)| T::min(α, -zi / dzi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_length() {
        let mut vars = DefaultVariables::<f64>::new(1, 2, 0);
        vars.y.copy_from(&[1., 2.]);
        vars.u.copy_from(&[1., 1.]);

        let mut step = DefaultVariables::<f64>::new(1, 2, 0);
        step.y.copy_from(&[-2., 1.]);
        step.u.copy_from(&[0., -4.]);

        // limited by u[1]: 1 - 4α = 0
        assert_eq!(vars.calc_step_length(&step, f64::INFINITY), 0.25);
        assert_eq!(vars.calc_step_length(&step, 0.1), 0.1);

        // nothing decreasing
        step.y.set(1.);
        step.u.set(1.);
        assert_eq!(vars.calc_step_length(&step, f64::INFINITY), f64::INFINITY);
        assert_eq!(vars.calc_step_length(&step, 1.0), 1.0);
    }

    #[test]
    fn test_mu() {
        let mut vars = DefaultVariables::<f64>::new(1, 2, 0);
        vars.y.copy_from(&[1., 2.]);
        vars.u.copy_from(&[3., 1.]);
        assert_eq!(vars.calc_mu(), 2.5);

        let mut step = DefaultVariables::<f64>::new(1, 2, 0);
        step.y.copy_from(&[-1., 0.]);
        step.u.copy_from(&[0., -1.]);
        // (0.5*3 + 2*0.5) / 2
        assert_eq!(vars.calc_mu_shifted(&step, 0.5), 1.25);

        let vars = DefaultVariables::<f64>::new(3, 0, 1);
        assert_eq!(vars.calc_mu(), 0.0);
    }
}
