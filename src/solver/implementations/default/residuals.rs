use super::*;
use crate::{algebra::*, solver::core::traits::Residuals};

// ---------------
// Residuals type for default problem format
// ---------------

/// Standard-form solver type implementing the [`Residuals`](crate::solver::core::traits::Residuals) trait

#[derive(Debug)]
pub struct DefaultResiduals<T> {
    /// dual residual Qx + c + A'v + G'u
    pub r_dual: Vec<T>,
    /// equality residual Ax - b
    pub r_eq: Vec<T>,
    /// inequality residual Gx + y - h
    pub r_in: Vec<T>,

    // various inner products.
    pub dot_xQx: T,
    pub dot_cx: T,
    pub dot_yu: T,

    // norm based merit for the line search
    pub merit: T,

    // the product Qx
    pub Qx: Vec<T>,
}

impl<T> DefaultResiduals<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize, p: usize) -> Self {
        Self {
            r_dual: vec![T::zero(); n],
            r_eq: vec![T::zero(); p],
            r_in: vec![T::zero(); m],
            dot_xQx: T::zero(),
            dot_cx: T::zero(),
            dot_yu: T::zero(),
            merit: T::zero(),
            Qx: vec![T::zero(); n],
        }
    }

    /// Euclidean norm of the stacked primal residual [r_eq; r_in]
    pub fn norm_primal(&self) -> T {
        T::sqrt(self.r_eq.sumsq() + self.r_in.sumsq())
    }
}

impl<T> Residuals<T> for DefaultResiduals<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;

    fn update(&mut self, variables: &DefaultVariables<T>, data: &DefaultProblemData<T>) {
        let (x, y, u, v) = (&variables.x, &variables.y, &variables.u, &variables.v);

        // Qx and the cost terms
        match &data.Q {
            Some(Q) => Q.gemv(&mut self.Qx, x, T::one(), T::zero()),
            None => {
                self.Qx.set(T::zero());
            }
        }
        self.dot_xQx = self.Qx.dot(x);
        self.dot_cx = data.c.dot(x);
        self.dot_yu = y.dot(u);

        // r_dual = Qx + c + A'v + G'u
        self.r_dual.waxpby(T::one(), &self.Qx, T::one(), &data.c);
        data.A.t().gemv(&mut self.r_dual, v, T::one(), T::one());
        data.G.t().gemv(&mut self.r_dual, u, T::one(), T::one());

        // r_eq = Ax - b
        self.r_eq.copy_from(&data.b);
        data.A.gemv(&mut self.r_eq, x, T::one(), -T::one());

        // r_in = Gx + y - h
        self.r_in.waxpby(T::one(), y, -T::one(), &data.h);
        data.G.gemv(&mut self.r_in, x, T::one(), T::one());

        self.merit = self.r_dual.norm() + self.norm_primal() + self.dot_yu;
    }

    fn merit(&self) -> T {
        self.merit
    }
}
