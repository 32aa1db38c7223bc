#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::traits::ProblemData;

// ---------------
// Data type for default problem format
// ---------------

/// Standard-form solver type implementing the [`ProblemData`](crate::solver::core::traits::ProblemData) trait
///
/// Holds the internal copy of the problem after presolve and
/// equilibration.  The caller's problem is retained unmodified in
/// `problem` for reference.

pub struct DefaultProblemData<T> {
    // the (scaled and reduced) problem data
    pub Q: Option<Matrix<T>>,
    pub c: Vec<T>,
    pub A: Matrix<T>,
    pub b: Vec<T>,
    pub G: Matrix<T>,
    pub h: Vec<T>,

    // dimensions after presolve
    pub n: usize,
    pub m: usize,
    pub p: usize,

    // scaled primal starting point
    pub x0: Vec<T>,

    pub equilibration: DefaultEquilibrationData<T>,
    pub presolver: Presolver<T>,

    // the problem as supplied by the user
    pub problem: QuadraticProgram<T>,
}

impl<T> DefaultProblemData<T>
where
    T: FloatT,
{
    pub fn new(
        problem: &QuadraticProgram<T>,
        x0: Option<&[T]>,
        settings: &DefaultSettings<T>,
    ) -> Self {
        // dimension checks will have already been
        // performed during problem setup, so skip here

        let presolver = Presolver::new(&problem.A, &problem.b, settings);
        let (A, b) = presolver.presolve(&problem.A, &problem.b);

        let Q = problem.Q.clone();
        let c = problem.c.clone();
        let G = problem.G.clone();
        let h = problem.h.clone();

        let (n, m, p) = (c.len(), h.len(), b.len());

        let x0 = match x0 {
            Some(x0) => x0.to_vec(),
            None if m > 0 => problem.make_strictly_feasible().unwrap_or_else(|| {
                log::debug!("no strictly feasible starting point found");
                vec![T::zero(); n]
            }),
            None => vec![T::zero(); n],
        };

        let equilibration = DefaultEquilibrationData::<T>::new(n, m, p);

        Self {
            Q,
            c,
            A,
            b,
            G,
            h,
            n,
            m,
            p,
            x0,
            equilibration,
            presolver,
            problem: problem.clone(),
        }
    }

    /// True if the direction of `d` is a ray of unbounded decrease
    /// for the scaled problem, i.e. `Qd = 0`, `Ad = 0`, `Gd ≤ 0` and
    /// `cᵀd < 0` to within `tol` after normalizing `d`.
    pub(crate) fn is_unbounded_ray(&self, d: &[T], tol: T) -> bool {
        let dnorm = d.norm_inf();
        if !(dnorm > T::zero() && dnorm.is_finite()) {
            return false;
        }
        let mut ray = d.to_vec();
        ray.scale(T::recip(dnorm));

        if !(self.c.dot(&ray) < -tol) {
            return false;
        }

        if let Some(Q) = &self.Q {
            let mut work = vec![T::zero(); self.n];
            Q.gemv(&mut work, &ray, T::one(), T::zero());
            if work.norm_inf() > tol {
                return false;
            }
        }

        let mut work = vec![T::zero(); self.p];
        self.A.gemv(&mut work, &ray, T::one(), T::zero());
        if work.norm_inf() > tol {
            return false;
        }

        let mut work = vec![T::zero(); self.m];
        self.G.gemv(&mut work, &ray, T::one(), T::zero());
        work.maximum() <= tol
    }
}

impl<T> ProblemData<T> for DefaultProblemData<T>
where
    T: FloatT,
{
    type V = DefaultVariables<T>;
    type SE = DefaultSettings<T>;

    fn equilibrate(&mut self, settings: &DefaultSettings<T>) {
        let data = self;
        let equil = &mut data.equilibration;

        // if equilibration is disabled, just return.  Note that
        // the default equilibration structure initializes with
        // identity scaling already.
        if !settings.equilibrate_enable {
            return;
        }

        // references to scaling matrices from workspace
        let (d, e, f) = (&mut equil.d, &mut equil.e, &mut equil.f);

        // use the inverse scalings as work vectors
        let dwork = &mut equil.dinv;
        let ework = &mut equil.einv;
        let fwork = &mut equil.finv;

        let scale_min = settings.equilibrate_min_scaling;
        let scale_max = settings.equilibrate_max_scaling;

        // perform scaling operations for a fixed number of steps
        for _ in 0..settings.equilibrate_max_iter {
            kkt_col_norms(&data.Q, &data.A, &data.G, dwork, ework, fwork);

            dwork.scalarop(|x| limit_scaling(x, scale_min, scale_max));
            ework.scalarop(|x| limit_scaling(x, scale_min, scale_max));
            fwork.scalarop(|x| limit_scaling(x, scale_min, scale_max));

            dwork.rsqrt();
            ework.rsqrt();
            fwork.rsqrt();

            // Scale the problem data and update the
            // equilibration matrices
            if let Some(Q) = &mut data.Q {
                Q.lrscale(dwork, dwork); // Q[:,:] = Ds*Q*Ds
            }
            data.A.lrscale(fwork, dwork); // A[:,:] = Fs*A*Ds
            data.G.lrscale(ework, dwork); // G[:,:] = Es*G*Ds
            data.c.hadamard(dwork);
            data.b.hadamard(fwork);
            data.h.hadamard(ework);

            d.hadamard(dwork);
            e.hadamard(ework);
            f.hadamard(fwork);

            // now use the dwork array to hold the
            // column norms of the newly scaled Q
            // so that we can compute the mean
            let mean_col_norm_Q = match &data.Q {
                Some(Q) => {
                    Q.col_norms(dwork);
                    dwork.mean()
                }
                None => T::zero(),
            };
            let inf_norm_c = data.c.norm_inf();
            let scale_cost = T::max(inf_norm_c, mean_col_norm_Q);

            if scale_cost != T::zero() {
                let scale_cost = limit_scaling(scale_cost, scale_min, scale_max);
                let ctmp = T::recip(scale_cost);

                // scale the cost terms and overall scaling
                if let Some(Q) = &mut data.Q {
                    Q.scale(ctmp);
                }
                data.c.scale(ctmp);
                equil.c *= ctmp;
            }
        } //end Ruiz scaling loop

        equil.update_inverses();

        // starting point in the scaled variables
        data.x0.hadamard(&equil.dinv);
    }

    fn is_presolve_infeasible(&self) -> bool {
        self.presolver.is_infeasible()
    }

    fn has_inequalities(&self) -> bool {
        self.m > 0
    }
}

// ---------------
// utilities
// ---------------

fn kkt_col_norms<T: FloatT>(
    Q: &Option<Matrix<T>>,
    A: &Matrix<T>,
    G: &Matrix<T>,
    norm_LHS: &mut [T],
    norm_G: &mut [T],
    norm_A: &mut [T],
) {
    match Q {
        Some(Q) => Q.col_norms(norm_LHS),
        None => {
            norm_LHS.set(T::zero());
        }
    }
    A.col_norms_no_reset(norm_LHS); // incrementally from Q norms
    G.col_norms_no_reset(norm_LHS);
    A.row_norms(norm_A); // same as column norms of A'
    G.row_norms(norm_G);
}

// norms below the minimum are treated as empty rows or
// columns and left unscaled
fn limit_scaling<T: FloatT>(s: T, minval: T, maxval: T) -> T {
    if s < minval {
        T::one()
    } else if s > maxval {
        maxval
    } else {
        s
    }
}
