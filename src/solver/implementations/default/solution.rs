use super::*;
use crate::{
    algebra::*,
    solver::core::{kktsolvers::KKTDiagnostics, traits::Solution, SolverStatus},
};

/// Standard-form solver type implementing the [`Solution`](crate::solver::core::traits::Solution) trait
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultSolution<T> {
    /// primal solution
    pub x: Vec<T>,
    /// inequality slacks h - Gx
    pub y: Vec<T>,
    /// inequality multipliers
    pub u: Vec<T>,
    /// equality multipliers, one per row of the original `A`
    pub v: Vec<T>,
    /// final solver status
    pub status: SolverStatus,
    /// primal objective value
    pub obj_val: T,
    /// number of iterations
    pub iterations: u32,
    /// dual residual (infinity norm)
    pub r_dual: T,
    /// primal residual (infinity norm)
    pub r_prim: T,
    /// complementarity yᵀu / m
    pub gap: T,
    /// number of KKT linear solves
    pub kkt_solves: u32,
    /// factorization statistics from the final KKT update
    pub kkt: KKTDiagnostics<T>,
    /// number of equality rows removed as linearly dependent
    pub reduced_equalities: usize,
    /// solve time in seconds
    pub solve_time: f64,
}

impl<T> DefaultSolution<T>
where
    T: FloatT,
{
    /// Create a new `DefaultSolution` object
    pub fn new(n: usize, m: usize, p: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            y: vec![T::zero(); m],
            u: vec![T::zero(); m],
            v: vec![T::zero(); p],
            status: SolverStatus::Unsolved,
            obj_val: T::nan(),
            iterations: 0,
            r_dual: T::nan(),
            r_prim: T::nan(),
            gap: T::nan(),
            kkt_solves: 0,
            kkt: KKTDiagnostics::default(),
            reduced_equalities: 0,
            solve_time: 0f64,
        }
    }
}

impl<T> Solution<T> for DefaultSolution<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;
    type I = DefaultInfo<T>;

    fn finalize(
        &mut self,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        info: &DefaultInfo<T>,
    ) {
        self.status = info.status;

        self.obj_val = if info.status.is_infeasible() {
            T::nan()
        } else {
            info.cost_primal
        };

        self.iterations = info.iterations;
        self.r_dual = info.res_dual;
        self.r_prim = info.res_primal;
        self.gap = info.gap;
        self.kkt = info.kkt;
        self.kkt_solves = info.kkt.solves;
        self.reduced_equalities = data.presolver.count_reduced();
        self.solve_time = info.solve_time;

        // undo the equilibration
        let equil = &data.equilibration;
        let cinv = T::recip(equil.c);

        self.x.copy_from(&variables.x).hadamard(&equil.d);
        self.y.copy_from(&variables.y).hadamard(&equil.einv);
        self.u.copy_from(&variables.u).hadamard(&equil.e).scale(cinv);

        // and then the presolve
        let mut vreduced = variables.v.clone();
        vreduced.hadamard(&equil.f).scale(cinv);
        data.presolver.reverse_presolve(&mut self.v, &vreduced);
    }
}
