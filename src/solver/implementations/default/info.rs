use super::*;
use crate::algebra::*;
use crate::io::PrintTarget;
use crate::solver::core::{
    callbacks::IterationSnapshot,
    kktsolvers::KKTDiagnostics,
    traits::{Info, Residuals},
    SolverStatus,
};
use crate::solver::traits::Variables;
use crate::timers::*;

/// Standard-form solver type implementing the [`Info`](crate::solver::core::traits::Info) and [`InfoPrint`](crate::solver::core::traits::InfoPrint) traits
///
/// Residuals, objective and complementarity are reported for the problem
/// as posed by the user, i.e. with the equilibration scaling removed.
/// The merit values are those of the scaled problem used internally.

#[derive(Debug)]
pub struct DefaultInfo<T> {
    pub μ: T,
    pub sigma: T,
    pub step_length: T,
    pub iterations: u32,
    pub cost_primal: T,
    pub res_dual: T,
    pub res_primal: T,
    pub gap: T,
    pub feasible: bool,
    pub merit: T,
    pub best_merit: T,

    // previous iterate
    prev_merit: T,
    has_best: bool,

    pub solve_time: f64,
    pub status: SolverStatus,
    pub kkt: KKTDiagnostics<T>,

    // target stream for printing
    pub(crate) stream: PrintTarget,
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            μ: T::zero(),
            sigma: T::zero(),
            step_length: T::zero(),
            iterations: 0,
            cost_primal: T::nan(),
            res_dual: T::nan(),
            res_primal: T::nan(),
            gap: T::nan(),
            feasible: false,
            merit: T::nan(),
            best_merit: T::infinity(),
            prev_merit: T::nan(),
            has_best: false,
            solve_time: 0f64,
            status: SolverStatus::Unsolved,
            kkt: KKTDiagnostics::default(),
            stream: PrintTarget::default(),
        }
    }
}

impl<T> Default for DefaultInfo<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Info<T> for DefaultInfo<T>
where
    T: FloatT,
{
    type V = DefaultVariables<T>;
    type R = DefaultResiduals<T>;

    fn reset(&mut self, timers: &mut Timers) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.solve_time = 0f64;
        self.step_length = T::zero();
        self.sigma = T::zero();
        self.best_merit = T::infinity();
        self.has_best = false;
        self.kkt = KKTDiagnostics::default();

        timers.reset_timer("solve");
    }

    fn finalize(&mut self, kkt: KKTDiagnostics<T>, timers: &mut Timers) {
        self.kkt = kkt;
        self.solve_time = timers.total_time().as_secs_f64();
    }

    fn update(
        &mut self,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        residuals: &DefaultResiduals<T>,
        settings: &DefaultSettings<T>,
        timers: &Timers,
    ) {
        // shortcuts for the equilibration matrices
        let dinv = &data.equilibration.dinv;
        let einv = &data.equilibration.einv;
        let finv = &data.equilibration.finv;
        let cscale = data.equilibration.c;

        // inner products are invariant w.r.t. equilibration, apart
        // from the overall objective scaling term c
        let xQx_over2 = residuals.dot_xQx / (2.).as_T();
        self.cost_primal = (xQx_over2 + residuals.dot_cx) / cscale;

        // residuals with the equilibration inverted
        let res_eq = residuals.r_eq.norm_inf_scaled(finv);
        let res_in = residuals.r_in.norm_inf_scaled(einv);
        self.res_dual = residuals.r_dual.norm_inf_scaled(dinv) / cscale;
        self.res_primal = T::max(res_eq, res_in);

        self.gap = match data.m {
            0 => T::zero(),
            m => residuals.dot_yu / (cscale * m.as_T()),
        };

        // Gx - h = r_in - y in the scaled space, one row at a time
        let max_violation = residuals
            .r_in
            .iter()
            .zip(&variables.y)
            .zip(einv)
            .fold(T::neg_infinity(), |acc, ((&r, &y), &e)| {
                T::max(acc, (r - y) * e)
            });
        self.feasible = res_eq < settings.tol && max_violation < settings.tol;

        self.merit = residuals.merit();

        // solve time so far (includes setup)
        self.solve_time = timers.total_time().as_secs_f64();
    }

    fn check_termination(&mut self, settings: &DefaultSettings<T>, iter: u32) -> bool {
        if !self.is_finite() {
            log::debug!("non-finite residuals at iteration {}", iter);
            self.status = SolverStatus::Failed;
        } else if self.is_converged(settings.tol) {
            self.status = SolverStatus::Converged;
        } else if iter >= settings.max_iter {
            self.status = if !self.feasible {
                SolverStatus::Unfeasible
            } else if self.res_dual >= settings.tol {
                SolverStatus::Unbounded
            } else {
                SolverStatus::MaxIterations
            };
        }

        // return TRUE if we settled on a final status
        self.status != SolverStatus::Unsolved
    }

    fn classify_direct(&mut self, settings: &DefaultSettings<T>) {
        self.status = if !self.is_finite() {
            SolverStatus::Failed
        } else if self.is_converged(settings.tol) {
            SolverStatus::Converged
        } else if !self.feasible {
            SolverStatus::Unfeasible
        } else {
            SolverStatus::Unbounded
        };
    }

    fn classify_stalled(
        &mut self,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        settings: &DefaultSettings<T>,
    ) {
        // a feasible iterate drifting along a ray of decrease
        // certifies an unbounded objective
        self.status = if !self.is_finite() {
            SolverStatus::Failed
        } else if self.is_converged(settings.tol) {
            SolverStatus::Converged
        } else if !self.feasible {
            SolverStatus::Unfeasible
        } else if self.res_dual >= settings.tol && data.is_unbounded_ray(&variables.x, settings.tol) {
            SolverStatus::Unbounded
        } else {
            SolverStatus::Failed
        };
    }

    fn save_prev_iterate(&mut self, variables: &Self::V, prev_variables: &mut Self::V) {
        self.prev_merit = self.merit;
        prev_variables.copy_from(variables);
    }

    fn reset_to_prev_iterate(&mut self, variables: &mut Self::V, prev_variables: &Self::V) {
        self.merit = self.prev_merit;
        variables.copy_from(prev_variables);
    }

    fn save_best_iterate(&mut self, variables: &Self::V, best_variables: &mut Self::V) {
        if self.merit.is_finite() && (!self.has_best || self.merit < self.best_merit) {
            self.best_merit = self.merit;
            self.has_best = true;
            best_variables.copy_from(variables);
        }
    }

    fn reset_to_best_iterate(&mut self, variables: &mut Self::V, best_variables: &Self::V) -> bool {
        if !self.has_best || self.merit <= self.best_merit {
            return false;
        }
        self.merit = self.best_merit;
        variables.copy_from(best_variables);
        true
    }

    fn save_scalars(&mut self, μ: T, α: T, σ: T, iter: u32) {
        self.μ = μ;
        self.step_length = α;
        self.sigma = σ;
        self.iterations = iter;
    }

    fn snapshot(&self) -> IterationSnapshot<T> {
        IterationSnapshot {
            iteration: self.iterations,
            objective: self.cost_primal,
            res_dual: self.res_dual,
            res_primal: self.res_primal,
            gap: self.gap,
            feasible: self.feasible,
            step_length: self.step_length,
            sigma: self.sigma,
            merit: self.merit,
            best_merit: self.best_merit,
        }
    }

    fn get_status(&self) -> SolverStatus {
        self.status
    }

    fn set_status(&mut self, status: SolverStatus) {
        self.status = status;
    }
}

// Utility functions for convergence checking

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    fn is_finite(&self) -> bool {
        self.merit.is_finite()
            && self.cost_primal.is_finite()
            && self.res_dual.is_finite()
            && self.res_primal.is_finite()
            && self.gap.is_finite()
    }

    fn is_converged(&self, tol: T) -> bool {
        self.feasible && T::max(self.res_dual, T::max(self.res_primal, self.gap)) < tol
    }
}
