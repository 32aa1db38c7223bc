//! Required traits for types providing an ipqp solver implementation.
//!
//! This module defines the core traits that must be implemented by a collection
//! of mutually associated data types to make a solver for a particular problem
//! format.
//!
//! In nearly all cases there is no need for a user to implement these traits.
//! Instead, users should use the collection of types that are provided
//! in the [Default solver implementation](crate::solver::implementations::default),
//! which collectively implement support for the problem format described in the top
//! level crate documentation.

use super::callbacks::IterationSnapshot;
use super::kktsolvers::KKTDiagnostics;
use super::{CoreSettings, SettingsError, SolverStatus};
use crate::algebra::*;
use crate::timers::*;

/// Data for a quadratic program.

pub trait ProblemData<T: FloatT> {
    type V: Variables<T>;
    type SE: Settings<T>;

    /// Equilibrate internal data before solver starts.
    fn equilibrate(&mut self, settings: &Self::SE);

    /// `true` if presolve found the equality constraints inconsistent
    fn is_presolve_infeasible(&self) -> bool;

    /// `true` if the problem has inequality constraints
    fn has_inequalities(&self) -> bool;
}

/// Variables for a quadratic program.

pub trait Variables<T: FloatT> {
    type D: ProblemData<T>;
    type R: Residuals<T>;

    /// Compute the complementarity measure yᵀu / m.
    fn calc_mu(&self) -> T;

    /// Place the starting point in the interior.  Returns `false`
    /// if the primal starting point is not strictly feasible.
    fn interior_start(&mut self, data: &Self::D) -> bool;

    /// Compute the KKT RHS for a pure Newton step.
    fn affine_step_rhs(&mut self, residuals: &Self::R, variables: &Self);

    /// Compute the KKT RHS for a centered and corrected step.
    fn combined_step_rhs(
        &mut self,
        residuals: &Self::R,
        variables: &Self,
        affine_step: &Self,
        σ: T,
        μ: T,
    );

    /// Pure centering right-hand side toward `σμ`, without the
    /// second-order correction term.
    fn centering_step_rhs(&mut self, residuals: &Self::R, variables: &Self, σ: T, μ: T);

    /// Largest step length no greater than `αmax` in the given
    /// direction that keeps the slacks and multipliers nonnegative.
    fn calc_step_length(&self, step: &Self, αmax: T) -> T;

    /// Complementarity yᵀu / m after a step of length `α`.
    fn calc_mu_shifted(&self, step: &Self, α: T) -> T;

    /// Update the variables in the given step direction, scaled by `α`.
    fn add_step(&mut self, step: &Self, α: T);

    /// Overwrite values with those from another object
    fn copy_from(&mut self, src: &Self);
}

/// Residuals for a quadratic program.

pub trait Residuals<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;

    /// Compute residuals for the given variables.
    fn update(&mut self, variables: &Self::V, data: &Self::D);

    /// Line search merit of the most recent update.
    fn merit(&self) -> T;
}

/// KKT linear solver object.

pub trait KKTSystem<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;
    type SE: Settings<T>;

    /// Update the KKT system with the current iterate and refactor.
    fn update(&mut self, data: &Self::D, variables: &Self::V, settings: &Self::SE) -> bool;

    /// Solve the KKT system for the given RHS.
    fn solve(
        &mut self,
        step_lhs: &mut Self::V,
        step_rhs: &Self::V,
        data: &Self::D,
        variables: &Self::V,
        settings: &Self::SE,
    ) -> bool;

    /// Solve the equality constrained problem directly, for
    /// problems without inequality constraints.
    fn solve_direct(&mut self, variables: &mut Self::V, data: &Self::D, settings: &Self::SE)
        -> bool;

    /// Factorization and solve statistics.
    fn diagnostics(&self) -> KKTDiagnostics<T>;

    /// Clear factorization and solve statistics before a new solve.
    fn reset_diagnostics(&mut self);
}

/// Printing functions for the solver's Info

pub trait InfoPrint<T>
where
    T: FloatT,
{
    type D: ProblemData<T>;
    type SE: Settings<T>;

    /// Print the solver configuration, e.g. settings etc.
    /// This function is called once at the start of the solve.
    fn print_configuration(&mut self, settings: &Self::SE, data: &Self::D) -> std::io::Result<()>;

    /// Print a header to appear at the top of progress information.
    fn print_status_header(&mut self, settings: &Self::SE) -> std::io::Result<()>;

    /// Print solver progress information.   Called once per iteration.
    fn print_status(&mut self, settings: &Self::SE) -> std::io::Result<()>;

    /// Print solver final status and other exit information.   Called at
    /// solver termination.
    fn print_footer(&mut self, settings: &Self::SE) -> std::io::Result<()>;

    /// Target for all printed output
    fn print_target(&mut self) -> &mut dyn std::io::Write;
}

/// Internal information for the solver to monitor progress and check for termination.

pub trait Info<T>: InfoPrint<T>
where
    T: FloatT,
{
    type V: Variables<T>;
    type R: Residuals<T>;

    /// Reset internal data, particularly solve timers.
    fn reset(&mut self, timers: &mut Timers);

    /// Compute final values before solver termination
    fn finalize(&mut self, kkt: KKTDiagnostics<T>, timers: &mut Timers);

    /// Update solver progress information
    fn update(
        &mut self,
        data: &Self::D,
        variables: &Self::V,
        residuals: &Self::R,
        settings: &Self::SE,
        timers: &Timers,
    );

    /// Return `true` if termination conditions have been reached.
    fn check_termination(&mut self, settings: &Self::SE, iter: u32) -> bool;

    /// Settle the status of a problem solved without iteration.
    fn classify_direct(&mut self, settings: &Self::SE);

    /// Settle the status when no acceptable step can be found.
    fn classify_stalled(&mut self, data: &Self::D, variables: &Self::V, settings: &Self::SE);

    // save and recover prior iterates
    fn save_prev_iterate(&mut self, variables: &Self::V, prev_variables: &mut Self::V);
    fn reset_to_prev_iterate(&mut self, variables: &mut Self::V, prev_variables: &Self::V);

    /// Record the current iterate if it has the lowest merit seen so far.
    fn save_best_iterate(&mut self, variables: &Self::V, best_variables: &mut Self::V);

    /// Restore the lowest merit iterate.  Returns `false` if
    /// the current iterate is at least as good and is kept.
    fn reset_to_best_iterate(&mut self, variables: &mut Self::V, best_variables: &Self::V)
        -> bool;

    /// Record some of the top level solver's choice of various
    /// scalars. `μ = ` complementarity.  `α = ` computed step length.
    /// `σ = ` centering parameter.
    fn save_scalars(&mut self, μ: T, α: T, σ: T, iter: u32);

    /// Progress report for user callbacks
    fn snapshot(&self) -> IterationSnapshot<T>;

    /// Report or update termination status
    fn get_status(&self) -> SolverStatus;
    fn set_status(&mut self, status: SolverStatus);
}

/// Solution for a quadratic program.

pub trait Solution<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;
    type I: Info<T>;

    /// Compute solution from the Variables at solver termination
    fn finalize(&mut self, data: &Self::D, variables: &Self::V, info: &Self::I);
}

/// Settings for a quadratic program.
///
/// Implementors of this trait can define any internal or problem
/// specific settings they wish.   They must, however, also maintain
/// a settings object of type [`CoreSettings`](crate::solver::core::CoreSettings)
/// and return this to the solver internally.

pub trait Settings<T: FloatT> {
    /// Return the core settings.
    fn core(&self) -> &CoreSettings<T>;

    /// Return the core settings (mutably).
    fn core_mut(&mut self) -> &mut CoreSettings<T>;

    /// Check that the settings are valid.
    fn validate(&self) -> Result<(), SettingsError>;
}
