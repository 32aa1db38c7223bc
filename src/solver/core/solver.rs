use self::internal::*;
use super::callbacks::{Callback, IterationSnapshot, SolverCallbacks};
use super::traits::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::timers::*;

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    #[default]
    Unsolved,
    /// Solver terminated with a solution.
    Converged,
    /// Iteration limit reached at a feasible point with small dual residual.
    MaxIterations,
    /// Iteration limit reached at a feasible point without dual convergence,
    /// or progress stalled with the iterate moving along a ray of
    /// unbounded decrease.
    Unbounded,
    /// The constraints cannot be satisfied, or the starting point was not
    /// strictly feasible.
    Unfeasible,
    /// Solver terminated with a numerical error
    Failed,
}

impl SolverStatus {
    pub(crate) fn is_infeasible(&self) -> bool {
        matches!(*self, SolverStatus::Unfeasible)
    }

    pub(crate) fn is_errored(&self) -> bool {
        matches!(*self, SolverStatus::Failed)
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ---------------------------------
// top level solver container type
// ---------------------------------

// The top-level solver.

// This struct is defined with a collection of mutually interacting associated types.
// See the [`DefaultSolver`](crate::solver::implementations::default) for an example.

pub struct Solver<T, D, V, R, K, I, SO, SE> {
    pub data: D,
    pub variables: V,
    pub residuals: R,
    pub kktsystem: K,
    pub step_lhs: V,
    pub step_rhs: V,
    pub prev_vars: V,
    pub best_vars: V,
    pub info: I,
    pub solution: SO,
    pub settings: SE,
    pub timers: Option<Timers>,
    pub(crate) callbacks: SolverCallbacks<T>,
}

fn _print_banner(out: &mut dyn std::io::Write, is_verbose: bool) -> std::io::Result<()> {
    if !is_verbose {
        return Ok(());
    }

    writeln!(out, "-------------------------------------------------------------")?;
    writeln!(
        out,
        "     ipqp v{}  -  dense interior point QP solver          \n",
        crate::VERSION
    )?;
    writeln!(out, "-------------------------------------------------------------")?;
    Ok(())
}

impl<T, D, V, R, K, I, SO, SE> Solver<T, D, V, R, K, I, SO, SE>
where
    T: FloatT,
{
    /// Register a function to be called once per iteration with a
    /// progress report.  The callback cannot influence the solve.
    pub fn set_iteration_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&IterationSnapshot<T>) + Send + 'static,
    {
        self.callbacks.iteration_callback = Callback::Rust(Box::new(callback));
    }

    /// Remove any registered iteration callback.
    pub fn unset_iteration_callback(&mut self) {
        self.callbacks.iteration_callback = Callback::None;
    }
}

// print targets are owned by the solver's Info

impl<T, D, V, R, K, I, SO, SE> ConfigurablePrintTarget for Solver<T, D, V, R, K, I, SO, SE>
where
    I: ConfigurablePrintTarget,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn std::io::Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn print_to_sink(&mut self) {
        self.info.print_to_sink()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}

/// Save and restore a solver's problem and settings as JSON.
///
/// The problem is written as supplied by the user, without any presolve
/// reductions or equilibration scaling, so that a solve can be
/// reproduced exactly.
#[cfg(feature = "serde")]
pub trait SolverJSONReadWrite: Sized {
    /// Write the problem, starting point and settings to `file`
    fn save_to_file(&self, file: &mut std::fs::File) -> Result<(), std::io::Error>;
    /// Construct a new solver from a file written by `save_to_file`
    fn load_from_file(file: &mut std::fs::File) -> Result<Self, std::io::Error>;
}

// ---------------------------------
// IPSolver trait and its standard implementation.
// ---------------------------------

/// An interior point solver implementing a predictor-corrector scheme

// Only the main solver function lives in IPSolver, since this is the
// only publicly facing trait we want to give the solver.   Additional
// internal functionality for the top level solver object is implemented
// for the IPSolverInternals trait below, upon which IPSolver depends

pub trait IPSolver<T, D, V, R, K, I, SO, SE> {
    /// Run the solver
    fn solve(&mut self);
}

impl<T, D, V, R, K, I, SO, SE> IPSolver<T, D, V, R, K, I, SO, SE>
    for Solver<T, D, V, R, K, I, SO, SE>
where
    T: FloatT,
    D: ProblemData<T, V = V, SE = SE>,
    V: Variables<T, D = D, R = R>,
    R: Residuals<T, D = D, V = V>,
    K: KKTSystem<T, D = D, V = V, SE = SE>,
    I: Info<T, D = D, V = V, R = R, SE = SE>,
    SO: Solution<T, D = D, V = V, I = I>,
    SE: Settings<T>,
{
    fn solve(&mut self) {
        // various initializations
        let mut iter: u32 = 0;
        let mut σ = T::one();
        let mut α = T::zero();

        //timers is stored as an option so that
        //we can swap it out here and avoid
        //borrow conflicts with other fields.
        let mut timers = self.timers.take().unwrap_or_default();

        // solver release info, solver config
        // problem dimensions, settings etc
        notimeit! {timers; {
            let verbose = self.settings.core().verbose;
            _print_banner(self.info.print_target(), verbose).ok();
            self.info.print_configuration(&self.settings, &self.data).ok();
            self.info.print_status_header(&self.settings).ok();
        }}

        self.info.reset(&mut timers);
        self.kktsystem.reset_diagnostics();

        timeit! {timers => "solve"; {

        if self.data.is_presolve_infeasible() {
            log::debug!("presolve found inconsistent equality constraints");
            self.info.set_status(SolverStatus::Unfeasible);
        }
        else if !self.data.has_inequalities() {
            timeit!{timers => "direct solve"; {
                self.direct_solve(&timers);
            }}
        }
        else {

        // place the iterate in the interior of the inequalities
        timeit!{timers => "default start"; {
            if !self.variables.interior_start(&self.data) {
                log::debug!("starting point is not strictly feasible");
                self.info.set_status(SolverStatus::Unfeasible);
            }
        }}

        if self.info.get_status() == SolverStatus::Unsolved {

        timeit!{timers => "IP iteration"; {

        // ----------
        // main loop
        // ----------

        loop {

            //update the residuals
            //--------------
            self.residuals.update(&self.variables, &self.data);

            //calculate the complementarity measure (scaled)
            //--------------
            let μ = self.variables.calc_mu();

            // record scalar values from most recent iteration.
            // This captures μ at iteration zero.
            self.info.save_scalars(μ, α, σ, iter);

            // convergence check and printing
            // --------------
            self.info.update(&self.data, &self.variables, &self.residuals, &self.settings, &timers);
            self.info.save_best_iterate(&self.variables, &mut self.best_vars);

            self.callbacks.report_iteration(&self.info.snapshot());

            notimeit!{timers; {
                self.info.print_status(&self.settings).ok();
            }}

            if self.info.check_termination(&self.settings, iter) {
                break;
            }

            //increment counter here because we only count
            //iterations that produce a KKT update
            iter += 1;

            // Update the KKT system and the constant parts of its solution.
            // Keep track of the success of each step that calls KKT
            // --------------
            let mut is_kkt_solve_success: bool;
            timeit!{timers => "kkt update"; {
                is_kkt_solve_success = self.kktsystem.update(&self.data, &self.variables, &self.settings);
            }} // end "kkt update" timer

            // calculate the affine step
            // --------------
            self.step_rhs
                .affine_step_rhs(&self.residuals, &self.variables);

            timeit!{timers => "kkt solve"; {
                is_kkt_solve_success = is_kkt_solve_success &&
                self.kktsystem.solve(
                    &mut self.step_lhs,
                    &self.step_rhs,
                    &self.data,
                    &self.variables,
                    &self.settings,
                );
            }}  //end "kkt solve affine" timer

            // combined step only on affine step success
            if is_kkt_solve_success {

                //calculate step length and centering parameter
                // --------------
                let αaff = self.variables.calc_step_length(&self.step_lhs, T::one());
                σ = self.centering_parameter(μ, αaff);

                // calculate the combined step.  The affine direction
                // is copied out since the corrector overwrites step_lhs
                // --------------
                self.prev_vars.copy_from(&self.step_lhs);
                self.step_rhs.combined_step_rhs(
                    &self.residuals,
                    &self.variables,
                    &self.prev_vars,
                    σ,
                    μ,
                );

                timeit!{timers => "kkt solve" ; {
                    is_kkt_solve_success =
                    self.kktsystem.solve(
                        &mut self.step_lhs,
                        &self.step_rhs,
                        &self.data,
                        &self.variables,
                        &self.settings,
                    );
                }} //end "kkt solve"
            }

            // check for numerical failure
            if !is_kkt_solve_success {
                log::warn!("KKT factorization or solve failed at iteration {}", iter);
                self.info.set_status(SolverStatus::Failed);
                α = T::zero();
                break;
            }

            // compute final step length and update the current iterate
            // --------------
            let s0 = self.settings.core().s0;
            α = T::min(T::one(), s0 * self.variables.calc_step_length(&self.step_lhs, T::infinity()));

            let mut accepted;
            timeit!{timers => "line search"; {
                accepted = self.line_search(α);
            }}

            // corrector direction can be uphill for the merit; fall
            // back to a pure centering direction before giving up
            if accepted.is_none() {
                log::debug!("combined step rejected at iteration {}, retrying with centering step", iter);
                let σc = T::min(σ, (0.5).as_T());
                self.step_rhs
                    .centering_step_rhs(&self.residuals, &self.variables, σc, μ);

                let is_centering_success;
                timeit!{timers => "kkt solve" ; {
                    is_centering_success =
                    self.kktsystem.solve(
                        &mut self.step_lhs,
                        &self.step_rhs,
                        &self.data,
                        &self.variables,
                        &self.settings,
                    );
                }}

                if is_centering_success {
                    α = T::min(T::one(), s0 * self.variables.calc_step_length(&self.step_lhs, T::infinity()));
                    timeit!{timers => "line search"; {
                        accepted = self.line_search(α);
                    }}
                }
            }

            match accepted {
                Some(αls) => { α = αls; }
                None => {
                    log::debug!("line search exhausted at iteration {}", iter);
                    α = T::zero();
                    self.revert_to_best_if_worse(&timers);
                    self.info
                        .classify_stalled(&self.data, &self.variables, &self.settings);
                    break;
                }
            }

        } //end loop
        // ----------
        // ----------

        }} //end "IP iteration" timer

        }

        }

        if self.info.get_status().is_errored() {
            self.revert_to_best_if_worse(&timers);
        }

        }} // end "solve" timer

        // Check we if actually took a final step.  If not, we need
        // to recapture the scalars and print one last line
        if α == T::zero() && iter > 0 {
            self.info.save_scalars(self.variables.calc_mu(), α, σ, iter);
            notimeit! {timers; {self.info.print_status(&self.settings).ok();}}
        }

        //store final solution, timing etc
        self.info.finalize(self.kktsystem.diagnostics(), &mut timers);

        self.solution
            .finalize(&self.data, &self.variables, &self.info);

        self.info.print_footer(&self.settings).ok();

        //stow the timers back into Option in the solver struct
        self.timers.replace(timers);
    }
}

// Encapsulate the internal helpers trait in a private module
// so it doesn't get exported
mod internal {
    use super::super::traits::*;
    use super::*;

    pub(super) trait IPSolverInternals<T, D, V, R, K, I, SO, SE> {
        /// Solve a problem without inequalities with a single KKT solve
        fn direct_solve(&mut self, timers: &Timers);

        /// Compute a centering parameter
        fn centering_parameter(&self, μ: T, αaff: T) -> T;

        /// Backtrack along the step direction until the merit
        /// decreases sufficiently.  Returns the accepted step length,
        /// or `None` with the iterate unchanged if none is found.
        fn line_search(&mut self, αinit: T) -> Option<T>;

        /// Restore the lowest merit iterate if the current one is worse
        fn revert_to_best_if_worse(&mut self, timers: &Timers);
    }

    impl<T, D, V, R, K, I, SO, SE> IPSolverInternals<T, D, V, R, K, I, SO, SE>
        for Solver<T, D, V, R, K, I, SO, SE>
    where
        T: FloatT,
        D: ProblemData<T, V = V, SE = SE>,
        V: Variables<T, D = D, R = R>,
        R: Residuals<T, D = D, V = V>,
        K: KKTSystem<T, D = D, V = V, SE = SE>,
        I: Info<T, D = D, V = V, R = R, SE = SE>,
        SO: Solution<T, D = D, V = V, I = I>,
        SE: Settings<T>,
    {
        fn direct_solve(&mut self, timers: &Timers) {
            let is_success = self
                .kktsystem
                .update(&self.data, &self.variables, &self.settings)
                && self
                    .kktsystem
                    .solve_direct(&mut self.variables, &self.data, &self.settings);

            self.residuals.update(&self.variables, &self.data);
            self.info
                .save_scalars(T::zero(), T::zero(), T::zero(), 0);
            self.info
                .update(&self.data, &self.variables, &self.residuals, &self.settings, timers);

            if is_success {
                self.info.classify_direct(&self.settings);
            } else {
                log::warn!("KKT factorization or solve failed for direct solve");
                self.info.set_status(SolverStatus::Failed);
            }

            self.callbacks.report_iteration(&self.info.snapshot());
            self.info.print_status(&self.settings).ok();
        }

        fn centering_parameter(&self, μ: T, αaff: T) -> T {
            let μaff = self.variables.calc_mu_shifted(&self.step_lhs, αaff);
            if μ <= T::zero() {
                return T::zero();
            }
            T::powi(μaff / μ, 3).clip(T::zero(), T::one())
        }

        fn line_search(&mut self, αinit: T) -> Option<T> {
            let settings = self.settings.core();
            let (β, c) = (settings.beta, settings.alpha);
            let φ0 = self.residuals.merit();

            // Copy previous iterate in case no step is acceptable
            self.info
                .save_prev_iterate(&self.variables, &mut self.prev_vars);

            let mut α = αinit;
            for k in 0..settings.max_lsearch_iter {
                self.variables.add_step(&self.step_lhs, α);
                self.residuals.update(&self.variables, &self.data);
                let φ = self.residuals.merit();

                if φ.is_finite() && φ <= (T::one() - c * α) * φ0 {
                    log::trace!("line search accepted α = {:e} after {} backtracks", α, k);
                    return Some(α);
                }

                self.variables.copy_from(&self.prev_vars);
                α *= β;
            }

            self.info
                .reset_to_prev_iterate(&mut self.variables, &self.prev_vars);
            self.residuals.update(&self.variables, &self.data);
            None
        }

        fn revert_to_best_if_worse(&mut self, timers: &Timers) {
            if self
                .info
                .reset_to_best_iterate(&mut self.variables, &self.best_vars)
            {
                log::debug!("restoring lowest merit iterate");
                self.residuals.update(&self.variables, &self.data);
                self.info
                    .update(&self.data, &self.variables, &self.residuals, &self.settings, timers);
            }
        }
    } // end trait impl
} //end internals module
