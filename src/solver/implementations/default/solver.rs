use super::*;
use crate::solver::core::{
    callbacks::SolverCallbacks,
    traits::{ProblemData, Settings},
    Solver, SolverError,
};

use crate::algebra::*;
use crate::timers::*;

/// Solver for convex quadratic programs in the form of [`QuadraticProgram`]

pub type DefaultSolver<T = f64> = Solver<
    T,
    DefaultProblemData<T>,
    DefaultVariables<T>,
    DefaultResiduals<T>,
    DefaultKKTSystem<T>,
    DefaultInfo<T>,
    DefaultSolution<T>,
    DefaultSettings<T>,
>;

impl<T> DefaultSolver<T>
where
    T: FloatT,
{
    /// Create a solver for `problem`.
    ///
    /// `x0` is the primal starting point for problems with inequality
    /// constraints and must satisfy `Gx0 < h` strictly.  If omitted, a
    /// strictly feasible point is searched for.  It is ignored for
    /// problems without inequalities.
    pub fn new(
        problem: &QuadraticProgram<T>,
        x0: Option<&[T]>,
        settings: DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        settings.validate()?;

        if let Some(x0) = x0 {
            if x0.len() != problem.n() {
                return Err(SolverError::BadStartingPoint {
                    expected: problem.n(),
                    len: x0.len(),
                });
            }
        }

        let mut timers = Timers::default();
        let mut output;

        timeit! {timers => "setup"; {

        let info = DefaultInfo::<T>::new();
        let mut data = DefaultProblemData::<T>::new(problem, x0, &settings);
        let (n, m, p) = (data.n, data.m, data.p);
        let variables = DefaultVariables::<T>::new(n, m, p);
        let residuals = DefaultResiduals::<T>::new(n, m, p);

        // equilibrate problem data immediately on setup.
        // this prevents multiple equilibrations if solve
        // is called more than once.
        timeit!{timers => "equilibration"; {
            data.equilibrate(&settings);
        }}

        let kktsystem;
        timeit!{timers => "kktinit"; {
            kktsystem = DefaultKKTSystem::<T>::new(&data, &settings);
        }}

        // work variables for assembling step direction LHS/RHS
        let step_rhs = DefaultVariables::<T>::new(n, m, p);
        let step_lhs = DefaultVariables::<T>::new(n, m, p);
        let prev_vars = DefaultVariables::<T>::new(n, m, p);
        let best_vars = DefaultVariables::<T>::new(n, m, p);

        // user facing results go here.  Equality multipliers
        // are reported for every row of the original A
        let solution = DefaultSolution::<T>::new(n, m, problem.p());

        output = Self{data, variables, residuals, kktsystem, step_lhs, step_rhs,
            prev_vars, best_vars, info, solution, settings, timers: None,
            callbacks: SolverCallbacks::default()};

        }} //end "setup" timer.

        //now that the timer is finished we can swap our
        //timer object into the solver structure
        output.timers.replace(timers);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_rejects_bad_inputs() {
        let problem = QuadraticProgram::linear(
            vec![1., 1.],
            Matrix::zeros((0, 2)),
            vec![],
            Matrix::from(&[[-1., 0.], [0., -1.]]),
            vec![0., 0.],
        )
        .unwrap();

        let result = DefaultSolver::new(&problem, Some(&[1.0][..]), DefaultSettings::default());
        assert!(matches!(
            result,
            Err(SolverError::BadStartingPoint { expected: 2, len: 1 })
        ));

        let settings = DefaultSettings {
            s0: 1.5,
            ..DefaultSettings::default()
        };
        let result = DefaultSolver::new(&problem, None, settings);
        assert!(matches!(result, Err(SolverError::Settings(_))));
    }
}
