// ---------------------------------
// enum for managing callbacks
// ---------------------------------

/// Per-iteration progress report passed to a user callback.
///
/// All quantities refer to the problem as the user posed it, i.e.
/// after removing equilibration scaling, except for the merit values,
/// which are those used internally by the line search.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IterationSnapshot<T> {
    /// iteration index (0 before the first step is taken)
    pub iteration: u32,
    /// objective value ½xᵀQx + cᵀx
    pub objective: T,
    /// infinity norm of the dual residual
    pub res_dual: T,
    /// infinity norm of the primal residual
    pub res_primal: T,
    /// complementarity yᵀu / m
    pub gap: T,
    /// whether x satisfies the constraints to within tolerance
    pub feasible: bool,
    /// length of the step that produced this iterate
    pub step_length: T,
    /// centering parameter used for that step
    pub sigma: T,
    /// merit value of this iterate
    pub merit: T,
    /// lowest merit value seen so far
    pub best_merit: T,
}

pub(crate) type IterationCallbackFcn<T> = Box<dyn FnMut(&IterationSnapshot<T>) + Send>;

#[derive(Default)]
pub(crate) enum Callback<F> {
    #[default]
    None,
    Rust(F),
}

impl<F> std::fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callback::None => write!(f, "Callback::None"),
            Callback::Rust(_) => write!(f, "Callback::Rust"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct SolverCallbacks<T> {
    /// callback for per-iteration progress
    pub iteration_callback: Callback<IterationCallbackFcn<T>>,
}

impl<T> Default for SolverCallbacks<T> {
    // Create a new set of callbacks
    fn default() -> Self {
        Self {
            iteration_callback: Callback::None,
        }
    }
}

impl<T> SolverCallbacks<T> {
    pub(crate) fn report_iteration(&mut self, snapshot: &IterationSnapshot<T>) {
        if let Callback::Rust(f) = &mut self.iteration_callback {
            f(snapshot);
        }
    }
}
