#![allow(non_snake_case)]

use ipqp::{algebra::*, solver::*};

// badly scaled QP: minimize ½xᵀQx + cᵀx subject to x ≥ 0, x1 + x2 ≤ 2
fn scaled_problem(rowscale: f64) -> QuadraticProgram<f64> {
    let Q = Matrix::from(&[[400., 2.], [2., 0.04]]);
    let c = vec![-10., -0.5];
    let G = Matrix::from(&[
        [-1., 0.],
        [0., -1e-3],
        [rowscale, rowscale],
    ]);
    let h = vec![0., 0., 2. * rowscale];

    QuadraticProgram::new(Some(Q), c, Matrix::zeros((0, 2)), vec![], G, h).unwrap()
}

fn solve(problem: &QuadraticProgram<f64>, equilibrate: bool) -> DefaultSolution<f64> {
    let settings = DefaultSettingsBuilder::default()
        .equilibrate_enable(equilibrate)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new(problem, Some(&[0.01, 0.5][..]), settings).unwrap();
    solver.solve();
    solver.solution
}

#[test]
fn test_equilibration_on_off() {
    let problem = scaled_problem(1.);

    let on = solve(&problem, true);
    let off = solve(&problem, false);

    assert_eq!(on.status, SolverStatus::Converged);
    assert_eq!(off.status, SolverStatus::Converged);
    assert!(on.x.norm_inf_diff(&off.x) <= 1e-6);
    assert!(f64::abs(on.obj_val - off.obj_val) <= 1e-6);
    assert!(problem.feasible(&on.x, 1e-7));
}

#[test]
fn test_equilibration_row_scaling() {
    // scaling a row of G and h leaves the solution unchanged
    let base = solve(&scaled_problem(1.), true);
    let scaled = solve(&scaled_problem(1e3), true);

    assert_eq!(base.status, SolverStatus::Converged);
    assert_eq!(scaled.status, SolverStatus::Converged);
    assert!(base.x.norm_inf_diff(&scaled.x) <= 1e-6);

    // the scaled problem needs at least one centering retry after
    // a rejected corrector step
    assert!(scaled.kkt_solves > 2 * scaled.iterations);

    // the multiplier of the scaled row shrinks accordingly
    assert!(base.u[2] > 0.1);
    assert!(f64::abs(base.u[2] - 1e3 * scaled.u[2]) <= 1e-5);
}
