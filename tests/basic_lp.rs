#![allow(non_snake_case)]

use ipqp::{algebra::*, solver::*};

// minimize c'x subject to -1/2 ≤ x ≤ 1/2, written as
// [2I; -2I] x ≤ 1
fn basic_lp_data() -> QuadraticProgram<f64> {
    let G = Matrix::from(&[
        [2., 0., 0.],
        [0., 2., 0.],
        [0., 0., 2.],
        [-2., 0., 0.],
        [0., -2., 0.],
        [0., 0., -2.],
    ]);
    let c = vec![3., -2., 1.];
    let h = vec![1.; 6];

    QuadraticProgram::linear(c, Matrix::zeros((0, 3)), vec![], G, h).unwrap()
}

#[test]
fn test_lp_feasible() {
    let _ = env_logger::builder().is_test(true).try_init();

    let problem = basic_lp_data();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, Some(&[0., 0., 0.][..]), settings).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Converged);

    let refsol = vec![-0.5, 0.5, -0.5];
    assert!(solver.solution.x.norm_inf_diff(&refsol) <= 1e-6);

    let refobj = -3.;
    assert!(f64::abs(solver.solution.obj_val - refobj) <= 1e-6);

    assert!(problem.feasible(&solver.solution.x, 1e-8));
    assert!(solver.solution.r_dual < 1e-8);
    assert!(solver.solution.gap < 1e-8);
    assert!(solver.solution.iterations > 0);

    // two KKT solves per iteration, plus one for each centering retry
    assert!(solver.solution.kkt_solves >= 2 * solver.solution.iterations);
    assert!(solver.solution.kkt_solves <= 3 * solver.solution.iterations);
}

#[test]
fn test_lp_triangle() {
    // minimize x + y subject to x ≥ 0, y ≥ 0, x + y ≥ 1
    let G = Matrix::from(&[[-1., 0.], [0., -1.], [-1., -1.]]);
    let problem =
        QuadraticProgram::linear(vec![1., 1.], Matrix::zeros((0, 2)), vec![], G, vec![0., 0., -1.])
            .unwrap();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, Some(&[1., 1.][..]), settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Converged);
    let x = &solver.solution.x;
    assert!(f64::abs(x[0] + x[1] - 1.) <= 1e-6);
    assert!(f64::abs(solver.solution.obj_val - 1.) <= 1e-6);
    assert!(x.minimum() > -1e-8);
}

#[test]
fn test_lp_no_interior() {
    let _ = env_logger::builder().is_test(true).try_init();

    // x ≤ -1 and x ≥ 1 has no strictly feasible point
    let G = Matrix::from(&[[1.], [-1.]]);
    let problem =
        QuadraticProgram::linear(vec![1.], Matrix::zeros((0, 1)), vec![], G, vec![-1., -1.])
            .unwrap();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, None, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Unfeasible);
    assert_eq!(solver.solution.iterations, 0);
    assert_eq!(solver.solution.kkt_solves, 0);
    assert!(f64::is_nan(solver.solution.obj_val));
}

#[test]
fn test_lp_infeasible_start() {
    let problem = basic_lp_data();

    // violates x1 ≤ 1/2
    let x0 = [1., 0., 0.];
    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, Some(&x0[..]), settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Unfeasible);
    assert_eq!(solver.solution.iterations, 0);
}

#[test]
fn test_lp_boundary_start() {
    let problem = basic_lp_data();

    // active but not violated constraints are rejected too
    let x0 = [0.5, 0., 0.];
    let settings = DefaultSettingsBuilder::default()
        .equilibrate_enable(false)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new(&problem, Some(&x0[..]), settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Unfeasible);
}

#[test]
fn test_lp_max_iter_classification() {
    let _ = env_logger::builder().is_test(true).try_init();

    // minimize x subject to x ≥ 0.  At x0 = 1 the starting
    // multiplier u0 = 1 makes the dual residual vanish
    let G = Matrix::from(&[[-1.]]);
    let problem =
        QuadraticProgram::linear(vec![1.], Matrix::zeros((0, 1)), vec![], G, vec![0.]).unwrap();

    let settings = DefaultSettingsBuilder::default()
        .max_iter(0)
        .equilibrate_enable(false)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new(&problem, Some(&[1.][..]), settings).unwrap();
    solver.solve();

    // feasible, dual residual zero, complementarity not
    assert_eq!(solver.solution.status, SolverStatus::MaxIterations);
    assert_eq!(solver.solution.iterations, 0);

    // a nonzero dual residual at the iteration limit reads as unbounded
    let problem = QuadraticProgram::linear(
        vec![-1.],
        Matrix::zeros((0, 1)),
        vec![],
        Matrix::from(&[[-1.]]),
        vec![0.],
    )
    .unwrap();
    let settings = DefaultSettingsBuilder::default()
        .max_iter(0)
        .equilibrate_enable(false)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new(&problem, Some(&[1.][..]), settings).unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Unbounded);
}

#[test]
fn test_lp_repeat_solve() {
    let problem = basic_lp_data();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, Some(&[0., 0., 0.][..]), settings).unwrap();

    solver.solve();
    let x1 = solver.solution.x.clone();
    let iter1 = solver.solution.iterations;
    let solves1 = solver.solution.kkt_solves;

    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Converged);
    assert_eq!(solver.solution.x, x1);
    assert_eq!(solver.solution.iterations, iter1);
    assert_eq!(solver.solution.kkt_solves, solves1);
}

#[test]
fn test_lp_unbounded() {
    let _ = env_logger::builder().is_test(true).try_init();

    // minimize -x subject to x ≥ 0
    let G = Matrix::from(&[[-1.]]);
    let problem =
        QuadraticProgram::linear(vec![-1.], Matrix::zeros((0, 1)), vec![], G, vec![0.]).unwrap();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, Some(&[1.][..]), settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Unbounded);
    assert!(solver.solution.x[0] > 1.);
    assert!(solver.solution.obj_val < -1.);
}

#[test]
fn test_lp_unbounded_along_one_coordinate() {
    // minimize -x1 + x2 subject to x ≥ 0, bounded in x2 only
    let G = Matrix::from(&[[-1., 0.], [0., -1.]]);
    let problem = QuadraticProgram::linear(
        vec![-1., 1.],
        Matrix::zeros((0, 2)),
        vec![],
        G,
        vec![0., 0.],
    )
    .unwrap();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, Some(&[1., 1.][..]), settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Unbounded);
    assert!(problem.feasible(&solver.solution.x, 1e-8));
}
