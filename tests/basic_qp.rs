#![allow(non_snake_case)]

use ipqp::{algebra::*, solver::*};

// minimize ½‖x‖² - 2(x1 + x2) subject to x ≤ 1
fn basic_qp_data() -> QuadraticProgram<f64> {
    let Q = Matrix::identity(2);
    let c = vec![-2., -2.];
    let G = Matrix::identity(2);
    let h = vec![1., 1.];

    QuadraticProgram::new(Some(Q), c, Matrix::zeros((0, 2)), vec![], G, h).unwrap()
}

#[test]
fn test_qp_feasible() {
    let _ = env_logger::builder().is_test(true).try_init();

    let problem = basic_qp_data();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, Some(&[0., 0.][..]), settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Converged);

    let refsol = vec![1., 1.];
    assert!(solver.solution.x.norm_inf_diff(&refsol) <= 1e-6);

    // stationarity x + c + u = 0
    let refu = vec![1., 1.];
    assert!(solver.solution.u.norm_inf_diff(&refu) <= 1e-6);

    let refobj = -3.;
    assert!(f64::abs(solver.solution.obj_val - refobj) <= 1e-6);
    assert!(f64::abs(problem.objective(&solver.solution.x) - refobj) <= 1e-6);

    // slacks are h - Gx
    let mut slack = problem.h.clone();
    problem.G.gemv(&mut slack, &solver.solution.x, -1., 1.);
    assert!(solver.solution.y.norm_inf_diff(&slack) <= 1e-6);
}

#[test]
fn test_qp_inactive_constraints() {
    // the unconstrained minimizer x = 0.5 lies inside x ≤ 1
    let problem = QuadraticProgram::new(
        Some(Matrix::from(&[[2.]])),
        vec![-1.],
        Matrix::zeros((0, 1)),
        vec![],
        Matrix::from(&[[1.], [-1.]]),
        vec![1., 1.],
    )
    .unwrap();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, None, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Converged);
    assert!(f64::abs(solver.solution.x[0] - 0.5) <= 1e-6);
    assert!(solver.solution.u.norm_inf() <= 1e-6);
}

#[test]
fn test_qp_equality_only() {
    let _ = env_logger::builder().is_test(true).try_init();

    // minimize ½(x² + y²) subject to x + y = 1
    let problem = QuadraticProgram::new(
        Some(Matrix::identity(2)),
        vec![0., 0.],
        Matrix::from(&[[1., 1.]]),
        vec![1.],
        Matrix::zeros((0, 2)),
        vec![],
    )
    .unwrap();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, None, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Converged);
    assert!(solver.solution.x.norm_inf_diff(&[0.5, 0.5]) <= 1e-8);
    assert!(f64::abs(solver.solution.obj_val - 0.25) <= 1e-8);
    assert!(f64::abs(solver.solution.v[0] + 0.5) <= 1e-8);

    // a single direct solve, no interior point iterations
    assert_eq!(solver.solution.iterations, 0);
    assert_eq!(solver.solution.kkt_solves, 1);
    assert_eq!(solver.solution.kkt.factorizations, 1);
    assert!(solver.solution.y.is_empty());
    assert!(solver.solution.u.is_empty());
}

#[test]
fn test_lp_equality_only() {
    // minimize x1 + x2 subject to x1 = 1, x2 = 2
    let problem = QuadraticProgram::linear(
        vec![1., 1.],
        Matrix::identity(2),
        vec![1., 2.],
        Matrix::zeros((0, 2)),
        vec![],
    )
    .unwrap();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, None, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Converged);
    assert!(solver.solution.x.norm_inf_diff(&[1., 2.]) <= 1e-8);
    assert!(solver.solution.v.norm_inf_diff(&[-1., -1.]) <= 1e-8);
    assert!(f64::abs(solver.solution.obj_val - 3.) <= 1e-8);
    assert_eq!(solver.solution.kkt_solves, 1);
}

#[test]
fn test_qp_equality_and_inequality() {
    // minimize ½(x² + y²) subject to x + y = 1, x ≥ 0.8
    let problem = QuadraticProgram::new(
        Some(Matrix::identity(2)),
        vec![0., 0.],
        Matrix::from(&[[1., 1.]]),
        vec![1.],
        Matrix::from(&[[-1., 0.]]),
        vec![-0.8],
    )
    .unwrap();

    let settings = DefaultSettings::default();
    let mut solver = DefaultSolver::new(&problem, Some(&[0.9, 0.1][..]), settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Converged);
    assert!(solver.solution.x.norm_inf_diff(&[0.8, 0.2]) <= 1e-6);
    assert!(problem.feasible(&solver.solution.x, 1e-8));

    // x - u + v = 0 and y + v = 0
    assert!(f64::abs(solver.solution.v[0] + 0.2) <= 1e-6);
    assert!(f64::abs(solver.solution.u[0] - 0.6) <= 1e-6);
}
