#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use ipqp::{algebra::*, solver::*};
    use std::io::{Seek, SeekFrom};

    // minimize x1² + x1 + x2² subject to x1 ≥ -2 and x2 = 1, stated twice
    let problem = QuadraticProgram::new(
        Some(Matrix::from(&[[2.0, 0.0], [0.0, 2.0]])),
        vec![1.0, 0.0],
        Matrix::from(&[[0.0, 1.0], [0.0, 2.0]]),
        vec![1.0, 2.0],
        Matrix::from(&[[-1.0, 0.0]]),
        vec![2.0],
    )
    .unwrap();

    let settings = DefaultSettingsBuilder::default()
        .max_iter(30)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::<f64>::new(&problem, Some(&[0.0, 0.0][..]), settings).unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Converged);

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    solver.save_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut solver2 = DefaultSolver::<f64>::load_from_file(&mut file).unwrap();
    assert_eq!(solver2.settings.max_iter, 30);

    solver2.solve();
    assert_eq!(solver.solution.status, solver2.solution.status);
    assert_eq!(solver.solution.v.len(), solver2.solution.v.len());
    assert!(solver.solution.x.norm_inf_diff(&solver2.solution.x) <= 1e-6);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_bad_data() {
    use ipqp::solver::*;
    use std::io::{Seek, SeekFrom, Write};

    // c and Q disagree in size, rejected on load
    let json = r#"{
        "problem": {
            "Q": {"m": 1, "n": 1, "data": [1.0]},
            "c": [1.0, 2.0],
            "A": {"m": 0, "n": 2, "data": []},
            "b": [],
            "G": {"m": 0, "n": 2, "data": []},
            "h": []
        },
        "x0": null,
        "settings": {}
    }"#;

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    assert!(DefaultSolver::<f64>::load_from_file(&mut file).is_err());
}
