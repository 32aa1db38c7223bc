use crate::{
    algebra::*,
    solver::{core::SolverJSONReadWrite, DefaultSettings, DefaultSolver, QuadraticProgram},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// Everything needed to reproduce a solve, using only the
// data types provided by the user (i.e. no internal types).

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonProblemData<T: FloatT> {
    pub problem: QuadraticProgram<T>,
    pub x0: Option<Vec<T>>,
    pub settings: DefaultSettings<T>,
}

impl<T> SolverJSONReadWrite for DefaultSolver<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    fn save_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        // the starting point is held in scaled form
        let x0 = if self.data.m > 0 {
            let mut x0 = self.data.x0.clone();
            x0.hadamard(&self.data.equilibration.d);
            Some(x0)
        } else {
            None
        };

        let json_data = JsonProblemData {
            problem: self.data.problem.clone(),
            x0,
            settings: self.settings.clone(),
        };

        // write to file
        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    fn load_from_file(file: &mut File) -> Result<Self, io::Error> {
        // read file
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonProblemData<T> = serde_json::from_str(&buffer)?;

        // pass the problem back through the checked constructor
        let p = json_data.problem;
        let problem = QuadraticProgram::new(p.Q, p.c, p.A, p.b, p.G, p.h)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Self::new(&problem, json_data.x0.as_deref(), json_data.settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[test]
fn test_json_io() {
    use crate::solver::IPSolver;
    use std::io::{Seek, SeekFrom};

    let Q = Matrix::from(&[[2.0]]);
    let G = Matrix::from(&[[-1.0]]);
    let problem = QuadraticProgram::new(
        Some(Q),
        vec![1.0],
        Matrix::zeros((0, 1)),
        vec![],
        G,
        vec![2.0],
    )
    .unwrap();

    let settings = crate::solver::DefaultSettingsBuilder::default()
        .build()
        .unwrap();

    let mut solver = DefaultSolver::<f64>::new(&problem, Some(&[0.0][..]), settings).unwrap();
    solver.solve();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    solver.save_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut solver2 = DefaultSolver::<f64>::load_from_file(&mut file).unwrap();
    solver2.solve();
    assert_eq!(solver.solution.x, solver2.solution.x);
    assert_eq!(solver.solution.status, solver2.solution.status);
}
