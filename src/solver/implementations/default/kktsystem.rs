#![allow(non_snake_case)]
use super::*;
use crate::solver::core::{
    kktsolvers::{direct::*, *},
    traits::{KKTSystem, Settings},
};

use crate::algebra::*;

// Send is required so that solver objects can be moved
// between threads, one solve per thread.

type BoxedKKTSolver<T> = Box<dyn KKTSolver<T> + Send>;

/// Standard-form solver type implementing the [`KKTSystem`](crate::solver::core::traits::KKTSystem) trait
///
/// The inequality rows of the full Newton system are eliminated,
/// leaving the reduced system
///
/// ```text
/// [ Q + G'WG   A' ] [dx]   [rx - G'(ry - u⊙ru)/y]
/// [ A          0  ] [dv] = [rv                  ]
/// ```
///
/// with W = diag(u/y).  The slack and multiplier directions are then
/// recovered from `dx`.

pub struct DefaultKKTSystem<T> {
    kktsolver: BoxedKKTSolver<T>,

    // primal block Q + G'WG
    H: Matrix<T>,

    // rows of G scaled by the weights u/y
    GW: Matrix<T>,
    w: Vec<T>,

    // work vectors for assembling/disassembling vectors
    workx: Vec<T>,
    workm: Vec<T>,
}

impl<T> DefaultKKTSystem<T>
where
    T: FloatT,
{
    pub fn new(data: &DefaultProblemData<T>, settings: &DefaultSettings<T>) -> Self {
        let (n, m) = (data.n, data.m);

        //only a dense direct LDL solver is provided
        let kktsolver = Box::new(DirectLDLKKTSolver::<T>::new(&data.A, n, settings.core()));

        Self {
            kktsolver,
            H: Matrix::zeros((n, n)),
            GW: Matrix::zeros((m, n)),
            w: vec![T::zero(); m],
            workx: vec![T::zero(); n],
            workm: vec![T::zero(); m],
        }
    }
}

impl<T> KKTSystem<T> for DefaultKKTSystem<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;
    type SE = DefaultSettings<T>;

    fn update(
        &mut self,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        settings: &DefaultSettings<T>,
    ) -> bool {
        // H = Q
        match &data.Q {
            Some(Q) => {
                self.H.copy_from_slice(Q.data());
            }
            None => {
                self.H.data_mut().set(T::zero());
            }
        }

        // H += G'diag(u/y)G
        if data.m > 0 {
            for (w, (&u, &y)) in self.w.iter_mut().zip(variables.u.iter().zip(&variables.y)) {
                *w = u / y;
            }
            self.GW.copy_from_slice(data.G.data());
            self.GW.lscale(&self.w);

            let n = data.n;
            for j in 0..n {
                for i in 0..=j {
                    let hij = data.G.col_slice(i).dot(self.GW.col_slice(j));
                    self.H[(i, j)] += hij;
                    if i != j {
                        self.H[(j, i)] += hij;
                    }
                }
            }
        }

        self.kktsolver.update(&self.H, settings.core())
    }

    fn solve(
        &mut self,
        lhs: &mut DefaultVariables<T>,
        rhs: &DefaultVariables<T>,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        settings: &DefaultSettings<T>,
    ) -> bool {
        let (y, u) = (&variables.y, &variables.u);

        // workm = (ry - u⊙ru)/y
        for ((wk, (&ry, &ru)), (&yi, &ui)) in self
            .workm
            .iter_mut()
            .zip(rhs.y.iter().zip(&rhs.u))
            .zip(y.iter().zip(u))
        {
            *wk = (ry - ui * ru) / yi;
        }

        // workx = rx - G'workm
        self.workx.copy_from(&rhs.x);
        data.G.t().gemv(&mut self.workx, &self.workm, -T::one(), T::one());

        self.kktsolver.setrhs(&self.workx, &rhs.v);
        let is_success = self.kktsolver.solve(
            Some(&mut lhs.x),
            Some(&mut lhs.v),
            settings.core(),
        );
        if !is_success {
            return false;
        }

        // dy = ru - G dx
        lhs.y.copy_from(&rhs.u);
        data.G.gemv(&mut lhs.y, &lhs.x, -T::one(), T::one());

        // du = (ry - u⊙dy)/y
        for ((du, (&ry, &dy)), (&yi, &ui)) in lhs
            .u
            .iter_mut()
            .zip(rhs.y.iter().zip(&lhs.y))
            .zip(y.iter().zip(u))
        {
            *du = (ry - ui * dy) / yi;
        }

        lhs.x.is_finite() && lhs.y.is_finite() && lhs.u.is_finite() && lhs.v.is_finite()
    }

    fn solve_direct(
        &mut self,
        variables: &mut DefaultVariables<T>,
        data: &DefaultProblemData<T>,
        settings: &DefaultSettings<T>,
    ) -> bool {
        // [Q A'; A 0][x; v] = [-c; b]
        self.workx.scalarop_from(|c| -c, &data.c);
        self.kktsolver.setrhs(&self.workx, &data.b);

        self.kktsolver.solve(
            Some(&mut variables.x),
            Some(&mut variables.v),
            settings.core(),
        )
    }

    fn diagnostics(&self) -> KKTDiagnostics<T> {
        *self.kktsolver.diagnostics()
    }

    fn reset_diagnostics(&mut self) {
        self.kktsolver.reset_diagnostics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::core::traits::Variables;

    #[test]
    fn test_reduced_step_satisfies_newton_system() {
        let Q = Matrix::from(&[[2., 0.], [0., 1.]]);
        let A = Matrix::from(&[[1., 1.]]);
        let G = Matrix::from(&[[-1., 0.], [0., -1.], [1., 2.]]);
        let problem = QuadraticProgram::new(
            Some(Q.clone()),
            vec![1., -1.],
            A.clone(),
            vec![1.],
            G.clone(),
            vec![0., 0., 4.],
        )
        .unwrap();

        let settings = DefaultSettings::<f64> {
            equilibrate_enable: false,
            ..DefaultSettings::default()
        };
        let data = DefaultProblemData::new(&problem, Some(&[0.5, 0.5][..]), &settings);

        let mut vars = DefaultVariables::<f64>::new(2, 3, 1);
        assert!(vars.interior_start(&data));
        vars.v.copy_from(&[0.3]);

        let mut rhs = DefaultVariables::<f64>::new(2, 3, 1);
        rhs.x.copy_from(&[0.1, -0.2]);
        rhs.y.copy_from(&[0.5, 0.25, -0.3]);
        rhs.u.copy_from(&[0.2, 0.0, -0.1]);
        rhs.v.copy_from(&[0.4]);

        let mut lhs = DefaultVariables::<f64>::new(2, 3, 1);
        let mut kkt = DefaultKKTSystem::new(&data, &settings);
        assert!(kkt.update(&data, &vars, &settings));
        assert!(kkt.solve(&mut lhs, &rhs, &data, &vars, &settings));

        // Q dx + A'dv + G'du = rx
        let mut r = vec![0.; 2];
        Q.gemv(&mut r, &lhs.x, 1., 0.);
        A.t().gemv(&mut r, &lhs.v, 1., 1.);
        G.t().gemv(&mut r, &lhs.u, 1., 1.);
        assert!(r.norm_inf_diff(&rhs.x) < 1e-9);

        // A dx = rv
        let mut r = vec![0.; 1];
        A.gemv(&mut r, &lhs.x, 1., 0.);
        assert!(r.norm_inf_diff(&rhs.v) < 1e-9);

        // G dx + dy = ru
        let mut r = lhs.y.clone();
        G.gemv(&mut r, &lhs.x, 1., 1.);
        assert!(r.norm_inf_diff(&rhs.u) < 1e-9);

        // u⊙dy + y⊙du = ry
        for i in 0..3 {
            let ri = vars.u[i] * lhs.y[i] + vars.y[i] * lhs.u[i];
            assert!((ri - rhs.y[i]).abs() < 1e-9);
        }

        assert_eq!(kkt.diagnostics().solves, 1);
        assert_eq!(kkt.diagnostics().factorizations, 1);
    }
}
