#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use crate::solver::core::kktsolvers::{KKTDiagnostics, KKTSolver};
use crate::solver::core::CoreSettings;

// -------------------------------------
// KKTSolver using direct LDL factorisation
// -------------------------------------

pub struct DirectLDLKKTSolver<T: FloatT> {
    // problem dimensions
    n: usize,
    p: usize,

    // Left and right hand sides for solves
    x: Vec<T>,
    b: Vec<T>,

    // internal workspace for IR scheme
    work1: Vec<T>,
    work2: Vec<T>,

    // the expected signs of D in KKT = LDL^T
    dsigns: Vec<i8>,

    // unregularized KKT matrix
    KKT: Matrix<T>,

    // the direct linear LDL solver
    ldlsolver: LDLFactorization<T>,

    diagnostics: KKTDiagnostics<T>,
}

impl<T> DirectLDLKKTSolver<T>
where
    T: FloatT,
{
    pub fn new(A: &Matrix<T>, n: usize, settings: &CoreSettings<T>) -> Self {
        let p = A.m;

        // LHS/RHS/work for iterative refinement
        let x = vec![T::zero(); n + p];
        let b = vec![T::zero(); n + p];
        let work1 = vec![T::zero(); n + p];
        let work2 = vec![T::zero(); n + p];

        // the expected signs of D in LDL
        let mut dsigns = vec![1_i8; n + p];
        fill_signs(&mut dsigns, n);

        let KKT = assemble_kkt_matrix(A, n);

        let ldlopts = LDLSettings {
            Dsigns: Some(dsigns.clone()),
            regularize_enable: settings.dynamic_regularization_enable,
            regularize_eps: settings.dynamic_regularization_eps,
            regularize_delta: settings.dynamic_regularization_delta,
        };
        let ldlsolver = LDLFactorization::new(n + p, Some(ldlopts));

        Self {
            n,
            p,
            x,
            b,
            work1,
            work2,
            dsigns,
            KKT,
            ldlsolver,
            diagnostics: KKTDiagnostics::default(),
        }
    }
}

impl<T> KKTSolver<T> for DirectLDLKKTSolver<T>
where
    T: FloatT,
{
    fn update(&mut self, H: &Matrix<T>, settings: &CoreSettings<T>) -> bool {
        update_primal_block(&mut self.KKT, H);
        self.regularize_and_refactor(settings)
    }

    fn setrhs(&mut self, rhsx: &[T], rhsv: &[T]) {
        let (n, p) = (self.n, self.p);
        self.b[0..n].copy_from(rhsx);
        self.b[n..(n + p)].copy_from(rhsv);
    }

    fn solve(
        &mut self,
        lhsx: Option<&mut [T]>,
        lhsv: Option<&mut [T]>,
        settings: &CoreSettings<T>,
    ) -> bool {
        self.diagnostics.solves += 1;

        if !self.diagnostics.valid {
            return false;
        }

        self.x.copy_from(&self.b);
        self.ldlsolver.solve(&mut self.x);

        let is_success = {
            if settings.iterative_refinement_enable {
                self.iterative_refinement(settings)
            } else {
                self.diagnostics.refine_error =
                    _get_refine_error(&mut self.work1, &self.b, &self.KKT, &self.x);
                self.x.is_finite()
            }
        };

        if is_success {
            self.getlhs(lhsx, lhsv);
        }

        is_success
    }

    fn diagnostics(&self) -> &KKTDiagnostics<T> {
        &self.diagnostics
    }

    fn reset_diagnostics(&mut self) {
        self.diagnostics = KKTDiagnostics::default();
    }
}

impl<T> DirectLDLKKTSolver<T>
where
    T: FloatT,
{
    // extra helper functions, not required for KKTSolver trait
    fn getlhs(&self, lhsx: Option<&mut [T]>, lhsv: Option<&mut [T]>) {
        let x = &self.x;
        let (n, p) = (self.n, self.p);

        if let Some(v) = lhsx {
            v.copy_from(&x[0..n]);
        }
        if let Some(v) = lhsv {
            v.copy_from(&x[n..(n + p)]);
        }
    }

    fn regularize_and_refactor(&mut self, settings: &CoreSettings<T>) -> bool {
        let KKT = &mut self.KKT;
        let dsigns = &self.dsigns;

        let mut eps = T::zero();
        if settings.static_regularization_enable {
            let maxdiag = (0..KKT.n).fold(T::zero(), |acc, i| T::max(acc, T::abs(KKT[(i, i)])));
            eps = settings.static_regularization_constant
                + settings.static_regularization_proportional * maxdiag;
            offset_diagonal(KKT, eps, dsigns);
        }

        //refactor with new data
        let result = self.ldlsolver.factor(KKT);

        if settings.static_regularization_enable {
            // put our internal copy of the KKT matrix back the way
            // it was, since it is needed unregularized for the IR scheme
            offset_diagonal(KKT, -eps, dsigns);
        }

        let diag = &mut self.diagnostics;
        diag.factorizations += 1;
        diag.static_regularizer = eps;

        if let Err(e) = result {
            log::warn!("KKT factorization failed: {}", e);
            diag.valid = false;
            diag.rcond = T::nan();
            return false;
        }

        diag.rcond = self.ldlsolver.rcond();
        diag.positive = self.ldlsolver.positive_inertia();
        diag.negative = self.ldlsolver.negative_inertia();
        diag.regularized = self.ldlsolver.regularize_count();
        diag.valid = diag.rcond.is_finite() && diag.rcond >= settings.kkt_min_rcond;

        if !diag.valid {
            log::warn!(
                "KKT factorization rejected with rcond = {:e}",
                diag.rcond
            );
        } else if diag.positive != self.n || diag.negative != self.p {
            log::debug!(
                "KKT inertia ({}, {}) differs from expected ({}, {})",
                diag.positive,
                diag.negative,
                self.n,
                self.p
            );
        }

        diag.valid
    }

    fn iterative_refinement(&mut self, settings: &CoreSettings<T>) -> bool {
        let (x, b) = (&mut self.x, &self.b);
        let (e, dx) = (&mut self.work1, &mut self.work2);

        // iterative refinement params
        let reltol = settings.iterative_refinement_reltol;
        let abstol = settings.iterative_refinement_abstol;
        let maxiter = settings.iterative_refinement_max_iter;
        let stopratio = settings.iterative_refinement_stop_ratio;

        let K = &self.KKT;
        let normb = b.norm_inf();

        //compute the initial error
        let mut norme = _get_refine_error(e, b, K, x);

        for _ in 0..maxiter {
            // bail on numerical error
            if !norme.is_finite() {
                self.diagnostics.refine_error = norme;
                return false;
            }

            if norme <= (abstol + reltol * normb) {
                //within tolerance.  Exit
                break;
            }

            let lastnorme = norme;

            //make a refinement
            dx.copy_from(e);
            self.ldlsolver.solve(dx);

            //prospective solution is x + dx.  Use dx space to
            // hold it for a check before applying to x
            dx.axpby(T::one(), x, T::one()); //now dx is really x + dx
            norme = _get_refine_error(e, b, K, dx);

            let improved_ratio = lastnorme / norme;
            if improved_ratio < stopratio {
                //insufficient improvement.  Exit
                if improved_ratio > T::one() {
                    //swap instead of copying to x
                    std::mem::swap(x, dx);
                } else {
                    norme = lastnorme;
                }
                break;
            } else {
                //swap instead of copying to x
                std::mem::swap(x, dx);
            }
        }

        self.diagnostics.refine_error = norme;
        norme.is_finite() && x.is_finite()
    }
}

//  computes e = b - Kξ, overwriting the first argument
//  and returning its norm

fn _get_refine_error<T: FloatT>(e: &mut [T], b: &[T], K: &Matrix<T>, ξ: &[T]) -> T {
    e.copy_from(b);
    K.gemv(e, ξ, -T::one(), T::one()); //#  e = b - Kξ

    e.norm_inf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::DefaultSettings;

    #[test]
    fn test_direct_ldl_kkt_solve() {
        // [I  A'; A 0] with A = [1 1]
        let settings = DefaultSettings::<f64>::default();
        let A = Matrix::from(&[[1., 1.]]);
        let mut kkt = DirectLDLKKTSolver::new(&A, 2, &settings);

        assert!(kkt.update(&Matrix::identity(2), &settings));
        kkt.setrhs(&[0., 0.], &[1.]);

        let mut x = vec![0.; 2];
        let mut v = vec![0.; 1];
        assert!(kkt.solve(Some(&mut x), Some(&mut v), &settings));
        assert!(x.norm_inf_diff(&[0.5, 0.5]) < 1e-10);
        assert!(v.norm_inf_diff(&[-0.5]) < 1e-10);

        let diag = kkt.diagnostics();
        assert_eq!(diag.positive, 2);
        assert_eq!(diag.negative, 1);
        assert_eq!(diag.solves, 1);
        assert!(diag.refine_error < 1e-10);
    }

    #[test]
    fn test_direct_ldl_kkt_rejects_bad_factor() {
        let settings = DefaultSettings::<f64> {
            kkt_min_rcond: 0.5,
            ..DefaultSettings::default()
        };
        let A = Matrix::<f64>::zeros((0, 2));
        let mut kkt = DirectLDLKKTSolver::new(&A, 2, &settings);

        let H = Matrix::from(&[[1., 0.], [0., 1e-3]]);
        assert!(!kkt.update(&H, &settings));
        kkt.setrhs(&[1., 1.], &[]);
        assert!(!kkt.solve(None, None, &settings));
        assert!(!kkt.diagnostics().valid);
    }
}
