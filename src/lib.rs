//! __ipqp__ is a primal-dual interior point solver for dense convex
//! quadratic and linear programs.  It solves problems of the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & \frac{1}{2}x^T Q x + c^T x\\\\\[2ex\]
//!  \text{subject to} & Ax = b \\\\\[1ex\]
//!         & Gx \le h
//!  \end{array}
//! $$
//!
//! with decision variables $x \in \mathbb{R}^n$ and data
//! $Q=Q^\top \succeq 0$ (optional),
//! $c \in \mathbb{R}^n$,
//! $A \in \mathbb{R}^{p \times n}$, $b \in \mathbb{R}^p$,
//! $G \in \mathbb{R}^{m \times n}$ and $h \in \mathbb{R}^m$.
//!
//! The solver uses a Mehrotra predictor-corrector scheme on the
//! slack formulation $Gx + y = h$, $y \ge 0$ with multipliers
//! $u \ge 0$ for the inequalities and $v$ for the equalities.
//! Linearly dependent equality rows are removed before solving and the
//! problem data is equilibrated for numerical conditioning.
//!
//! ## Example
//!
//! ```
//! use ipqp::algebra::*;
//! use ipqp::solver::*;
//!
//! // minimize x + y  subject to  x ≥ 0, y ≥ 0, x + y ≥ 1
//! let G = Matrix::from(&[
//!     [-1., 0.],
//!     [0., -1.],
//!     [-1., -1.],
//! ]);
//! let problem = QuadraticProgram::linear(
//!     vec![1., 1.],
//!     Matrix::zeros((0, 2)),
//!     vec![],
//!     G,
//!     vec![0., 0., -1.],
//! )
//! .unwrap();
//!
//! let settings = DefaultSettingsBuilder::default().build().unwrap();
//! let mut solver = DefaultSolver::new(&problem, Some(&[1., 1.][..]), settings).unwrap();
//! solver.solve();
//!
//! assert_eq!(solver.solution.status, SolverStatus::Converged);
//! assert!(f64::abs(solver.solution.obj_val - 1.) < 1e-6);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod solver;
pub mod timers;
