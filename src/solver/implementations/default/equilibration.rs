#![allow(non_snake_case)]
use crate::algebra::*;

// ---------------
// equilibration data
// ---------------

/// Data from the Ruiz equilibration procedure
#[derive(Debug, Clone)]
pub struct DefaultEquilibrationData<T> {
    // scaling matrices for problem data equilibration
    // fields d,e,f and their inverses are vectors of scaling
    // values to be treated as diagonal scaling data
    /// Vector of variable scaling terms
    pub d: Vec<T>,
    /// Vector of inverse variable scaling terms
    pub dinv: Vec<T>,
    /// Vector of inequality constraint scaling terms
    pub e: Vec<T>,
    /// Vector of inverse inequality constraint scaling terms
    pub einv: Vec<T>,
    /// Vector of equality constraint scaling terms
    pub f: Vec<T>,
    /// Vector of inverse equality constraint scaling terms
    pub finv: Vec<T>,
    /// overall scaling for objective function
    pub c: T,
}

impl<T> DefaultEquilibrationData<T>
where
    T: FloatT,
{
    /// creates a new equilibration object with identity scaling
    pub fn new(n: usize, m: usize, p: usize) -> Self {
        Self {
            d: vec![T::one(); n],
            dinv: vec![T::one(); n],
            e: vec![T::one(); m],
            einv: vec![T::one(); m],
            f: vec![T::one(); p],
            finv: vec![T::one(); p],
            c: T::one(),
        }
    }

    /// update the inverse scaling data
    pub(crate) fn update_inverses(&mut self) {
        self.dinv.scalarop_from(T::recip, &self.d);
        self.einv.scalarop_from(T::recip, &self.e);
        self.finv.scalarop_from(T::recip, &self.f);
    }
}
