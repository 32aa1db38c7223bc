use crate::solver::core::traits::Settings;
use crate::{algebra::*, solver::core::SettingsError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Standard-form solver type implementing the [`Settings`](crate::solver::core::traits::Settings) trait

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefaultSettings<T: FloatT> {
    ///maximum number of iterations
    #[builder(default = "100")]
    pub max_iter: u32,

    ///maximum number of backtracking steps per line search
    #[builder(default = "50")]
    pub max_lsearch_iter: u32,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///primal, dual and complementarity tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub tol: T,

    ///fraction-to-boundary factor for the combined step
    #[builder(default = "(0.999).as_T()")]
    pub s0: T,

    ///line search backtracking factor
    #[builder(default = "(0.9).as_T()")]
    pub beta: T,

    ///line search sufficient decrease factor
    #[builder(default = "(1e-6).as_T()")]
    pub alpha: T,

    ///enable data equilibration pre-scaling
    #[builder(default = "true")]
    pub equilibrate_enable: bool,

    /// maximum equilibration scaling iterations
    #[builder(default = "10")]
    pub equilibrate_max_iter: u32,

    ///minimum equilibration scaling allowed
    #[builder(default = "(1e-4).as_T()")]
    pub equilibrate_min_scaling: T,

    ///maximum equilibration scaling allowed
    #[builder(default = "(1e+4).as_T()")]
    pub equilibrate_max_scaling: T,

    ///enable removal of dependent equality constraints
    #[builder(default = "true")]
    pub presolve_enable: bool,

    ///relative pivot tolerance for detecting dependent equality rows
    #[builder(default = "(1e-10).as_T()")]
    pub presolve_rank_tol: T,

    ///tolerance for accepting a dependent row's right hand side
    #[builder(default = "(1e-9).as_T()")]
    pub presolve_consistency_tol: T,

    ///enable KKT static regularization
    #[builder(default = "true")]
    pub static_regularization_enable: bool,

    ///KKT static regularization parameter
    #[builder(default = "(1e-8).as_T()")]
    pub static_regularization_constant: T,

    ///additional regularization parameter w.r.t. the maximum abs diagonal term
    #[builder(default = "T::epsilon()*T::epsilon()")]
    pub static_regularization_proportional: T,

    ///enable KKT dynamic regularization
    #[builder(default = "true")]
    pub dynamic_regularization_enable: bool,

    ///KKT dynamic regularization threshold
    #[builder(default = "(1e-13).as_T()")]
    pub dynamic_regularization_eps: T,

    ///KKT dynamic regularization shift
    #[builder(default = "(2e-7).as_T()")]
    pub dynamic_regularization_delta: T,

    ///KKT direct solve with iterative refinement
    #[builder(default = "true")]
    pub iterative_refinement_enable: bool,

    ///iterative refinement relative tolerance
    #[builder(default = "(1e-13).as_T()")]
    pub iterative_refinement_reltol: T,

    ///iterative refinement absolute tolerance
    #[builder(default = "(1e-12).as_T()")]
    pub iterative_refinement_abstol: T,

    ///iterative refinement maximum iterations
    #[builder(default = "10")]
    pub iterative_refinement_max_iter: u32,

    ///iterative refinement stalling tolerance
    #[builder(default = "(5.0).as_T()")]
    pub iterative_refinement_stop_ratio: T,

    ///smallest reciprocal condition estimate accepted from a KKT factorization
    #[builder(default = "T::epsilon()*T::epsilon()")]
    pub kkt_min_rcond: T,
}

impl<T> Default for DefaultSettings<T>
where
    T: FloatT,
{
    fn default() -> DefaultSettings<T> {
        DefaultSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> Settings<T> for DefaultSettings<T>
where
    T: FloatT,
{
    //NB: CoreSettings is typedef'd to DefaultSettings
    fn core(&self) -> &DefaultSettings<T> {
        self
    }
    fn core_mut(&mut self) -> &mut DefaultSettings<T> {
        self
    }

    /// Checks that numerical parameters lie within their legal ranges.
    fn validate(&self) -> Result<(), SettingsError> {
        validate_positive(self.tol, "tol")?;
        validate_open_closed(self.s0, "s0")?;
        validate_open(self.beta, "beta")?;
        validate_open(self.alpha, "alpha")?;
        validate_positive(self.equilibrate_min_scaling, "equilibrate_min_scaling")?;
        validate_positive(self.equilibrate_max_scaling, "equilibrate_max_scaling")?;
        validate_positive(self.presolve_rank_tol, "presolve_rank_tol")?;
        validate_positive(self.presolve_consistency_tol, "presolve_consistency_tol")?;
        validate_scaling_bounds(self.equilibrate_min_scaling, self.equilibrate_max_scaling)?;
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for DefaultSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        DefaultSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> DefaultSettingsBuilder<T>
where
    T: FloatT,
{
    /// check any explicitly set numerical fields
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(tol) = self.tol {
            validate_positive(tol, "tol")?;
        }
        if let Some(s0) = self.s0 {
            validate_open_closed(s0, "s0")?;
        }
        if let Some(beta) = self.beta {
            validate_open(beta, "beta")?;
        }
        if let Some(alpha) = self.alpha {
            validate_open(alpha, "alpha")?;
        }
        if let Some(tol) = self.presolve_rank_tol {
            validate_positive(tol, "presolve_rank_tol")?;
        }
        if let Some(tol) = self.presolve_consistency_tol {
            validate_positive(tol, "presolve_consistency_tol")?;
        }
        if let (Some(min), Some(max)) = (self.equilibrate_min_scaling, self.equilibrate_max_scaling)
        {
            validate_scaling_bounds(min, max)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_positive<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v > T::zero() && v.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

// v ∈ (0,1)
fn validate_open<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v > T::zero() && v < T::one() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

// v ∈ (0,1]
fn validate_open_closed<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v > T::zero() && v <= T::one() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

fn validate_scaling_bounds<T: FloatT>(min: T, max: T) -> Result<(), SettingsError> {
    if min <= max {
        Ok(())
    } else {
        Err(SettingsError::InconsistentFields(
            "equilibrate_min_scaling",
            "equilibrate_max_scaling",
        ))
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    DefaultSettingsBuilder::<f64>::default().build().unwrap();

    // fail on out of range values
    assert!(DefaultSettingsBuilder::<f64>::default()
        .tol(0.0)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .beta(1.0)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .s0(1.0)
        .alpha(0.5)
        .build()
        .is_ok());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .equilibrate_min_scaling(10.0)
        .equilibrate_max_scaling(1.0)
        .build()
        .is_err());

    // directly construct a bad DefaultSettings and manually check
    let settings = DefaultSettings::<f64> {
        s0: 1.5,
        ..DefaultSettings::default()
    };
    assert_eq!(settings.validate(), Err(SettingsError::BadFieldValue("s0")));
}
