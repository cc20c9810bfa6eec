//! Curve configuration.
//!
//! Describes the strategies of a curve by name so they can be kept in TOML
//! files and resolved through [`crate::fitting::registry`].
//!
//! ```toml
//! name = "discount"
//!
//! [fitting]
//! type = "interpolation"
//! method = "LogLinear"
//! left_extrapolation = "Constant"
//! right_extrapolation = "Linear"
//! ```

use crate::curves::GridPointCurve;
use crate::fitting::registry::{
    extrapolation_by_name, interpolation_by_name, parametrization_by_name,
};
use crate::fitting::{BuildingDirection, CurveStrategies};
use crate::types::{CurveError, GridPointLabel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interior strategy and, for interpolations, the two extrapolations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FittingConfig {
    /// Interpolation with left and right extrapolation
    Interpolation {
        /// Interpolation name, e.g. `"Linear"`
        method: String,
        /// Extrapolation below the first grid point
        #[serde(default = "default_extrapolation")]
        left_extrapolation: String,
        /// Extrapolation above the last grid point
        #[serde(default = "default_extrapolation")]
        right_extrapolation: String,
    },
    /// Parametrization over the whole real line
    Parametrization {
        /// Parametrization name, e.g. `"PolynomialLeastSquares"`
        method: String,
        /// Polynomial degree
        #[serde(default = "default_degree")]
        degree: usize,
    },
}

fn default_extrapolation() -> String {
    "Constant".to_string()
}

fn default_degree() -> usize {
    1
}

impl Default for FittingConfig {
    fn default() -> Self {
        FittingConfig::Interpolation {
            method: "Linear".to_string(),
            left_extrapolation: default_extrapolation(),
            right_extrapolation: default_extrapolation(),
        }
    }
}

/// Named curve configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Optional curve name, only used in log output
    #[serde(default)]
    pub name: Option<String>,

    /// Strategies of the curve
    #[serde(default)]
    pub fitting: FittingConfig,
}

impl CurveConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// * `CurveError::Config` - malformed document
    ///
    /// # Example
    ///
    /// ```
    /// use curve_core::config::CurveConfig;
    ///
    /// let config = CurveConfig::from_toml_str(
    ///     r#"
    ///     [fitting]
    ///     type = "parametrization"
    ///     method = "PolynomialLeastSquares"
    ///     degree = 2
    ///     "#,
    /// )
    /// .unwrap();
    /// assert!(config.strategies().unwrap().is_parametrized());
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, CurveError> {
        toml::from_str(content).map_err(|e| CurveError::Config(e.to_string()))
    }

    /// Load a TOML file.
    ///
    /// # Errors
    ///
    /// * `CurveError::Config` - unreadable file or malformed document
    pub fn load(path: &Path) -> Result<Self, CurveError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CurveError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// * `CurveError::Config` - serialization failure
    pub fn to_toml_string(&self) -> Result<String, CurveError> {
        toml::to_string(self).map_err(|e| CurveError::Config(e.to_string()))
    }

    /// Resolve the configured names into a validated strategy bundle.
    ///
    /// # Errors
    ///
    /// * `CurveError::Configuration` - unknown name or invalid combination
    pub fn strategies(&self) -> Result<CurveStrategies, CurveError> {
        match &self.fitting {
            FittingConfig::Interpolation {
                method,
                left_extrapolation,
                right_extrapolation,
            } => CurveStrategies::new(
                interpolation_by_name(method)?,
                extrapolation_by_name(left_extrapolation, BuildingDirection::FromFirstGridPoint)?,
                extrapolation_by_name(right_extrapolation, BuildingDirection::FromLastGridPoint)?,
            ),
            FittingConfig::Parametrization { method, degree } => {
                CurveStrategies::parametrized(parametrization_by_name(method, *degree)?)
            }
        }
    }

    /// Build an empty curve with the configured strategies.
    ///
    /// # Errors
    ///
    /// * see [`strategies`](Self::strategies)
    pub fn build_curve<L: GridPointLabel>(&self) -> Result<GridPointCurve<L>, CurveError> {
        let strategies = self.strategies()?;
        tracing::debug!(
            name = self.name.as_deref().unwrap_or("<unnamed>"),
            fitting = strategies.fitting().name(),
            "building curve from config"
        );
        Ok(GridPointCurve::new(strategies))
    }
}
