//! Spatial model: kernel parameters as functions of image position
//!
//! One spatial function describes the variation of every kernel parameter;
//! each kernel parameter has its own row of coefficients for that function.
//! The coefficients are indexed `[kernel parameter][spatial parameter]`.

use stencil_core::{Error, Result};
use stencil_function::Function2;

/// A spatial function plus one coefficient row per kernel parameter
#[derive(Debug, Clone)]
pub struct SpatialModel {
    function: Box<dyn Function2>,
    coefficients: Vec<Vec<f64>>,
}

impl SpatialModel {
    /// Model for `n_kernel_parameters` parameters with every coefficient zero
    pub fn new(function: Box<dyn Function2>, n_kernel_parameters: usize) -> Self {
        let n_spatial = function.n_parameters();
        Self {
            function,
            coefficients: vec![vec![0.0; n_spatial]; n_kernel_parameters],
        }
    }

    /// Model with explicit coefficients for `n_kernel_parameters` parameters
    ///
    /// Fails with `DimensionMismatch` if the matrix is not
    /// `n_kernel_parameters x function.n_parameters()`.
    pub fn with_coefficients(
        function: Box<dyn Function2>,
        n_kernel_parameters: usize,
        coefficients: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let mut model = Self::new(function, n_kernel_parameters);
        model.set_coefficients(coefficients)?;
        Ok(model)
    }

    /// The spatial function; its own parameters are not used for evaluation
    pub fn function(&self) -> &dyn Function2 {
        self.function.as_ref()
    }

    pub fn coefficients(&self) -> &[Vec<f64>] {
        &self.coefficients
    }

    pub fn n_kernel_parameters(&self) -> usize {
        self.coefficients.len()
    }

    pub fn n_spatial_parameters(&self) -> usize {
        self.function.n_parameters()
    }

    /// Replace every coefficient row
    ///
    /// Fails with `DimensionMismatch` if the row count or any row length is
    /// wrong; the model is left unchanged on failure.
    pub fn set_coefficients(&mut self, coefficients: Vec<Vec<f64>>) -> Result<()> {
        let n_spatial = self.n_spatial_parameters();
        let expected = (self.coefficients.len(), n_spatial);
        if coefficients.len() != expected.0 {
            return Err(Error::dimension_mismatch(
                "spatial coefficients",
                expected,
                (coefficients.len(), coefficients.first().map_or(0, Vec::len)),
            ));
        }
        if let Some(row) = coefficients.iter().find(|row| row.len() != n_spatial) {
            return Err(Error::dimension_mismatch(
                "spatial coefficients",
                expected,
                (coefficients.len(), row.len()),
            ));
        }
        self.coefficients = coefficients;
        Ok(())
    }

    /// Kernel parameters at `(x, y)`
    pub fn evaluate(&self, x: f64, y: f64) -> Vec<f64> {
        self.coefficients
            .iter()
            .map(|row| self.function.eval_with(row, x, y))
            .collect()
    }

    /// Kernel parameters at `(x, y)`, written into `out`
    pub fn evaluate_into(&self, out: &mut [f64], x: f64, y: f64) -> Result<()> {
        Error::check_parameter_count("spatial model output", self.coefficients.len(), out.len())?;
        for (slot, row) in out.iter_mut().zip(&self.coefficients) {
            *slot = self.function.eval_with(row, x, y);
        }
        Ok(())
    }
}
