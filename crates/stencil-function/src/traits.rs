//! Core traits for parameterized functions
//!
//! A function owns a parameter vector that can be read and replaced, and is
//! evaluated either with its own parameters (`eval`) or with a borrowed
//! parameter slice (`eval_with`). The borrowed form is what spatial models use:
//! it lets one function be evaluated against many coefficient rows without
//! mutating it.

use std::fmt;
use stencil_core::{Error, Result};

/// Parameter access shared by all functions
pub trait Function: fmt::Debug + Send + Sync {
    /// Name of this function for logging and persistence
    fn name(&self) -> &'static str;

    /// Current parameters
    fn parameters(&self) -> &[f64];

    /// Mutable view of the current parameters (length is fixed)
    fn parameters_mut(&mut self) -> &mut [f64];

    /// Number of parameters
    fn n_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// One parameter, or `None` if `index` is out of range
    fn parameter(&self, index: usize) -> Option<f64> {
        self.parameters().get(index).copied()
    }

    /// Set one parameter
    fn set_parameter(&mut self, index: usize, value: f64) -> Result<()> {
        let n = self.n_parameters();
        match self.parameters_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::parameter_count("function parameter index", n, index + 1)),
        }
    }

    /// Replace all parameters
    ///
    /// Fails with `ParameterCountMismatch` if `params` has the wrong length.
    fn set_parameters(&mut self, params: &[f64]) -> Result<()> {
        Error::check_parameter_count("function parameters", self.n_parameters(), params.len())?;
        self.parameters_mut().copy_from_slice(params);
        Ok(())
    }

    /// True if the function is `sum_i params[i] * term_i(args)`
    fn is_linear_combination(&self) -> bool {
        false
    }
}

/// A function of one variable
pub trait Function1: Function {
    /// Evaluate with the given parameters
    ///
    /// `params` must have `n_parameters()` entries.
    fn eval_with(&self, params: &[f64], x: f64) -> f64;

    /// Evaluate with the current parameters
    fn eval(&self, x: f64) -> f64 {
        self.eval_with(self.parameters(), x)
    }

    /// Deep copy behind a box
    fn clone_box(&self) -> Box<dyn Function1>;
}

/// A function of two variables
pub trait Function2: Function {
    /// Evaluate with the given parameters
    ///
    /// `params` must have `n_parameters()` entries. Deterministic and free of
    /// side effects.
    fn eval_with(&self, params: &[f64], x: f64, y: f64) -> f64;

    /// Evaluate with the current parameters
    fn eval(&self, x: f64, y: f64) -> f64 {
        self.eval_with(self.parameters(), x, y)
    }

    /// Value of each term with a unit coefficient, for linear combinations
    fn basis_terms(&self, x: f64, y: f64) -> Option<Vec<f64>> {
        if !self.is_linear_combination() {
            return None;
        }
        let n = self.n_parameters();
        let mut unit = vec![0.0; n];
        let mut terms = Vec::with_capacity(n);
        for j in 0..n {
            unit[j] = 1.0;
            terms.push(self.eval_with(&unit, x, y));
            unit[j] = 0.0;
        }
        Some(terms)
    }

    /// Deep copy behind a box
    fn clone_box(&self) -> Box<dyn Function2>;
}

impl Clone for Box<dyn Function1> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl Clone for Box<dyn Function2> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
