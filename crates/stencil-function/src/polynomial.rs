//! Ordinary polynomials in one and two variables
//!
//! Both are linear combinations of their coefficients, which is what lets a
//! linear-combination kernel with a polynomial spatial model be refactored.

use stencil_core::{InvalidArgument, Result};

use crate::traits::{Function, Function1, Function2};

/// `f(x) = c0 + c1 x + c2 x^2 + ...`
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFunction1 {
    params: Vec<f64>,
}

impl PolynomialFunction1 {
    /// Polynomial of the given order with all coefficients zero
    pub fn new(order: usize) -> Self {
        Self {
            params: vec![0.0; order + 1],
        }
    }

    /// Polynomial with the given coefficients, lowest order first
    pub fn from_coefficients(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(InvalidArgument::InvalidOrder { n_parameters: 0 }.into());
        }
        Ok(Self {
            params: coefficients,
        })
    }

    pub fn order(&self) -> usize {
        self.params.len() - 1
    }
}

impl Function for PolynomialFunction1 {
    fn name(&self) -> &'static str {
        "PolynomialFunction1"
    }

    fn parameters(&self) -> &[f64] {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }

    fn is_linear_combination(&self) -> bool {
        true
    }
}

impl Function1 for PolynomialFunction1 {
    fn eval_with(&self, params: &[f64], x: f64) -> f64 {
        // Horner's rule
        params.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    fn clone_box(&self) -> Box<dyn Function1> {
        Box::new(self.clone())
    }
}

/// Polynomial in x and y, terms ordered by total degree:
///
/// ```text
/// f(x, y) = c0
///         + c1 x + c2 y
///         + c3 x^2 + c4 x y + c5 y^2
///         + c6 x^3 + c7 x^2 y + c8 x y^2 + c9 y^3
///         + ...
/// ```
///
/// A polynomial of order `n` has `(n + 1)(n + 2) / 2` coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFunction2 {
    params: Vec<f64>,
    order: usize,
}

impl PolynomialFunction2 {
    /// Polynomial of the given order with all coefficients zero
    pub fn new(order: usize) -> Self {
        Self {
            params: vec![0.0; Self::n_parameters_from_order(order)],
            order,
        }
    }

    /// Polynomial with the given coefficients
    ///
    /// Fails with `InvalidOrder` unless the length is 1, 3, 6, 10, 15, ...
    pub fn from_coefficients(coefficients: Vec<f64>) -> Result<Self> {
        let order = Self::order_from_n_parameters(coefficients.len())?;
        Ok(Self {
            params: coefficients,
            order,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of coefficients of a polynomial of the given order
    pub fn n_parameters_from_order(order: usize) -> usize {
        (order + 1) * (order + 2) / 2
    }

    /// Order of a polynomial with `n_parameters` coefficients
    pub fn order_from_n_parameters(n_parameters: usize) -> Result<usize> {
        let estimate = ((-3.0 + (1.0 + 8.0 * n_parameters as f64).sqrt()) / 2.0).round();
        if n_parameters == 0 || estimate < 0.0 {
            return Err(InvalidArgument::InvalidOrder { n_parameters }.into());
        }
        let order = estimate as usize;
        if Self::n_parameters_from_order(order) != n_parameters {
            return Err(InvalidArgument::InvalidOrder { n_parameters }.into());
        }
        Ok(order)
    }
}

impl Function for PolynomialFunction2 {
    fn name(&self) -> &'static str {
        "PolynomialFunction2"
    }

    fn parameters(&self) -> &[f64] {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }

    fn is_linear_combination(&self) -> bool {
        true
    }
}

impl Function2 for PolynomialFunction2 {
    fn eval_with(&self, params: &[f64], x: f64, y: f64) -> f64 {
        let mut x_pows = Vec::with_capacity(self.order + 1);
        let mut y_pows = Vec::with_capacity(self.order + 1);
        let (mut xp, mut yp) = (1.0, 1.0);
        for _ in 0..=self.order {
            x_pows.push(xp);
            y_pows.push(yp);
            xp *= x;
            yp *= y;
        }

        let mut sum = 0.0;
        let mut index = 0;
        for degree in 0..=self.order {
            // x^(degree - k) y^k for k = 0..=degree
            for k in 0..=degree {
                sum += params[index] * x_pows[degree - k] * y_pows[k];
                index += 1;
            }
        }
        sum
    }

    fn clone_box(&self) -> Box<dyn Function2> {
        Box::new(self.clone())
    }
}
