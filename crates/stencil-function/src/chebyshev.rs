//! Chebyshev polynomials of the first kind

use stencil_core::{InvalidArgument, Result};

use crate::traits::{Function, Function1};

/// `f(x) = sum_i c_i T_i(x')` where `x'` maps `[min_x, max_x]` onto `[-1, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Chebyshev1Function1 {
    params: Vec<f64>,
    min_x: f64,
    max_x: f64,
    offset: f64,
    scale: f64,
}

impl Chebyshev1Function1 {
    /// Series with the given coefficients over `[min_x, max_x]`
    ///
    /// Fails with `InvalidOrder` for no coefficients and `InvalidRange` unless
    /// `min_x < max_x`.
    pub fn new(coefficients: Vec<f64>, min_x: f64, max_x: f64) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(InvalidArgument::InvalidOrder { n_parameters: 0 }.into());
        }
        if !(min_x < max_x) {
            return Err(InvalidArgument::InvalidRange {
                min: min_x,
                max: max_x,
            }
            .into());
        }
        Ok(Self {
            params: coefficients,
            min_x,
            max_x,
            offset: -(min_x + max_x) / 2.0,
            scale: 2.0 / (max_x - min_x),
        })
    }

    /// Series of the given order with all coefficients zero
    pub fn with_order(order: usize, min_x: f64, max_x: f64) -> Result<Self> {
        Self::new(vec![0.0; order + 1], min_x, max_x)
    }

    pub fn order(&self) -> usize {
        self.params.len() - 1
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }
}

impl Function for Chebyshev1Function1 {
    fn name(&self) -> &'static str {
        "Chebyshev1Function1"
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

impl Function1 for Chebyshev1Function1 {
    fn eval_with(&self, params: &[f64], x: f64) -> f64 {
        let xp = (x + self.offset) * self.scale;
        let mut t_prev = 1.0;
        let mut sum = params[0];
        if params.len() == 1 {
            return sum;
        }
        let mut t_curr = xp;
        sum += params[1] * t_curr;
        for &c in &params[2..] {
            let t_next = 2.0 * xp * t_curr - t_prev;
            sum += c * t_next;
            t_prev = t_curr;
            t_curr = t_next;
        }
        sum
    }

    fn clone_box(&self) -> Box<dyn Function1> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_low_order_terms() {
        let cheb = Chebyshev1Function1::with_order(3, -1.0, 1.0).unwrap();
        for &x in &[-1.0, -0.3, 0.0, 0.6, 1.0] {
            assert_relative_eq!(cheb.eval_with(&[1.0, 0.0, 0.0, 0.0], x), 1.0);
            assert_relative_eq!(cheb.eval_with(&[0.0, 1.0, 0.0, 0.0], x), x);
            assert_relative_eq!(
                cheb.eval_with(&[0.0, 0.0, 1.0, 0.0], x),
                2.0 * x * x - 1.0,
                epsilon = 1e-14
            );
            assert_relative_eq!(
                cheb.eval_with(&[0.0, 0.0, 0.0, 1.0], x),
                4.0 * x * x * x - 3.0 * x,
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_range_mapping() {
        let cheb = Chebyshev1Function1::new(vec![0.0, 1.0], 10.0, 20.0).unwrap();
        assert_relative_eq!(cheb.eval(10.0), -1.0);
        assert_relative_eq!(cheb.eval(15.0), 0.0);
        assert_relative_eq!(cheb.eval(20.0), 1.0);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(Chebyshev1Function1::new(vec![], 0.0, 1.0).is_err());
        assert!(Chebyshev1Function1::new(vec![1.0], 1.0, 1.0).is_err());
        assert!(Chebyshev1Function1::new(vec![1.0], 2.0, 1.0).is_err());
        assert!(Chebyshev1Function1::new(vec![1.0], f64::NAN, 1.0).is_err());
    }
}
