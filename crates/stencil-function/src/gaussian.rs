//! Gaussian functions
//!
//! All Gaussians here are normalized to unit integral over the plane (or line),
//! which makes them natural point-spread-function models.

use std::f64::consts::PI;

use crate::traits::{Function, Function1, Function2};

/// 1D Gaussian: `exp(-x^2 / (2 sigma^2)) / (sqrt(2 pi) sigma)`
///
/// Parameters: `[sigma]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianFunction1 {
    params: Vec<f64>,
}

impl GaussianFunction1 {
    pub fn new(sigma: f64) -> Self {
        Self {
            params: vec![sigma],
        }
    }
}

impl Function for GaussianFunction1 {
    fn name(&self) -> &'static str {
        "GaussianFunction1"
    }

    fn parameters(&self) -> &[f64] {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }
}

impl Function1 for GaussianFunction1 {
    fn eval_with(&self, params: &[f64], x: f64) -> f64 {
        let sigma = params[0];
        let mult = 1.0 / ((2.0 * PI).sqrt() * sigma);
        mult * (-(x * x) / (2.0 * sigma * sigma)).exp()
    }

    fn clone_box(&self) -> Box<dyn Function1> {
        Box::new(self.clone())
    }
}

/// Rotated elliptical 2D Gaussian
///
/// Parameters: `[sigma1, sigma2, angle]`, where `sigma1` applies along the axis
/// at `angle` radians from x and `sigma2` along the perpendicular axis:
///
/// ```text
/// u = cos(angle) x + sin(angle) y
/// v = -sin(angle) x + cos(angle) y
/// f(x, y) = exp(-u^2 / 2 sigma1^2 - v^2 / 2 sigma2^2) / (2 pi sigma1 sigma2)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianFunction2 {
    params: Vec<f64>,
}

impl GaussianFunction2 {
    pub fn new(sigma1: f64, sigma2: f64, angle: f64) -> Self {
        Self {
            params: vec![sigma1, sigma2, angle],
        }
    }

    /// Circular Gaussian
    pub fn circular(sigma: f64) -> Self {
        Self::new(sigma, sigma, 0.0)
    }
}

impl Function for GaussianFunction2 {
    fn name(&self) -> &'static str {
        "GaussianFunction2"
    }

    fn parameters(&self) -> &[f64] {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }
}

impl Function2 for GaussianFunction2 {
    fn eval_with(&self, params: &[f64], x: f64, y: f64) -> f64 {
        let (sigma1, sigma2, angle) = (params[0], params[1], params[2]);
        let (sin_angle, cos_angle) = angle.sin_cos();
        let u = cos_angle * x + sin_angle * y;
        let v = -sin_angle * x + cos_angle * y;
        let mult = 1.0 / (2.0 * PI * sigma1 * sigma2);
        mult * (-(u * u) / (2.0 * sigma1 * sigma1) - (v * v) / (2.0 * sigma2 * sigma2)).exp()
    }

    fn clone_box(&self) -> Box<dyn Function2> {
        Box::new(self.clone())
    }
}

/// Sum of two concentric circular Gaussians
///
/// Parameters: `[sigma1, sigma2, ampl2]`:
///
/// ```text
/// f(r) = (exp(-r^2 / 2 sigma1^2) + ampl2 exp(-r^2 / 2 sigma2^2)) / (2 pi (sigma1^2 + ampl2 sigma2^2))
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleGaussianFunction2 {
    params: Vec<f64>,
}

impl DoubleGaussianFunction2 {
    pub fn new(sigma1: f64, sigma2: f64, ampl2: f64) -> Self {
        Self {
            params: vec![sigma1, sigma2, ampl2],
        }
    }
}

impl Function for DoubleGaussianFunction2 {
    fn name(&self) -> &'static str {
        "DoubleGaussianFunction2"
    }

    fn parameters(&self) -> &[f64] {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }
}

impl Function2 for DoubleGaussianFunction2 {
    fn eval_with(&self, params: &[f64], x: f64, y: f64) -> f64 {
        let (sigma1, sigma2, ampl2) = (params[0], params[1], params[2]);
        let r2 = x * x + y * y;
        let norm = 1.0 / (2.0 * PI * (sigma1 * sigma1 + ampl2 * sigma2 * sigma2));
        norm * ((-r2 / (2.0 * sigma1 * sigma1)).exp() + ampl2 * (-r2 / (2.0 * sigma2 * sigma2)).exp())
    }

    fn clone_box(&self) -> Box<dyn Function2> {
        Box::new(self.clone())
    }
}
