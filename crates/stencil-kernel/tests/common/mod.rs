//! Shared utilities for kernel integration tests

#![allow(dead_code)]

#[allow(unused_imports)]
pub use approx::assert_relative_eq;

use stencil_core::KernelImage;
use stencil_function::{Function, Function2, GaussianFunction2};
use stencil_kernel::{AnalyticKernel, AnyKernel, DeltaFunctionKernel};

pub const EPSILON: f64 = 1e-12;

/// Cross-shaped stencil: 4 at the center, 1 at the four neighbours
///
/// ```text
/// 0 1 0
/// 1 4 1
/// 0 1 0
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrossStencil {
    params: Vec<f64>,
}

impl Function for CrossStencil {
    fn name(&self) -> &'static str {
        "CrossStencil"
    }

    fn parameters(&self) -> &[f64] {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }
}

impl Function2 for CrossStencil {
    fn eval_with(&self, _params: &[f64], x: f64, y: f64) -> f64 {
        match (x as i64, y as i64) {
            (0, 0) => 4.0,
            (0, 1) | (0, -1) | (1, 0) | (-1, 0) => 1.0,
            _ => 0.0,
        }
    }

    fn clone_box(&self) -> Box<dyn Function2> {
        Box::new(self.clone())
    }
}

/// One delta function kernel per pixel, row by row from the bottom
pub fn delta_basis(width: usize, height: usize) -> Vec<AnyKernel> {
    let mut basis = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let kernel = DeltaFunctionKernel::new(width, height, (x, y)).expect("pixel in bounds");
            basis.push(kernel.into());
        }
    }
    basis
}

/// Analytic Gaussian kernels, one per `(sigma1, sigma2, angle)`
pub fn gaussian_basis(width: usize, height: usize, params: &[(f64, f64, f64)]) -> Vec<AnyKernel> {
    params
        .iter()
        .map(|&(s1, s2, angle)| {
            let function = Box::new(GaussianFunction2::new(s1, s2, angle));
            AnalyticKernel::new(width, height, function)
                .expect("valid kernel size")
                .into()
        })
        .collect()
}

/// Spatial coefficient rows `[k + 1.0, k + 1.1, ...]` for kernel parameter `k`
pub fn ramp_coefficients(n_kernel: usize, n_spatial: usize) -> Vec<Vec<f64>> {
    (0..n_kernel)
        .map(|k| (0..n_spatial).map(|s| k as f64 + 1.0 + 0.1 * s as f64).collect())
        .collect()
}

/// Assert two images have the same shape and pixels within relative tolerance
pub fn assert_images_close(actual: &KernelImage, expected: &KernelImage, context: &str) {
    assert_eq!(
        actual.dimensions(),
        expected.dimensions(),
        "dimension mismatch for {}",
        context
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let tolerance = EPSILON * e.abs().max(1.0);
        assert!(
            (a - e).abs() <= tolerance,
            "{}: pixel {} is {} but expected {}",
            context,
            i,
            a,
            e
        );
    }
}
