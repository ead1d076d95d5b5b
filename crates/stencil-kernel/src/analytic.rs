//! Kernel described by a function of two variables

use stencil_core::Result;
use stencil_function::Function2;

use crate::kernel_core::KernelCore;
use crate::spatial::SpatialModel;
use crate::traits::{private::KernelImpl, Kernel, KernelKind};

/// A kernel whose pixels sample a [`Function2`]
///
/// The function is evaluated at the pixel offset from the kernel center:
/// `(-ctr_x, -ctr_y)` at the lower left pixel, `(0, 0)` at the center and
/// `(width - 1 - ctr_x, height - 1 - ctr_y)` at the upper right. Each pixel is
/// the value at the pixel center, not an average over the pixel area.
///
/// The kernel parameters are the function's parameters.
#[derive(Debug, Clone)]
pub struct AnalyticKernel {
    core: KernelCore,
    function: Box<dyn Function2>,
}

impl AnalyticKernel {
    /// Spatially invariant kernel
    pub fn new(width: usize, height: usize, function: Box<dyn Function2>) -> Result<Self> {
        let core = KernelCore::new(width, height, function.n_parameters())?;
        Ok(Self { core, function })
    }

    /// Spatially varying kernel with every spatial coefficient zero
    ///
    /// Fails with `NoKernelParameters` if `function` has no parameters.
    pub fn spatially_varying(
        width: usize,
        height: usize,
        function: Box<dyn Function2>,
        spatial_function: Box<dyn Function2>,
    ) -> Result<Self> {
        let n_params = function.n_parameters();
        let model = SpatialModel::new(spatial_function, n_params);
        let core = KernelCore::new(width, height, n_params)?.with_spatial_model(model)?;
        Ok(Self { core, function })
    }

    /// Spatially varying kernel with explicit spatial coefficients
    ///
    /// `coefficients` is indexed `[kernel parameter][spatial parameter]`.
    pub fn with_spatial_parameters(
        width: usize,
        height: usize,
        function: Box<dyn Function2>,
        spatial_function: Box<dyn Function2>,
        coefficients: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let n_params = function.n_parameters();
        let model = SpatialModel::with_coefficients(spatial_function, n_params, coefficients)?;
        let core = KernelCore::new(width, height, n_params)?.with_spatial_model(model)?;
        Ok(Self { core, function })
    }

    /// Move the center; fails with `CenterOutOfBounds` outside the kernel
    pub fn with_center(mut self, ctr_x: usize, ctr_y: usize) -> Result<Self> {
        self.core = self.core.with_center(ctr_x, ctr_y)?;
        Ok(self)
    }

    /// The kernel function, carrying the active parameters
    pub fn kernel_function(&self) -> &dyn Function2 {
        self.function.as_ref()
    }
}

impl KernelImpl for AnalyticKernel {
    fn core(&self) -> &KernelCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut KernelCore {
        &mut self.core
    }

    fn apply_kernel_parameters(&mut self, params: &[f64]) {
        self.function.parameters_mut().copy_from_slice(params);
    }

    fn render(&self, pixels: &mut [f64]) -> Result<f64> {
        let mut sum = 0.0;
        for (row, row_pixels) in pixels.chunks_exact_mut(self.core.width()).enumerate() {
            let y = self.core.y_offset(row);
            for (col, pixel) in row_pixels.iter_mut().enumerate() {
                let value = self.function.eval(self.core.x_offset(col), y);
                *pixel = value;
                sum += value;
            }
        }
        Ok(sum)
    }
}

impl Kernel for AnalyticKernel {
    fn kind(&self) -> KernelKind {
        KernelKind::Analytic
    }

    fn kernel_parameters(&self) -> Vec<f64> {
        self.function.parameters().to_vec()
    }
}
