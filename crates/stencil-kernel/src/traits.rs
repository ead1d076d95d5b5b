//! The kernel contract
//!
//! Every kernel variant shares one computation path:
//!
//! 1. check the output image against the kernel's dimensions
//! 2. if spatially varying, resolve the kernel parameters at `(x, y)` and make
//!    them the active parameters
//! 3. render the variant's pixels with the active parameters
//! 4. optionally normalize so the pixels sum to 1
//!
//! Step 2 mutates the kernel, so `compute_image` takes `&mut self`: one
//! kernel instance serves one caller at a time. Clone the kernel to render from
//! several threads.
//!
//! Any [`PixelBuffer`] of the kernel's size can be rendered into; pixels are
//! written in row-major order, bottom row first.

use serde::{Deserialize, Serialize};
use std::fmt;
use stencil_core::{Error, KernelImage, NormalizationPolicy, PixelBuffer, Result};
use stencil_function::Function2;
use tracing::trace;

/// The closed set of kernel variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    Fixed,
    Analytic,
    DeltaFunction,
    Separable,
    LinearCombination,
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fixed => "FixedKernel",
            Self::Analytic => "AnalyticKernel",
            Self::DeltaFunction => "DeltaFunctionKernel",
            Self::Separable => "SeparableKernel",
            Self::LinearCombination => "LinearCombinationKernel",
        };
        f.write_str(name)
    }
}

pub(crate) mod private {
    use stencil_core::Result;

    use crate::kernel_core::KernelCore;

    /// Variant hooks; not nameable outside the crate
    pub trait KernelImpl {
        fn core(&self) -> &KernelCore;

        fn core_mut(&mut self) -> &mut KernelCore;

        /// Make `params` the active parameters; the length is already checked
        fn apply_kernel_parameters(&mut self, params: &[f64]);

        /// Write the pixels for the active parameters and return their sum
        ///
        /// `pixels` is row-major, bottom row first, `width * height` long.
        fn render(&self, pixels: &mut [f64]) -> Result<f64>;
    }
}

/// A fixed-size 2D convolution stencil, possibly spatially varying
pub trait Kernel: private::KernelImpl + fmt::Debug + Send + Sync {
    fn kind(&self) -> KernelKind;

    /// The active kernel parameters
    ///
    /// For a spatially varying kernel these are the parameters resolved by the
    /// most recent `compute_image` call.
    fn kernel_parameters(&self) -> Vec<f64>;

    fn width(&self) -> usize {
        self.core().width()
    }

    fn height(&self) -> usize {
        self.core().height()
    }

    fn dimensions(&self) -> (usize, usize) {
        self.core().dimensions()
    }

    fn ctr_x(&self) -> usize {
        self.core().ctr_x()
    }

    fn ctr_y(&self) -> usize {
        self.core().ctr_y()
    }

    fn center(&self) -> (usize, usize) {
        self.core().center()
    }

    fn n_kernel_parameters(&self) -> usize {
        self.core().n_kernel_parameters()
    }

    /// Number of coefficients per kernel parameter, 0 if spatially invariant
    fn n_spatial_parameters(&self) -> usize {
        self.core()
            .spatial_model()
            .map_or(0, |model| model.n_spatial_parameters())
    }

    fn is_spatially_varying(&self) -> bool {
        self.core().spatial_model().is_some()
    }

    fn spatial_function(&self) -> Option<&dyn Function2> {
        self.core().spatial_model().map(|model| model.function())
    }

    /// Spatial coefficients `[kernel parameter][spatial parameter]`, empty if
    /// spatially invariant
    fn spatial_parameters(&self) -> Vec<Vec<f64>> {
        self.core()
            .spatial_model()
            .map_or_else(Vec::new, |model| model.coefficients().to_vec())
    }

    /// Alias of `kernel_parameters`, named for its use right after
    /// `compute_image`
    fn current_kernel_parameters(&self) -> Vec<f64> {
        self.kernel_parameters()
    }

    fn normalization_policy(&self) -> NormalizationPolicy {
        self.core().normalization_policy()
    }

    fn set_normalization_policy(&mut self, policy: NormalizationPolicy) {
        self.core_mut().set_normalization_policy(policy);
    }

    /// Set the parameters of a spatially invariant kernel
    ///
    /// Fails with `SpatiallyVarying` if a spatial model is attached and
    /// `ParameterCountMismatch` if `params` has the wrong length.
    fn set_kernel_parameters(&mut self, params: &[f64]) -> Result<()> {
        if self.is_spatially_varying() {
            return Err(Error::SpatiallyVarying {
                operation: "set kernel parameters",
            });
        }
        Error::check_parameter_count("kernel parameters", self.n_kernel_parameters(), params.len())?;
        self.apply_kernel_parameters(params);
        Ok(())
    }

    /// Set one parameter of a spatially invariant kernel
    ///
    /// Fails with `SpatiallyVarying` if a spatial model is attached and
    /// `ParameterCountMismatch` if `index` is out of range.
    fn set_kernel_parameter(&mut self, index: usize, value: f64) -> Result<()> {
        if self.is_spatially_varying() {
            return Err(Error::SpatiallyVarying {
                operation: "set kernel parameter",
            });
        }
        let n = self.n_kernel_parameters();
        if index >= n {
            return Err(Error::parameter_count("kernel parameter index", n, index + 1));
        }
        let mut params = self.kernel_parameters();
        params[index] = value;
        self.apply_kernel_parameters(&params);
        Ok(())
    }

    /// Replace the spatial coefficients
    ///
    /// Fails with `DimensionMismatch` if the kernel is spatially invariant or
    /// the matrix is not `n_kernel_parameters x n_spatial_parameters`.
    fn set_spatial_parameters(&mut self, coefficients: Vec<Vec<f64>>) -> Result<()> {
        let n_kernel = self.n_kernel_parameters();
        match self.core_mut().spatial_model_mut() {
            Some(model) => model.set_coefficients(coefficients),
            None => Err(Error::dimension_mismatch(
                "spatial coefficients",
                (n_kernel, 0),
                (coefficients.len(), coefficients.first().map_or(0, Vec::len)),
            )),
        }
    }

    /// Kernel parameters at `(x, y)` without changing the active parameters
    ///
    /// A spatially invariant kernel returns its active parameters.
    fn compute_kernel_parameters(&self, x: f64, y: f64) -> Vec<f64> {
        match self.core().spatial_model() {
            Some(model) => model.evaluate(x, y),
            None => self.kernel_parameters(),
        }
    }

    /// Render the kernel at image position `(x, y)` into `image`
    ///
    /// Returns the pixel sum: exactly 1 when `normalize` is set, the raw sum
    /// otherwise. `x` and `y` only matter for spatially varying kernels.
    /// Fails with `DimensionMismatch` if `image` is not `width x height`.
    fn compute_image<B>(&mut self, image: &mut B, normalize: bool, x: f64, y: f64) -> Result<f64>
    where
        B: PixelBuffer<f64> + ?Sized,
    {
        self.core().check_image(image)?;
        if let Some(params) = self.core_mut().resolve_spatial(x, y)? {
            trace!(x, y, ?params, "resolved spatial kernel parameters");
            self.apply_kernel_parameters(&params);
            self.core_mut().recycle(params);
        }
        let raw_sum = self.render(image.pixels_mut())?;
        self.core().finish(image, raw_sum, normalize)
    }

    /// Render into a new image
    fn make_image(&mut self, normalize: bool, x: f64, y: f64) -> Result<(KernelImage, f64)> {
        let (width, height) = self.dimensions();
        let mut image = KernelImage::new(width, height);
        let sum = self.compute_image(&mut image, normalize, x, y)?;
        Ok((image, sum))
    }
}
