//! State shared by every kernel variant
//!
//! Geometry is fixed at construction. The center defaults to
//! `((width - 1) / 2, (height - 1) / 2)`: centered for odd sizes and shifted
//! half a pixel towards 0 for even sizes.

use stencil_core::{Error, InvalidArgument, NormalizationPolicy, PixelBuffer, Result};

use crate::spatial::SpatialModel;

/// Dimensions, center, parameter count, optional spatial model and
/// normalization policy of a kernel
#[derive(Debug, Clone)]
pub struct KernelCore {
    width: usize,
    height: usize,
    ctr_x: usize,
    ctr_y: usize,
    n_kernel_parameters: usize,
    spatial: Option<SpatialModel>,
    policy: NormalizationPolicy,
    // reused by every spatial resolution
    resolved: Vec<f64>,
}

impl KernelCore {
    /// Spatially invariant core with the default center
    ///
    /// Fails with `EmptyKernel` if either dimension is zero.
    pub(crate) fn new(width: usize, height: usize, n_kernel_parameters: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(InvalidArgument::EmptyKernel { width, height }.into());
        }
        Ok(Self {
            width,
            height,
            ctr_x: (width - 1) / 2,
            ctr_y: (height - 1) / 2,
            n_kernel_parameters,
            spatial: None,
            policy: NormalizationPolicy::default(),
            resolved: Vec::new(),
        })
    }

    pub(crate) fn with_center(mut self, ctr_x: usize, ctr_y: usize) -> Result<Self> {
        if ctr_x >= self.width || ctr_y >= self.height {
            return Err(InvalidArgument::CenterOutOfBounds {
                ctr_x,
                ctr_y,
                width: self.width,
                height: self.height,
            }
            .into());
        }
        self.ctr_x = ctr_x;
        self.ctr_y = ctr_y;
        Ok(self)
    }

    /// Attach a spatial model
    ///
    /// Fails with `NoKernelParameters` for a parameterless kernel and
    /// `DimensionMismatch` if the model has the wrong number of rows.
    pub(crate) fn with_spatial_model(mut self, model: SpatialModel) -> Result<Self> {
        if self.n_kernel_parameters == 0 {
            return Err(InvalidArgument::NoKernelParameters.into());
        }
        if model.n_kernel_parameters() != self.n_kernel_parameters {
            return Err(Error::dimension_mismatch(
                "spatial coefficients",
                (self.n_kernel_parameters, model.n_spatial_parameters()),
                (model.n_kernel_parameters(), model.n_spatial_parameters()),
            ));
        }
        self.spatial = Some(model);
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn ctr_x(&self) -> usize {
        self.ctr_x
    }

    pub fn ctr_y(&self) -> usize {
        self.ctr_y
    }

    pub fn center(&self) -> (usize, usize) {
        (self.ctr_x, self.ctr_y)
    }

    pub fn n_kernel_parameters(&self) -> usize {
        self.n_kernel_parameters
    }

    pub fn spatial_model(&self) -> Option<&SpatialModel> {
        self.spatial.as_ref()
    }

    pub(crate) fn spatial_model_mut(&mut self) -> Option<&mut SpatialModel> {
        self.spatial.as_mut()
    }

    pub fn normalization_policy(&self) -> NormalizationPolicy {
        self.policy
    }

    pub(crate) fn set_normalization_policy(&mut self, policy: NormalizationPolicy) {
        self.policy = policy;
    }

    /// Fail with `DimensionMismatch` unless `image` matches the kernel
    ///
    /// The pixel slice must also hold exactly `width * height` values.
    pub fn check_image<B: PixelBuffer<f64> + ?Sized>(&self, image: &B) -> Result<()> {
        image.check_dimensions("kernel image", self.dimensions())?;
        let n_pixels = image.pixels().len();
        if n_pixels != self.width * self.height {
            return Err(Error::dimension_mismatch(
                "kernel image pixels",
                (self.width * self.height, 1),
                (n_pixels, 1),
            ));
        }
        Ok(())
    }

    /// Resolve the spatial model at `(x, y)`
    ///
    /// Returns `None` for a spatially invariant kernel. The returned vector
    /// should go back through [`recycle`](Self::recycle) once applied.
    pub(crate) fn resolve_spatial(&mut self, x: f64, y: f64) -> Result<Option<Vec<f64>>> {
        let Some(model) = self.spatial.as_ref() else {
            return Ok(None);
        };
        let mut params = std::mem::take(&mut self.resolved);
        params.resize(self.n_kernel_parameters, 0.0);
        model.evaluate_into(&mut params, x, y)?;
        Ok(Some(params))
    }

    pub(crate) fn recycle(&mut self, params: Vec<f64>) {
        self.resolved = params;
    }

    /// Offset of column `col` from the center column
    #[inline]
    pub(crate) fn x_offset(&self, col: usize) -> f64 {
        col as f64 - self.ctr_x as f64
    }

    /// Offset of row `row` from the center row
    #[inline]
    pub(crate) fn y_offset(&self, row: usize) -> f64 {
        row as f64 - self.ctr_y as f64
    }

    /// Apply optional normalization to a freshly rendered image
    pub(crate) fn finish<B>(&self, image: &mut B, raw_sum: f64, normalize: bool) -> Result<f64>
    where
        B: PixelBuffer<f64> + ?Sized,
    {
        if normalize {
            self.policy.normalize(image, raw_sum)
        } else {
            Ok(raw_sum)
        }
    }
}
