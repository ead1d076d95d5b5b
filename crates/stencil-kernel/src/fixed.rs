//! Kernel made from an image

use stencil_core::{KernelImage, PixelBuffer, Result};

use crate::kernel_core::KernelCore;
use crate::traits::{private::KernelImpl, Kernel, KernelKind};

/// A kernel whose pixels are a stored image
///
/// It has no parameters and therefore never varies spatially.
#[derive(Debug, Clone)]
pub struct FixedKernel {
    core: KernelCore,
    image: KernelImage,
    sum: f64,
}

impl FixedKernel {
    /// Kernel with a copy of `image`'s pixels and the default center
    ///
    /// Fails with `EmptyKernel` for an image with no pixels.
    pub fn new(image: KernelImage) -> Result<Self> {
        let core = KernelCore::new(image.width(), image.height(), 0)?;
        let sum = image.sum();
        Ok(Self { core, image, sum })
    }

    /// Move the center; fails with `CenterOutOfBounds` outside the kernel
    pub fn with_center(mut self, ctr_x: usize, ctr_y: usize) -> Result<Self> {
        self.core = self.core.with_center(ctr_x, ctr_y)?;
        Ok(self)
    }

    /// The stored pixels
    pub fn image(&self) -> &KernelImage {
        &self.image
    }

    /// Sum of the stored pixels
    pub fn sum(&self) -> f64 {
        self.sum
    }
}

impl KernelImpl for FixedKernel {
    fn core(&self) -> &KernelCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut KernelCore {
        &mut self.core
    }

    fn apply_kernel_parameters(&mut self, _params: &[f64]) {}

    fn render(&self, pixels: &mut [f64]) -> Result<f64> {
        pixels.copy_from_slice(self.image.pixels());
        Ok(self.sum)
    }
}

impl Kernel for FixedKernel {
    fn kind(&self) -> KernelKind {
        KernelKind::Fixed
    }

    fn kernel_parameters(&self) -> Vec<f64> {
        Vec::new()
    }
}
