//! Kernel with a single unit pixel

use stencil_core::{InvalidArgument, Result};

use crate::kernel_core::KernelCore;
use crate::traits::{private::KernelImpl, Kernel, KernelKind};

/// A kernel that is 1 at one pixel and 0 elsewhere
#[derive(Debug, Clone)]
pub struct DeltaFunctionKernel {
    core: KernelCore,
    pixel: (usize, usize),
}

impl DeltaFunctionKernel {
    /// Kernel of the given size that is 1 at pixel index `(x, y)`
    ///
    /// Fails with `PixelOutOfBounds` if the pixel is outside the kernel.
    pub fn new(width: usize, height: usize, (x, y): (usize, usize)) -> Result<Self> {
        let core = KernelCore::new(width, height, 0)?;
        if x >= width || y >= height {
            return Err(InvalidArgument::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            }
            .into());
        }
        Ok(Self {
            core,
            pixel: (x, y),
        })
    }

    /// Move the center; fails with `CenterOutOfBounds` outside the kernel
    pub fn with_center(mut self, ctr_x: usize, ctr_y: usize) -> Result<Self> {
        self.core = self.core.with_center(ctr_x, ctr_y)?;
        Ok(self)
    }

    /// Index of the unit pixel
    pub fn pixel(&self) -> (usize, usize) {
        self.pixel
    }
}

impl KernelImpl for DeltaFunctionKernel {
    fn core(&self) -> &KernelCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut KernelCore {
        &mut self.core
    }

    fn apply_kernel_parameters(&mut self, _params: &[f64]) {}

    fn render(&self, pixels: &mut [f64]) -> Result<f64> {
        let (x, y) = self.pixel;
        pixels.fill(0.0);
        pixels[y * self.core.width() + x] = 1.0;
        Ok(1.0)
    }
}

impl Kernel for DeltaFunctionKernel {
    fn kind(&self) -> KernelKind {
        KernelKind::DeltaFunction
    }

    fn kernel_parameters(&self) -> Vec<f64> {
        Vec::new()
    }
}
