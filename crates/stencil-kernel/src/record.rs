//! Plain data records of kernels
//!
//! A [`KernelRecord`] holds what a persistence layer needs to describe a
//! kernel: its kind, geometry, active parameters, spatial coefficients and a
//! rendered image. Functions are recorded by name only, so any record
//! restores as a [`FixedKernel`] of the captured image.

use serde::{Deserialize, Serialize};
use stencil_core::{Image, Result};

use crate::fixed::FixedKernel;
use crate::traits::{Kernel, KernelKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelRecord {
    pub kind: KernelKind,
    pub width: usize,
    pub height: usize,
    pub ctr_x: usize,
    pub ctr_y: usize,
    /// Active kernel parameters after rendering `image`
    pub kernel_parameters: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_function: Option<String>,
    /// `[kernel parameter][spatial parameter]`; empty if spatially invariant
    #[serde(default)]
    pub spatial_parameters: Vec<Vec<f64>>,
    /// Position the image was rendered at
    pub position: (f64, f64),
    /// Unnormalized pixels, row-major with row 0 at the bottom
    pub image: Vec<f64>,
}

impl KernelRecord {
    /// Render `kernel` unnormalized at `(x, y)` and record it
    pub fn capture<K: Kernel + ?Sized>(kernel: &mut K, x: f64, y: f64) -> Result<Self> {
        let (image, _) = kernel.make_image(false, x, y)?;
        Ok(Self {
            kind: kernel.kind(),
            width: kernel.width(),
            height: kernel.height(),
            ctr_x: kernel.ctr_x(),
            ctr_y: kernel.ctr_y(),
            kernel_parameters: kernel.kernel_parameters(),
            spatial_function: kernel.spatial_function().map(|f| f.name().to_string()),
            spatial_parameters: kernel.spatial_parameters(),
            position: (x, y),
            image: image.into_vec(),
        })
    }

    pub fn is_spatially_varying(&self) -> bool {
        self.spatial_function.is_some()
    }

    /// Fixed kernel with the recorded image and center
    ///
    /// Fails with `DimensionMismatch` if the pixel count does not match the
    /// recorded size.
    pub fn to_fixed_kernel(&self) -> Result<FixedKernel> {
        let image = Image::from_vec(self.width, self.height, self.image.clone())?;
        FixedKernel::new(image)?.with_center(self.ctr_x, self.ctr_y)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
