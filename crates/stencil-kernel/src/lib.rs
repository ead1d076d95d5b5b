//! Spatially varying convolution kernels
//!
//! A kernel is a fixed-size 2D stencil with a center pixel. Kernels may be
//! parameterized, and a parameterized kernel may be *spatially varying*: a
//! spatial function turns image position into kernel parameters each time the
//! kernel is rendered.
//!
//! # Variants
//!
//! | Kernel | Parameters | Pixels |
//! |--------|------------|--------|
//! | [`FixedKernel`] | none | a stored image |
//! | [`DeltaFunctionKernel`] | none | 1 at one pixel, 0 elsewhere |
//! | [`AnalyticKernel`] | the function's | a [`Function2`](stencil_function::Function2) sampled at pixel offsets |
//! | [`SeparableKernel`] | column then row function's | outer product of two [`Function1`](stencil_function::Function1)s |
//! | [`LinearCombinationKernel`] | one weight per basis kernel | weighted sum of cached basis images |
//!
//! All variants implement [`Kernel`]; [`AnyKernel`] holds any of them by
//! value.
//!
//! # Rendering
//!
//! [`Kernel::compute_image`] takes `&mut self` because a spatially varying
//! kernel stores the parameters it resolved for the last position. Clone the
//! kernel to render from several threads at once.
//!
//! # Example
//!
//! ```rust
//! use stencil_kernel::{AnyKernel, FixedKernel, Kernel, LinearCombinationKernel};
//! use stencil_core::Image;
//!
//! let two = FixedKernel::new(Image::new_filled(1, 1, 2.0)).unwrap();
//! let three = FixedKernel::new(Image::new_filled(1, 1, 3.0)).unwrap();
//! let basis: Vec<AnyKernel> = vec![two.into(), three.into()];
//!
//! let mut kernel = LinearCombinationKernel::new(basis, vec![1.0, 1.0]).unwrap();
//! let (image, sum) = kernel.make_image(false, 0.0, 0.0).unwrap();
//! assert_eq!(image[(0, 0)], 5.0);
//! assert_eq!(sum, 5.0);
//! ```

pub mod analytic;
pub mod delta;
pub mod fixed;
pub mod format;
mod kernel_core;
pub mod linear_combination;
pub mod record;
pub mod region;
pub mod separable;
pub mod spatial;
pub mod traits;
pub mod variant;

pub use analytic::AnalyticKernel;
pub use delta::DeltaFunctionKernel;
pub use fixed::FixedKernel;
pub use format::format_kernel;
pub use kernel_core::KernelCore;
pub use linear_combination::LinearCombinationKernel;
pub use record::KernelRecord;
pub use region::{KernelImagesForRegion, Location, PixelBox};
pub use separable::{SeparableKernel, SeparableVectors};
pub use spatial::SpatialModel;
pub use traits::{Kernel, KernelKind};
pub use variant::AnyKernel;
