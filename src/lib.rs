//! Spatially varying convolution kernels
//!
//! This crate re-exports the stencil workspace:
//!
//! - [`core`]: errors, the pixel buffer and normalization configuration
//! - [`function`]: parameterized functions of one and two variables
//! - [`kernel`]: the kernel variants and the [`Kernel`](kernel::Kernel) trait
//!
//! # Example
//!
//! ```rust
//! use stencil::prelude::*;
//!
//! // A 5x5 Gaussian whose width grows with x
//! let mut kernel = AnalyticKernel::with_spatial_parameters(
//!     5,
//!     5,
//!     Box::new(GaussianFunction2::circular(1.0)),
//!     Box::new(PolynomialFunction2::new(1)),
//!     vec![vec![1.0, 0.01, 0.0], vec![1.0, 0.01, 0.0], vec![0.0; 3]],
//! )?;
//!
//! let (image, sum) = kernel.make_image(true, 100.0, 0.0)?;
//! assert_eq!(sum, 1.0);
//! assert_eq!(kernel.current_kernel_parameters(), vec![2.0, 2.0, 0.0]);
//! assert_eq!(image.dimensions(), (5, 5));
//! # Ok::<(), stencil::core::Error>(())
//! ```

pub use stencil_core as core;
pub use stencil_function as function;
pub use stencil_kernel as kernel;

pub use stencil_core::{Error, ErrorKind, Image, InvalidArgument, KernelImage, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use stencil_core::{
        Error, Image, KernelImage, NormalizationPolicy, PixelBuffer, Result, Strictness,
    };

    // Functions
    pub use stencil_function::{
        Chebyshev1Function1, DoubleGaussianFunction2, Function, Function1, Function2,
        GaussianFunction1, GaussianFunction2, IntegerDeltaFunction2, PolynomialFunction1,
        PolynomialFunction2,
    };

    // Kernels
    pub use stencil_kernel::{
        format_kernel, AnalyticKernel, AnyKernel, DeltaFunctionKernel, FixedKernel, Kernel,
        KernelImagesForRegion, KernelKind, KernelRecord, LinearCombinationKernel, Location,
        PixelBox, SeparableKernel,
    };
}
