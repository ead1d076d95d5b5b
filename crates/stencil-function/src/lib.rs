//! Parameterized functions for kernels and spatial models
//!
//! Functions are small functors whose parameters can be read and replaced.
//! They serve two roles:
//!
//! - **Kernel functions**: an analytic kernel samples a [`Function2`] at each
//!   pixel offset; a separable kernel samples two [`Function1`]s.
//! - **Spatial functions**: a spatially varying kernel computes each of its
//!   parameters at an image position with one [`Function2`] evaluated against a
//!   row of coefficients.
//!
//! # Library
//!
//! | Function | Parameters | Linear combination |
//! |----------|------------|--------------------|
//! | [`GaussianFunction1`] | sigma | no |
//! | [`GaussianFunction2`] | sigma1, sigma2, angle | no |
//! | [`DoubleGaussianFunction2`] | sigma1, sigma2, ampl2 | no |
//! | [`PolynomialFunction1`] | coefficients | yes |
//! | [`PolynomialFunction2`] | coefficients | yes |
//! | [`Chebyshev1Function1`] | coefficients | yes |
//! | [`IntegerDeltaFunction2`] | none | no |
//!
//! # Example
//!
//! ```rust
//! use stencil_function::{Function, Function2, PolynomialFunction2};
//!
//! // f(x, y) = 1 + 2x + 3y
//! let poly = PolynomialFunction2::from_coefficients(vec![1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(poly.eval(1.0, 1.0), 6.0);
//!
//! // Evaluate against another coefficient row without touching the function
//! assert_eq!(poly.eval_with(&[0.0, 1.0, 0.0], 4.0, 5.0), 4.0);
//! assert!(poly.is_linear_combination());
//! ```

pub mod chebyshev;
pub mod delta;
pub mod gaussian;
pub mod polynomial;
pub mod traits;

pub use chebyshev::Chebyshev1Function1;
pub use delta::IntegerDeltaFunction2;
pub use gaussian::{DoubleGaussianFunction2, GaussianFunction1, GaussianFunction2};
pub use polynomial::{PolynomialFunction1, PolynomialFunction2};
pub use traits::{Function, Function1, Function2};
