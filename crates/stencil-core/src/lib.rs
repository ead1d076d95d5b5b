//! Core types shared by the stencil crates
//!
//! This crate provides the pieces every kernel and function crate leans on:
//!
//! - [`Error`] / [`Result`]: the closed set of contract violations
//! - [`Image`]: a row-major pixel buffer, and [`PixelBuffer`], the narrow
//!   boundary a kernel renders through
//! - [`NormalizationPolicy`]: how strictly a normalized kernel's sum is checked
//!
//! # Example
//!
//! ```rust
//! use stencil_core::{Image, NormalizationPolicy};
//!
//! let mut image = Image::from_vec(2, 2, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
//! let raw_sum = image.sum();
//! let sum = NormalizationPolicy::default().normalize(&mut image, raw_sum).unwrap();
//! assert_eq!(sum, 1.0);
//! assert_eq!(image[(0, 0)], 0.25);
//! ```

pub mod config;
pub mod error;
pub mod image;

pub use config::{NormalizationPolicy, Strictness, DEFAULT_NORMALIZATION_TOLERANCE};
pub use error::{Error, ErrorKind, InvalidArgument, Result};
pub use image::{Image, KernelImage, PixelBuffer};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
