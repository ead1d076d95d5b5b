//! Error types for kernel computation
//!
//! Provides a unified error type for all stencil crates. Contract violations
//! carry structured context (offending index, expected vs actual shape) rather
//! than pre-formatted messages so callers can branch on them.

use thiserror::Error;

/// Core error type for kernel and function operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A buffer or coefficient matrix has the wrong shape
    #[error("Dimension mismatch in {context}: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        context: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// An argument violates a construction-time contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// A parameter vector has the wrong length
    #[error("Parameter count mismatch in {context}: expected {expected}, got {actual}")]
    ParameterCountMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The operation is only valid for spatially invariant kernels
    #[error("Cannot {operation}: kernel is spatially varying")]
    SpatiallyVarying { operation: &'static str },

    /// A normalized kernel does not sum to 1 (strict normalization only)
    #[error("Normalized kernel sums to {sum}, which deviates from 1 by more than {tolerance}")]
    NormalizationOutOfTolerance { sum: f64, tolerance: f64 },
}

/// Reasons an argument is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidArgument {
    #[error("basis kernel list is empty")]
    EmptyBasis,

    #[error("basis kernel {index} is {}x{}, basis kernel 0 is {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    BasisSize {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("basis kernel {index} has center {actual:?}, basis kernel 0 has center {expected:?}")]
    BasisCenter {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("basis kernel {index} is spatially varying")]
    SpatiallyVaryingBasis { index: usize },

    #[error("kernel dimensions must be positive, got {width}x{height}")]
    EmptyKernel { width: usize, height: usize },

    #[error("center ({ctr_x}, {ctr_y}) lies outside a {width}x{height} kernel")]
    CenterOutOfBounds {
        ctr_x: usize,
        ctr_y: usize,
        width: usize,
        height: usize,
    },

    #[error("pixel ({x}, {y}) lies outside a {width}x{height} kernel")]
    PixelOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("pixel region must be non-empty, got {width}x{height}")]
    EmptyRegion { width: usize, height: usize },

    #[error("a kernel without parameters cannot vary spatially")]
    NoKernelParameters,

    #[error("{n_parameters} parameters do not describe a polynomial of integer order")]
    InvalidOrder { n_parameters: usize },

    #[error("range [{min}, {max}] is empty")]
    InvalidRange { min: f64, max: f64 },

    #[error("spatial function {name} is not a linear combination of its parameters")]
    NotLinearCombination { name: &'static str },
}

impl InvalidArgument {
    /// Index of the offending basis kernel, if the rejection concerns one
    pub fn basis_index(&self) -> Option<usize> {
        match self {
            Self::BasisSize { index, .. }
            | Self::BasisCenter { index, .. }
            | Self::SpatiallyVaryingBasis { index } => Some(*index),
            _ => None,
        }
    }
}

/// Fieldless error category, for callers that only branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DimensionMismatch,
    InvalidArgument,
    ParameterCountMismatch,
    SpatiallyVarying,
    NormalizationOutOfTolerance,
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::ParameterCountMismatch { .. } => ErrorKind::ParameterCountMismatch,
            Self::SpatiallyVarying { .. } => ErrorKind::SpatiallyVarying,
            Self::NormalizationOutOfTolerance { .. } => ErrorKind::NormalizationOutOfTolerance,
        }
    }

    /// Create an error for a shape mismatch
    pub fn dimension_mismatch(
        context: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }

    /// Create an error for a parameter vector of the wrong length
    pub fn parameter_count(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::ParameterCountMismatch {
            context,
            expected,
            actual,
        }
    }

    /// Check a parameter vector length
    pub fn check_parameter_count(
        context: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<()> {
        if expected != actual {
            return Err(Self::parameter_count(context, expected, actual));
        }
        Ok(())
    }

    /// Index of the offending basis kernel, if any
    pub fn basis_index(&self) -> Option<usize> {
        match self {
            Self::InvalidArgument(arg) => arg.basis_index(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::dimension_mismatch("kernel image", (3, 3), (4, 3));
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in kernel image: expected 3x3, got 4x3"
        );

        let err = Error::parameter_count("kernel parameters", 2, 3);
        assert_eq!(
            err.to_string(),
            "Parameter count mismatch in kernel parameters: expected 2, got 3"
        );

        let err = Error::SpatiallyVarying {
            operation: "set kernel parameters",
        };
        assert_eq!(
            err.to_string(),
            "Cannot set kernel parameters: kernel is spatially varying"
        );

        let err: Error = InvalidArgument::EmptyBasis.into();
        assert_eq!(err.to_string(), "Invalid argument: basis kernel list is empty");
    }

    #[test]
    fn test_basis_index() {
        let err: Error = InvalidArgument::BasisSize {
            index: 2,
            expected: (3, 3),
            actual: (5, 5),
        }
        .into();
        assert_eq!(err.basis_index(), Some(2));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            err.to_string(),
            "Invalid argument: basis kernel 2 is 5x5, basis kernel 0 is 3x3"
        );

        let err: Error = InvalidArgument::SpatiallyVaryingBasis { index: 1 }.into();
        assert_eq!(err.basis_index(), Some(1));

        let err: Error = InvalidArgument::EmptyBasis.into();
        assert_eq!(err.basis_index(), None);
        assert_eq!(Error::parameter_count("x", 1, 2).basis_index(), None);
    }

    #[test]
    fn test_check_parameter_count() {
        assert!(Error::check_parameter_count("params", 3, 3).is_ok());
        match Error::check_parameter_count("params", 3, 1) {
            Err(Error::ParameterCountMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 1);
            }
            other => panic!("Wrong result: {other:?}"),
        }
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        let errors = [
            Error::dimension_mismatch("image", (1, 1), (2, 2)),
            InvalidArgument::NoKernelParameters.into(),
            Error::parameter_count("params", 1, 2),
            Error::SpatiallyVarying { operation: "x" },
            Error::NormalizationOutOfTolerance {
                sum: 0.5,
                tolerance: 1e-5,
            },
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(Error::kind).collect();
        assert_eq!(kinds.len(), errors.len());
    }
}
