//! Configuration for kernel normalization

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::image::PixelBuffer;

/// Default allowed deviation of a normalized kernel's sum from 1
pub const DEFAULT_NORMALIZATION_TOLERANCE: f64 = 1.0e-5;

/// What to do when a normalized kernel does not sum to 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Log a warning and keep the image
    #[default]
    Warn,
    /// Fail with `NormalizationOutOfTolerance`
    Error,
}

/// Sanity check applied after a kernel image is normalized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationPolicy {
    /// Allowed `|sum - 1|`
    pub tolerance: f64,
    pub strictness: Strictness,
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_NORMALIZATION_TOLERANCE,
            strictness: Strictness::Warn,
        }
    }
}

impl NormalizationPolicy {
    /// Warn-only policy at the default tolerance
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Failing policy at the default tolerance
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Error,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Parse a policy from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check the sum of an image that has just been normalized
    ///
    /// A NaN sum (normalizing an all-zero kernel) always counts as a deviation.
    pub fn check(&self, normalized_sum: f64) -> Result<()> {
        let deviation = (normalized_sum - 1.0).abs();
        if deviation <= self.tolerance {
            return Ok(());
        }
        match self.strictness {
            Strictness::Warn => {
                warn!(
                    sum = normalized_sum,
                    tolerance = self.tolerance,
                    "normalized kernel does not sum to 1"
                );
                Ok(())
            }
            Strictness::Error => Err(Error::NormalizationOutOfTolerance {
                sum: normalized_sum,
                tolerance: self.tolerance,
            }),
        }
    }

    /// Divide `image` by `raw_sum`, check the result and return the reported sum
    ///
    /// The reported sum is exactly 1 whatever the rounding of the division.
    pub fn normalize<B>(&self, image: &mut B, raw_sum: f64) -> Result<f64>
    where
        B: PixelBuffer<f64> + ?Sized,
    {
        let mut sum = 0.0;
        for value in image.pixels_mut() {
            *value /= raw_sum;
            sum += *value;
        }
        self.check(sum)?;
        Ok(1.0)
    }
}
