//! Row-major 2D pixel buffer
//!
//! `Image` is the buffer kernels render into. Row 0 is the bottom row and
//! column 0 the left column, so pixel `(x, y)` lives at `y * width + x`.

use num_traits::{Float, Zero};
use std::ops::{Index, IndexMut};
use std::slice;

use crate::error::{Error, Result};

/// Boundary contract for anything a kernel can render into
///
/// Only dimensions and row-major element access are required; storage is the
/// implementor's business.
pub trait PixelBuffer<T = f64> {
    /// Number of columns
    fn width(&self) -> usize;

    /// Number of rows
    fn height(&self) -> usize;

    /// All pixels in row-major order, bottom row first
    fn pixels(&self) -> &[T];

    /// Mutable pixels in row-major order, bottom row first
    fn pixels_mut(&mut self) -> &mut [T];

    /// `(width, height)`
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Fail with `DimensionMismatch` unless the buffer is `expected` in size
    fn check_dimensions(&self, context: &'static str, expected: (usize, usize)) -> Result<()> {
        let actual = self.dimensions();
        if actual != expected {
            return Err(Error::dimension_mismatch(context, expected, actual));
        }
        Ok(())
    }
}

/// Owned image with a fixed size
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T = f64> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
}

/// The pixel type kernels are rendered with
pub type KernelImage = Image<f64>;

impl<T> Image<T> {
    /// Wrap existing row-major pixels
    ///
    /// Fails with `DimensionMismatch` unless `pixels.len() == width * height`.
    pub fn from_vec(width: usize, height: usize, pixels: Vec<T>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::dimension_mismatch(
                "image pixel vector",
                (width * height, 1),
                (pixels.len(), 1),
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.width && y < self.height {
            self.pixels.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// Pixels of row `y`
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Rows, bottom row first
    pub fn rows(&self) -> slice::ChunksExact<'_, T> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.pixels.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.pixels.iter_mut()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.pixels
    }
}

impl<T: Copy + Zero> Image<T> {
    /// Image of the given size with every pixel zero
    pub fn new(width: usize, height: usize) -> Self {
        Self::new_filled(width, height, T::zero())
    }

    /// Image of the given size with every pixel `value`
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self {
            pixels: vec![value; width * height],
            width,
            height,
        }
    }

    pub fn fill(&mut self, value: T) {
        self.pixels.fill(value);
    }

    /// Sum of all pixels, accumulated in row-major order
    pub fn sum(&self) -> T {
        self.pixels.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    /// Copy pixels from an image of identical size
    pub fn copy_from(&mut self, other: &Self) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                "image copy",
                self.dimensions(),
                other.dimensions(),
            ));
        }
        self.pixels.copy_from_slice(&other.pixels);
        Ok(())
    }
}

impl<T: Float> Image<T> {
    /// Multiply every pixel by `factor`
    pub fn scale(&mut self, factor: T) {
        for v in &mut self.pixels {
            *v = *v * factor;
        }
    }

    /// Divide every pixel by `divisor`
    pub fn divide(&mut self, divisor: T) {
        for v in &mut self.pixels {
            *v = *v / divisor;
        }
    }

    /// `self += weight * other`, returning the sum of the updated pixels
    pub fn scaled_add(&mut self, weight: T, other: &Self) -> Result<T> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                "image accumulation",
                self.dimensions(),
                other.dimensions(),
            ));
        }
        let mut sum = T::zero();
        for (dst, &src) in self.pixels.iter_mut().zip(&other.pixels) {
            *dst = *dst + weight * src;
            sum = sum + *dst;
        }
        Ok(sum)
    }
}

impl<T> PixelBuffer<T> for Image<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[T] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }
}

impl<T> Index<(usize, usize)> for Image<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        debug_assert!(x < self.width && y < self.height);
        &self.pixels[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Image<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        debug_assert!(x < self.width && y < self.height);
        &mut self.pixels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_vec_checks_length() {
        let image = Image::from_vec(2, 3, vec![0.0; 6]).unwrap();
        assert_eq!(image.dimensions(), (2, 3));

        let err = Image::from_vec(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn test_row_major_indexing() {
        let image = Image::from_vec(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(image[(0, 0)], 0.0);
        assert_eq!(image[(2, 0)], 2.0);
        assert_eq!(image[(0, 1)], 3.0);
        assert_eq!(image.row(1), &[3.0, 4.0, 5.0]);
        assert_eq!(image.get(3, 0), None);
        assert_eq!(image.rows().count(), 2);
    }

    #[test]
    fn test_sum_and_scale() {
        let mut image: Image = Image::new_filled(2, 2, 0.5);
        assert_relative_eq!(image.sum(), 2.0);
        image.divide(2.0);
        assert_relative_eq!(image.sum(), 1.0);
        image.scale(4.0);
        assert_relative_eq!(image[(1, 1)], 1.0);
    }

    #[test]
    fn test_scaled_add() {
        let mut acc: Image = Image::new(2, 1);
        let a = Image::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
        let sum = acc.scaled_add(2.0, &a).unwrap();
        assert_relative_eq!(sum, 6.0);
        let sum = acc.scaled_add(-1.0, &a).unwrap();
        assert_relative_eq!(sum, 3.0);
        assert_eq!(acc.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0]);

        let wrong: Image = Image::new(1, 1);
        assert!(acc.scaled_add(1.0, &wrong).is_err());
    }

    #[test]
    fn test_check_dimensions() {
        let image: Image = Image::new(3, 4);
        assert!(image.check_dimensions("test", (3, 4)).is_ok());
        match image.check_dimensions("test", (4, 3)) {
            Err(Error::DimensionMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, (4, 3));
                assert_eq!(actual, (3, 4));
            }
            other => panic!("Wrong result: {other:?}"),
        }
    }
}
