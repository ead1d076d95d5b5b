//! Kernel images at the corners and center of a pixel region
//!
//! Convolution code that varies the kernel smoothly over a region only needs
//! the kernel at a few reference points. [`KernelImagesForRegion`] renders
//! them on demand and keeps them.
//!
//! With the `parallel` feature, [`KernelImagesForRegion::compute_all`] renders
//! the missing locations on rayon, each on its own clone of the kernel.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use stencil_core::{InvalidArgument, KernelImage, Result};
use tracing::debug;

use crate::traits::Kernel;

/// An axis-aligned box of image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    x0: i64,
    y0: i64,
    width: usize,
    height: usize,
}

impl PixelBox {
    /// Box with lower left pixel `(x0, y0)`
    ///
    /// Fails with `EmptyRegion` if either extent is zero.
    pub fn new(x0: i64, y0: i64, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(InvalidArgument::EmptyRegion { width, height }.into());
        }
        Ok(Self {
            x0,
            y0,
            width,
            height,
        })
    }

    pub fn min(&self) -> (i64, i64) {
        (self.x0, self.y0)
    }

    /// Upper right pixel, inclusive
    pub fn max(&self) -> (i64, i64) {
        (
            self.x0 + self.width as i64 - 1,
            self.y0 + self.height as i64 - 1,
        )
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pixel position of a reference location
    ///
    /// The center rounds down for even extents.
    pub fn position(&self, location: Location) -> (i64, i64) {
        let (x1, y1) = self.max();
        match location {
            Location::BottomLeft => (self.x0, self.y0),
            Location::BottomRight => (x1, self.y0),
            Location::TopLeft => (self.x0, y1),
            Location::TopRight => (x1, y1),
            Location::Center => (
                self.x0 + (self.width as i64 - 1) / 2,
                self.y0 + (self.height as i64 - 1) / 2,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
    Center,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::BottomLeft,
        Location::BottomRight,
        Location::TopLeft,
        Location::TopRight,
        Location::Center,
    ];

    fn index(self) -> usize {
        match self {
            Location::BottomLeft => 0,
            Location::BottomRight => 1,
            Location::TopLeft => 2,
            Location::TopRight => 3,
            Location::Center => 4,
        }
    }
}

/// Lazily rendered kernel images for the reference locations of a region
#[derive(Debug, Clone)]
pub struct KernelImagesForRegion<K> {
    kernel: K,
    region: PixelBox,
    normalize: bool,
    images: [Option<KernelImage>; 5],
}

impl<K: Kernel + Clone> KernelImagesForRegion<K> {
    pub fn new(kernel: K, region: PixelBox, normalize: bool) -> Self {
        Self {
            kernel,
            region,
            normalize,
            images: Default::default(),
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn region(&self) -> PixelBox {
        self.region
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn is_computed(&self, location: Location) -> bool {
        self.images[location.index()].is_some()
    }

    /// Kernel image at `location`, rendered on first use
    pub fn image(&mut self, location: Location) -> Result<&KernelImage> {
        let slot = location.index();
        let image = match self.images[slot].take() {
            Some(image) => image,
            None => render(&mut self.kernel, self.region, self.normalize, location)?,
        };
        Ok(self.images[slot].insert(image))
    }

    /// Render every location that is not yet computed
    #[cfg(not(feature = "parallel"))]
    pub fn compute_all(&mut self) -> Result<()> {
        for location in Location::ALL {
            self.image(location)?;
        }
        Ok(())
    }

    /// Render every location that is not yet computed
    #[cfg(feature = "parallel")]
    pub fn compute_all(&mut self) -> Result<()> {
        let missing: Vec<Location> = Location::ALL
            .into_iter()
            .filter(|&location| !self.is_computed(location))
            .collect();
        debug!(n_missing = missing.len(), "rendering region kernel images in parallel");

        let rendered = missing
            .par_iter()
            .map(|&location| {
                let mut kernel = self.kernel.clone();
                render(&mut kernel, self.region, self.normalize, location).map(|image| (location, image))
            })
            .collect::<Result<Vec<_>>>()?;
        for (location, image) in rendered {
            self.images[location.index()] = Some(image);
        }
        Ok(())
    }
}

fn render<K: Kernel>(kernel: &mut K, region: PixelBox, normalize: bool, location: Location) -> Result<KernelImage> {
    let (x, y) = region.position(location);
    debug!(?location, x, y, "rendering kernel image for region");
    let (image, _) = kernel.make_image(normalize, x as f64, y as f64)?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::AnalyticKernel;
    use approx::assert_relative_eq;
    use stencil_core::Error;
    use stencil_function::{GaussianFunction2, PolynomialFunction2};

    fn spatial_gaussian() -> AnalyticKernel {
        let (min_sigma, max_sigma) = (0.1, 3.0);
        let slope = (max_sigma - min_sigma) / 100.0;
        AnalyticKernel::with_spatial_parameters(
            9,
            9,
            Box::new(GaussianFunction2::new(1.0, 1.0, 0.0)),
            Box::new(PolynomialFunction2::new(1)),
            vec![
                vec![min_sigma, slope, 0.0],
                vec![min_sigma, 0.0, slope],
                vec![0.0; 3],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_positions() {
        let region = PixelBox::new(10, 20, 50, 75).unwrap();
        assert_eq!(region.max(), (59, 94));
        assert_eq!(region.position(Location::BottomLeft), (10, 20));
        assert_eq!(region.position(Location::TopRight), (59, 94));
        assert_eq!(region.position(Location::Center), (34, 57));
        assert!(matches!(
            PixelBox::new(0, 0, 0, 5),
            Err(Error::InvalidArgument(InvalidArgument::EmptyRegion { .. }))
        ));
    }

    #[test]
    fn test_images_match_direct_rendering() {
        let region = PixelBox::new(10, 20, 50, 75).unwrap();
        let mut reference = spatial_gaussian();
        let mut images = KernelImagesForRegion::new(spatial_gaussian(), region, true);
        assert!(!images.is_computed(Location::Center));

        let center = images.image(Location::Center).unwrap().clone();
        assert_eq!(center.dimensions(), (9, 9));
        assert_relative_eq!(center.sum(), 1.0, epsilon = 1e-10);
        assert!(images.is_computed(Location::Center));

        images.compute_all().unwrap();
        for location in Location::ALL {
            let (x, y) = region.position(location);
            let (expected, _) = reference.make_image(true, x as f64, y as f64).unwrap();
            assert_eq!(images.image(location).unwrap(), &expected);
        }
    }
}
