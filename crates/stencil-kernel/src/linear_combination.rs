//! Weighted sum of basis kernels
//!
//! A [`LinearCombinationKernel`] renders `sum_i weight_i * basis_image_i`.
//! The weights are its kernel parameters, so a spatial model on the weights
//! gives a spatially varying kernel whose basis never has to be re-rendered.
//!
//! # Basis rules
//!
//! | Rule                                  | Error on violation      |
//! |---------------------------------------|-------------------------|
//! | at least one basis kernel             | `EmptyBasis`            |
//! | all share the size of basis kernel 0  | `BasisSize { index }`   |
//! | all share the center of basis kernel 0| `BasisCenter { index }` |
//! | none is spatially varying             | `SpatiallyVaryingBasis { index }` |
//!
//! Each basis kernel is rendered once, unnormalized, when the combination is
//! built. The cached images are never touched again; a different basis means
//! a new kernel.

use stencil_core::{Error, InvalidArgument, KernelImage, PixelBuffer, Result};
use stencil_function::Function2;
use tracing::{debug, instrument};

use crate::fixed::FixedKernel;
use crate::kernel_core::KernelCore;
use crate::spatial::SpatialModel;
use crate::traits::{private::KernelImpl, Kernel, KernelKind};
use crate::variant::AnyKernel;

/// A kernel that is a linear combination of fixed basis kernels
#[derive(Debug, Clone)]
pub struct LinearCombinationKernel {
    core: KernelCore,
    basis: Vec<AnyKernel>,
    basis_images: Vec<KernelImage>,
    weights: Vec<f64>,
}

impl LinearCombinationKernel {
    /// Spatially invariant combination with the given weights
    ///
    /// The basis list is validated first, so a bad basis is reported as
    /// `InvalidArgument` even when the weights are also wrong. Fails with
    /// `ParameterCountMismatch` unless there is one weight per basis kernel.
    pub fn new(basis: Vec<AnyKernel>, weights: Vec<f64>) -> Result<Self> {
        Self::check_kernel_list(&basis)?;
        Error::check_parameter_count("linear combination weights", basis.len(), weights.len())?;
        Self::build(basis, weights, None)
    }

    /// Spatially varying combination with every spatial coefficient zero
    pub fn spatially_varying(basis: Vec<AnyKernel>, spatial_function: Box<dyn Function2>) -> Result<Self> {
        let model = SpatialModel::new(spatial_function, basis.len());
        let weights = vec![0.0; basis.len()];
        Self::build(basis, weights, Some(model))
    }

    /// Spatially varying combination with coefficients indexed
    /// `[basis kernel][spatial parameter]`
    pub fn with_spatial_parameters(
        basis: Vec<AnyKernel>,
        spatial_function: Box<dyn Function2>,
        coefficients: Vec<Vec<f64>>,
    ) -> Result<Self> {
        Self::check_kernel_list(&basis)?;
        let model = SpatialModel::with_coefficients(spatial_function, basis.len(), coefficients)?;
        let weights = vec![0.0; basis.len()];
        Self::build(basis, weights, Some(model))
    }

    fn build(mut basis: Vec<AnyKernel>, weights: Vec<f64>, model: Option<SpatialModel>) -> Result<Self> {
        Self::check_kernel_list(&basis)?;
        let (width, height) = basis[0].dimensions();
        let (ctr_x, ctr_y) = basis[0].center();

        let mut core = KernelCore::new(width, height, basis.len())?.with_center(ctr_x, ctr_y)?;
        if let Some(model) = model {
            core = core.with_spatial_model(model)?;
        }
        let basis_images = compute_basis_images(&mut basis)?;

        Ok(Self {
            core,
            basis,
            basis_images,
            weights,
        })
    }

    /// Validate a basis list
    ///
    /// Checks are made in list order; the error names the first offending
    /// basis kernel.
    pub fn check_kernel_list(basis: &[AnyKernel]) -> Result<()> {
        let first = basis.first().ok_or(InvalidArgument::EmptyBasis)?;
        let dimensions = first.dimensions();
        let center = first.center();

        for (index, kernel) in basis.iter().enumerate() {
            if kernel.dimensions() != dimensions {
                return Err(InvalidArgument::BasisSize {
                    index,
                    expected: dimensions,
                    actual: kernel.dimensions(),
                }
                .into());
            }
            if kernel.center() != center {
                return Err(InvalidArgument::BasisCenter {
                    index,
                    expected: center,
                    actual: kernel.center(),
                }
                .into());
            }
            if kernel.is_spatially_varying() {
                return Err(InvalidArgument::SpatiallyVaryingBasis { index }.into());
            }
        }
        Ok(())
    }

    /// The basis kernels in order
    pub fn kernel_list(&self) -> &[AnyKernel] {
        &self.basis
    }

    /// The cached, unnormalized basis images in basis order
    pub fn basis_images(&self) -> &[KernelImage] {
        &self.basis_images
    }

    pub fn n_basis_kernels(&self) -> usize {
        self.basis.len()
    }

    /// True if every basis kernel is a [`DeltaFunctionKernel`](crate::DeltaFunctionKernel)
    pub fn is_delta_function_basis(&self) -> bool {
        self.basis
            .iter()
            .all(|kernel| kernel.kind() == KernelKind::DeltaFunction)
    }

    /// Rebuild with one basis kernel per spatial term
    ///
    /// With spatial coefficients `c[i][k]` for basis kernel `i` and spatial
    /// term `t_k`, the image is `sum_k t_k(x, y) * sum_i c[i][k] * B_i`. The
    /// refactored kernel has the fixed basis `K_k = sum_i c[i][k] * B_i` and
    /// identity spatial coefficients, so it renders the same images with one
    /// basis kernel per spatial term.
    ///
    /// Returns `Ok(None)` for a spatially invariant kernel and fails with
    /// `NotLinearCombination` if the spatial function is not linear in its
    /// parameters.
    pub fn refactor(&self) -> Result<Option<Self>> {
        let Some(model) = self.core.spatial_model() else {
            return Ok(None);
        };
        let function = model.function();
        if !function.is_linear_combination() {
            return Err(InvalidArgument::NotLinearCombination {
                name: function.name(),
            }
            .into());
        }

        let n_terms = model.n_spatial_parameters();
        let (width, height) = self.core.dimensions();
        let (ctr_x, ctr_y) = self.core.center();
        let mut basis: Vec<AnyKernel> = Vec::with_capacity(n_terms);
        for term in 0..n_terms {
            let mut image = KernelImage::new(width, height);
            for (row, basis_image) in model.coefficients().iter().zip(&self.basis_images) {
                image.scaled_add(row[term], basis_image)?;
            }
            basis.push(FixedKernel::new(image)?.with_center(ctr_x, ctr_y)?.into());
        }
        let identity: Vec<Vec<f64>> = (0..n_terms)
            .map(|i| (0..n_terms).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();

        debug!(
            n_basis = self.basis.len(),
            n_terms, "refactored linear combination kernel"
        );
        let mut kernel = Self::with_spatial_parameters(basis, function.clone_box(), identity)?;
        kernel.set_normalization_policy(self.core.normalization_policy());
        Ok(Some(kernel))
    }
}

#[instrument(skip(basis), fields(n_basis = basis.len()))]
fn compute_basis_images(basis: &mut [AnyKernel]) -> Result<Vec<KernelImage>> {
    let images = basis
        .iter_mut()
        .map(|kernel| kernel.make_image(false, 0.0, 0.0).map(|(image, _)| image))
        .collect::<Result<Vec<_>>>()?;
    debug!("cached {} basis images", images.len());
    Ok(images)
}

impl KernelImpl for LinearCombinationKernel {
    fn core(&self) -> &KernelCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut KernelCore {
        &mut self.core
    }

    fn apply_kernel_parameters(&mut self, params: &[f64]) {
        self.weights.copy_from_slice(params);
    }

    fn render(&self, pixels: &mut [f64]) -> Result<f64> {
        pixels.fill(0.0);
        let mut sum = 0.0;
        for (&weight, basis_image) in self.weights.iter().zip(&self.basis_images) {
            sum = 0.0;
            for (pixel, &value) in pixels.iter_mut().zip(basis_image.pixels()) {
                *pixel += weight * value;
                sum += *pixel;
            }
        }
        Ok(sum)
    }
}

impl Kernel for LinearCombinationKernel {
    fn kind(&self) -> KernelKind {
        KernelKind::LinearCombination
    }

    fn kernel_parameters(&self) -> Vec<f64> {
        self.weights.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::AnalyticKernel;
    use crate::delta::DeltaFunctionKernel;
    use approx::assert_relative_eq;
    use stencil_core::Image;
    use stencil_function::{Function, GaussianFunction2, PolynomialFunction2};

    fn constant(value: f64) -> AnyKernel {
        FixedKernel::new(Image::new_filled(1, 1, value)).unwrap().into()
    }

    fn delta_basis(width: usize, height: usize) -> Vec<AnyKernel> {
        let mut basis = Vec::new();
        for y in 0..height {
            for x in 0..width {
                basis.push(DeltaFunctionKernel::new(width, height, (x, y)).unwrap().into());
            }
        }
        basis
    }

    #[test]
    fn test_sum_of_constants() {
        let mut kernel = LinearCombinationKernel::new(vec![constant(2.0), constant(3.0)], vec![1.0, 1.0]).unwrap();
        let (image, sum) = kernel.make_image(false, 0.0, 0.0).unwrap();
        assert_eq!(image[(0, 0)], 5.0);
        assert_eq!(sum, 5.0);

        let (image, sum) = kernel.make_image(true, 0.0, 0.0).unwrap();
        assert_eq!(image[(0, 0)], 1.0);
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn test_weight_count_checked() {
        assert!(matches!(
            LinearCombinationKernel::new(vec![constant(1.0)], vec![1.0, 2.0]),
            Err(Error::ParameterCountMismatch {
                expected: 1,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_basis_validation() {
        match LinearCombinationKernel::new(Vec::new(), Vec::new()) {
            Err(Error::InvalidArgument(InvalidArgument::EmptyBasis)) => {}
            other => panic!("Wrong result: {other:?}"),
        }

        let mut basis = delta_basis(3, 3);
        basis.insert(2, DeltaFunctionKernel::new(3, 4, (0, 0)).unwrap().into());
        let err = LinearCombinationKernel::check_kernel_list(&basis).unwrap_err();
        assert_eq!(err.basis_index(), Some(2));

        let mut basis = delta_basis(3, 3);
        basis[1] = DeltaFunctionKernel::new(3, 3, (0, 0))
            .unwrap()
            .with_center(0, 0)
            .unwrap()
            .into();
        match LinearCombinationKernel::check_kernel_list(&basis) {
            Err(Error::InvalidArgument(InvalidArgument::BasisCenter { index, .. })) => {
                assert_eq!(index, 1)
            }
            other => panic!("Wrong result: {other:?}"),
        }

        let varying = AnalyticKernel::spatially_varying(
            3,
            3,
            Box::new(GaussianFunction2::circular(1.0)),
            Box::new(PolynomialFunction2::new(1)),
        )
        .unwrap();
        let flat = FixedKernel::new(Image::new_filled(3, 3, 1.0)).unwrap();
        let basis = vec![flat.into(), varying.into()];
        match LinearCombinationKernel::new(basis, vec![1.0, 1.0]) {
            Err(Error::InvalidArgument(InvalidArgument::SpatiallyVaryingBasis { index })) => {
                assert_eq!(index, 1)
            }
            other => panic!("Wrong result: {other:?}"),
        }
    }

    #[test]
    fn test_center_follows_basis() {
        let basis: Vec<AnyKernel> = (0..2)
            .map(|i| {
                DeltaFunctionKernel::new(4, 4, (i, i))
                    .unwrap()
                    .with_center(3, 0)
                    .unwrap()
                    .into()
            })
            .collect();
        let kernel = LinearCombinationKernel::new(basis, vec![1.0, 1.0]).unwrap();
        assert_eq!(kernel.center(), (3, 0));
        assert!(kernel.is_delta_function_basis());
    }

    #[test]
    fn test_refactor_renders_same_images() {
        for order in 0..3 {
            let spatial = PolynomialFunction2::new(order);
            let n_spatial = spatial.n_parameters();
            let basis = delta_basis(4, 3);
            let coefficients: Vec<Vec<f64>> = (0..basis.len())
                .map(|i| (0..n_spatial).map(|k| i as f64 + 1.0 + 0.1 * k as f64).collect())
                .collect();
            let mut kernel =
                LinearCombinationKernel::with_spatial_parameters(basis, Box::new(spatial), coefficients).unwrap();

            let mut refactored = kernel.refactor().unwrap().unwrap();
            assert_eq!(refactored.n_basis_kernels(), n_spatial);
            assert!(!refactored.is_delta_function_basis());

            for &(x, y) in &[(0.0, 0.0), (10.0, -5.0), (3.5, 120.0)] {
                let (expected, expected_sum) = kernel.make_image(false, x, y).unwrap();
                let (image, sum) = refactored.make_image(false, x, y).unwrap();
                assert_relative_eq!(sum, expected_sum, max_relative = 1e-12);
                for (got, want) in image.iter().zip(expected.iter()) {
                    assert_relative_eq!(*got, *want, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_refactor_invariant_and_nonlinear() {
        let kernel = LinearCombinationKernel::new(delta_basis(2, 2), vec![1.0; 4]).unwrap();
        assert!(kernel.refactor().unwrap().is_none());

        let kernel = LinearCombinationKernel::spatially_varying(
            delta_basis(2, 2),
            Box::new(GaussianFunction2::circular(10.0)),
        )
        .unwrap();
        assert!(matches!(
            kernel.refactor(),
            Err(Error::InvalidArgument(InvalidArgument::NotLinearCombination { .. }))
        ));
    }
}
