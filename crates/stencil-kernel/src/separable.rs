//! Kernel that is the outer product of two 1D functions

use stencil_core::Result;
use stencil_function::{Function1, Function2};

use crate::kernel_core::KernelCore;
use crate::spatial::SpatialModel;
use crate::traits::{private::KernelImpl, Kernel, KernelKind};

/// Column and row vectors of a separable kernel
///
/// `columns[i]` is the column function at column `i`, `rows[j]` the row
/// function at row `j`. The kernel pixel at `(i, j)` is
/// `columns[i] * rows[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparableVectors {
    pub columns: Vec<f64>,
    pub rows: Vec<f64>,
    /// Sum of the outer product; 1 when normalized
    pub sum: f64,
}

/// A kernel `f(x) * g(y)` described by two [`Function1`]s
///
/// The kernel parameters are the column function's parameters followed by
/// the row function's.
#[derive(Debug, Clone)]
pub struct SeparableKernel {
    core: KernelCore,
    column_function: Box<dyn Function1>,
    row_function: Box<dyn Function1>,
}

impl SeparableKernel {
    pub fn new(
        width: usize,
        height: usize,
        column_function: Box<dyn Function1>,
        row_function: Box<dyn Function1>,
    ) -> Result<Self> {
        let n_params = column_function.n_parameters() + row_function.n_parameters();
        let core = KernelCore::new(width, height, n_params)?;
        Ok(Self {
            core,
            column_function,
            row_function,
        })
    }

    /// Spatially varying kernel with every spatial coefficient zero
    pub fn spatially_varying(
        width: usize,
        height: usize,
        column_function: Box<dyn Function1>,
        row_function: Box<dyn Function1>,
        spatial_function: Box<dyn Function2>,
    ) -> Result<Self> {
        let kernel = Self::new(width, height, column_function, row_function)?;
        let model = SpatialModel::new(spatial_function, kernel.core.n_kernel_parameters());
        kernel.attach(model)
    }

    /// Spatially varying kernel with coefficients indexed
    /// `[kernel parameter][spatial parameter]`
    pub fn with_spatial_parameters(
        width: usize,
        height: usize,
        column_function: Box<dyn Function1>,
        row_function: Box<dyn Function1>,
        spatial_function: Box<dyn Function2>,
        coefficients: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let kernel = Self::new(width, height, column_function, row_function)?;
        let model = SpatialModel::with_coefficients(
            spatial_function,
            kernel.core.n_kernel_parameters(),
            coefficients,
        )?;
        kernel.attach(model)
    }

    fn attach(mut self, model: SpatialModel) -> Result<Self> {
        self.core = self.core.with_spatial_model(model)?;
        Ok(self)
    }

    /// Move the center; fails with `CenterOutOfBounds` outside the kernel
    pub fn with_center(mut self, ctr_x: usize, ctr_y: usize) -> Result<Self> {
        self.core = self.core.with_center(ctr_x, ctr_y)?;
        Ok(self)
    }

    pub fn column_function(&self) -> &dyn Function1 {
        self.column_function.as_ref()
    }

    pub fn row_function(&self) -> &dyn Function1 {
        self.row_function.as_ref()
    }

    /// Evaluate the column and row vectors at image position `(x, y)`
    ///
    /// With `normalize` set both vectors are divided by their own sums, so
    /// the outer product sums to 1.
    pub fn compute_vectors(&mut self, normalize: bool, x: f64, y: f64) -> Result<SeparableVectors> {
        if let Some(params) = self.core.resolve_spatial(x, y)? {
            self.apply_kernel_parameters(&params);
            self.core.recycle(params);
        }
        let mut columns = self.sample_columns();
        let mut rows = self.sample_rows();
        let column_sum: f64 = columns.iter().sum();
        let row_sum: f64 = rows.iter().sum();
        let sum = if normalize {
            columns.iter_mut().for_each(|v| *v /= column_sum);
            rows.iter_mut().for_each(|v| *v /= row_sum);
            let normalized: f64 = columns.iter().sum::<f64>() * rows.iter().sum::<f64>();
            self.core.normalization_policy().check(normalized)?;
            1.0
        } else {
            column_sum * row_sum
        };
        Ok(SeparableVectors { columns, rows, sum })
    }

    fn sample_columns(&self) -> Vec<f64> {
        (0..self.core.width())
            .map(|col| self.column_function.eval(self.core.x_offset(col)))
            .collect()
    }

    fn sample_rows(&self) -> Vec<f64> {
        (0..self.core.height())
            .map(|row| self.row_function.eval(self.core.y_offset(row)))
            .collect()
    }
}

impl KernelImpl for SeparableKernel {
    fn core(&self) -> &KernelCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut KernelCore {
        &mut self.core
    }

    fn apply_kernel_parameters(&mut self, params: &[f64]) {
        let (column_params, row_params) = params.split_at(self.column_function.n_parameters());
        self.column_function.parameters_mut().copy_from_slice(column_params);
        self.row_function.parameters_mut().copy_from_slice(row_params);
    }

    fn render(&self, pixels: &mut [f64]) -> Result<f64> {
        let columns = self.sample_columns();
        let rows = self.sample_rows();
        let mut sum = 0.0;
        for (row_pixels, &row_value) in pixels.chunks_exact_mut(columns.len()).zip(&rows) {
            for (pixel, &column_value) in row_pixels.iter_mut().zip(&columns) {
                *pixel = column_value * row_value;
                sum += *pixel;
            }
        }
        Ok(sum)
    }
}

impl Kernel for SeparableKernel {
    fn kind(&self) -> KernelKind {
        KernelKind::Separable
    }

    fn kernel_parameters(&self) -> Vec<f64> {
        let mut params = self.column_function.parameters().to_vec();
        params.extend_from_slice(self.row_function.parameters());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stencil_function::{GaussianFunction1, PolynomialFunction2};

    fn gaussians(sx: f64, sy: f64) -> (Box<dyn Function1>, Box<dyn Function1>) {
        (
            Box::new(GaussianFunction1::new(sx)),
            Box::new(GaussianFunction1::new(sy)),
        )
    }

    #[test]
    fn test_image_is_outer_product() {
        let (cols, rows) = gaussians(1.0, 2.0);
        let mut kernel = SeparableKernel::new(5, 7, cols, rows).unwrap();
        assert_eq!(kernel.n_kernel_parameters(), 2);
        assert_eq!(kernel.kernel_parameters(), vec![1.0, 2.0]);

        let (image, sum) = kernel.make_image(false, 0.0, 0.0).unwrap();
        let vectors = kernel.compute_vectors(false, 0.0, 0.0).unwrap();
        assert_relative_eq!(sum, vectors.sum, epsilon = 1e-12);
        for y in 0..7 {
            for x in 0..5 {
                assert_relative_eq!(image[(x, y)], vectors.columns[x] * vectors.rows[y]);
            }
        }
    }

    #[test]
    fn test_normalized_vectors() {
        let (cols, rows) = gaussians(0.7, 1.3);
        let mut kernel = SeparableKernel::new(5, 5, cols, rows).unwrap();
        let vectors = kernel.compute_vectors(true, 0.0, 0.0).unwrap();
        assert_eq!(vectors.sum, 1.0);
        assert_relative_eq!(vectors.columns.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(vectors.rows.iter().sum::<f64>(), 1.0, epsilon = 1e-12);

        let (image, sum) = kernel.make_image(true, 0.0, 0.0).unwrap();
        assert_eq!(sum, 1.0);
        assert_relative_eq!(image.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parameters_split_between_functions() {
        let (cols, rows) = gaussians(1.0, 1.0);
        let mut kernel = SeparableKernel::new(3, 3, cols, rows).unwrap();
        kernel.set_kernel_parameters(&[0.5, 4.0]).unwrap();
        assert_eq!(kernel.column_function().parameters(), &[0.5]);
        assert_eq!(kernel.row_function().parameters(), &[4.0]);
        assert!(kernel.set_kernel_parameters(&[0.5]).is_err());
    }

    #[test]
    fn test_spatially_varying() {
        let (cols, rows) = gaussians(1.0, 1.0);
        let mut kernel = SeparableKernel::with_spatial_parameters(
            3,
            3,
            cols,
            rows,
            Box::new(PolynomialFunction2::new(1)),
            vec![vec![1.0, 0.5, 0.0], vec![2.0, 0.0, 0.25]],
        )
        .unwrap();
        kernel.make_image(false, 2.0, 4.0).unwrap();
        assert_eq!(kernel.kernel_parameters(), vec![2.0, 3.0]);

        kernel.compute_vectors(false, 0.0, 0.0).unwrap();
        assert_eq!(kernel.kernel_parameters(), vec![1.0, 2.0]);
    }
}
