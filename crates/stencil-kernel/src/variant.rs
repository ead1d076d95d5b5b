//! Closed set of kernel variants
//!
//! [`AnyKernel`] is how kernels are stored by value when the concrete variant
//! is only known at runtime, most notably as the basis of a
//! [`LinearCombinationKernel`].

use stencil_core::Result;

use crate::analytic::AnalyticKernel;
use crate::delta::DeltaFunctionKernel;
use crate::fixed::FixedKernel;
use crate::kernel_core::KernelCore;
use crate::linear_combination::LinearCombinationKernel;
use crate::separable::SeparableKernel;
use crate::traits::{private::KernelImpl, Kernel, KernelKind};

/// Any kernel, dispatched by variant
#[derive(Debug, Clone)]
pub enum AnyKernel {
    Fixed(FixedKernel),
    Analytic(AnalyticKernel),
    DeltaFunction(DeltaFunctionKernel),
    Separable(SeparableKernel),
    LinearCombination(LinearCombinationKernel),
}

macro_rules! dispatch {
    ($value:expr, $kernel:ident => $body:expr) => {
        match $value {
            AnyKernel::Fixed($kernel) => $body,
            AnyKernel::Analytic($kernel) => $body,
            AnyKernel::DeltaFunction($kernel) => $body,
            AnyKernel::Separable($kernel) => $body,
            AnyKernel::LinearCombination($kernel) => $body,
        }
    };
}

impl AnyKernel {
    pub fn as_fixed(&self) -> Option<&FixedKernel> {
        match self {
            Self::Fixed(kernel) => Some(kernel),
            _ => None,
        }
    }

    pub fn as_analytic(&self) -> Option<&AnalyticKernel> {
        match self {
            Self::Analytic(kernel) => Some(kernel),
            _ => None,
        }
    }

    pub fn as_delta_function(&self) -> Option<&DeltaFunctionKernel> {
        match self {
            Self::DeltaFunction(kernel) => Some(kernel),
            _ => None,
        }
    }

    pub fn as_separable(&self) -> Option<&SeparableKernel> {
        match self {
            Self::Separable(kernel) => Some(kernel),
            _ => None,
        }
    }

    pub fn as_linear_combination(&self) -> Option<&LinearCombinationKernel> {
        match self {
            Self::LinearCombination(kernel) => Some(kernel),
            _ => None,
        }
    }
}

impl KernelImpl for AnyKernel {
    fn core(&self) -> &KernelCore {
        dispatch!(self, kernel => kernel.core())
    }

    fn core_mut(&mut self) -> &mut KernelCore {
        dispatch!(self, kernel => kernel.core_mut())
    }

    fn apply_kernel_parameters(&mut self, params: &[f64]) {
        dispatch!(self, kernel => kernel.apply_kernel_parameters(params))
    }

    fn render(&self, pixels: &mut [f64]) -> Result<f64> {
        dispatch!(self, kernel => kernel.render(pixels))
    }
}

impl Kernel for AnyKernel {
    fn kind(&self) -> KernelKind {
        dispatch!(self, kernel => kernel.kind())
    }

    fn kernel_parameters(&self) -> Vec<f64> {
        dispatch!(self, kernel => kernel.kernel_parameters())
    }
}

impl From<FixedKernel> for AnyKernel {
    fn from(kernel: FixedKernel) -> Self {
        Self::Fixed(kernel)
    }
}

impl From<AnalyticKernel> for AnyKernel {
    fn from(kernel: AnalyticKernel) -> Self {
        Self::Analytic(kernel)
    }
}

impl From<DeltaFunctionKernel> for AnyKernel {
    fn from(kernel: DeltaFunctionKernel) -> Self {
        Self::DeltaFunction(kernel)
    }
}

impl From<SeparableKernel> for AnyKernel {
    fn from(kernel: SeparableKernel) -> Self {
        Self::Separable(kernel)
    }
}

impl From<LinearCombinationKernel> for AnyKernel {
    fn from(kernel: LinearCombinationKernel) -> Self {
        Self::LinearCombination(kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_function::GaussianFunction2;

    #[test]
    fn test_dispatch_matches_variant() {
        let analytic =
            AnalyticKernel::new(5, 3, Box::new(GaussianFunction2::new(1.0, 2.0, 0.5))).unwrap();
        let mut direct = analytic.clone();
        let mut any = AnyKernel::from(analytic);

        assert_eq!(any.kind(), KernelKind::Analytic);
        assert_eq!(any.dimensions(), (5, 3));
        assert_eq!(any.kernel_parameters(), vec![1.0, 2.0, 0.5]);
        assert!(any.as_analytic().is_some());
        assert!(any.as_fixed().is_none());

        let (expected, expected_sum) = direct.make_image(false, 0.0, 0.0).unwrap();
        let (image, sum) = any.make_image(false, 0.0, 0.0).unwrap();
        assert_eq!(image, expected);
        assert_eq!(sum, expected_sum);

        any.set_kernel_parameters(&[2.0, 1.0, 0.0]).unwrap();
        assert_eq!(
            any.as_analytic().unwrap().kernel_function().parameters(),
            &[2.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_delta_conversion() {
        let any: AnyKernel = DeltaFunctionKernel::new(3, 3, (0, 2)).unwrap().into();
        assert_eq!(any.kind(), KernelKind::DeltaFunction);
        assert_eq!(any.as_delta_function().map(|k| k.pixel()), Some((0, 2)));
    }
}
