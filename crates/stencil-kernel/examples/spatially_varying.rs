//! Spatially varying Gaussian kernel example
//!
//! Run with `RUST_LOG=stencil_kernel=debug` to see basis caching and
//! parameter resolution.

use anyhow::Result;
use stencil_function::{GaussianFunction2, PolynomialFunction2};
use stencil_kernel::{
    format_kernel, AnalyticKernel, AnyKernel, Kernel, KernelImagesForRegion, KernelRecord,
    LinearCombinationKernel, Location, PixelBox,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Spatially Varying Kernels ===\n");

    // Example 1: sigma grows linearly across a 100x100 pixel region
    let (min_sigma, max_sigma) = (0.1, 3.0);
    let slope = (max_sigma - min_sigma) / 100.0;
    let mut gaussian = AnalyticKernel::spatially_varying(
        9,
        9,
        Box::new(GaussianFunction2::new(1.0, 1.0, 0.0)),
        Box::new(PolynomialFunction2::new(1)),
    )?;
    let mut coefficients = gaussian.spatial_parameters();
    coefficients[0] = vec![min_sigma, slope, 0.0];
    coefficients[1] = vec![min_sigma, 0.0, slope];
    gaussian.set_spatial_parameters(coefficients)?;

    println!("1. Analytic Gaussian at two positions");
    for &(x, y) in &[(10.0, 10.0), (90.0, 50.0)] {
        let params = gaussian.compute_kernel_parameters(x, y);
        println!("  ({x}, {y}): sigma1={:.3} sigma2={:.3}", params[0], params[1]);
        print!("{}", format_kernel(&mut gaussian, true, x, y, 3)?);
        println!();
    }

    // Example 2: reference images over a region
    println!("2. Kernel images for a region");
    let region = PixelBox::new(10, 20, 50, 75)?;
    let mut images = KernelImagesForRegion::new(gaussian.clone(), region, true);
    images.compute_all()?;
    for location in Location::ALL {
        let (x, y) = region.position(location);
        let image = images.image(location)?;
        println!(
            "  {location:?} at ({x}, {y}): center pixel {:.4}",
            image[(4, 4)]
        );
    }

    // Example 3: linear combination of fixed Gaussians with spatial weights
    println!("\n3. Linear combination with spatial weights");
    let basis: Vec<AnyKernel> = [(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)]
        .iter()
        .map(|&(s1, s2)| {
            AnalyticKernel::new(9, 9, Box::new(GaussianFunction2::new(s1, s2, 0.0))).map(AnyKernel::from)
        })
        .collect::<stencil_core::Result<_>>()?;
    let mut combination = LinearCombinationKernel::with_spatial_parameters(
        basis,
        Box::new(PolynomialFunction2::new(1)),
        vec![
            vec![1.0, -0.01, 0.0],
            vec![0.0, 0.01, 0.0],
            vec![0.0, 0.0, 0.01],
        ],
    )?;
    let (_, sum) = combination.make_image(false, 50.0, 50.0)?;
    println!(
        "  weights at (50, 50): {:?}, raw sum {:.4}",
        combination.current_kernel_parameters(),
        sum
    );

    let refactored = combination.refactor()?;
    if let Some(refactored) = refactored {
        println!(
            "  refactored into {} basis kernels",
            refactored.n_kernel_parameters()
        );
    }

    // Example 4: persist what was rendered
    println!("\n4. Kernel record");
    let record = KernelRecord::capture(&mut combination, 50.0, 50.0)?;
    println!("{}", record.to_json_pretty()?);

    Ok(())
}
