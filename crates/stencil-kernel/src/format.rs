//! Text rendering of kernel images

use stencil_core::{Result, DEFAULT_NORMALIZATION_TOLERANCE};

use crate::traits::Kernel;

/// Render `kernel` at `(x, y)` as text
///
/// One line per kernel row, top row first, each pixel printed with
/// `precision` decimals. When `normalize` is set and the rendered pixels do
/// not sum to 1 within `1e-5`, a warning line with the actual sum is
/// appended.
pub fn format_kernel<K: Kernel + ?Sized>(
    kernel: &mut K,
    normalize: bool,
    x: f64,
    y: f64,
    precision: usize,
) -> Result<String> {
    let (image, _) = kernel.make_image(normalize, x, y)?;
    let width = precision + 4;

    let mut out = String::new();
    for row in (0..image.height()).rev() {
        let line: Vec<String> = image
            .row(row)
            .iter()
            .map(|value| format!("{value:>width$.precision$}"))
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    let sum = image.sum();
    let sums_to_one = (sum - 1.0).abs() <= DEFAULT_NORMALIZATION_TOLERANCE;
    if normalize && !sums_to_one {
        out.push_str(&format!("Warning! Sum of all pixels = {sum:9.5} != 1.0"));
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaFunctionKernel;
    use crate::fixed::FixedKernel;
    use stencil_core::Image;

    #[test]
    fn test_top_row_first() {
        let mut kernel = DeltaFunctionKernel::new(3, 2, (0, 1)).unwrap();
        let text = format_kernel(&mut kernel, false, 0.0, 0.0, 1).unwrap();
        assert_eq!(text, "  1.0   0.0   0.0\n  0.0   0.0   0.0\n");
    }

    #[test]
    fn test_warns_on_bad_normalization() {
        // pixels sum to zero, so normalizing yields NaN
        let image = Image::from_vec(2, 1, vec![1.0, -1.0]).unwrap();
        let mut kernel = FixedKernel::new(image).unwrap();
        let text = format_kernel(&mut kernel, true, 0.0, 0.0, 2).unwrap();
        assert!(text.ends_with(" != 1.0\n"));
        assert!(text.lines().last().unwrap().starts_with("Warning! Sum of all pixels = "));
        assert_eq!(text.lines().count(), 2);

        let mut kernel = FixedKernel::new(Image::new_filled(2, 2, 3.0)).unwrap();
        let text = format_kernel(&mut kernel, true, 0.0, 0.0, 2).unwrap();
        assert!(!text.contains("Warning"));
        assert_eq!(text.lines().count(), 2);
    }
}
