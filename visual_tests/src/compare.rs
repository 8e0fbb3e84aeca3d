use crate::{Result, VisualTestError};
use image::{Rgb, RgbImage};
use image_compare::Algorithm;
use std::path::Path;

/// Marks differing pixels in diff images.
const DIFF_COLOR: Rgb<u8> = Rgb([0xFF, 0x00, 0xFF]);

/// Result of comparing a render with its reference
pub struct CompareResult {
    /// Structural similarity score from 0.0 to 1.0
    pub similarity: f64,
    /// Number of pixels whose colour differs at all
    pub mismatched_pixels: usize,
}

impl CompareResult {
    /// Whether the two images are pixel-identical.
    pub fn is_exact(&self) -> bool {
        self.mismatched_pixels == 0
    }
}

fn load_pair(reference: &Path, rendered: &Path) -> Result<(RgbImage, RgbImage)> {
    let reference = image::open(reference)?.to_rgb8();
    let rendered = image::open(rendered)?.to_rgb8();

    if reference.dimensions() != rendered.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Image dimensions don't match: reference {:?} vs rendered {:?}",
            reference.dimensions(),
            rendered.dimensions()
        )));
    }
    Ok((reference, rendered))
}

/// Compare a render against its reference image
pub fn compare_images(reference: &Path, rendered: &Path) -> Result<CompareResult> {
    let (reference, rendered) = load_pair(reference, rendered)?;

    let mismatched_pixels = reference
        .pixels()
        .zip(rendered.pixels())
        .filter(|(a, b)| a != b)
        .count();

    let result =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &reference, &rendered)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    Ok(CompareResult {
        similarity: result.score,
        mismatched_pixels,
    })
}

/// Write an image that shows the render dimmed, with every differing pixel
/// painted magenta
pub fn generate_diff_image(reference: &Path, rendered: &Path, output: &Path) -> Result<()> {
    let (reference, rendered) = load_pair(reference, rendered)?;

    let diff = RgbImage::from_fn(rendered.width(), rendered.height(), |x, y| {
        let pixel = rendered.get_pixel(x, y);
        if reference.get_pixel(x, y) != pixel {
            DIFF_COLOR
        } else {
            Rgb(pixel.0.map(|channel| channel / 3))
        }
    });

    diff.save(output)?;
    Ok(())
}
