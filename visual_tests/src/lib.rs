mod compare;
mod scene;

pub use compare::{compare_images, generate_diff_image, CompareResult};
pub use scene::{build_scene, render_scene, Scene, SceneConfig, SCENES};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Unknown scene: {0}")]
    UnknownScene(String),
    #[error("Failed to render scene: {0}")]
    Render(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Reference image not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("Compositor error: {0}")]
    Raster(#[from] iface_raster::RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    /// Name of the scene to render
    pub scene_name: String,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
}

impl Default for VisualTestConfig {
    fn default() -> Self {
        Self {
            scene_name: String::new(),
            similarity_threshold: 0.99,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (every pixel matches the reference)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Path to the rendered image
    pub rendered_path: PathBuf,
    /// Path to the reference image
    pub reference_path: PathBuf,
    /// Number of pixels that differ from the reference
    pub mismatched_pixels: usize,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

/// Get the path to the references directory
pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

/// Get the path to a reference image for a scene
pub fn reference_path(scene_name: &str) -> PathBuf {
    references_dir().join(format!("{}.png", scene_name))
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

/// Get the path to a rendered image
pub fn rendered_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_rendered.png", scene_name))
}

/// Get the path to a diff image
pub fn diff_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", scene_name))
}

/// Run a visual regression test
///
/// Renders are deterministic, so a scene passes only when it matches its
/// reference exactly and the similarity score meets the threshold. Scenes
/// without a reference fail; record one with `UPDATE_REFERENCES=1`.
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    std::fs::create_dir_all(output_dir())?;

    let ref_path = reference_path(&config.scene_name);
    let out_path = rendered_path(&config.scene_name);

    if !ref_path.exists() {
        return Err(VisualTestError::ReferenceNotFound(ref_path));
    }

    render_scene(&SceneConfig {
        scene_name: config.scene_name.clone(),
        output_path: out_path.clone(),
    })?;

    let compare_result = compare_images(&ref_path, &out_path)?;
    let passed =
        compare_result.is_exact() && compare_result.similarity >= config.similarity_threshold;

    let diff = if !passed {
        let diff_file = diff_path(&config.scene_name);
        generate_diff_image(&ref_path, &out_path, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        rendered_path: out_path,
        reference_path: ref_path,
        mismatched_pixels: compare_result.mismatched_pixels,
        diff_path: diff,
    })
}

/// Update the reference image for a scene
pub fn update_reference(scene_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(references_dir())?;

    let ref_path = reference_path(scene_name);
    render_scene(&SceneConfig {
        scene_name: scene_name.to_string(),
        output_path: ref_path.clone(),
    })?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
