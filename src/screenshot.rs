// Screenshot functionality
//
// Captures the composed display image and saves it as a grayscale PNG.

use crate::display::Geometry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),

    /// Pixel data does not cover the image
    SizeMismatch {
        /// Bytes needed for the image
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
            ScreenshotError::SizeMismatch { expected, actual } => {
                write!(f, "expected {} bytes of pixels, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Where and how screenshots are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotOptions {
    /// Output directory (created on demand)
    pub directory: PathBuf,
    /// Include timestamp in filename
    pub include_timestamp: bool,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("screenshots"),
            include_timestamp: true,
        }
    }
}

/// Save a screenshot of a composed display image
///
/// # Arguments
///
/// * `levels` - Pixel levels, one byte per pixel, row-major
/// * `geometry` - Image size
/// * `options` - Output directory and naming
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
///
/// # Example
///
/// ```no_run
/// use newton_display::display::Geometry;
/// use newton_display::screenshot::{save_screenshot, ScreenshotOptions};
///
/// let levels = vec![0xFF; 320 * 240];
/// let path = save_screenshot(&levels, Geometry::new(320, 240), &ScreenshotOptions::default())
///     .expect("Failed to save screenshot");
/// println!("Screenshot saved to: {}", path.display());
/// ```
pub fn save_screenshot(
    levels: &[u8],
    geometry: Geometry,
    options: &ScreenshotOptions,
) -> Result<PathBuf, ScreenshotError> {
    let expected = geometry.pixel_count().unwrap_or(usize::MAX);
    if levels.len() != expected {
        return Err(ScreenshotError::SizeMismatch {
            expected,
            actual: levels.len(),
        });
    }

    fs::create_dir_all(&options.directory)?;
    let file_path = next_screenshot_path(&options.directory, options.include_timestamp);

    save_png(&file_path, levels, geometry.width, geometry.height)?;

    Ok(file_path)
}

/// Pick a file name that does not overwrite an earlier screenshot
fn next_screenshot_path(directory: &Path, include_timestamp: bool) -> PathBuf {
    let stem = if include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("screenshot_{}", timestamp)
    } else {
        "screenshot".to_string()
    };

    let mut path = directory.join(format!("{}.png", stem));
    let mut counter = 1;
    while path.exists() {
        path = directory.join(format!("{}_{}.png", stem, counter));
        counter += 1;
    }
    path
}

/// Save grayscale data as a PNG file
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}
