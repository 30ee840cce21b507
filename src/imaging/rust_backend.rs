//! Pure Rust storage backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (JPEG, PNG, TIFF, WebP, BMP) | `image::ImageReader` → `DynamicImage::to_rgb8` |
//! | Encode | `RgbImage::save_with_format`, format from extension |

use super::backend::{BackendError, Dimensions, ImageBackend};
use image::{ImageFormat, ImageReader, RgbImage};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions with a decoder compiled in.
const FORMAT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
    ("bmp", ImageFormat::Bmp),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    FORMAT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that can be opened.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Output format for a path, based on its extension.
fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    FORMAT_CANDIDATES
        .iter()
        .find(|(candidate, fmt)| *candidate == ext && fmt.writing_enabled())
        .map(|(_, fmt)| *fmt)
        .ok_or(BackendError::UnsupportedFormat(ext))
}

/// Backend using the `image` crate's pure-Rust codecs.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Dimensions { width, height })
    }

    fn load(&self, path: &Path) -> Result<RgbImage, BackendError> {
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(decoded.to_rgb8())
    }

    fn save(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError> {
        let format = output_format(path)?;
        image
            .save_with_format(path, format)
            .map_err(|e| BackendError::Encode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn test_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        })
    }

    #[test]
    fn supported_extensions_include_common_formats() {
        let exts = supported_input_extensions();
        for expected in &["jpg", "jpeg", "png", "tif", "tiff", "webp", "bmp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn png_save_then_load_is_lossless() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("edit.png");
        let img = test_image(20, 10);

        let backend = RustBackend::new();
        backend.save(&img, &path).unwrap();
        assert_eq!(backend.load(&path).unwrap(), img);
    }

    #[test]
    fn identify_saved_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("dims.png");

        let backend = RustBackend::new();
        backend.save(&test_image(200, 150), &path).unwrap();
        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims, Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn load_drops_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("rgba.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 40]))
            .save(&path)
            .unwrap();

        let loaded = RustBackend::new().load(&path).unwrap();
        assert_eq!(loaded.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn save_uppercase_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("SHOUT.PNG");
        RustBackend::new().save(&test_image(2, 2), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_unknown_extension_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.xyz");
        let result = RustBackend::new().save(&test_image(2, 2), &path);
        assert!(matches!(result, Err(BackendError::UnsupportedFormat(ext)) if ext == "xyz"));
    }

    #[test]
    fn load_nonexistent_file_errors() {
        let result = RustBackend::new().load(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
