use std::path::Path;

use image::{ImageError, ImageFormat};

use crate::error::FormatError;

/// English Metric Units per inch, the unit of DrawingML extents.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// An embedded picture: its bytes plus the display size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub data: Vec<u8>,
    /// Lowercase file extension used for the media part.
    pub extension: String,
    pub content_type: String,
    pub width_emu: u64,
    pub height_emu: u64,
    /// Original file name, used as the drawing's description.
    pub name: String,
}

impl Picture {
    /// Reads and measures the image at `path`, scaling it to `width_inches`.
    pub fn load(path: &Path, width_inches: f32) -> Result<Self, FormatError> {
        let wrap = |source: ImageError| FormatError::Image {
            path: path.to_path_buf(),
            source,
        };

        let data = std::fs::read(path).map_err(|e| wrap(ImageError::IoError(e)))?;
        let format = image::guess_format(&data).map_err(wrap)?;
        let (width_px, height_px) = image::image_dimensions(path).map_err(wrap)?;

        let width_emu = (f64::from(width_inches) * EMU_PER_INCH).round() as u64;
        let height_emu = if width_px == 0 {
            0
        } else {
            (width_emu as f64 * f64::from(height_px) / f64::from(width_px)).round() as u64
        };

        Ok(Self {
            data,
            extension: extension_for(format, path),
            content_type: format.to_mime_type().to_string(),
            width_emu,
            height_emu,
            name: file_name(path),
        })
    }
}

fn extension_for(format: ImageFormat, path: &Path) -> String {
    format
        .extensions_str()
        .first()
        .map(|ext| ext.to_string())
        .or_else(|| {
            path.extension()
                .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        })
        .unwrap_or_else(|| "bin".to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
