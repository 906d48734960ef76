use image::imageops::FilterType;
use ndarray::Array4;

use crate::config::ImageConfig;

/// Upload extensions the service accepts, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("No image file provided")]
    MissingImage,
    #[error("No selected file")]
    MissingFilename,
    #[error("Invalid file type. Please upload a PNG, JPG, or BMP image")]
    UnsupportedExtension,
    #[error("Failed to process image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Checks the multipart upload before any decoding happens: the image field
/// and a filename must be present and the extension must be allowed.
pub fn validate_upload(
    image: Option<Vec<u8>>,
    filename: Option<String>,
) -> Result<(Vec<u8>, String), PreprocessError> {
    let image = image.ok_or(PreprocessError::MissingImage)?;
    let filename = filename
        .filter(|name| !name.is_empty())
        .ok_or(PreprocessError::MissingFilename)?;
    validate_extension(&filename)?;
    Ok((image, filename))
}

pub fn validate_extension(filename: &str) -> Result<(), PreprocessError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(PreprocessError::UnsupportedExtension),
    }
}

/// Decodes an uploaded image and normalizes it into the model input tensor:
/// RGB8, resized (not cropped) to the configured resolution with the
/// Triangle filter, scaled to [0, 1], shaped `(1, height, width, channels)`.
pub fn decode_and_normalize(
    bytes: &[u8],
    config: &ImageConfig,
) -> Result<Array4<f32>, PreprocessError> {
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = (config.width(), config.height());
    let rgb = decoded
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgb8();

    let tensor = Array4::from_shape_fn(
        (1, height as usize, width as usize, config.channels as usize),
        |(_, y, x, channel)| f32::from(rgb.get_pixel(x as u32, y as u32)[channel]) / 255.0,
    );
    Ok(tensor)
}
