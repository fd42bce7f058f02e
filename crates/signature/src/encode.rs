//! PNG data URI encoding for capture results
//!
//! Encoding is fixed: RGBA8 PNG, default compression, adaptive filtering,
//! standard padded base64. PNG has no lossy step, so decoding a capture
//! result reproduces the committed buffer exactly.

use base64::{Engine, engine::general_purpose::STANDARD};
use data_url::DataUrl;
use guestbook_ipc::PNG_DATA_URI_PREFIX;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Buffer size {actual} does not match {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("PNG codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Not a data URI: {0}")]
    NotADataUri(String),

    #[error("Unsupported media type {0}, expected image/png")]
    UnsupportedMediaType(String),

    #[error("Data URI payload is not base64")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// The terminal artifact of a signature capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    /// `data:image/png;base64,...`
    pub data_uri: String,
    /// Buffer width in physical pixels
    pub width: u32,
    /// Buffer height in physical pixels
    pub height: u32,
}

/// Raw image recovered from a data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSignature {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub rgba: Vec<u8>,
}

/// Encode an RGBA8 buffer as PNG bytes
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::EmptyImage { width, height });
    }
    let expected = (width as usize) * (height as usize) * 4;
    if rgba.len() != expected {
        return Err(EncodeError::BufferSize {
            width,
            height,
            actual: rgba.len(),
        });
    }

    let mut png = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(rgba, width, height, ExtendedColorType::Rgba8)?;
    Ok(png)
}

/// Wrap PNG bytes in a base64 data URI
pub fn png_to_data_uri(png: &[u8]) -> String {
    let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len().div_ceil(3) * 4);
    uri.push_str(PNG_DATA_URI_PREFIX);
    STANDARD.encode_string(png, &mut uri);
    uri
}

/// Encode an RGBA8 buffer straight to a capture result
pub fn encode_capture(width: u32, height: u32, rgba: &[u8]) -> Result<CaptureResult, EncodeError> {
    let png = encode_png(width, height, rgba)?;
    Ok(CaptureResult {
        data_uri: png_to_data_uri(&png),
        width,
        height,
    })
}

/// Encode an RGBA8 buffer as a `data:image/png;base64,` URI
pub fn encode_data_uri(width: u32, height: u32, rgba: &[u8]) -> Result<String, EncodeError> {
    Ok(encode_capture(width, height, rgba)?.data_uri)
}

/// Extract the PNG bytes from a base64 `image/png` data URI
pub fn data_uri_to_png(uri: &str) -> Result<Vec<u8>, EncodeError> {
    let parsed = DataUrl::process(uri).map_err(|e| EncodeError::NotADataUri(format!("{e:?}")))?;

    let mime = parsed.mime_type();
    if !mime.type_.eq_ignore_ascii_case("image") || !mime.subtype.eq_ignore_ascii_case("png") {
        return Err(EncodeError::UnsupportedMediaType(format!(
            "{}/{}",
            mime.type_, mime.subtype
        )));
    }

    // Percent-encoded payloads are valid data URIs but never come from a canvas
    let header = uri.split_once(',').map(|(h, _)| h).unwrap_or_default();
    if !header.to_ascii_lowercase().ends_with(";base64") {
        return Err(EncodeError::NotBase64);
    }

    let (bytes, _fragment) = parsed
        .decode_to_vec()
        .map_err(|e| EncodeError::InvalidBase64(format!("{e:?}")))?;
    Ok(bytes)
}

/// Decode PNG bytes back to an RGBA8 buffer
pub fn decode_png(png: &[u8]) -> Result<DecodedSignature, EncodeError> {
    let image = image::load_from_memory_with_format(png, ImageFormat::Png)?.to_rgba8();
    Ok(DecodedSignature {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

/// Decode a capture data URI back to pixels
pub fn decode_data_uri(uri: &str) -> Result<DecodedSignature, EncodeError> {
    let png = data_uri_to_png(uri)?;
    decode_png(&png)
}
