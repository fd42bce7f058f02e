//! Server-side signature decoding

use guestbook_signature::{data_uri_to_png, decode_png};
use tracing::debug;

use crate::IntakeError;

/// Recover the PNG bytes from a submitted signature data URI
///
/// Only base64 `image/png` URIs are accepted and the payload must parse as
/// a PNG. The bytes are returned untouched so the stored file is exactly
/// what the canvas encoded.
pub fn decode_signature(data_uri: &str) -> Result<Vec<u8>, IntakeError> {
    let png = data_uri_to_png(data_uri)?;
    let decoded = decode_png(&png)?;
    debug!(
        "Decoded signature: {}x{}, {} bytes",
        decoded.width,
        decoded.height,
        png.len()
    );
    Ok(png)
}
