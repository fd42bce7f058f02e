//! Shared configuration for the guest book
//!
//! This crate provides the single source of truth for signature canvas
//! geometry, stroke styling and intake storage settings shared by the
//! capture engine and the server side.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Ratio between the physical buffer resolution and the displayed size
pub const DENSITY_MULTIPLIER: f32 = 2.0;

/// Largest accepted density multiplier
pub const MAX_DENSITY_MULTIPLIER: f32 = 4.0;

/// Largest raster a canvas may allocate, in pixels (128 MiB of RGBA8)
pub const MAX_BUFFER_PIXELS: u64 = 1 << 25;

/// Logical canvas width before the first layout pass
pub const DEFAULT_LOGICAL_WIDTH: u32 = 800;

/// Logical canvas height before the first layout pass
pub const DEFAULT_LOGICAL_HEIGHT: u32 = 400;

/// Upper bound for the logical canvas width
pub const MAX_LOGICAL_WIDTH: u32 = 1200;

/// Lower bound for the logical canvas height
pub const MIN_LOGICAL_HEIGHT: u32 = 300;

/// Height as a fraction of width (2:1 canvas)
pub const ASPECT_RATIO: f32 = 0.5;

/// Horizontal space reserved around the canvas inside its container
pub const CONTAINER_PADDING: u32 = 40;

/// Pen width in logical pixels
pub const STROKE_WIDTH: f32 = 3.0;

/// Opaque black ink
pub const STROKE_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Opaque white paper
pub const BACKGROUND_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Default directory for stored blobs
pub const DEFAULT_BLOB_DIR: &str = "uploads";

/// Default public URL prefix for stored blobs
pub const DEFAULT_BLOB_BASE_URL: &str = "/uploads";

/// Environment variable naming the blob directory
pub const BLOB_DIR_VAR: &str = "GUESTBOOK_BLOB_DIR";

/// Environment variable naming the public blob URL prefix
pub const BLOB_BASE_URL_VAR: &str = "GUESTBOOK_BLOB_BASE_URL";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Density multiplier out of range: {0}")]
    InvalidDensity(f32),

    #[error("Stroke width must be positive, got {0}")]
    InvalidStrokeWidth(f32),

    #[error("Aspect ratio must be positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Invalid canvas bounds: max width {max_width}, min height {min_height}")]
    InvalidBounds { max_width: u32, min_height: u32 },

    #[error("Invalid initial canvas size {width}x{height}")]
    InvalidInitialSize { width: u32, height: u32 },

    #[error("Canvas buffer of up to {width}x{height} exceeds the pixel limit")]
    BufferTooLarge { width: u64, height: u64 },
}

/// Signature canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureConfig {
    /// Physical pixels per logical pixel
    pub density_multiplier: f32,
    /// Pen width in logical pixels
    pub stroke_width: f32,
    /// Pen color, RGBA8
    pub stroke_color: [u8; 4],
    /// Paper color, RGBA8
    pub background_color: [u8; 4],
    /// Initial logical width
    pub initial_width: u32,
    /// Initial logical height
    pub initial_height: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub aspect_ratio: f32,
    pub container_padding: u32,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            density_multiplier: DENSITY_MULTIPLIER,
            stroke_width: STROKE_WIDTH,
            stroke_color: STROKE_COLOR,
            background_color: BACKGROUND_COLOR,
            initial_width: DEFAULT_LOGICAL_WIDTH,
            initial_height: DEFAULT_LOGICAL_HEIGHT,
            max_width: MAX_LOGICAL_WIDTH,
            min_height: MIN_LOGICAL_HEIGHT,
            aspect_ratio: ASPECT_RATIO,
            container_padding: CONTAINER_PADDING,
        }
    }
}

impl SignatureConfig {
    /// Check that the configuration can drive a canvas
    pub fn validate(&self) -> Result<(), ConfigError> {
        let density = self.density_multiplier;
        if !(density > 0.0 && density <= MAX_DENSITY_MULTIPLIER) {
            return Err(ConfigError::InvalidDensity(density));
        }
        if !(self.stroke_width > 0.0 && self.stroke_width.is_finite()) {
            return Err(ConfigError::InvalidStrokeWidth(self.stroke_width));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.max_width == 0 || self.min_height == 0 {
            return Err(ConfigError::InvalidBounds {
                max_width: self.max_width,
                min_height: self.min_height,
            });
        }
        if self.initial_width == 0 || self.initial_height == 0 {
            return Err(ConfigError::InvalidInitialSize {
                width: self.initial_width,
                height: self.initial_height,
            });
        }

        // Largest logical size the initial layout or any container can produce
        let max_width = self.max_width.max(self.initial_width) as f64;
        let max_height = (self.max_width as f64 * self.aspect_ratio as f64)
            .max(self.min_height as f64)
            .max(self.initial_height as f64);
        let width = (max_width * density as f64).round() as u64;
        let height = (max_height * density as f64).round() as u64;
        if width.saturating_mul(height) > MAX_BUFFER_PIXELS {
            return Err(ConfigError::BufferTooLarge { width, height });
        }
        Ok(())
    }

    /// Pen width in buffer pixels
    pub fn buffer_stroke_width(&self) -> f32 {
        self.stroke_width * self.density_multiplier
    }
}

/// Intake service configuration
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Directory that receives uploaded blobs
    pub blob_dir: PathBuf,
    /// URL prefix under which stored blobs are served
    pub blob_base_url: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            blob_dir: PathBuf::from(DEFAULT_BLOB_DIR),
            blob_base_url: DEFAULT_BLOB_BASE_URL.to_string(),
        }
    }
}

impl IntakeConfig {
    /// Read from GUESTBOOK_BLOB_DIR and GUESTBOOK_BLOB_BASE_URL, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let blob_dir = match lookup(BLOB_DIR_VAR) {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
            _ => {
                info!("{BLOB_DIR_VAR} not set, using default: {DEFAULT_BLOB_DIR}");
                defaults.blob_dir
            }
        };
        let blob_base_url = match lookup(BLOB_BASE_URL_VAR) {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => defaults.blob_base_url,
        };
        Self {
            blob_dir,
            blob_base_url,
        }
    }
}
