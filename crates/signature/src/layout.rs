//! Canvas layout: logical size derived from the container width

use guestbook_config::SignatureConfig;
use serde::{Deserialize, Serialize};

/// Logical (CSS pixel) size of the signature canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
}

impl CanvasLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Initial layout before the container has been measured
    pub fn initial(config: &SignatureConfig) -> Self {
        Self::new(config.initial_width, config.initial_height)
    }

    /// Fit the canvas to a container of the given width
    ///
    /// Width is the container minus padding, capped at `max_width`; height
    /// follows the aspect ratio but never drops below `min_height`.
    pub fn for_container(container_width: f32, config: &SignatureConfig) -> Self {
        let available = (container_width - config.container_padding as f32).max(1.0);
        let width = available.min(config.max_width as f32);
        let height = (width * config.aspect_ratio).max(config.min_height as f32);
        Self::new(width.round() as u32, height.round() as u32)
    }

    /// Buffer size for a density multiplier
    pub fn physical_size(&self, density: f32) -> (u32, u32) {
        (
            (self.width as f32 * density).round() as u32,
            (self.height as f32 * density).round() as u32,
        )
    }
}
