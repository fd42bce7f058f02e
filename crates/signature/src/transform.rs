//! Viewport to buffer coordinate mapping
//!
//! The buffer is allocated at `logical size * density` and displayed at
//! whatever size the host lays it out at. Pointer positions arrive in
//! viewport space and are mapped with the ratio of physical buffer size to
//! displayed size, per axis.

use guestbook_ipc::{Point, ViewportRect};

use crate::layout::CanvasLayout;

/// Maps viewport positions into surface-buffer pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    /// Physical pixels per logical pixel
    pub density: f32,
    /// Buffer width in physical pixels
    pub buffer_width: u32,
    /// Buffer height in physical pixels
    pub buffer_height: u32,
}

impl CoordinateMapper {
    pub fn new(layout: CanvasLayout, density: f32) -> Self {
        let (buffer_width, buffer_height) = layout.physical_size(density);
        Self {
            density,
            buffer_width,
            buffer_height,
        }
    }

    /// Map a viewport position using the displayed rect of the canvas
    ///
    /// Returns None when the rect has no area (canvas not laid out).
    pub fn map(&self, client: Point, rect: ViewportRect) -> Option<Point> {
        if !(rect.width > 0.0) || !(rect.height > 0.0) {
            return None;
        }
        let scale_x = self.buffer_width as f32 / rect.width;
        let scale_y = self.buffer_height as f32 / rect.height;
        Some(Point::new(
            (client.x - rect.left) * scale_x,
            (client.y - rect.top) * scale_y,
        ))
    }

    /// Map a logical position when the canvas is displayed at its logical size
    pub fn logical_to_buffer(&self, logical: Point) -> Point {
        Point::new(logical.x * self.density, logical.y * self.density)
    }
}
