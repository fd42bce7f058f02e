//! Renderer seam for the signature canvas
//!
//! The canvas state machine only talks to a [`StrokeRenderer`], so a
//! hardware-backed canvas can replace the software rasterizer without
//! touching transition logic.

use guestbook_ipc::Point;
use tracing::debug;

use crate::encode::{EncodeError, encode_png};
use crate::pen::{PenStyle, stamp_segment};
use crate::surface::CpuSurface;

/// Narrow drawing interface driven by [`crate::SignatureCanvas`]
pub trait StrokeRenderer {
    /// Buffer size in physical pixels
    fn size(&self) -> (u32, u32);

    /// Reallocate the buffer at a new size, blank
    fn reinitialize(&mut self, width: u32, height: u32);

    /// Repaint the whole buffer with the background color
    fn clear(&mut self);

    /// Start a stroke path at `at`
    fn begin_stroke(&mut self, at: Point);

    /// Render a connected segment of the active stroke
    fn append_point(&mut self, from: Point, to: Point);

    /// Close the active stroke path
    fn end_stroke(&mut self);

    /// Encode the current buffer as PNG
    fn encode_png(&self) -> Result<Vec<u8>, EncodeError>;
}

/// CPU rasterizer over an RGBA8 [`CpuSurface`]
#[derive(Debug, Clone)]
pub struct SoftwareRenderer {
    surface: CpuSurface,
    pen: PenStyle,
    background: [u8; 4],
}

impl SoftwareRenderer {
    pub fn new(width: u32, height: u32, pen: PenStyle, background: [u8; 4]) -> Self {
        Self {
            surface: CpuSurface::new(width, height, background),
            pen,
            background,
        }
    }

    /// Read-only view of the backing surface
    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }

    pub fn pen(&self) -> &PenStyle {
        &self.pen
    }

    pub fn background(&self) -> [u8; 4] {
        self.background
    }
}

impl StrokeRenderer for SoftwareRenderer {
    fn size(&self) -> (u32, u32) {
        (self.surface.width, self.surface.height)
    }

    fn reinitialize(&mut self, width: u32, height: u32) {
        self.surface.reinitialize(width, height, self.background);
    }

    fn clear(&mut self) {
        self.surface.clear(self.background);
    }

    fn begin_stroke(&mut self, at: Point) {
        // A tap leaves a dot the size of the pen
        stamp_segment(&mut self.surface, at, at, &self.pen);
    }

    fn append_point(&mut self, from: Point, to: Point) {
        if let Some((x, y, w, h)) = stamp_segment(&mut self.surface, from, to, &self.pen) {
            debug!("    -> affected region: ({}, {}) {}x{}", x, y, w, h);
        }
    }

    fn end_stroke(&mut self) {}

    fn encode_png(&self) -> Result<Vec<u8>, EncodeError> {
        encode_png(
            self.surface.width,
            self.surface.height,
            self.surface.as_bytes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn renderer() -> SoftwareRenderer {
        SoftwareRenderer::new(64, 32, PenStyle::new(6.0, BLACK), WHITE)
    }

    #[test]
    fn test_renderer_starts_blank() {
        let renderer = renderer();
        assert_eq!(renderer.size(), (64, 32));
        assert!(renderer.surface().is_uniform(WHITE));
    }

    #[test]
    fn test_begin_stroke_leaves_dot() {
        let mut renderer = renderer();
        renderer.begin_stroke(Point::new(10.0, 10.0));
        assert_eq!(renderer.surface().get_pixel(10, 10), Some(BLACK));
        assert_eq!(renderer.surface().get_pixel(20, 10), Some(WHITE));
    }

    #[test]
    fn test_clear_and_reinitialize() {
        let mut renderer = renderer();
        renderer.begin_stroke(Point::new(10.0, 10.0));
        renderer.append_point(Point::new(10.0, 10.0), Point::new(50.0, 20.0));

        renderer.clear();
        assert!(renderer.surface().is_uniform(WHITE));

        renderer.append_point(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        renderer.reinitialize(32, 16);
        assert_eq!(renderer.size(), (32, 16));
        assert!(renderer.surface().is_uniform(WHITE));
    }

    #[test]
    fn test_encode_png_signature() {
        let renderer = renderer();
        let png = renderer.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
