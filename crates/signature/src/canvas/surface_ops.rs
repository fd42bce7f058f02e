//! Surface operations for the signature canvas: clear, resize and save

use tracing::{debug, info, warn};

use crate::encode::{CaptureResult, EncodeError, png_to_data_uri};
use crate::layout::CanvasLayout;
use crate::renderer::StrokeRenderer;
use crate::transform::CoordinateMapper;

use super::{CanvasState, SignatureCanvas};

impl<R: StrokeRenderer> SignatureCanvas<R> {
    /// Repaint the surface white and discard every stroke
    pub fn clear(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        renderer.clear();
        self.active = None;
        self.strokes.clear();
        self.state = CanvasState::Blank;
        debug!("Canvas cleared");
    }

    /// Fit the canvas to a new container width
    ///
    /// The buffer is reallocated blank, so committed and in-progress
    /// strokes are lost.
    pub fn resize(&mut self, container_width: f32) -> CanvasLayout {
        let layout = CanvasLayout::for_container(container_width, &self.config);
        self.apply_layout(layout);
        layout
    }

    /// Reinitialize the buffer at an explicit logical layout
    pub fn apply_layout(&mut self, layout: CanvasLayout) {
        let density = self.config.density_multiplier;
        let (width, height) = layout.physical_size(density);

        self.layout = layout;
        self.mapper = CoordinateMapper::new(layout, density);
        self.active = None;
        self.strokes.clear();
        self.state = CanvasState::Blank;

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.reinitialize(width, height);
        }
        info!(
            "Canvas laid out at {}x{} ({}x{} buffer)",
            layout.width, layout.height, width, height
        );
    }

    /// Encode the current raster, or Ok(None) if there is nothing to save
    pub fn try_save(&self) -> Result<Option<CaptureResult>, EncodeError> {
        if self.state != CanvasState::IdleDirty {
            debug!("Save rejected in state {:?}: nothing to save", self.state);
            return Ok(None);
        }
        let Some(renderer) = self.renderer.as_ref() else {
            return Ok(None);
        };

        let (width, height) = renderer.size();
        let png = renderer.encode_png()?;
        info!(
            "Signature captured: {}x{}, {} strokes, {} PNG bytes",
            width,
            height,
            self.strokes.len(),
            png.len()
        );
        Ok(Some(CaptureResult {
            data_uri: png_to_data_uri(&png),
            width,
            height,
        }))
    }

    /// Encode the current raster as a PNG data URI
    ///
    /// Returns None on a blank canvas, while a stroke is in progress, or
    /// when encoding fails. The surface is not modified.
    pub fn save(&self) -> Option<CaptureResult> {
        self.try_save().unwrap_or_else(|e| {
            warn!("Failed to encode signature: {e}");
            None
        })
    }
}
