//! Per-stroke undo for the signature canvas
//!
//! The raster is flattened, so undo repaints the background and replays
//! every remaining committed stroke through the renderer.

use tracing::debug;

use crate::renderer::StrokeRenderer;
use crate::stroke::Stroke;

use super::{CanvasState, SignatureCanvas};

impl<R: StrokeRenderer> SignatureCanvas<R> {
    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty() && self.state != CanvasState::Drawing
    }

    /// Remove the most recently committed stroke
    ///
    /// Returns true if a stroke was removed. Undoing the only stroke
    /// returns the canvas to `Blank`.
    pub fn undo_last_stroke(&mut self) -> bool {
        if self.state == CanvasState::Drawing {
            debug!("Undo: stroke in progress, ignoring");
            return false;
        }
        if self.renderer.is_none() {
            return false;
        }
        let Some(removed) = self.strokes.pop() else {
            debug!("Undo: no strokes available");
            return false;
        };

        debug!(
            "Undoing stroke {} ({} strokes remain)",
            removed.stroke_id,
            self.strokes.len()
        );
        self.replay();

        self.state = if self.strokes.is_empty() {
            CanvasState::Blank
        } else {
            CanvasState::IdleDirty
        };
        true
    }

    /// Repaint the surface from the committed stroke list
    pub(crate) fn replay(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        renderer.clear();
        for stroke in &self.strokes {
            replay_stroke(renderer, stroke);
        }
    }
}

fn replay_stroke<R: StrokeRenderer>(renderer: &mut R, stroke: &Stroke) {
    renderer.begin_stroke(stroke.first());
    for (from, to) in stroke.segments() {
        renderer.append_point(from, to);
    }
    renderer.end_stroke();
}
