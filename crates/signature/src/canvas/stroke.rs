//! Stroke transitions for the signature canvas

use guestbook_ipc::Point;
use tracing::debug;

use crate::renderer::StrokeRenderer;
use crate::stroke::Stroke;

use super::{CanvasState, SignatureCanvas};

impl<R: StrokeRenderer> SignatureCanvas<R> {
    /// Begin a stroke at a buffer-space point
    ///
    /// Valid from `Blank` and `IdleDirty`. A second pointer-down while
    /// already drawing commits the current stroke first.
    pub fn pointer_down(&mut self, at: Point) {
        let Some(renderer) = self.renderer.as_mut() else {
            debug!("pointer_down: no drawing surface, ignoring");
            return;
        };

        if let Some(stroke) = self.active.take() {
            renderer.end_stroke();
            self.strokes.push(stroke);
        }

        let stroke_id = self.next_stroke_id;
        self.next_stroke_id += 1;

        renderer.begin_stroke(at);
        self.active = Some(Stroke::begin(stroke_id, at));
        self.state = CanvasState::Drawing;
        debug!("Stroke {} started at ({:.1}, {:.1})", stroke_id, at.x, at.y);
    }

    /// Continue the active stroke to a buffer-space point
    pub fn pointer_move(&mut self, to: Point) {
        let (Some(renderer), Some(stroke)) = (self.renderer.as_mut(), self.active.as_mut()) else {
            return;
        };

        let from = stroke.push(to);
        renderer.append_point(from, to);
    }

    /// Commit the active stroke
    pub fn pointer_up(&mut self) {
        let Some(stroke) = self.active.take() else {
            return;
        };
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.end_stroke();
        }
        debug!(
            "Stroke {} committed ({} points)",
            stroke.stroke_id,
            stroke.len()
        );
        self.strokes.push(stroke);
        self.state = CanvasState::IdleDirty;
    }

    /// Pointer left the canvas; same as lifting it
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }
}
