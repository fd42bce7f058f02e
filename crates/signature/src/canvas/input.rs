//! Mouse and touch adapters for the signature canvas
//!
//! Both adapters map viewport positions through the same
//! [`crate::CoordinateMapper`] and feed the same stroke transitions.

use guestbook_ipc::{InputEvent, Point, ViewportRect};
use tracing::debug;

use crate::renderer::StrokeRenderer;

use super::SignatureCanvas;

impl<R: StrokeRenderer> SignatureCanvas<R> {
    /// Dispatch a viewport-space input event
    ///
    /// `rect` is the canvas element's displayed bounding rect at the time
    /// of the event.
    pub fn handle_input(&mut self, event: &InputEvent, rect: ViewportRect) {
        match event {
            InputEvent::MouseDown { x, y } => {
                if let Some(at) = self.map_client(Point::new(*x, *y), rect) {
                    self.pointer_down(at);
                }
            }
            InputEvent::MouseMove { x, y } => {
                if let Some(to) = self.map_client(Point::new(*x, *y), rect) {
                    self.pointer_move(to);
                }
            }
            InputEvent::TouchStart { touches } => {
                if let Some(at) = self.map_first_touch(touches, rect) {
                    self.pointer_down(at);
                }
            }
            InputEvent::TouchMove { touches } => {
                if let Some(to) = self.map_first_touch(touches, rect) {
                    self.pointer_move(to);
                }
            }
            InputEvent::MouseUp | InputEvent::TouchEnd => self.pointer_up(),
            InputEvent::MouseLeave => self.pointer_leave(),
        }
    }

    fn map_first_touch(&self, touches: &[Point], rect: ViewportRect) -> Option<Point> {
        let Some(first) = touches.first() else {
            debug!("Touch event without touch points, ignoring");
            return None;
        };
        self.map_client(*first, rect)
    }

    fn map_client(&self, client: Point, rect: ViewportRect) -> Option<Point> {
        let mapped = self.mapper.map(client, rect);
        if mapped.is_none() {
            debug!("Canvas has no displayed area, ignoring input");
        }
        mapped
    }
}
