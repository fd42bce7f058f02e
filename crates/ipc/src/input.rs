//! Pointer input events delivered to the signature canvas.

use serde::{Deserialize, Serialize};

/// A 2-D position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Displayed bounding rectangle of the canvas element, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Mouse and touch events in viewport coordinates.
///
/// Both sources drive the same stroke operations; touch events carry the
/// active touch list and only the first touch is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    MouseDown { x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp,
    MouseLeave,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_input_event_tagging() {
        let json = serde_json::to_string(&InputEvent::MouseDown { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(json, r#"{"type":"MouseDown","data":{"x":1.0,"y":2.0}}"#);

        let parsed: InputEvent = serde_json::from_str(r#"{"type":"TouchEnd"}"#).unwrap();
        assert_eq!(parsed, InputEvent::TouchEnd);
    }
}
