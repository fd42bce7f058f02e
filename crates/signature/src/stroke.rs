//! Stroke data: one pointer-down to pointer-up motion

use guestbook_ipc::Point;
use serde::Serialize;

/// An ordered, append-only sequence of buffer-space points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    /// Unique stroke identifier within a canvas
    pub stroke_id: u64,
    points: Vec<Point>,
}

impl Stroke {
    /// Start a stroke at its first point
    pub fn begin(stroke_id: u64, start: Point) -> Self {
        Self {
            stroke_id,
            points: vec![start],
        }
    }

    /// Append a point, returning the previous last point
    pub fn push(&mut self, point: Point) -> Point {
        // Never empty: constructed with a start point and only appended to
        let previous = self.last();
        self.points.push(point);
        previous
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs in drawing order
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}
