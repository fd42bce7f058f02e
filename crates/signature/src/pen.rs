//! Pen rasterization for signature strokes
//!
//! Each segment is stamped as a capsule: every pixel whose center lies
//! within `radius` of the segment is painted. A zero-length segment is a
//! disc, so caps and joins are round and consecutive segments at any angle
//! overlap without seams.

use guestbook_ipc::Point;
use tracing::debug;

use crate::surface::CpuSurface;

/// Fixed pen style used for every stroke on a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenStyle {
    /// Full line width in buffer pixels
    pub width: f32,
    /// Ink color, RGBA8
    pub color: [u8; 4],
}

impl PenStyle {
    pub fn new(width: f32, color: [u8; 4]) -> Self {
        Self {
            width: width.max(0.0),
            color,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }
}

/// Distance from `p` to the segment `a`-`b`
#[inline]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + abx * t, a.y + aby * t))
}

/// Stamp a segment onto the surface.
///
/// Returns bounding box of affected region (x, y, width, height), or
/// None if the capsule misses the surface entirely.
pub fn stamp_segment(
    surface: &mut CpuSurface,
    from: Point,
    to: Point,
    pen: &PenStyle,
) -> Option<(u32, u32, u32, u32)> {
    let radius = pen.radius();
    if radius <= 0.0 {
        return None;
    }

    let x_min_f = (from.x.min(to.x) - radius).floor();
    let y_min_f = (from.y.min(to.y) - radius).floor();
    let x_max_f = (from.x.max(to.x) + radius).ceil();
    let y_max_f = (from.y.max(to.y) + radius).ceil();

    // Clamp to surface bounds
    let x_min = (x_min_f.max(0.0) as u32).min(surface.width);
    let y_min = (y_min_f.max(0.0) as u32).min(surface.height);
    let x_max = (x_max_f.max(0.0) as u32).min(surface.width);
    let y_max = (y_max_f.max(0.0) as u32).min(surface.height);

    if x_min >= x_max || y_min >= y_max {
        debug!(
            "stamp_segment: ({:.1}, {:.1}) -> ({:.1}, {:.1}) outside surface",
            from.x, from.y, to.x, to.y
        );
        return None;
    }

    for py in y_min..y_max {
        for px in x_min..x_max {
            // Sample at the pixel center
            let center = Point::new(px as f32 + 0.5, py as f32 + 0.5);
            if distance_to_segment(center, from, to) <= radius {
                surface.set_pixel(px, py, pen.color);
            }
        }
    }

    Some((x_min, y_min, x_max - x_min, y_max - y_min))
}
