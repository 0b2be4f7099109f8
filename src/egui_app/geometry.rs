#![cfg(feature = "egui")]

use egui::{Pos2, Rect, Vec2};

/// Width of the fixed map coordinate space (the original viewBox).
pub const MAP_WIDTH: f32 = 500.0;
/// Height of the fixed map coordinate space.
pub const MAP_HEIGHT: f32 = 400.0;
/// Background grid step, in map units.
pub const GRID_STEP: f32 = 50.0;
/// Label offset from a polygon's first coordinate pair, in map units.
/// A best-effort anchor, not a centroid.
pub const LABEL_OFFSET: Vec2 = Vec2::new(10.0, 15.0);

/// Uniform mapping from the fixed 500×400 map space onto a screen rect.
///
/// The map keeps its aspect ratio and is centered in the available rect,
/// inset by `margin` on every side.
#[derive(Debug, Clone, Copy)]
pub struct MapTransform {
    pub scale: f32,
    pub origin: Pos2,
}

impl MapTransform {
    pub fn fit(avail: Rect, margin: f32) -> Self {
        let sx = (avail.width() - 2.0 * margin) / MAP_WIDTH;
        let sy = (avail.height() - 2.0 * margin) / MAP_HEIGHT;
        let scale = sx.min(sy).max(0.05);
        let size = Vec2::new(MAP_WIDTH * scale, MAP_HEIGHT * scale);
        let origin = avail.center() - size * 0.5;
        Self { scale, origin }
    }

    /// Map a point in map coordinates to screen coordinates.
    pub fn to_screen(&self, point: (f32, f32)) -> Pos2 {
        Pos2::new(
            self.origin.x + point.0 * self.scale,
            self.origin.y + point.1 * self.scale,
        )
    }

    /// Screen rect covered by the full 500×400 map space.
    pub fn map_rect(&self) -> Rect {
        Rect::from_min_size(self.origin, Vec2::new(MAP_WIDTH, MAP_HEIGHT) * self.scale)
    }
}

/// Even-odd ray-cast point-in-polygon test in screen space.
///
/// Works for arbitrary simple polygons; degenerate inputs (fewer than three
/// points) are never inside.
pub fn polygon_contains(polygon: &[Pos2], point: Pos2) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);
        let intersects =
            ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi + 1e-9) + xi);
        if intersects {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Anchor position (in map units) for a plot's `№` label: the polygon's
/// first coordinate pair plus [`LABEL_OFFSET`].
pub fn label_anchor(polygon: &[(f32, f32)]) -> Option<(f32, f32)> {
    let first = polygon.first()?;
    Some((first.0 + LABEL_OFFSET.x, first.1 + LABEL_OFFSET.y))
}
