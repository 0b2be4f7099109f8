#![cfg(feature = "egui")]

use egui::epaint::Shape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Stroke};

use crate::model::{Plot, PlotStatus};

use super::geometry::{GRID_STEP, MAP_HEIGHT, MAP_WIDTH, MapTransform, label_anchor};

/// Polygon outline color (neutral border).
pub const STROKE_COLOR: Color32 = Color32::from_rgb(148, 163, 184);
/// Label text color.
pub const LABEL_COLOR: Color32 = Color32::from_rgb(30, 41, 59);
/// Background grid line color.
pub const GRID_COLOR: Color32 = Color32::from_rgb(226, 232, 240);

/// Opaque fill color for a plot status.
///
/// The values match the original palette: occupied hsl(142,76%,36%),
/// vacant hsl(48,96%,53%), for_sale hsl(0,84%,60%), other hsl(210,40%,80%).
pub fn status_fill(status: PlotStatus) -> Color32 {
    match status {
        PlotStatus::Occupied => Color32::from_rgb(22, 163, 74),
        PlotStatus::Vacant => Color32::from_rgb(250, 204, 21),
        PlotStatus::ForSale => Color32::from_rgb(239, 68, 68),
        PlotStatus::Other => Color32::from_rgb(184, 204, 224),
    }
}

/// Fill with the hover/selection emphasis applied: opacity 0.6 normally,
/// 0.8 when emphasized.
pub fn fill_with_emphasis(status: PlotStatus, emphasized: bool) -> Color32 {
    let base = status_fill(status);
    let alpha = if emphasized { 204 } else { 153 };
    Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), alpha)
}

/// Outline stroke: width 1 normally, 2 when hovered or selected.
pub fn stroke_with_emphasis(emphasized: bool) -> Stroke {
    Stroke::new(if emphasized { 2.0 } else { 1.0 }, STROKE_COLOR)
}

/// Draw the 50×50 background grid across the map area.
pub fn draw_grid(painter: &Painter, transform: &MapTransform) {
    let stroke = Stroke::new(0.5, GRID_COLOR);
    let mut x = 0.0;
    while x <= MAP_WIDTH {
        painter.line_segment(
            [transform.to_screen((x, 0.0)), transform.to_screen((x, MAP_HEIGHT))],
            stroke,
        );
        x += GRID_STEP;
    }
    let mut y = 0.0;
    while y <= MAP_HEIGHT {
        painter.line_segment(
            [transform.to_screen((0.0, y)), transform.to_screen((MAP_WIDTH, y))],
            stroke,
        );
        y += GRID_STEP;
    }
}

/// Draw one plot polygon with its `№` label.
///
/// `screen_points` must be the plot's polygon already mapped to screen
/// space; `polygon` is the same polygon in map units (for the label anchor).
pub fn draw_plot(
    painter: &Painter,
    transform: &MapTransform,
    plot: &Plot,
    polygon: &[(f32, f32)],
    screen_points: Vec<Pos2>,
    emphasized: bool,
) {
    painter.add(Shape::convex_polygon(
        screen_points,
        fill_with_emphasis(plot.status, emphasized),
        stroke_with_emphasis(emphasized),
    ));
    if let Some(anchor) = label_anchor(polygon) {
        let font = FontId::proportional((12.0 * transform.scale).max(8.0));
        painter.text(
            transform.to_screen(anchor),
            Align2::LEFT_BOTTOM,
            format!("№{}", plot.plot_number),
            font,
            LABEL_COLOR,
        );
    }
}

/// Legend entries for the vector view: the three named statuses.
pub fn legend_entries() -> [(PlotStatus, &'static str); 3] {
    [
        (PlotStatus::Occupied, PlotStatus::Occupied.label_ru()),
        (PlotStatus::Vacant, PlotStatus::Vacant.label_ru()),
        (PlotStatus::ForSale, PlotStatus::ForSale.label_ru()),
    ]
}
