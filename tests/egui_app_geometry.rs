#![cfg(feature = "egui")]

use egui::{Pos2, Rect, pos2, vec2};
use plotmap::egui_app::{MAP_HEIGHT, MAP_WIDTH, MapTransform, polygon_contains};

#[test]
fn test_fit_maps_corners_into_the_rect() {
    // 532×432 with a 16px margin leaves exactly 500×400, so scale is 1 and
    // the map hugs the margins.
    let avail = Rect::from_min_size(pos2(0.0, 0.0), vec2(532.0, 432.0));
    let transform = MapTransform::fit(avail, 16.0);
    assert!((transform.scale - 1.0).abs() < 1e-4);
    assert_eq!(transform.to_screen((0.0, 0.0)), pos2(16.0, 16.0));
    assert_eq!(
        transform.to_screen((MAP_WIDTH, MAP_HEIGHT)),
        pos2(516.0, 416.0)
    );
}

#[test]
fn test_fit_preserves_aspect_and_centers() {
    let avail = Rect::from_min_size(pos2(0.0, 0.0), vec2(1032.0, 432.0));
    let transform = MapTransform::fit(avail, 16.0);
    // Height is the limiting dimension.
    assert!((transform.scale - 1.0).abs() < 1e-4);
    let rect = transform.map_rect();
    assert!((rect.center().x - avail.center().x).abs() < 1e-3);
    assert!((rect.center().y - avail.center().y).abs() < 1e-3);
}

#[test]
fn test_polygon_contains_square() {
    let square = [
        pos2(10.0, 10.0),
        pos2(20.0, 10.0),
        pos2(20.0, 20.0),
        pos2(10.0, 20.0),
    ];
    assert!(polygon_contains(&square, pos2(15.0, 15.0)));
    assert!(!polygon_contains(&square, pos2(25.0, 15.0)));
    assert!(!polygon_contains(&square, pos2(15.0, 5.0)));
}

#[test]
fn test_polygon_contains_concave() {
    // L-shape; the notch at the top-right is outside.
    let shape = [
        pos2(0.0, 0.0),
        pos2(10.0, 0.0),
        pos2(10.0, 5.0),
        pos2(5.0, 5.0),
        pos2(5.0, 10.0),
        pos2(0.0, 10.0),
    ];
    assert!(polygon_contains(&shape, pos2(2.0, 8.0)));
    assert!(polygon_contains(&shape, pos2(8.0, 2.0)));
    assert!(!polygon_contains(&shape, pos2(8.0, 8.0)));
}

#[test]
fn test_degenerate_polygons_contain_nothing() {
    assert!(!polygon_contains(&[], pos2(0.0, 0.0)));
    assert!(!polygon_contains(&[pos2(1.0, 1.0), pos2(2.0, 2.0)], pos2(1.5, 1.5)));
}

#[test]
fn test_label_anchor_offsets_first_point() {
    let transform = MapTransform::fit(
        Rect::from_min_size(Pos2::ZERO, vec2(532.0, 432.0)),
        16.0,
    );
    // The label sits +10/+15 map units from the first coordinate pair.
    let anchor = plotmap::egui_app::LABEL_OFFSET;
    assert_eq!(anchor.x, 10.0);
    assert_eq!(anchor.y, 15.0);
    let screen = transform.to_screen((50.0 + anchor.x, 50.0 + anchor.y));
    assert_eq!(screen, pos2(76.0, 81.0));
}
