//! Outline generators for the parametric shape tools.
//!
//! Every generator takes the gesture's anchor (where the pointer went down)
//! and the current cursor, and returns the full outline. Shapes are rebuilt
//! from scratch on every pointer move.

use std::f32::consts::{PI, TAU};

use egui::{Pos2, pos2};

use crate::stroke::ShapeKind;

pub const CIRCLE_SEGMENTS: usize = 36;
pub const STAR_VERTICES: usize = 10;
pub const HEART_SAMPLES: usize = 20;
pub const PENTAGON_VERTICES: usize = 5;

/// Outline for `kind` spanned by `anchor` and `cursor`.
pub fn shape_points(kind: ShapeKind, anchor: Pos2, cursor: Pos2) -> Vec<Pos2> {
    match kind {
        ShapeKind::Line => line(anchor, cursor),
        ShapeKind::Rectangle => rectangle(anchor, cursor),
        ShapeKind::Circle => circle(anchor, anchor.distance(cursor)),
        ShapeKind::Triangle => triangle(anchor, cursor),
        ShapeKind::Star => star(anchor, anchor.distance(cursor)),
        ShapeKind::Heart => heart(anchor, anchor.distance(cursor)),
        ShapeKind::Pentagon => pentagon(anchor, anchor.distance(cursor)),
    }
}

pub fn line(anchor: Pos2, cursor: Pos2) -> Vec<Pos2> {
    vec![anchor, cursor]
}

/// Axis-aligned, anchor and cursor at opposite corners, explicitly closed.
pub fn rectangle(anchor: Pos2, cursor: Pos2) -> Vec<Pos2> {
    vec![
        anchor,
        pos2(cursor.x, anchor.y),
        cursor,
        pos2(anchor.x, cursor.y),
        anchor,
    ]
}

/// 36 points, 10° apart, starting at angle zero.
pub fn circle(center: Pos2, radius: f32) -> Vec<Pos2> {
    regular_polygon(center, radius, CIRCLE_SEGMENTS, 0.0)
}

/// Apex on the anchor, base through the cursor mirrored around the anchor's vertical.
pub fn triangle(anchor: Pos2, cursor: Pos2) -> Vec<Pos2> {
    let mirrored = pos2(2.0 * anchor.x - cursor.x, cursor.y);
    vec![anchor, cursor, mirrored]
}

/// Five-pointed star, outer tips at `radius`, inner corners at half of it.
pub fn star(center: Pos2, radius: f32) -> Vec<Pos2> {
    let step = TAU / STAR_VERTICES as f32;
    (0..STAR_VERTICES)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { radius / 2.0 };
            let theta = i as f32 * step - PI / 2.0;
            polar(center, r, theta)
        })
        .collect()
}

/// Classic `16 sin³t, 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t` heart,
/// normalised so its half-width equals `radius`. Screen y points down, so the
/// curve is flipped to keep the lobes on top.
pub fn heart(center: Pos2, radius: f32) -> Vec<Pos2> {
    (0..HEART_SAMPLES)
        .map(|i| {
            let t = i as f32 * PI / 10.0;
            let x = t.sin().powi(3);
            let y = (13.0 * t.cos()
                - 5.0 * (2.0 * t).cos()
                - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos())
                / 16.0;
            pos2(center.x + radius * x, center.y - radius * y)
        })
        .collect()
}

/// Regular pentagon with its first vertex straight up.
pub fn pentagon(center: Pos2, radius: f32) -> Vec<Pos2> {
    regular_polygon(center, radius, PENTAGON_VERTICES, -PI / 2.0)
}

fn regular_polygon(center: Pos2, radius: f32, sides: usize, start: f32) -> Vec<Pos2> {
    let step = TAU / sides as f32;
    (0..sides)
        .map(|i| polar(center, radius, start + i as f32 * step))
        .collect()
}

fn polar(center: Pos2, radius: f32, theta: f32) -> Pos2 {
    pos2(center.x + radius * theta.cos(), center.y + radius * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(actual: Pos2, expected: Pos2) {
        assert!(
            actual.distance(expected) < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn rectangle_is_closed_over_opposite_corners() {
        let points = shape_points(ShapeKind::Rectangle, pos2(10.0, 10.0), pos2(50.0, 40.0));
        assert_eq!(
            points,
            vec![
                pos2(10.0, 10.0),
                pos2(50.0, 10.0),
                pos2(50.0, 40.0),
                pos2(10.0, 40.0),
                pos2(10.0, 10.0),
            ]
        );
    }

    #[test]
    fn circle_has_36_points_ten_degrees_apart() {
        let points = shape_points(ShapeKind::Circle, pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(points.len(), 36);
        assert_near(points[0], pos2(10.0, 0.0));
        assert_near(points[9], pos2(0.0, 10.0));
        assert_near(points[18], pos2(-10.0, 0.0));
    }

    #[test]
    fn triangle_mirrors_cursor_around_anchor() {
        let points = shape_points(ShapeKind::Triangle, pos2(100.0, 50.0), pos2(130.0, 90.0));
        assert_eq!(
            points,
            vec![pos2(100.0, 50.0), pos2(130.0, 90.0), pos2(70.0, 90.0)]
        );
    }

    #[test]
    fn star_alternates_outer_and_inner_radius() {
        let center = pos2(50.0, 50.0);
        let points = shape_points(ShapeKind::Star, center, pos2(50.0, 70.0));
        assert_eq!(points.len(), 10);
        for (i, point) in points.iter().enumerate() {
            let expected = if i % 2 == 0 { 20.0 } else { 10.0 };
            assert!((point.distance(center) - expected).abs() < 1e-3);
        }
        // first tip points up
        assert_near(points[0], pos2(50.0, 30.0));
    }

    #[test]
    fn pentagon_starts_at_the_top() {
        let points = shape_points(ShapeKind::Pentagon, pos2(0.0, 0.0), pos2(0.0, 10.0));
        assert_eq!(points.len(), 5);
        assert_near(points[0], pos2(0.0, -10.0));
        for point in &points {
            assert!((point.distance(pos2(0.0, 0.0)) - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn heart_has_20_samples_and_fits_its_radius() {
        let points = shape_points(ShapeKind::Heart, pos2(0.0, 0.0), pos2(16.0, 0.0));
        assert_eq!(points.len(), 20);
        // t = 0 is the notch between the lobes, above the center
        assert_near(points[0], pos2(0.0, -5.0));
        // t = π/2 is the widest point on the right
        assert!((points[5].x - 16.0).abs() < 1e-3);
        assert!(points.iter().all(|p| p.x.abs() <= 16.0 + 1e-3));
    }

    #[test]
    fn line_is_just_both_ends() {
        let points = shape_points(ShapeKind::Line, pos2(1.0, 2.0), pos2(3.0, 4.0));
        assert_eq!(points, vec![pos2(1.0, 2.0), pos2(3.0, 4.0)]);
    }

    #[test]
    fn zero_radius_collapses_onto_anchor() {
        let anchor = pos2(5.0, 5.0);
        let points = shape_points(ShapeKind::Circle, anchor, anchor);
        assert!(points.iter().all(|p| p.distance(anchor) < 1e-6));
    }
}
