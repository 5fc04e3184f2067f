use egui::{Painter, Pos2, Rect, Shape};

use super::{Primitive, Scene, Segment};

/// Oriented rectangle for `segment`, shifted from canvas-local space by `origin`.
fn segment_shape(segment: &Segment, origin: Pos2) -> Shape {
    let offset = origin.to_vec2();
    let corners = segment.corners().iter().map(|c| *c + offset).collect();
    Shape::convex_polygon(
        corners,
        segment.color.gamma_multiply(segment.opacity),
        egui::Stroke::NONE,
    )
}

fn primitive_shape(primitive: &Primitive, origin: Pos2) -> Shape {
    match primitive {
        Primitive::Segment(segment) => segment_shape(segment, origin),
        Primitive::Dot {
            center,
            radius,
            color,
            opacity,
        } => Shape::circle_filled(*center + origin.to_vec2(), *radius, color.gamma_multiply(*opacity)),
    }
}

/// Paint a scene with its top-left corner at `origin`.
pub fn paint_scene(painter: &Painter, origin: Pos2, scene: &Scene) {
    let canvas = Rect::from_min_size(origin, scene.size);
    let painter = painter.with_clip_rect(canvas);
    painter.rect_filled(canvas, 0.0, scene.background);
    painter.extend(scene.primitives.iter().map(|p| primitive_shape(p, origin)));
}
