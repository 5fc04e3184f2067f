//! Canvas state to drawable primitives.
//!
//! Nothing here caches: [`Renderer::build_scene`] is recomputed from the
//! stroke list every frame. Every stroke becomes a run of [`Segment`]s, thin
//! rectangles rotated to follow consecutive points.

pub mod background;
mod painter;

pub use painter::paint_scene;

use egui::{Color32, Pos2, Vec2, vec2};

use crate::canvas::CanvasState;
use crate::geometry::segment_angle;
use crate::stroke::{BrushKind, DEFAULT_SPRAY_OPACITY, MIN_STROKE_POINTS, StrokeKind};

/// One oriented rectangle between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Pos2,
    pub end: Pos2,
    /// `atan2(dy, dx)` of `start -> end`
    pub angle: f32,
    pub length: f32,
    pub thickness: f32,
    pub color: Color32,
    pub opacity: f32,
}

impl Segment {
    pub fn between(start: Pos2, end: Pos2, thickness: f32, color: Color32, opacity: f32) -> Self {
        Self {
            start,
            end,
            angle: segment_angle(start, end),
            length: start.distance(end),
            thickness,
            color,
            opacity,
        }
    }

    pub fn center(&self) -> Pos2 {
        self.start.lerp(self.end, 0.5)
    }

    /// Corners of the rectangle, counter-clockwise from the start side.
    pub fn corners(&self) -> [Pos2; 4] {
        let dir = Vec2::angled(self.angle) * (self.length / 2.0);
        let normal = vec2(-self.angle.sin(), self.angle.cos()) * (self.thickness / 2.0);
        let c = self.center();
        [c - dir - normal, c + dir - normal, c + dir + normal, c - dir + normal]
    }
}

/// Something the painter or the rasterizer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Segment(Segment),
    Dot {
        center: Pos2,
        radius: f32,
        color: Color32,
        opacity: f32,
    },
}

/// A fully derived picture, in canvas-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Vec2,
    pub background: Color32,
    /// Back to front
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Segment(segment) => Some(segment),
            Primitive::Dot { .. } => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    spray_opacity: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_SPRAY_OPACITY)
    }
}

impl Renderer {
    pub fn new(spray_opacity: f32) -> Self {
        Self {
            spray_opacity: spray_opacity.clamp(0.0, 1.0),
        }
    }

    /// Derive the picture: background pattern, committed strokes oldest first,
    /// then the stroke under the pointer on top.
    pub fn build_scene(&self, canvas: &CanvasState, size: Vec2) -> Scene {
        let mut primitives = background::pattern_primitives(
            canvas.background_pattern(),
            canvas.pattern_seed(),
            size,
        );

        for stroke in canvas.strokes() {
            self.push_stroke(
                &mut primitives,
                stroke.points(),
                stroke.kind(),
                stroke.size(),
                stroke.color(),
                stroke.opacity(),
            );
        }

        if let Some(active) = canvas.active_stroke() {
            self.push_stroke(
                &mut primitives,
                active.points(),
                active.kind(),
                active.size(),
                active.color(),
                active.opacity(),
            );
        }

        Scene {
            size,
            background: canvas.background_color(),
            primitives,
        }
    }

    fn push_stroke(
        &self,
        out: &mut Vec<Primitive>,
        points: &[Pos2],
        kind: StrokeKind,
        size: f32,
        color: Color32,
        opacity: f32,
    ) {
        if points.len() < MIN_STROKE_POINTS {
            return;
        }

        let segments = match kind {
            StrokeKind::Shape(shape) if shape.is_closed() => {
                closed_segments(points, size, color, opacity)
            }
            StrokeKind::Shape(_) => {
                let (first, last) = (points[0], points[points.len() - 1]);
                vec![Segment::between(first, last, size, color, opacity)]
            }
            StrokeKind::Brush(BrushKind::Spray) => {
                open_segments(points, size, color, self.spray_opacity)
            }
            StrokeKind::Brush(_) => open_segments(points, size, color, opacity),
        };
        out.extend(segments.into_iter().map(Primitive::Segment));
    }
}

/// Consecutive pairs, `n - 1` segments for `n` points.
pub(crate) fn open_segments(
    points: &[Pos2],
    thickness: f32,
    color: Color32,
    opacity: f32,
) -> Vec<Segment> {
    points
        .windows(2)
        .map(|pair| Segment::between(pair[0], pair[1], thickness, color, opacity))
        .collect()
}

/// Consecutive pairs plus the wrap from last back to first, `n` segments.
pub(crate) fn closed_segments(
    points: &[Pos2],
    thickness: f32,
    color: Color32,
    opacity: f32,
) -> Vec<Segment> {
    let mut segments = open_segments(points, thickness, color, opacity);
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        segments.push(Segment::between(last, first, thickness, color, opacity));
    }
    segments
}
