use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

/// Opacity every spray segment is rendered with, whatever the stroke asks for.
pub const DEFAULT_SPRAY_OPACITY: f32 = 0.5;

/// Fewest points a stroke needs before it can be committed.
pub const MIN_STROKE_POINTS: usize = 2;

/// Free-hand brush flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrushKind {
    Pen,
    Brush,
    Marker,
    Spray,
}

impl BrushKind {
    pub const ALL: [BrushKind; 4] = [Self::Pen, Self::Brush, Self::Marker, Self::Spray];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Brush => "Brush",
            Self::Marker => "Marker",
            Self::Spray => "Spray",
        }
    }
}

/// Parametric shapes drawn from an anchor and a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Triangle,
    Star,
    Heart,
    Pentagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        Self::Line,
        Self::Rectangle,
        Self::Circle,
        Self::Triangle,
        Self::Star,
        Self::Heart,
        Self::Pentagon,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
            Self::Star => "Star",
            Self::Heart => "Heart",
            Self::Pentagon => "Pentagon",
        }
    }

    /// Closed shapes get an extra segment from the last point back to the first.
    pub fn is_closed(self) -> bool {
        !matches!(self, Self::Line)
    }
}

/// How a stroke's points are interpreted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokeKind {
    Brush(BrushKind),
    Shape(ShapeKind),
}

impl Default for StrokeKind {
    fn default() -> Self {
        Self::Brush(BrushKind::Pen)
    }
}

impl StrokeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Brush(brush) => brush.label(),
            Self::Shape(shape) => shape.label(),
        }
    }

    pub fn is_shape(self) -> bool {
        matches!(self, Self::Shape(_))
    }
}

// Immutable, committed stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStroke")]
pub struct Stroke {
    points: Vec<Pos2>,
    #[serde(with = "crate::color::hex")]
    color: Color32,
    size: f32,
    kind: StrokeKind,
    opacity: f32,
}

impl Stroke {
    /// Build a stroke, or `None` when there are too few points to draw anything.
    ///
    /// Opacity is clamped into `[0, 1]`.
    pub fn new(
        points: Vec<Pos2>,
        color: Color32,
        size: f32,
        kind: StrokeKind,
        opacity: f32,
    ) -> Option<Self> {
        if points.len() < MIN_STROKE_POINTS {
            return None;
        }
        Some(Self {
            points,
            color,
            size,
            kind,
            opacity: opacity.clamp(0.0, 1.0),
        })
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

#[derive(Deserialize)]
struct RawStroke {
    points: Vec<Pos2>,
    #[serde(with = "crate::color::hex")]
    color: Color32,
    size: f32,
    kind: StrokeKind,
    opacity: f32,
}

impl TryFrom<RawStroke> for Stroke {
    type Error = String;

    fn try_from(raw: RawStroke) -> Result<Self, Self::Error> {
        let count = raw.points.len();
        Stroke::new(raw.points, raw.color, raw.size, raw.kind, raw.opacity)
            .ok_or_else(|| format!("stroke needs at least {MIN_STROKE_POINTS} points, got {count}"))
    }
}

// Stroke still under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStroke {
    points: Vec<Pos2>,
    color: Color32,
    size: f32,
    kind: StrokeKind,
    opacity: f32,
}

impl ActiveStroke {
    pub fn new(color: Color32, size: f32, kind: StrokeKind, opacity: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            size,
            kind,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    /// Replace the whole point list; shapes are redefined on every move.
    pub fn set_points(&mut self, points: Vec<Pos2>) {
        self.points = points;
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Freeze into a committed stroke. `None` for single taps.
    pub fn into_stroke(self) -> Option<Stroke> {
        Stroke::new(self.points, self.color, self.size, self.kind, self.opacity)
    }
}
