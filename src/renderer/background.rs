use egui::{Color32, Pos2, Vec2, pos2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{Primitive, Segment, closed_segments};
use crate::geometry::shapes::shape_points;
use crate::stroke::ShapeKind;

pub const GRID_SPACING: f32 = 40.0;
pub const LINE_SPACING: f32 = 32.0;
const DOT_CELL: f32 = 40.0;
const CONFETTI_CELL: f32 = 90.0;

const GRID_COLOR: Color32 = Color32::from_rgb(0xd6, 0xd6, 0xd6);
const RULE_COLOR: Color32 = Color32::from_rgb(0xa8, 0xc8, 0xf0);

const PASTELS: [Color32; 6] = [
    Color32::from_rgb(0xff, 0xb3, 0xba),
    Color32::from_rgb(0xff, 0xdf, 0xba),
    Color32::from_rgb(0xff, 0xff, 0xba),
    Color32::from_rgb(0xba, 0xff, 0xc9),
    Color32::from_rgb(0xba, 0xe1, 0xff),
    Color32::from_rgb(0xd7, 0xba, 0xff),
];

const CONFETTI_SHAPES: [ShapeKind; 5] = [
    ShapeKind::Circle,
    ShapeKind::Triangle,
    ShapeKind::Star,
    ShapeKind::Heart,
    ShapeKind::Pentagon,
];

/// Cosmetic underlay drawn beneath every stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundPattern {
    #[default]
    None,
    Grid,
    Lines,
    Dots,
    Confetti,
}

impl BackgroundPattern {
    pub const ALL: [BackgroundPattern; 5] = [
        Self::None,
        Self::Grid,
        Self::Lines,
        Self::Dots,
        Self::Confetti,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Plain",
            Self::Grid => "Grid",
            Self::Lines => "Lines",
            Self::Dots => "Dots",
            Self::Confetti => "Confetti",
        }
    }
}

/// Marks for `pattern` over a canvas of `size`.
///
/// Randomized patterns draw from an RNG seeded with `seed`, so the same seed
/// always yields the same layout.
pub fn pattern_primitives(pattern: BackgroundPattern, seed: u64, size: Vec2) -> Vec<Primitive> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }

    match pattern {
        BackgroundPattern::None => Vec::new(),
        BackgroundPattern::Grid => grid(size),
        BackgroundPattern::Lines => rules(size),
        BackgroundPattern::Dots => dots(size, &mut StdRng::seed_from_u64(seed)),
        BackgroundPattern::Confetti => confetti(size, &mut StdRng::seed_from_u64(seed)),
    }
}

fn hairline(start: Pos2, end: Pos2, color: Color32) -> Primitive {
    Primitive::Segment(Segment::between(start, end, 1.0, color, 1.0))
}

fn grid(size: Vec2) -> Vec<Primitive> {
    let columns = (1..)
        .map(|i| i as f32 * GRID_SPACING)
        .take_while(|x| *x < size.x)
        .map(|x| hairline(pos2(x, 0.0), pos2(x, size.y), GRID_COLOR));
    let rows = (1..)
        .map(|i| i as f32 * GRID_SPACING)
        .take_while(|y| *y < size.y)
        .map(|y| hairline(pos2(0.0, y), pos2(size.x, y), GRID_COLOR));
    columns.chain(rows).collect()
}

fn rules(size: Vec2) -> Vec<Primitive> {
    (1..)
        .map(|i| i as f32 * LINE_SPACING)
        .take_while(|y| *y < size.y)
        .map(|y| hairline(pos2(0.0, y), pos2(size.x, y), RULE_COLOR))
        .collect()
}

fn mark_count(size: Vec2, cell: f32) -> usize {
    ((size.x * size.y) / (cell * cell)).ceil() as usize
}

fn random_point(size: Vec2, rng: &mut StdRng) -> Pos2 {
    pos2(rng.gen_range(0.0..size.x), rng.gen_range(0.0..size.y))
}

fn random_pastel(rng: &mut StdRng) -> Color32 {
    PASTELS[rng.gen_range(0..PASTELS.len())]
}

fn dots(size: Vec2, rng: &mut StdRng) -> Vec<Primitive> {
    (0..mark_count(size, DOT_CELL))
        .map(|_| Primitive::Dot {
            center: random_point(size, rng),
            radius: rng.gen_range(2.0..5.0),
            color: random_pastel(rng),
            opacity: 1.0,
        })
        .collect()
}

fn confetti(size: Vec2, rng: &mut StdRng) -> Vec<Primitive> {
    let mut primitives = Vec::new();
    for _ in 0..mark_count(size, CONFETTI_CELL) {
        let center = random_point(size, rng);
        let radius: f32 = rng.gen_range(6.0..16.0);
        let kind = CONFETTI_SHAPES[rng.gen_range(0..CONFETTI_SHAPES.len())];
        let color = random_pastel(rng);
        let outline = shape_points(kind, center, center + vec2(radius, 0.0));
        primitives.extend(
            closed_segments(&outline, 2.0, color, 0.8)
                .into_iter()
                .map(Primitive::Segment),
        );
    }
    primitives
}
