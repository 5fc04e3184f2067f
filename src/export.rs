//! Flattening a scene into a raster image for saving or handing off.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};
use egui::{Color32, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ExportError;
use crate::renderer::{Primitive, Scene, Segment};
use crate::util::time;

/// A flattened drawing plus the metadata a document store wants with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub id: Uuid,
    pub name: String,
    pub owner_id: String,
    /// Seconds since the UNIX epoch
    pub created_at: u64,
    /// `data:image/png;base64,...`
    pub data_uri: String,
}

/// Rasterize `scene` at one pixel per canvas unit.
pub fn rasterize(scene: &Scene) -> Result<RgbaImage, ExportError> {
    let width = scene.size.x.round().max(0.0) as u32;
    let height = scene.size.y.round().max(0.0) as u32;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas { width, height });
    }

    let [r, g, b, _] = scene.background.to_srgba_unmultiplied();
    let mut image = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Segment(segment) => fill_segment(&mut image, segment),
            Primitive::Dot {
                center,
                radius,
                color,
                opacity,
            } => fill_dot(&mut image, *center, *radius, *color, *opacity),
        }
    }

    Ok(image)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(png))
}

/// A drawing written to disk, plus the record to hand to a document store.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDrawing {
    pub path: PathBuf,
    pub record: DrawingRecord,
}

/// Flatten `scene`, write it as `<dir>/<name>_<timestamp>.png` (creating `dir`
/// if needed) and wrap the same PNG into a [`DrawingRecord`] for `owner_id`.
pub fn save_drawing(
    scene: &Scene,
    dir: &Path,
    name: &str,
    owner_id: &str,
) -> Result<SavedDrawing, ExportError> {
    let png = encode_png(&rasterize(scene)?)?;
    let created_at = time::timestamp_secs();

    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(name, created_at));
    fs::write(&path, &png)?;

    let record = DrawingRecord {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        owner_id: owner_id.to_owned(),
        created_at,
        data_uri: png_data_uri(&png),
    };
    info!(
        "Saved drawing {} for {} to {}",
        record.id,
        record.owner_id,
        path.display()
    );
    Ok(SavedDrawing { path, record })
}

/// File-system safe `<name>_<timestamp>.png`.
pub fn file_name(name: &str, timestamp: u64) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "drawing".to_owned() } else { stem };
    format!("{stem}_{timestamp}.png")
}

fn blend(image: &mut RgbaImage, x: u32, y: u32, color: Color32, opacity: f32) {
    let [sr, sg, sb, sa] = color.to_srgba_unmultiplied();
    let alpha = (sa as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let pixel = image.get_pixel_mut(x, y);
    let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
    let Rgba([dr, dg, db, _]) = *pixel;
    *pixel = Rgba([mix(sr, dr), mix(sg, dg), mix(sb, db), 255]);
}

/// Pixel range covering `[min, max]`, clipped to `[0, limit)`.
fn pixel_span(min: f32, max: f32, limit: u32) -> std::ops::Range<u32> {
    let start = min.floor().max(0.0) as u32;
    let end = (max.ceil().max(0.0) as u32).min(limit);
    start..end.max(start)
}

fn fill_segment(image: &mut RgbaImage, segment: &Segment) {
    let corners = segment.corners();
    let (mut min, mut max) = (corners[0], corners[0]);
    for corner in &corners[1..] {
        min = min.min(*corner);
        max = max.max(*corner);
    }

    let center = segment.center();
    let (sin, cos) = segment.angle.sin_cos();
    let half_length = segment.length / 2.0;
    let half_thickness = segment.thickness / 2.0;

    for y in pixel_span(min.y, max.y, image.height()) {
        for x in pixel_span(min.x, max.x, image.width()) {
            let d = Pos2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            let along = d.x * cos + d.y * sin;
            let across = -d.x * sin + d.y * cos;
            if along.abs() <= half_length && across.abs() <= half_thickness {
                blend(image, x, y, segment.color, segment.opacity);
            }
        }
    }
}

fn fill_dot(image: &mut RgbaImage, center: Pos2, radius: f32, color: Color32, opacity: f32) {
    for y in pixel_span(center.y - radius, center.y + radius, image.height()) {
        for x in pixel_span(center.x - radius, center.x + radius, image.width()) {
            let p = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if p.distance(center) <= radius {
                blend(image, x, y, color, opacity);
            }
        }
    }
}
