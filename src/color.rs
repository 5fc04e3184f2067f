//! Hex color helpers.
//!
//! Stroke and background colors travel as `#rrggbb` strings at the edges of the
//! crate (config files, saved app state). Internally they are [`Color32`].

use egui::Color32;

use crate::error::ColorParseError;

/// Parse `#rrggbb` or `#rrggbbaa` into an unmultiplied color.
pub fn parse_hex(s: &str) -> Result<Color32, ColorParseError> {
    let digits = s
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::MissingHash(s.to_owned()))?;

    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorParseError::InvalidLength(digits.len()));
    }

    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| ColorParseError::InvalidDigit(s.to_owned()))
    };

    let r = channel(0)?;
    let g = channel(2)?;
    let b = channel(4)?;
    let a = if digits.len() == 8 { channel(6)? } else { 255 };

    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when it is not opaque.
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// `#[serde(with = "crate::color::hex")]` for `Color32` fields.
pub mod hex {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "crate::color::hex_list")]` for `Vec<Color32>` fields.
pub mod hex_list {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(colors: &[Color32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(colors.iter().map(|c| super::to_hex(*c)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Color32>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| super::parse_hex(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
