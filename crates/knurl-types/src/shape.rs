use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The kind of cutter a pattern stamps into a face.
///
/// Parsed once at the descriptor boundary; everything downstream dispatches
/// on this variant, never on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// A straight groove across the face.
    Line,
    /// A rectangle with independent width and height.
    Rect,
    /// A rectangle constrained to width = height.
    Square,
    /// A circle of diameter `width`.
    Circle,
    /// A regular n-gon with flat-to-flat size `width`.
    Polygon(u32),
}

impl ShapeKind {
    /// Parse a shape word from the descriptor alias table.
    ///
    /// Accepts `line`, `rect`/`rectangle`, `square`, `circle`,
    /// `hexagon`/`hex`, `octagon`/`oct`, `triangle`/`tri`.
    pub fn parse_word(word: &str) -> Option<ShapeKind> {
        match word {
            "line" => Some(ShapeKind::Line),
            "rect" | "rectangle" => Some(ShapeKind::Rect),
            "square" => Some(ShapeKind::Square),
            "circle" => Some(ShapeKind::Circle),
            "hexagon" | "hex" => Some(ShapeKind::Polygon(6)),
            "octagon" | "oct" => Some(ShapeKind::Polygon(8)),
            "triangle" | "tri" => Some(ShapeKind::Polygon(3)),
            _ => None,
        }
    }

    /// Parse a numeric shape value: the side count of a regular polygon.
    pub fn parse_sides(n: u32) -> Option<ShapeKind> {
        if n >= 3 {
            Some(ShapeKind::Polygon(n))
        } else {
            None
        }
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Line
    }
}

impl Serialize for ShapeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ShapeKind::Line => serializer.serialize_str("line"),
            ShapeKind::Rect => serializer.serialize_str("rect"),
            ShapeKind::Square => serializer.serialize_str("square"),
            ShapeKind::Circle => serializer.serialize_str("circle"),
            ShapeKind::Polygon(n) => serializer.serialize_u32(*n),
        }
    }
}

struct ShapeKindVisitor;

impl<'de> Visitor<'de> for ShapeKindVisitor {
    type Value = ShapeKind;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a shape word or a polygon side count >= 3")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ShapeKind, E> {
        ShapeKind::parse_word(v)
            .ok_or_else(|| E::custom(format!("unknown shape word: {v:?}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ShapeKind, E> {
        u32::try_from(v)
            .ok()
            .and_then(ShapeKind::parse_sides)
            .ok_or_else(|| E::custom(format!("polygon side count out of range: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ShapeKind, E> {
        u32::try_from(v)
            .ok()
            .and_then(ShapeKind::parse_sides)
            .ok_or_else(|| E::custom(format!("polygon side count out of range: {v}")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ShapeKind, E> {
        if v.fract() == 0.0 && v >= 3.0 && v <= u32::MAX as f64 {
            Ok(ShapeKind::Polygon(v as u32))
        } else {
            Err(E::custom(format!("polygon side count out of range: {v}")))
        }
    }
}

impl<'de> Deserialize<'de> for ShapeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ShapeKindVisitor)
    }
}

/// How cutters are trimmed against a non-rectangular face outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipMode {
    /// No trimming; cutters may overhang the face boundary.
    #[default]
    None,
    /// Cutters are intersected with the inset face volume.
    Partial,
    /// Only cutters lying entirely inside the inset face volume are kept.
    Whole,
}
