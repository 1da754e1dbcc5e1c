use serde::{Deserialize, Serialize};

use crate::shape::{ClipMode, ShapeKind};

/// A world axis, for rigid rotations and selector queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Reference plane tag carried by a solid value. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefPlane {
    #[default]
    XY,
    XZ,
    YZ,
}

/// Deprecated line-direction alias: maps to a pattern angle of 0 or 90.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDirection {
    X,
    Y,
}

fn default_width() -> f64 {
    1.0
}

fn default_border() -> f64 {
    2.0
}

fn default_groups() -> u32 {
    1
}

fn default_column_gap() -> f64 {
    5.0
}

fn default_stagger_amount() -> f64 {
    0.5
}

/// Declarative pattern descriptor: which shape to cut, how big, and how the
/// tiles are laid out over the target face.
///
/// Field names mirror the descriptor keys of the host dialect (camelCase);
/// the legacy aliases `sides`/`type` (shape) and `size` (width) are accepted
/// on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternSpec {
    /// What to cut. Strings use the alias table; an integer >= 3 is a
    /// regular-polygon side count.
    #[serde(alias = "type", alias = "sides")]
    pub shape: ShapeKind,
    /// Primary dimension: line width, rect/square width, circle diameter,
    /// polygon flat-to-flat.
    #[serde(alias = "size")]
    pub width: f64,
    /// Secondary dimension; rect only. Defaults to `width`.
    pub height: Option<f64>,
    /// Line length. Absent = face extent along the line direction minus
    /// twice the border.
    pub length: Option<f64>,
    /// Corner radius for rect/square cutters.
    pub fillet: f64,
    /// Stadium-shaped (half-disk ended) line cutters.
    pub round_ends: bool,
    /// Parallelogram skew for rect cutters, in degrees.
    pub shear: f64,
    /// Per-shape local rotation, in degrees.
    pub rotation: f64,
    /// Cut depth. Absent = pierce the whole solid.
    pub depth: Option<f64>,
    /// Gap between adjacent shapes along both axes. Defaults to `width`.
    pub spacing: Option<f64>,
    /// Per-axis gap override along the face's first tangent axis.
    pub spacing_x: Option<f64>,
    /// Per-axis gap override along the face's second tangent axis.
    pub spacing_y: Option<f64>,
    /// Explicit wall between shapes; overrides `spacing` on both axes.
    pub wall_thickness: Option<f64>,
    /// Margin kept clear along the face boundary.
    pub border: f64,
    /// Per-axis border override.
    pub border_x: Option<f64>,
    /// Per-axis border override.
    pub border_y: Option<f64>,
    /// Number of column groups the usable region is split into.
    pub columns: u32,
    /// Number of row groups.
    pub rows: u32,
    /// Gap between column groups.
    pub column_gap: f64,
    /// Gap between row groups. Defaults to `columnGap`.
    pub row_gap: Option<f64>,
    /// Offset odd rows by `staggerAmount` of a cell.
    pub stagger: bool,
    /// Fraction of the cell width odd rows are shifted by.
    pub stagger_amount: f64,
    /// Rotation of the whole pattern (and of the line direction), degrees.
    pub angle: f64,
    /// Deprecated alias for `angle`: `x` = 0, `y` = 90.
    pub direction: Option<LineDirection>,
    /// Trimming of cutters against a non-rectangular face.
    pub clip: ClipMode,
}

impl Default for PatternSpec {
    fn default() -> Self {
        Self {
            shape: ShapeKind::default(),
            width: default_width(),
            height: None,
            length: None,
            fillet: 0.0,
            round_ends: false,
            shear: 0.0,
            rotation: 0.0,
            depth: None,
            spacing: None,
            spacing_x: None,
            spacing_y: None,
            wall_thickness: None,
            border: default_border(),
            border_x: None,
            border_y: None,
            columns: default_groups(),
            rows: default_groups(),
            column_gap: default_column_gap(),
            row_gap: None,
            stagger: false,
            stagger_amount: default_stagger_amount(),
            angle: 0.0,
            direction: None,
            clip: ClipMode::None,
        }
    }
}

impl PatternSpec {
    /// Secondary dimension, falling back to `width` for non-rect shapes.
    pub fn effective_height(&self) -> f64 {
        match self.shape {
            ShapeKind::Rect => self.height.unwrap_or(self.width),
            _ => self.width,
        }
    }

    /// Gap between shapes along the first tangent axis.
    /// `wallThickness` beats `spacingX` beats `spacing` beats `width`.
    pub fn gap_u(&self) -> f64 {
        self.wall_thickness
            .or(self.spacing_x)
            .or(self.spacing)
            .unwrap_or(self.width)
    }

    /// Gap between shapes along the second tangent axis.
    pub fn gap_v(&self) -> f64 {
        self.wall_thickness
            .or(self.spacing_y)
            .or(self.spacing)
            .unwrap_or(self.width)
    }

    /// Border along the first tangent axis.
    pub fn border_u(&self) -> f64 {
        self.border_x.unwrap_or(self.border)
    }

    /// Border along the second tangent axis.
    pub fn border_v(&self) -> f64 {
        self.border_y.unwrap_or(self.border)
    }

    /// Gap between row groups, defaulting to the column-group gap.
    pub fn effective_row_gap(&self) -> f64 {
        self.row_gap.unwrap_or(self.column_gap)
    }

    /// The pattern angle in degrees, resolving the deprecated `direction`
    /// alias when no explicit angle is given.
    pub fn pattern_angle(&self) -> f64 {
        if self.angle != 0.0 {
            return self.angle;
        }
        match self.direction {
            Some(LineDirection::Y) => 90.0,
            _ => 0.0,
        }
    }
}

/// Descriptor for the border-frame cut: remove the face interior and keep a
/// frame `width` wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderSpec {
    /// Width of the frame left standing along the face boundary.
    pub width: f64,
    /// Cut depth. Absent = solid height plus clearance.
    #[serde(default)]
    pub depth: Option<f64>,
}
