//! Tile-layout generation in face-local (u,v) coordinates.
//!
//! Pure arithmetic over the descriptor and the face extents; no kernel
//! calls. The grid path partitions the usable region into column/row
//! groups, fits centres at one cell pitch inside each group, applies the
//! odd-row stagger, and finally rotates everything about the face centre.

use knurl_types::PatternSpec;

use crate::types::CutError;

/// Grid centres for every shape except `line`.
///
/// An empty usable region (border past the face midline, or groups wider
/// than the region) yields no centres.
pub fn grid_positions(
    spec: &PatternSpec,
    u_size: f64,
    v_size: f64,
) -> Result<Vec<[f64; 2]>, CutError> {
    let cell_u = spec.width + spec.gap_u();
    let cell_v = spec.effective_height() + spec.gap_v();
    if cell_u <= 0.0 || cell_v <= 0.0 {
        return Err(CutError::InvalidInput {
            reason: format!("cell size must be positive, got {cell_u} x {cell_v}"),
        });
    }
    if spec.columns == 0 || spec.rows == 0 {
        return Err(CutError::InvalidInput {
            reason: "columns and rows must be at least 1".to_string(),
        });
    }

    let usable_u = u_size - 2.0 * spec.border_u();
    let usable_v = v_size - 2.0 * spec.border_v();
    if usable_u <= 0.0 || usable_v <= 0.0 {
        return Ok(Vec::new());
    }

    let columns = spec.columns as f64;
    let rows = spec.rows as f64;
    let group_w = (usable_u - (columns - 1.0) * spec.column_gap) / columns;
    let group_h = (usable_v - (rows - 1.0) * spec.effective_row_gap()) / rows;
    if group_w <= 0.0 || group_h <= 0.0 {
        return Ok(Vec::new());
    }

    let n_u = (group_w / cell_u).floor() as i64 + 1;
    let n_v = (group_h / cell_v).floor() as i64 + 1;

    let mut positions = Vec::new();
    for col in 0..spec.columns {
        let group_cu =
            -usable_u / 2.0 + group_w / 2.0 + col as f64 * (group_w + spec.column_gap);
        for row in 0..spec.rows {
            let group_cv = -usable_v / 2.0
                + group_h / 2.0
                + row as f64 * (group_h + spec.effective_row_gap());
            for j in 0..n_v {
                let v = group_cv + (j as f64 - (n_v - 1) as f64 / 2.0) * cell_v;
                let row_shift = if spec.stagger && j % 2 == 1 {
                    spec.stagger_amount * cell_u
                } else {
                    0.0
                };
                for i in 0..n_u {
                    let u =
                        group_cu + (i as f64 - (n_u - 1) as f64 / 2.0) * cell_u + row_shift;
                    positions.push([u, v]);
                }
            }
        }
    }

    let angle = spec.pattern_angle();
    if angle != 0.0 {
        rotate_about_origin(&mut positions, angle);
    }
    Ok(positions)
}

/// Layout of a line pattern: centres along the axis perpendicular to the
/// lines, plus the resolved line length and direction.
#[derive(Debug, Clone)]
pub struct LineLayout {
    /// Line centres in (u,v), already rotated to the line angle.
    pub positions: Vec<[f64; 2]>,
    /// Length of every line.
    pub length: f64,
    /// Direction of the line length, degrees from the u axis.
    pub angle: f64,
}

/// Line positions: 1-D along the perpendicular of the line direction,
/// centred on the face. At least one line is placed whenever a positive
/// length fits.
pub fn line_layout(spec: &PatternSpec, u_size: f64, v_size: f64) -> Result<LineLayout, CutError> {
    let angle = spec.pattern_angle();
    let rad = angle.to_radians();
    let (cos_a, sin_a) = (rad.cos().abs(), rad.sin().abs());

    // face extent projected on the line direction and its perpendicular
    let along_extent = u_size * cos_a + v_size * sin_a;
    let perp_extent = u_size * sin_a + v_size * cos_a;

    let length = spec
        .length
        .unwrap_or(along_extent - 2.0 * spec.border);
    if length <= 0.0 {
        return Ok(LineLayout {
            positions: Vec::new(),
            length: 0.0,
            angle,
        });
    }

    let gap = spec.wall_thickness.or(spec.spacing).unwrap_or(spec.width);
    let pitch = spec.width + gap;
    if pitch <= 0.0 {
        return Err(CutError::InvalidInput {
            reason: format!("line pitch must be positive, got {pitch}"),
        });
    }

    let available = perp_extent - 2.0 * spec.border;
    let count = ((available / pitch).floor() as i64 + 1).max(1);

    // unit vector perpendicular to the line direction
    let rad_signed = angle.to_radians();
    let perp = [-rad_signed.sin(), rad_signed.cos()];
    let positions = (0..count)
        .map(|k| {
            let offset = (k as f64 - (count - 1) as f64 / 2.0) * pitch;
            [perp[0] * offset, perp[1] * offset]
        })
        .collect();

    Ok(LineLayout {
        positions,
        length,
        angle,
    })
}

fn rotate_about_origin(positions: &mut [[f64; 2]], degrees: f64) {
    let rad = degrees.to_radians();
    let (s, c) = rad.sin_cos();
    for p in positions.iter_mut() {
        let [u, v] = *p;
        *p = [u * c - v * s, u * s + v * c];
    }
}
