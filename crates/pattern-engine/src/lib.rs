//! Pattern and border cutting over a selected face of a solid value.
//!
//! The engines take an immutable [`Workpiece`](shape_ops::Workpiece), a
//! face selection carried by that value, and a declarative descriptor, and
//! return a new value with the pattern (or border frame) subtracted.
//! Failures leave the input untouched; recoverable conditions surface as
//! warnings in [`Diagnostics`] and through `tracing`.

pub mod border;
pub mod clip;
pub mod cutters;
pub mod frame;
pub mod layout;
pub mod offset;
pub mod pattern;
pub mod pose;
pub mod types;

pub use border::execute_border;
pub use frame::{DominantAxis, FaceFrame};
pub use pattern::execute_pattern;
pub use types::{CutError, CutResult, Diagnostics};

use knurl_types::{BorderSpec, PatternSpec};
use shape_ops::Workpiece;

/// Pattern operations as methods on the solid value.
pub trait WorkpiecePatterns: Sized {
    /// Subtract a pattern of cutters from the selected face.
    fn cut_pattern(&self, spec: &PatternSpec) -> Result<Self, CutError>;

    /// Cut out the face interior, leaving a border frame.
    fn cut_border(&self, spec: &BorderSpec) -> Result<Self, CutError>;
}

impl WorkpiecePatterns for Workpiece {
    fn cut_pattern(&self, spec: &PatternSpec) -> Result<Workpiece, CutError> {
        let result = execute_pattern(self, spec).map_err(|err| {
            let descriptor =
                serde_json::to_string(spec).unwrap_or_else(|_| "<unprintable>".to_string());
            tracing::warn!(%descriptor, "pattern cut failed: {err}");
            err
        })?;
        log_warnings(&result.diagnostics);
        Ok(result.workpiece)
    }

    fn cut_border(&self, spec: &BorderSpec) -> Result<Workpiece, CutError> {
        let result = execute_border(self, spec).map_err(|err| {
            let descriptor =
                serde_json::to_string(spec).unwrap_or_else(|_| "<unprintable>".to_string());
            tracing::warn!(%descriptor, "border cut failed: {err}");
            err
        })?;
        log_warnings(&result.diagnostics);
        Ok(result.workpiece)
    }
}

fn log_warnings(diagnostics: &Diagnostics) {
    for warning in &diagnostics.warnings {
        tracing::warn!("{warning}");
    }
    tracing::debug!(kernel_time_ms = diagnostics.kernel_time_ms, "cut finished");
}
