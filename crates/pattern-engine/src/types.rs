use kernel_bridge::KernelError;
use shape_ops::Workpiece;

/// Non-fatal diagnostics from a cut operation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Warning messages (clip fallback, fuse fallback, empty layouts).
    pub warnings: Vec<String>,
    /// Time spent in kernel operations, in milliseconds.
    pub kernel_time_ms: f64,
}

impl Diagnostics {
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Result of a pattern or border cut: the new solid value plus whatever
/// was worth telling the caller about.
#[derive(Debug, Clone)]
pub struct CutResult {
    pub workpiece: Workpiece,
    pub diagnostics: Diagnostics,
}

/// Errors from the pattern and border engines.
///
/// A failed call leaves the caller's input value untouched; the engines
/// never return partial results.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CutError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("could not create offset: {reason}")]
    OffsetDegenerate { reason: String },

    #[error("face cannot be analysed: {reason}")]
    FaceUnanalyzable { reason: String },
}
