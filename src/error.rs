//! Crate-wide error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Text that is not a 3, 6 or 8 digit hex color.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    /// Deleting would leave the gradient with fewer than two stops.
    #[error("a gradient needs at least {min} color stops")]
    MinimumStops { min: usize },
    #[error("stop offset {0} is not a finite number")]
    NonFiniteOffset(f64),
    #[error("no color stop is selected")]
    NoActiveStop,
    #[error("no object is selected")]
    NoSelection,
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
    /// Resizing would discard existing content and the user did not confirm.
    #[error("resizing the canvas discards its content and needs confirmation")]
    ConfirmationRequired,
    /// The rendering collaborator failed (serialize, load, export).
    #[error("scene operation failed: {0}")]
    Scene(String),
    #[error("design {0} not found")]
    DesignNotFound(i64),
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
