//! Errors are values throughout the crate: loaders, the draw entry points and
//! `run` itself all hand back a `RenderError` rather than panicking.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A draw call arrived before the frame buffers were allocated.
    #[error("frame buffers are not allocated; the engine has not been started")]
    BuffersNotAllocated,

    #[error("frame buffers are already allocated")]
    BuffersAlreadyAllocated,

    #[error("requested a zero-sized buffer")]
    ZeroSizeRequest,

    #[error("requested {requested} bytes but only {available} remain in the configured budget")]
    BudgetExceeded { requested: usize, available: usize },

    #[error("managed object capacity of {0} exceeded")]
    ObjectCapacityExceeded(usize),

    /// The screen-edge clipping loop produced more triangles than the fixed
    /// scratch array holds. Fatal: the frame is no longer trustworthy.
    #[error("screen-edge clipping overflowed the triangle scratch array")]
    ClipOverflow,

    #[error("no file at {}", .0.display())]
    MissingFilePath(PathBuf),

    #[error("failed to load mesh: {0}")]
    MeshLoad(#[from] obj::ObjError),

    #[error("failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("window surface failure: {0}")]
    Surface(String),
}
