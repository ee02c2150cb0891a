//! Rendering boundary
//!
//! The engine never talks to a graphics API directly. A [`RenderBackend`]
//! owns the window and issues draw calls; a [`RenderPipeline`] decides the
//! order in which the registry's render passes run inside a frame.

mod backend;
mod camera;
mod headless;
mod pipeline;

pub use backend::{BackendResult, RenderBackend, WindowFlags, WindowSettings};
pub use camera::{Camera3D, Projection};
pub use headless::{DrawCommand, HeadlessBackend};
pub use pipeline::{DefaultRenderPipeline, RenderPipeline};

/// Rendering errors
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Window or context creation failed
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// A frame could not be produced
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// A render pass hook failed
    #[error("Render pass failed: {0}")]
    Pass(#[from] crate::ecs::EcsError),
}
