//! Frame composition strategies

use log::debug;

use super::{BackendResult, RenderBackend};
use crate::ecs::World;
use crate::foundation::math::Color4;

/// Decides how one frame is drawn from the world's render passes
pub trait RenderPipeline {
    /// Called once after the window is open
    fn initialize(&mut self, _backend: &mut dyn RenderBackend) -> BackendResult<()> {
        Ok(())
    }

    /// Draw one frame
    fn render(&mut self, world: &World, backend: &mut dyn RenderBackend) -> BackendResult<()>;
}

/// Clear, 3D pass through the active camera, 2D pass, GUI pass.
///
/// The 3D block is skipped entirely while no camera is active. Every scope
/// that was opened is closed again even when a pass fails.
#[derive(Debug, Clone)]
pub struct DefaultRenderPipeline {
    clear_color: Color4,
}

impl Default for DefaultRenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultRenderPipeline {
    /// Pipeline clearing to ray-white
    #[must_use]
    pub const fn new() -> Self {
        Self { clear_color: Color4::RAY_WHITE }
    }

    /// Use a different background color
    #[must_use]
    pub const fn with_clear_color(mut self, color: Color4) -> Self {
        self.clear_color = color;
        self
    }
}

impl RenderPipeline for DefaultRenderPipeline {
    fn initialize(&mut self, _backend: &mut dyn RenderBackend) -> BackendResult<()> {
        debug!("Default render pipeline ready");
        Ok(())
    }

    fn render(&mut self, world: &World, backend: &mut dyn RenderBackend) -> BackendResult<()> {
        backend.begin_drawing();
        backend.clear_background(self.clear_color);

        let mut passes = Ok(());
        if let Some(camera) = world.active_camera() {
            backend.begin_mode_3d(camera);
            passes = world.render_3d_pass(backend);
            backend.end_mode_3d();
        }

        passes = passes.and_then(|()| world.render_2d_pass(backend));

        backend.begin_gui();
        passes = passes.and_then(|()| world.render_gui_pass(backend));
        backend.end_gui();

        backend.end_drawing();
        Ok(passes?)
    }
}
