//! Backend abstraction trait for the window and draw calls

use bitflags::bitflags;

use super::{Camera3D, RenderError};
use crate::foundation::math::{Color4, Vec2, Vec3};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

bitflags! {
    /// Window creation hints
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        /// Allow the user to resize the window
        const RESIZABLE = 1 << 0;
        /// Synchronize presentation with the display refresh
        const VSYNC = 1 << 1;
        /// Request 4x multisampling
        const MSAA_4X = 1 << 2;
    }
}

/// Everything a backend needs to open its window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Creation hints
    pub flags: WindowFlags,
    /// Frame rate cap, 0 for uncapped
    pub target_fps: u32,
}

/// Window and immediate-mode drawing services.
///
/// Calls arrive in frame order: `begin_drawing`, then any number of 3D blocks,
/// 2D draws and one GUI scope, then `end_drawing`.
pub trait RenderBackend {
    /// Open the window and set up the GUI layer
    fn init_window(&mut self, settings: &WindowSettings) -> BackendResult<()>;

    /// Tear down the GUI layer and close the window
    fn close_window(&mut self);

    /// Whether the user (or the platform) asked to close
    fn should_close(&self) -> bool;

    /// Start a frame
    fn begin_drawing(&mut self);

    /// Present the frame
    fn end_drawing(&mut self);

    /// Fill the framebuffer
    fn clear_background(&mut self, color: Color4);

    /// Start drawing in world space through `camera`
    fn begin_mode_3d(&mut self, camera: &Camera3D);

    /// Return to screen space
    fn end_mode_3d(&mut self);

    /// Open the immediate-mode GUI scope
    fn begin_gui(&mut self);

    /// Close the immediate-mode GUI scope
    fn end_gui(&mut self);

    /// Draw a solid sphere
    fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Color4);

    /// Draw a (possibly tapered) cylinder between two points
    fn draw_cylinder(
        &mut self,
        start: Vec3,
        end: Vec3,
        start_radius: f32,
        end_radius: f32,
        sides: u32,
        color: Color4,
    );

    /// Draw screen-space text
    fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color4);

    /// Downcast to the concrete backend type
    fn as_any(&self) -> &dyn std::any::Any;
}
