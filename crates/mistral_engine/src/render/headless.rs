//! Backend that records calls instead of drawing

use std::any::Any;
use std::time::{Duration, Instant};

use super::{BackendResult, Camera3D, RenderBackend, WindowSettings};
use crate::foundation::math::{Color4, Vec2, Vec3};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `begin_drawing`
    BeginDrawing,
    /// `end_drawing`
    EndDrawing,
    /// `clear_background`
    Clear(Color4),
    /// `begin_mode_3d`
    BeginMode3D(Camera3D),
    /// `end_mode_3d`
    EndMode3D,
    /// `begin_gui`
    BeginGui,
    /// `end_gui`
    EndGui,
    /// `draw_sphere`
    Sphere {
        /// Center
        center: Vec3,
        /// Radius
        radius: f32,
        /// Fill color
        color: Color4,
    },
    /// `draw_cylinder`
    Cylinder {
        /// Start cap center
        start: Vec3,
        /// End cap center
        end: Vec3,
        /// Radius at `start`
        start_radius: f32,
        /// Radius at `end`
        end_radius: f32,
        /// Number of sides
        sides: u32,
        /// Fill color
        color: Color4,
    },
    /// `draw_text`
    Text {
        /// Text drawn
        text: String,
        /// Top-left corner in pixels
        position: Vec2,
        /// Font size in pixels
        font_size: f32,
        /// Text color
        color: Color4,
    },
}

/// A window-less [`RenderBackend`] for tests, tools and CI.
///
/// Reports `should_close` once `max_frames` frames have been presented or
/// [`HeadlessBackend::request_close`] was called. While a window is open,
/// frames are paced to its `target_fps` like a real window would be.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    max_frames: u64,
    frames_drawn: u64,
    close_requested: bool,
    window: Option<WindowSettings>,
    commands: Vec<DrawCommand>,
    frame_started: Option<Instant>,
}

impl HeadlessBackend {
    /// Create a backend that closes after `max_frames` frames
    #[must_use]
    pub fn new(max_frames: u64) -> Self {
        Self {
            max_frames,
            ..Self::default()
        }
    }

    /// Every call recorded so far
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded calls
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of completed frames
    #[must_use]
    pub const fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Settings passed to the last `init_window`, while the window is open
    #[must_use]
    pub const fn window(&self) -> Option<&WindowSettings> {
        self.window.as_ref()
    }

    /// Make `should_close` report true from now on
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }
}

impl RenderBackend for HeadlessBackend {
    fn init_window(&mut self, settings: &WindowSettings) -> BackendResult<()> {
        log::debug!(
            "Headless window '{}' ({}x{}, {:?})",
            settings.title,
            settings.width,
            settings.height,
            settings.flags
        );
        self.window = Some(settings.clone());
        Ok(())
    }

    fn close_window(&mut self) {
        self.window = None;
    }

    fn should_close(&self) -> bool {
        self.close_requested || self.frames_drawn >= self.max_frames
    }

    fn begin_drawing(&mut self) {
        self.commands.push(DrawCommand::BeginDrawing);
        self.frame_started = Some(Instant::now());
    }

    fn end_drawing(&mut self) {
        self.commands.push(DrawCommand::EndDrawing);
        self.frames_drawn += 1;

        let started = self.frame_started.take();
        let target_fps = self.window.as_ref().map_or(0, |w| w.target_fps);
        if let Some(started) = started.filter(|_| target_fps > 0) {
            let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps));
            if let Some(remaining) = budget.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    fn clear_background(&mut self, color: Color4) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn begin_mode_3d(&mut self, camera: &Camera3D) {
        self.commands.push(DrawCommand::BeginMode3D(*camera));
    }

    fn end_mode_3d(&mut self) {
        self.commands.push(DrawCommand::EndMode3D);
    }

    fn begin_gui(&mut self) {
        self.commands.push(DrawCommand::BeginGui);
    }

    fn end_gui(&mut self) {
        self.commands.push(DrawCommand::EndGui);
    }

    fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Color4) {
        self.commands.push(DrawCommand::Sphere { center, radius, color });
    }

    fn draw_cylinder(
        &mut self,
        start: Vec3,
        end: Vec3,
        start_radius: f32,
        end_radius: f32,
        sides: u32,
        color: Color4,
    ) {
        self.commands.push(DrawCommand::Cylinder {
            start,
            end,
            start_radius,
            end_radius,
            sides,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color4) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            font_size,
            color,
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
