//! 3D camera handed to the backend

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Matrix4x4, Vec3};

/// Projection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// `fov_y` is a vertical field of view in degrees
    #[default]
    Perspective,
    /// `fov_y` is the height of the view volume in world units
    Orthographic,
}

/// Look-at camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera3D {
    /// Eye position
    pub position: Vec3,
    /// Point looked at
    pub target: Vec3,
    /// Up hint
    pub up: Vec3,
    /// Field of view (degrees) or view height, see [`Projection`]
    pub fov_y: f32,
    /// Projection mode
    pub projection: Projection,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov_y: 45.0,
            projection: Projection::Perspective,
        }
    }
}

impl Camera3D {
    /// Perspective camera looking from `position` at `target`
    #[must_use]
    pub const fn perspective(position: Vec3, target: Vec3, fov_y: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::UP,
            fov_y,
            projection: Projection::Perspective,
        }
    }

    /// World-to-view matrix
    #[must_use]
    pub fn view_matrix(&self) -> Matrix4x4 {
        Matrix4x4::look_at(self.position, self.target, self.up)
    }

    /// View-to-clip matrix for the given aspect ratio and clip planes
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Matrix4x4 {
        match self.projection {
            Projection::Perspective => Matrix4x4::perspective(self.fov_y, aspect, near, far),
            Projection::Orthographic => {
                let top = self.fov_y * 0.5;
                let right = top * aspect;
                Matrix4x4::orthographic(-right, right, -top, top, near, far)
            }
        }
    }
}
