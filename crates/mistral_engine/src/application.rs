//! Application trait and lifecycle management

use crate::assets::ResourceError;
use crate::config::ConfigError;
use crate::ecs::{EcsError, World};
use crate::engine::EngineError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to set up a scene and drive it from outside the
/// component hooks.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the window is open and before the first frame. Use
    /// this to create the initial entities and set the active camera.
    fn initialize(&mut self, world: &mut World) -> Result<(), AppError>;

    /// Called every frame, right after the entity update pass
    fn update(&mut self, _world: &mut World, _delta_time: f32) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once the main loop has stopped, before the remaining entities
    /// are destroyed.
    fn cleanup(&mut self, _world: &mut World) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Registry or component hook error
    #[error("Entity error: {0}")]
    Ecs(#[from] EcsError),

    /// Resource loading error
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
