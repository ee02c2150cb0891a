//! # Mistral Engine
//!
//! A small real-time framework: linear-algebra value types, a transform
//! hierarchy with lazily cached world matrices, and a registry of
//! behaviour-carrying entities driven through ordered per-frame passes.
//!
//! ## Features
//!
//! - **Math**: vectors, quaternions, column-major 4x4 matrices and colors
//! - **Scene**: arena-backed transform tree with dirty-flag matrix caching
//! - **Entities**: deferred creation/destruction and seven lifecycle hooks
//! - **Resources**: path-keyed media cache that never fails a lookup
//! - **Rendering**: pluggable backend and pipeline, plus a headless backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mistral_engine::prelude::*;
//!
//! struct Spin;
//!
//! impl Component for Spin {
//!     fn update(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
//!         let spatial = world.entity(id)?.spatial();
//!         let step = Quat::from_axis_angle(Vec3::UP, world.delta_time());
//!         world.spatials_mut().rotate(spatial, step)?;
//!         Ok(())
//!     }
//! }
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, world: &mut World) -> Result<(), AppError> {
//!         world.create(Spin);
//!         world.set_active_camera(Some(Camera3D::default()));
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut engine = Engine::new(config, Box::new(HeadlessBackend::new(600)))?;
//!     engine.run(&mut MyApp)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{ResourceCache, ResourceError, ResourceType},
        config::{ApplicationConfig, Config},
        ecs::{Component, EcsError, EcsResult, Entity, EntityId, World},
        foundation::{
            math::{Color3, Color4, Matrix4x4, Quat, Vec2, Vec3, Vec4},
            time::Timer,
        },
        render::{Camera3D, DefaultRenderPipeline, HeadlessBackend, RenderBackend, RenderPipeline},
        scene::{draw_spatial, SpatialKey, SpatialTree},
        AppError, Application, Engine, EngineError,
    };
}
