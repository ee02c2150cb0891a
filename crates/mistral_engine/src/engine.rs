//! Core engine implementation

use crate::{
    application::{AppError, Application},
    config::{ApplicationConfig, ConfigError},
    ecs::{EcsError, World},
    foundation::{
        logging,
        time::{FixedStep, Timer},
    },
    render::{DefaultRenderPipeline, RenderBackend, RenderError, RenderPipeline},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the world, the backend and the pipeline, and drives the frame loop:
///
/// ```text
/// create pass -> destroy pass -> update pass -> app update
///     -> fixed update pass (0..n times) -> pipeline render
/// ```
pub struct Engine {
    config: ApplicationConfig,
    backend: Box<dyn RenderBackend>,
    pipeline: Box<dyn RenderPipeline>,
    world: World,
    timer: Timer,
    fixed_step: FixedStep,
}

impl Engine {
    /// Create an engine drawing through `backend` with the default pipeline
    pub fn new(config: ApplicationConfig, backend: Box<dyn RenderBackend>) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        let mut world = World::new();
        world.set_fixed_delta_time(config.timing.fixed_timestep);
        let fixed_step = FixedStep::new(config.timing.fixed_timestep, config.timing.max_fixed_steps_per_frame);

        Ok(Self {
            config,
            backend,
            pipeline: Box::new(DefaultRenderPipeline::new()),
            world,
            timer: Timer::new(),
            fixed_step,
        })
    }

    /// Replace the render pipeline
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: Box<dyn RenderPipeline>) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Replace the world, e.g. with one using a seeded id generator
    #[must_use]
    pub fn with_world(mut self, mut world: World) -> Self {
        world.set_fixed_delta_time(self.config.timing.fixed_timestep);
        self.world = world;
        self
    }

    /// Open the window and run frames until the backend asks to close or a
    /// quit is requested.
    ///
    /// On the way out the application cleans up, every remaining entity
    /// receives its destruction hook and the window is closed, even when a
    /// frame failed.
    pub fn run(&mut self, app: &mut dyn Application) -> Result<(), EngineError> {
        logging::init_with_level(logging::parse_level(&self.config.logging.level));
        log::info!("Starting '{}'", self.config.window.title);

        self.backend.init_window(&self.config.window.to_window_settings())?;
        self.pipeline.initialize(self.backend.as_mut())?;

        let result = app
            .initialize(&mut self.world)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))
            .and_then(|()| self.main_loop(app));

        app.cleanup(&mut self.world);
        let teardown = self.world.destroy_all();
        self.backend.close_window();

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} FPS average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        result?;
        teardown?;
        Ok(())
    }

    fn main_loop(&mut self, app: &mut dyn Application) -> Result<(), EngineError> {
        log::info!("Starting main loop...");
        self.timer = Timer::new();

        while !self.backend.should_close() && !self.world.is_quit_requested() {
            self.timer.update();
            self.frame(app, self.timer.delta_time())?;
        }
        Ok(())
    }

    /// Run one frame as if `delta_time` seconds had passed
    pub fn frame(&mut self, app: &mut dyn Application, delta_time: f32) -> Result<(), EngineError> {
        self.world.set_delta_time(delta_time);

        self.world.run_create_pass()?;
        self.world.run_destroy_pass()?;
        self.world.run_update_pass()?;
        app.update(&mut self.world, delta_time)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;

        for _ in 0..self.fixed_step.accumulate(delta_time) {
            self.world.run_fixed_update_pass()?;
        }

        self.pipeline.render(&self.world, self.backend.as_mut())?;
        Ok(())
    }

    /// Request engine shutdown after the current frame
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.world.request_quit();
    }

    /// Get the ECS world
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get the render backend
    #[must_use]
    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    /// Get the configuration the engine was created with
    #[must_use]
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Get the current frame delta time
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Registry or component hook error
    #[error("Entity error: {0}")]
    Ecs(#[from] EcsError),

    /// Rendering error
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

impl From<AppError> for EngineError {
    fn from(error: AppError) -> Self {
        Self::ApplicationError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Component, EcsResult, EntityId};
    use crate::render::{DrawCommand, HeadlessBackend};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counters {
        updates: Cell<u32>,
        fixed: Cell<u32>,
        destroyed: Cell<u32>,
    }

    struct Counted(Rc<Counters>);

    impl Component for Counted {
        fn on_destroy(&mut self, _world: &mut World, _id: &EntityId) -> EcsResult<()> {
            self.0.destroyed.set(self.0.destroyed.get() + 1);
            Ok(())
        }

        fn update(&mut self, _world: &mut World, _id: &EntityId) -> EcsResult<()> {
            self.0.updates.set(self.0.updates.get() + 1);
            Ok(())
        }

        fn fixed_update(&mut self, _world: &mut World, _id: &EntityId) -> EcsResult<()> {
            self.0.fixed.set(self.0.fixed.get() + 1);
            Ok(())
        }
    }

    struct TestApp {
        counters: Rc<Counters>,
        quit_after: Option<u32>,
        frames: u32,
        cleaned_up: bool,
    }

    impl TestApp {
        fn new() -> Self {
            Self { counters: Rc::default(), quit_after: None, frames: 0, cleaned_up: false }
        }
    }

    impl Application for TestApp {
        fn initialize(&mut self, world: &mut World) -> Result<(), AppError> {
            world.create(Counted(Rc::clone(&self.counters)));
            Ok(())
        }

        fn update(&mut self, world: &mut World, _delta_time: f32) -> Result<(), AppError> {
            self.frames += 1;
            if self.quit_after == Some(self.frames) {
                world.request_quit();
            }
            Ok(())
        }

        fn cleanup(&mut self, _world: &mut World) {
            self.cleaned_up = true;
        }
    }

    struct FailingApp;

    impl Application for FailingApp {
        fn initialize(&mut self, _world: &mut World) -> Result<(), AppError> {
            Err(AppError::Custom("no scene".to_owned()))
        }
    }

    fn headless(engine: &Engine) -> &HeadlessBackend {
        engine.backend().as_any().downcast_ref::<HeadlessBackend>().unwrap()
    }

    #[test]
    fn test_run_until_backend_closes() {
        let mut engine = Engine::new(ApplicationConfig::default(), Box::new(HeadlessBackend::new(3))).unwrap();
        let mut app = TestApp::new();

        engine.run(&mut app).unwrap();

        let backend = headless(&engine);
        assert_eq!(backend.frames_drawn(), 3);
        assert!(backend.window().is_none());
        assert_eq!(app.counters.updates.get(), 3);
        assert_eq!(app.counters.destroyed.get(), 1);
        assert!(app.cleaned_up);
        assert_eq!(engine.world().entity_count(), 0);
    }

    #[test]
    fn test_quit_request_stops_the_loop() {
        let mut engine = Engine::new(ApplicationConfig::default(), Box::new(HeadlessBackend::new(100))).unwrap();
        let mut app = TestApp::new();
        app.quit_after = Some(2);

        engine.run(&mut app).unwrap();

        assert_eq!(headless(&engine).frames_drawn(), 2);
        assert_eq!(app.frames, 2);
    }

    #[test]
    fn test_fixed_updates_follow_accumulated_time() {
        let mut config = ApplicationConfig::default();
        config.timing.fixed_timestep = 0.25;
        let mut engine = Engine::new(config, Box::new(HeadlessBackend::new(10))).unwrap();
        let mut app = TestApp::new();
        app.initialize(engine.world_mut()).unwrap();

        engine.frame(&mut app, 0.5).unwrap();
        assert_eq!(app.counters.fixed.get(), 2);
        engine.frame(&mut app, 0.125).unwrap();
        assert_eq!(app.counters.fixed.get(), 2);
        engine.frame(&mut app, 0.125).unwrap();
        assert_eq!(app.counters.fixed.get(), 3);

        assert_eq!(app.counters.updates.get(), 3);
        assert!((engine.world().fixed_delta_time() - 0.25).abs() < f32::EPSILON);
        assert!((engine.world().delta_time() - 0.125).abs() < f32::EPSILON);
    }

    #[test]
    fn test_frame_draws_through_pipeline() {
        let mut engine = Engine::new(ApplicationConfig::default(), Box::new(HeadlessBackend::new(10))).unwrap();
        let mut app = TestApp::new();

        engine.frame(&mut app, 0.016).unwrap();

        let commands = headless(&engine).commands();
        assert_eq!(commands.first(), Some(&DrawCommand::BeginDrawing));
        assert_eq!(commands.last(), Some(&DrawCommand::EndDrawing));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ApplicationConfig::default();
        config.window.width = 0;
        let result = Engine::new(config, Box::new(HeadlessBackend::new(1)));
        assert!(matches!(result, Err(EngineError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_failed_initialization_still_closes_window() {
        let mut engine = Engine::new(ApplicationConfig::default(), Box::new(HeadlessBackend::new(5))).unwrap();

        let result = engine.run(&mut FailingApp);

        assert!(matches!(result, Err(EngineError::ApplicationError(message)) if message.contains("no scene")));
        let backend = headless(&engine);
        assert_eq!(backend.frames_drawn(), 0);
        assert!(backend.window().is_none());
    }
}
