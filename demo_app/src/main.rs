//! Orbit demo application
//!
//! A sun, a planet and a moon built as an entity hierarchy: each body only
//! spins its own transform, and the parent chain turns those spins into
//! orbits. Comets are spawned at random and destroy themselves when their
//! lifetime runs out.
//!
//! Runs against the headless backend; pass a `.toml` or `.ron` config path
//! to override the defaults.

use mistral_engine::foundation::logging;
use mistral_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

const FRAMES: u64 = 600;
const COMET_INTERVAL: f32 = 0.5;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] mistral_engine::config::ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Body that spins about `axis` and draws itself with an axis gizmo
struct Body {
    spin_axis: Vec3,
    spin_speed: f32,
    radius: f32,
    color: Color4,
}

impl Component for Body {
    fn update(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
        let spatial = world.entity(id)?.spatial();
        let spin = Quat::from_axis_angle(self.spin_axis, self.spin_speed * world.delta_time());
        world.spatials_mut().rotate(spatial, spin)?;
        Ok(())
    }

    fn render_3d(&self, world: &World, id: &EntityId, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        let spatial = world.entity(id)?.spatial();
        let center = world.spatials().position(spatial)?;
        backend.draw_sphere(center, self.radius, self.color);
        draw_spatial(world.spatials(), spatial, self.radius * 2.0, backend)?;
        Ok(())
    }
}

/// Drifts in a straight line and queues its own destruction when it expires
struct Comet {
    velocity: Vec3,
    remaining: f32,
}

impl Component for Comet {
    fn on_create(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
        log::debug!("Comet {id} launched at {:?}", world.spatials().position(world.entity(id)?.spatial())?);
        Ok(())
    }

    fn fixed_update(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
        let step = world.fixed_delta_time();
        let spatial = world.entity(id)?.spatial();
        world.spatials_mut().translate(spatial, self.velocity * step)?;

        self.remaining -= step;
        if self.remaining <= 0.0 {
            world.destroy(id)?;
        }
        Ok(())
    }

    fn render_3d(&self, world: &World, id: &EntityId, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        let center = world.spatials().position(world.entity(id)?.spatial())?;
        backend.draw_sphere(center, 0.05, Color4::SKY_BLUE);
        Ok(())
    }
}

/// Frame statistics overlay
struct Hud;

impl Component for Hud {
    fn render_gui(&self, world: &World, _id: &EntityId, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        let dt = world.delta_time();
        let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        backend.draw_text(&format!("FPS: {fps:.0}"), Vec2::new(10.0, 10.0), 20.0, Color4::DARK_GRAY);
        backend.draw_text(
            &format!("Entities: {}", world.entity_count()),
            Vec2::new(10.0, 34.0),
            20.0,
            Color4::DARK_GRAY,
        );
        Ok(())
    }
}

struct OrbitDemo {
    rng: StdRng,
    until_next_comet: f32,
    comets_launched: u32,
}

impl OrbitDemo {
    fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            until_next_comet: COMET_INTERVAL,
            comets_launched: 0,
        }
    }

    fn launch_comet(&mut self, world: &mut World) -> Result<(), AppError> {
        let direction = Vec3::new(
            self.rng.gen_range(-1.0..1.0),
            self.rng.gen_range(-0.2..0.2),
            self.rng.gen_range(-1.0..1.0),
        )
        .normalized();
        let comet = world.create(Comet {
            velocity: direction * self.rng.gen_range(2.0..6.0),
            remaining: self.rng.gen_range(1.0..3.0),
        });

        let spatial = world.entity(&comet)?.spatial();
        world.spatials_mut().set_position(spatial, direction * -8.0).map_err(EcsError::from)?;
        self.comets_launched += 1;
        Ok(())
    }
}

impl Application for OrbitDemo {
    fn initialize(&mut self, world: &mut World) -> Result<(), AppError> {
        let sun = world.create(Body {
            spin_axis: Vec3::UP,
            spin_speed: 0.4,
            radius: 1.0,
            color: Color4::ORANGE,
        });
        world.set_name(&sun, "Sun")?;

        let planet = world.create_child(
            &sun,
            Body {
                spin_axis: Vec3::new(0.2, 1.0, 0.0),
                spin_speed: 1.5,
                radius: 0.4,
                color: Color4::BLUE,
            },
        )?;
        world.set_name(&planet, "Planet")?;
        let planet_spatial = world.entity(&planet)?.spatial();
        world.spatials_mut().set_position(planet_spatial, Vec3::new(5.0, 0.0, 0.0)).map_err(EcsError::from)?;

        let moon = world.create_child(
            &planet,
            Body {
                spin_axis: Vec3::UP,
                spin_speed: 0.0,
                radius: 0.1,
                color: Color4::LIGHT_GRAY,
            },
        )?;
        world.set_name(&moon, "Moon")?;
        let moon_spatial = world.entity(&moon)?.spatial();
        world.spatials_mut().set_position(moon_spatial, Vec3::new(1.0, 0.0, 0.0)).map_err(EcsError::from)?;

        world.create(Hud);
        world.set_active_camera(Some(Camera3D::perspective(
            Vec3::new(0.0, 12.0, 14.0),
            Vec3::ZERO,
            45.0,
        )));
        Ok(())
    }

    fn update(&mut self, world: &mut World, delta_time: f32) -> Result<(), AppError> {
        self.until_next_comet -= delta_time;
        if self.until_next_comet <= 0.0 {
            self.until_next_comet += COMET_INTERVAL;
            self.launch_comet(world)?;
        }
        Ok(())
    }

    fn cleanup(&mut self, world: &mut World) {
        log::info!(
            "Launched {} comets, {} entities left before teardown",
            self.comets_launched,
            world.entity_count()
        );
    }
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => {
            let mut config = ApplicationConfig::default();
            config.window.title = "Mistral - Orbit Demo".to_owned();
            config
        }
    };

    let mut engine = Engine::new(config, Box::new(HeadlessBackend::new(FRAMES)))?;
    engine.run(&mut OrbitDemo::new())?;
    Ok(())
}

fn main() {
    logging::init();

    if let Err(err) = run() {
        log::error!("Orbit demo failed: {err}");
        std::process::exit(1);
    }
}
