//! Component behaviour trait

use std::any::Any;

use super::{EcsResult, EntityId, World};
use crate::render::RenderBackend;

/// Upcast to `Any` for typed access to boxed components
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour attached to an entity.
///
/// Every hook is optional. Lifecycle hooks get the whole [`World`] mutably;
/// while a hook runs, the entity's own behaviour is checked out of the
/// registry, so [`World::component`] on the entity's own id fails for the
/// duration of the call. Render hooks only read the world.
///
/// ```
/// use mistral_engine::prelude::*;
///
/// struct Spinner {
///     speed: f32,
/// }
///
/// impl Component for Spinner {
///     fn update(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
///         let spatial = world.entity(id)?.spatial();
///         let step = Quat::from_axis_angle(Vec3::UP, self.speed * world.delta_time());
///         world.spatials_mut().rotate(spatial, step)?;
///         Ok(())
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait Component: AsAny {
    /// Runs once, during the first creation pass after the entity was created
    fn on_create(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
        Ok(())
    }

    /// Runs once, during the destruction pass, just before removal
    fn on_destroy(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
        Ok(())
    }

    /// Runs every frame
    fn update(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
        Ok(())
    }

    /// Runs once per fixed time step
    fn fixed_update(&mut self, world: &mut World, id: &EntityId) -> EcsResult<()> {
        Ok(())
    }

    /// Draw in world space; only called while a camera is active
    fn render_3d(&self, world: &World, id: &EntityId, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        Ok(())
    }

    /// Draw in screen space
    fn render_2d(&self, world: &World, id: &EntityId, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        Ok(())
    }

    /// Draw inside the immediate-mode GUI scope
    fn render_gui(&self, world: &World, id: &EntityId, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        Ok(())
    }
}

/// Last path segment of `T`'s type name, e.g. `Planet` for `demo::Planet`
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;
    impl Component for Marker {}

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Marker>(), "Marker");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
        assert_eq!(short_type_name::<u32>(), "u32");
    }

    #[test]
    fn test_downcast_through_trait_object() {
        let boxed: Box<dyn Component> = Box::new(Marker);
        let behaviour: &dyn Component = boxed.as_ref();
        assert!(behaviour.as_any().downcast_ref::<Marker>().is_some());
    }
}
