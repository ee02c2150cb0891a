//! Axis gizmo for visualizing a node's transform

use super::{SceneResult, SpatialKey, SpatialTree};
use crate::foundation::math::{Color4, Vec3};
use crate::render::RenderBackend;

const SIDES: u32 = 12;

/// Draw a node's world position and its local axes.
///
/// A black sphere marks the origin; red, green and blue shafts point along
/// right, up and forward, each stretched by the node's local scale on that
/// axis and capped with a cone. `size` scales the whole gizmo.
pub fn draw_spatial(
    tree: &SpatialTree,
    key: SpatialKey,
    size: f32,
    backend: &mut dyn RenderBackend,
) -> SceneResult<()> {
    let line_radius = 0.05 * size;
    let cone_radius = 0.1 * size;
    let line_length = size;
    let cone_length = 0.2 * size;

    let origin = tree.position(key)?;
    let scale = tree.local_scale(key)?;

    backend.draw_sphere(origin, 0.1, Color4::BLACK);

    let axes: [(Vec3, f32, Color4); 3] = [
        (tree.right(key)?, scale.x, Color4::RED),
        (tree.up(key)?, scale.y, Color4::GREEN),
        (tree.forward(key)?, scale.z, Color4::BLUE),
    ];

    for (direction, axis_scale, color) in axes {
        let shaft_end = origin + direction * (line_length * axis_scale);
        let tip = origin + direction * (line_length * axis_scale + cone_length);
        backend.draw_cylinder(origin, shaft_end, line_radius, line_radius, SIDES, color);
        backend.draw_cylinder(shaft_end, tip, cone_radius, 0.0, SIDES, color);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;
    use crate::render::{DrawCommand, HeadlessBackend};
    use approx::assert_relative_eq;

    #[test]
    fn test_gizmo_draws_sphere_shafts_and_cones() {
        let mut tree = SpatialTree::new();
        let key = tree.create_with(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, Vec3::new(2.0, 1.0, 1.0));
        let mut backend = HeadlessBackend::new(1);

        draw_spatial(&tree, key, 1.0, &mut backend).unwrap();

        let commands = backend.commands();
        assert_eq!(commands.len(), 7);
        assert!(matches!(
            commands[0],
            DrawCommand::Sphere { center, color, .. } if center == Vec3::new(1.0, 2.0, 3.0) && color == Color4::BLACK
        ));

        let DrawCommand::Cylinder { start, end, start_radius, end_radius, sides, color } = commands[1] else {
            panic!("expected the red shaft, got {:?}", commands[1]);
        };
        assert_eq!(start, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(end, Vec3::new(3.0, 2.0, 3.0));
        assert_relative_eq!(start_radius, 0.05);
        assert_relative_eq!(end_radius, 0.05);
        assert_eq!(sides, 12);
        assert_eq!(color, Color4::RED);

        let DrawCommand::Cylinder { end, end_radius, .. } = commands[2] else {
            panic!("expected the red cone, got {:?}", commands[2]);
        };
        assert_relative_eq!(end, Vec3::new(3.2, 2.0, 3.0), epsilon = 1e-5);
        assert_eq!(end_radius, 0.0);
    }
}
