//! Character domain: ground and wall contact sensing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::components::{Blocked, GameLayer, Player, WorldBound};
use crate::character::controller::PlayerController;
use crate::character::systems::flip_y;

const PROBE_DISTANCE: f32 = 4.0;
/// Upward speed (screen space, px/s) above which a ground probe hit is ignored.
const RISING_THRESHOLD: f32 = -50.0;

/// Refresh position, velocity and blocked flags from the physics world
/// before the state machine steps.
pub(crate) fn sense_collisions(
    spatial_query: SpatialQuery,
    world_bounds: Query<(), With<WorldBound>>,
    mut query: Query<
        (&Transform, &Collider, &LinearVelocity, &mut PlayerController),
        With<Player>,
    >,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let side_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, collider, velocity, mut controller) in &mut query {
        let half = match collider.shape_scaled().as_cuboid() {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
            None => Vec2::new(15.0, 30.0),
        };
        let origin = transform.translation.truncate();

        let body = &mut controller.character.body;
        body.position = flip_y(origin);
        body.velocity = flip_y(velocity.0);

        // Feet: left edge, center, right edge
        let feet_y = origin.y - half.y;
        let on_ground = [-half.x + 1.0, 0.0, half.x - 1.0].into_iter().any(|dx| {
            spatial_query
                .cast_ray(
                    Vec2::new(origin.x + dx, feet_y),
                    Dir2::NEG_Y,
                    PROBE_DISTANCE,
                    true,
                    &ground_filter,
                )
                .is_some()
        });

        let mut blocked = Blocked {
            // A rising body still overlapping the ground probe has just jumped
            down: on_ground && body.velocity.y > RISING_THRESHOLD,
            ..default()
        };

        for dy in [half.y * 0.5, -half.y * 0.5] {
            let side_origin = Vec2::new(origin.x, origin.y + dy);
            if let Some(hit) = spatial_query.cast_ray(
                side_origin,
                Dir2::NEG_X,
                half.x + PROBE_DISTANCE,
                true,
                &side_filter,
            ) {
                blocked.left = true;
                blocked.world_edge_left |= world_bounds.contains(hit.entity);
            }
            if let Some(hit) = spatial_query.cast_ray(
                side_origin,
                Dir2::X,
                half.x + PROBE_DISTANCE,
                true,
                &side_filter,
            ) {
                blocked.right = true;
                blocked.world_edge_right |= world_bounds.contains(hit.entity);
            }
        }

        if blocked.down != body.blocked.down {
            debug!("Ground contact: {}", blocked.down);
        }
        body.blocked = blocked;
    }
}
