//! Character domain: manual gravity, drag and velocity caps.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::components::Player;
use crate::character::controller::PlayerController;
use crate::character::systems::flip_y;
use crate::config::MovementTuning;

/// Integrate the core body and hand the result to avian. Gravity is ours;
/// the rigid body runs with `GravityScale(0.0)`.
pub(crate) fn integrate_bodies(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut PlayerController, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut controller, mut velocity) in &mut query {
        let body = &mut controller.character.body;
        body.integrate(dt, &tuning);
        velocity.0 = flip_y(body.velocity);
    }
}
