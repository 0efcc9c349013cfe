//! Character domain: Bevy systems bridging the core to avian and the input devices.

pub(crate) mod hitbox;
pub(crate) mod integrate;
pub(crate) mod sensing;
pub(crate) mod stepping;

pub(crate) use hitbox::sync_attack_sensors;
pub(crate) use integrate::integrate_bodies;
pub(crate) use sensing::sense_collisions;
pub(crate) use stepping::{apply_respawns, resolve_hitbox_overlaps, step_controllers};

use bevy::prelude::*;

/// Convert between the core's y-down screen space and Bevy's y-up world space.
pub fn flip_y(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}
