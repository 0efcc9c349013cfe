//! Character domain: the movement state machine and its Bevy adapter.
//!
//! The core (`Character`, `StateMachine`, the states) works in y-down screen
//! space against an injected clock, input snapshot and hook sink. The systems
//! in this module sense avian contacts, step every controller once per frame
//! and push the integrated velocity back to the rigid body.

mod bootstrap;
mod components;
mod controller;
mod events;
mod hooks;
mod input;
mod machine;
mod states;
pub(crate) mod systems;
#[cfg(test)]
mod tests;
mod timers;

pub use bootstrap::PLAYER_SIZE;
pub use components::{
    Appearance, AttackHitbox, AttackSensor, Blocked, Character, Facing, GameLayer, Ground,
    LegsPose, PhysicsBody, Player, Wall, WallSide, WorldBound,
};
pub use controller::PlayerController;
pub use events::{CharacterCue, HitboxOverlap, HitboxTarget, RespawnRequest};
pub use hooks::{AnimationCue, CharacterHooks, Cue, CueBuffer, NoHooks, ParticleCue};
pub use input::InputSnapshot;
pub use machine::{CharacterState, EnterParams, MachineError, StateMachine, TickContext, Transition};
pub use timers::{DeferredAction, DeferredQueue, MovementTimers};

use bevy::prelude::*;

use crate::character::bootstrap::spawn_player;
use crate::character::input::capture_input;
use crate::character::systems::{
    apply_respawns, integrate_bodies, resolve_hitbox_overlaps, sense_collisions, step_controllers,
    sync_attack_sensors,
};
use crate::config::load_movement_config;
use crate::level::spawn_level;

/// Per-frame ordering: contacts and input first, then respawns and pogo
/// responses, then one state-machine step, then integration and presentation.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    Sense,
    Detect,
    Resolve,
    Step,
    Integrate,
    Present,
}

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputSnapshot>()
            .add_message::<CharacterCue>()
            .add_message::<RespawnRequest>()
            .add_message::<HitboxOverlap>()
            .configure_sets(
                Update,
                (
                    CharacterSet::Sense,
                    CharacterSet::Detect,
                    CharacterSet::Resolve,
                    CharacterSet::Step,
                    CharacterSet::Integrate,
                    CharacterSet::Present,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                spawn_player.after(load_movement_config).after(spawn_level),
            )
            .add_systems(
                Update,
                (
                    (capture_input, sense_collisions).in_set(CharacterSet::Sense),
                    (apply_respawns, resolve_hitbox_overlaps)
                        .chain()
                        .in_set(CharacterSet::Resolve),
                    step_controllers.in_set(CharacterSet::Step),
                    (integrate_bodies, sync_attack_sensors)
                        .chain()
                        .in_set(CharacterSet::Integrate),
                ),
            );
    }
}
