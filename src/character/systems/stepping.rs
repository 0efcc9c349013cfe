//! Character domain: systems that drive the state machine each frame.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::character::components::Player;
use crate::character::controller::PlayerController;
use crate::character::events::{CharacterCue, HitboxOverlap, RespawnRequest};
use crate::character::hooks::CueBuffer;
use crate::character::input::InputSnapshot;
use crate::character::machine::{MachineError, TickContext};
use crate::character::systems::flip_y;
use crate::config::MovementTuning;
use crate::core::{Clock, SessionClock};

/// Run `f` against a tick context whose hooks are collected and published
/// as [`CharacterCue`] messages for `entity`.
pub(crate) fn with_tick_context<T>(
    entity: Entity,
    clock: &SessionClock,
    input: &InputSnapshot,
    tuning: &MovementTuning,
    cues: &mut MessageWriter<CharacterCue>,
    f: impl FnOnce(&mut TickContext) -> Result<T, MachineError>,
) -> Result<T, MachineError> {
    let mut buffer = CueBuffer::default();
    let result = {
        let mut ctx = TickContext {
            now: clock.now(),
            input,
            tuning,
            hooks: &mut buffer,
        };
        f(&mut ctx)
    };
    for cue in buffer.drain() {
        cues.write(CharacterCue { entity, cue });
    }
    result
}

/// A machine error is a logic bug; stop the app instead of limping on.
pub(crate) fn report_fatal(error: &MachineError, exit: &mut MessageWriter<AppExit>) {
    error!("Character state machine failed: {}", error);
    exit.write(AppExit::error());
}

pub(crate) fn step_controllers(
    clock: Res<SessionClock>,
    input: Res<InputSnapshot>,
    tuning: Res<MovementTuning>,
    mut query: Query<(Entity, &mut PlayerController), With<Player>>,
    mut cues: MessageWriter<CharacterCue>,
    mut exit: MessageWriter<AppExit>,
) {
    for (entity, mut controller) in &mut query {
        let result = with_tick_context(entity, &clock, &input, &tuning, &mut cues, |ctx| {
            controller.step(ctx)
        });
        if let Err(error) = result {
            report_fatal(&error, &mut exit);
        }
    }
}

pub(crate) fn apply_respawns(
    clock: Res<SessionClock>,
    input: Res<InputSnapshot>,
    tuning: Res<MovementTuning>,
    mut requests: MessageReader<RespawnRequest>,
    mut query: Query<(&mut PlayerController, &mut Transform, &mut LinearVelocity), With<Player>>,
    mut cues: MessageWriter<CharacterCue>,
    mut exit: MessageWriter<AppExit>,
) {
    for request in requests.read() {
        let Ok((mut controller, mut transform, mut velocity)) = query.get_mut(request.entity) else {
            continue;
        };

        let result = with_tick_context(request.entity, &clock, &input, &tuning, &mut cues, |ctx| {
            controller.respawn(flip_y(request.position), ctx)
        });
        if let Err(error) = result {
            report_fatal(&error, &mut exit);
            continue;
        }

        transform.translation = request.position.extend(transform.translation.z);
        velocity.0 = Vec2::ZERO;
    }
}

pub(crate) fn resolve_hitbox_overlaps(
    clock: Res<SessionClock>,
    input: Res<InputSnapshot>,
    tuning: Res<MovementTuning>,
    mut overlaps: MessageReader<HitboxOverlap>,
    mut query: Query<&mut PlayerController, With<Player>>,
    mut cues: MessageWriter<CharacterCue>,
    mut exit: MessageWriter<AppExit>,
) {
    for overlap in overlaps.read() {
        let Ok(mut controller) = query.get_mut(overlap.entity) else {
            continue;
        };

        let result = with_tick_context(overlap.entity, &clock, &input, &tuning, &mut cues, |ctx| {
            controller.on_hitbox_overlap(overlap.target, ctx)
        });
        match result {
            Ok(true) => info!("Pogo bounce"),
            Ok(false) => {}
            Err(error) => report_fatal(&error, &mut exit),
        }
    }
}
