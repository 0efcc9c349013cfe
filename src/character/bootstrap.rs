//! Character domain: player spawn.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::character::components::{GameLayer, Player};
use crate::character::controller::PlayerController;
use crate::character::events::CharacterCue;
use crate::character::hooks::CueBuffer;
use crate::character::input::InputSnapshot;
use crate::character::machine::TickContext;
use crate::character::systems::flip_y;
use crate::config::MovementTuning;
use crate::core::{Clock, SessionClock};
use crate::level::SpawnPoint;

pub const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 60.0);

pub(crate) fn spawn_player(
    mut commands: Commands,
    clock: Res<SessionClock>,
    input: Res<InputSnapshot>,
    tuning: Res<MovementTuning>,
    spawn_point: Res<SpawnPoint>,
    existing_player: Query<Entity, With<Player>>,
    mut cues: MessageWriter<CharacterCue>,
    mut exit: MessageWriter<AppExit>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let mut buffer = CueBuffer::default();
    let mut ctx = TickContext {
        now: clock.now(),
        input: &input,
        tuning: &tuning,
        hooks: &mut buffer,
    };
    let controller = match PlayerController::spawn(flip_y(spawn_point.0), &mut ctx) {
        Ok(controller) => controller,
        Err(error) => {
            error!("Failed to start character state machine: {}", error);
            exit.write(AppExit::error());
            return;
        }
    };

    info!("Spawning player at {:?} in {}", spawn_point.0, controller.state());

    let entity = commands
        .spawn((
            Player,
            controller,
            Transform::from_translation(spawn_point.0.extend(0.0)),
            Visibility::default(),
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0),
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Ground, GameLayer::Wall, GameLayer::Hazard],
                ),
            ),
        ))
        .id();

    for cue in buffer.drain() {
        cues.write(CharacterCue { entity, cue });
    }
}
