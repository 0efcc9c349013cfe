//! Level domain: hazard contact and attack-hitbox overlap detection.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::character::{AttackSensor, HitboxOverlap, HitboxTarget, Player, RespawnRequest};
use crate::level::{Hazard, SessionStats, SpawnPoint};

/// Player body touching a hazard respawns the player.
pub(crate) fn detect_hazard_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut respawns: MessageWriter<RespawnRequest>,
    mut stats: ResMut<SessionStats>,
    spawn_point: Res<SpawnPoint>,
    player_query: Query<(), With<Player>>,
    hazard_query: Query<(), With<Hazard>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player, hazard) in pairs {
            if !player_query.contains(player) || !hazard_query.contains(hazard) {
                continue;
            }

            stats.deaths += 1;
            info!("Player hit a hazard (deaths: {})", stats.deaths);
            respawns.write(RespawnRequest {
                entity: player,
                position: spawn_point.0,
            });
        }
    }
}

/// Attack sensor touching a hazard is reported to the sensor's owner.
pub(crate) fn detect_hitbox_overlaps(
    mut collision_events: MessageReader<CollisionStart>,
    mut overlaps: MessageWriter<HitboxOverlap>,
    sensor_query: Query<&AttackSensor>,
    hazard_query: Query<&Hazard>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (sensor_entity, hazard_entity) in pairs {
            let Ok(sensor) = sensor_query.get(sensor_entity) else {
                continue;
            };
            let Ok(hazard) = hazard_query.get(hazard_entity) else {
                continue;
            };

            debug!("Attack hitbox touched hazard (pogoable: {})", hazard.pogoable);
            overlaps.write(HitboxOverlap {
                entity: sensor.owner,
                target: HitboxTarget {
                    pogoable: hazard.pogoable,
                },
            });
        }
    }
}
