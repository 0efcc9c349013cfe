//! Character domain: keeps one overlap sensor alive per enabled attack hitbox.
//!
//! The sensor is a child collider of the player body, placed relative to it.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::components::{AttackSensor, GameLayer};
use crate::character::controller::PlayerController;
use crate::character::systems::flip_y;

pub(crate) fn sync_attack_sensors(
    mut commands: Commands,
    controllers: Query<(Entity, &PlayerController)>,
    mut sensors: Query<(Entity, &AttackSensor, &mut Transform)>,
) {
    for (owner, controller) in &controllers {
        let hitbox = controller.character.hitbox;
        let offset = flip_y(hitbox.center() - controller.character.body.position);
        let existing = sensors
            .iter_mut()
            .find(|(_, sensor, _)| sensor.owner == owner);

        match (hitbox.enabled, existing) {
            (true, Some((_, _, mut transform))) => {
                transform.translation = offset.extend(1.0);
            }
            (true, None) => {
                commands.spawn((
                    AttackSensor { owner },
                    Sprite {
                        color: Color::srgba(1.0, 1.0, 0.3, 0.35),
                        custom_size: Some(hitbox.size),
                        ..default()
                    },
                    Transform::from_translation(offset.extend(1.0)),
                    ChildOf(owner),
                    Collider::rectangle(hitbox.size.x, hitbox.size.y),
                    Sensor,
                    CollisionEventsEnabled,
                    CollisionLayers::new(GameLayer::PlayerHitbox, [GameLayer::Hazard]),
                ));
                debug!("Attack hitbox enabled at offset {:?}", offset);
            }
            (false, Some((entity, _, _))) => {
                commands.entity(entity).despawn();
            }
            (false, None) => {}
        }
    }

    // Sensors whose owner is gone
    for (entity, sensor, _) in &sensors {
        if !controllers.contains(sensor.owner) {
            commands.entity(entity).despawn();
        }
    }
}
