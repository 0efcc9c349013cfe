//! Effects domain: layered placeholder sprites for the player.
//!
//! The full-body sprite is shown most of the time; during the air attack it
//! is swapped for separate legs and upper-body layers.

use bevy::prelude::*;

use crate::character::{PLAYER_SIZE, Player};
use crate::effects::animation::CharacterAnimation;
use crate::effects::particles::ParticleEmitters;

/// Render order for the player's sprite layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpriteLayer {
    Body = 10,
    Legs = 20,
    Upper = 30,
    FrontEffect = 50,
}

impl SpriteLayer {
    pub fn z_index(&self) -> f32 {
        (*self as i32) as f32 * 0.01
    }
}

#[derive(Component, Debug)]
pub struct BodySprite;

#[derive(Component, Debug)]
pub struct LegsSprite;

#[derive(Component, Debug)]
pub struct UpperSprite;

pub(crate) fn attach_player_visuals(
    mut commands: Commands,
    players: Query<Entity, Added<Player>>,
) {
    for player in &players {
        let legs_size = Vec2::new(PLAYER_SIZE.x, PLAYER_SIZE.y * 0.45);
        let upper_size = Vec2::new(PLAYER_SIZE.x + 6.0, PLAYER_SIZE.y * 0.55);

        commands
            .entity(player)
            .insert((CharacterAnimation::default(), ParticleEmitters::default()))
            .with_children(|parent| {
                parent.spawn((
                    BodySprite,
                    Sprite {
                        color: Color::srgb(0.9, 0.9, 0.9),
                        custom_size: Some(PLAYER_SIZE),
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, SpriteLayer::Body.z_index()),
                ));
                parent.spawn((
                    LegsSprite,
                    Sprite {
                        color: Color::srgb(0.7, 0.7, 0.8),
                        custom_size: Some(legs_size),
                        ..default()
                    },
                    Transform::from_xyz(
                        0.0,
                        -PLAYER_SIZE.y * 0.5 + legs_size.y * 0.5,
                        SpriteLayer::Legs.z_index(),
                    ),
                    Visibility::Hidden,
                ));
                parent.spawn((
                    UpperSprite,
                    Sprite {
                        color: Color::srgb(0.95, 0.8, 0.4),
                        custom_size: Some(upper_size),
                        ..default()
                    },
                    Transform::from_xyz(
                        0.0,
                        PLAYER_SIZE.y * 0.5 - upper_size.y * 0.5,
                        SpriteLayer::Upper.z_index(),
                    ),
                    Visibility::Hidden,
                ));
            });

        debug!("Attached layered sprites to player {:?}", player);
    }
}
