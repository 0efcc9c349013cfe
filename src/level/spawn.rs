//! Level domain: the practice room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::{GameLayer, Ground, Wall, WorldBound};
use crate::level::Hazard;

const GROUND_COLOR: Color = Color::srgb(0.4, 0.5, 0.4);
const PLATFORM_COLOR: Color = Color::srgb(0.5, 0.4, 0.3);
const WALL_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const BOUND_COLOR: Color = Color::srgb(0.15, 0.15, 0.2);

fn solid(
    commands: &mut Commands,
    color: Color,
    center: Vec2,
    size: Vec2,
    layers: CollisionLayers,
) -> Entity {
    commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            layers,
        ))
        .id()
}

fn spikes(commands: &mut Commands, center: Vec2, size: Vec2, pogoable: bool) {
    let color = if pogoable {
        Color::srgb(0.85, 0.2, 0.2)
    } else {
        Color::srgb(0.55, 0.1, 0.35)
    };
    commands.spawn((
        Hazard { pogoable },
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player, GameLayer::PlayerHitbox]),
    ));
}

pub(crate) fn spawn_level(mut commands: Commands) {
    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    // Floor, split by a spike pit
    for (x, width) in [(-450.0, 740.0), (450.0, 740.0)] {
        let floor = solid(
            &mut commands,
            GROUND_COLOR,
            Vec2::new(x, -320.0),
            Vec2::new(width, 40.0),
            ground_layers,
        );
        commands.entity(floor).insert(Ground);
    }
    spikes(&mut commands, Vec2::new(0.0, -330.0), Vec2::new(160.0, 20.0), true);

    // Level boundary: sliding on these is not allowed
    for x in [-820.0, 820.0] {
        let bound = solid(
            &mut commands,
            BOUND_COLOR,
            Vec2::new(x, 0.0),
            Vec2::new(40.0, 1000.0),
            wall_layers,
        );
        commands.entity(bound).insert((Wall, WorldBound));
    }

    // Wall-jump shaft
    for x in [-360.0, -200.0] {
        let wall = solid(
            &mut commands,
            WALL_COLOR,
            Vec2::new(x, 60.0),
            Vec2::new(40.0, 520.0),
            wall_layers,
        );
        commands.entity(wall).insert(Wall);
    }

    // Platforms
    for (center, width) in [
        (Vec2::new(-560.0, -160.0), 160.0),
        (Vec2::new(250.0, -150.0), 180.0),
        (Vec2::new(520.0, 20.0), 160.0),
        (Vec2::new(-280.0, 340.0), 200.0),
    ] {
        let platform = solid(
            &mut commands,
            PLATFORM_COLOR,
            center,
            Vec2::new(width, 20.0),
            ground_layers,
        );
        commands.entity(platform).insert(Ground);
    }

    // Pogo practice: a low spike strip under the high right platform
    spikes(&mut commands, Vec2::new(520.0, -290.0), Vec2::new(120.0, 20.0), true);
    // Ceiling spikes cannot be pogoed
    spikes(&mut commands, Vec2::new(250.0, 260.0), Vec2::new(180.0, 20.0), false);

    info!("Spawned practice room");
}
