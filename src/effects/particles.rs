//! Effects domain: short-lived particle sprites driven by particle cues.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::character::{CharacterCue, Cue, PLAYER_SIZE, ParticleCue};
use crate::effects::layers::SpriteLayer;

const RUN_EMIT_INTERVAL: f32 = 0.08;
const IDLE_EMIT_INTERVAL: f32 = 0.6;

#[derive(Component, Debug)]
pub struct Particle {
    pub velocity: Vec2,
    pub lifetime: f32,
    pub age: f32,
}

/// Continuous emitters toggled on and off by cues.
#[derive(Component, Debug, Default)]
pub struct ParticleEmitters {
    pub run: bool,
    pub idle: bool,
    pub timer: f32,
}

impl ParticleEmitters {
    pub fn apply(&mut self, cue: ParticleCue) {
        match cue {
            ParticleCue::RunStart => self.run = true,
            ParticleCue::RunStop => self.run = false,
            ParticleCue::IdleStart => self.idle = true,
            ParticleCue::IdleStop => self.idle = false,
            ParticleCue::JumpBurst | ParticleCue::LandingDust => {}
        }
    }
}

fn spawn_particle(
    commands: &mut Commands,
    origin: Vec2,
    velocity: Vec2,
    lifetime: f32,
    color: Color,
) {
    commands.spawn((
        Particle {
            velocity,
            lifetime,
            age: 0.0,
        },
        Sprite {
            color,
            custom_size: Some(Vec2::splat(4.0)),
            ..default()
        },
        Transform::from_translation(origin.extend(SpriteLayer::FrontEffect.z_index())),
    ));
}

fn feet_of(transform: &GlobalTransform) -> Vec2 {
    transform.translation().truncate() - Vec2::new(0.0, PLAYER_SIZE.y * 0.5)
}

pub(crate) fn handle_particle_cues(
    mut commands: Commands,
    mut cues: MessageReader<CharacterCue>,
    mut emitters: Query<(&mut ParticleEmitters, &GlobalTransform)>,
) {
    let mut rng = rand::rng();

    for event in cues.read() {
        let Cue::Particles(cue) = event.cue else {
            continue;
        };
        let Ok((mut emitter, transform)) = emitters.get_mut(event.entity) else {
            continue;
        };
        emitter.apply(cue);

        let feet = feet_of(transform);
        match cue {
            ParticleCue::JumpBurst => {
                for _ in 0..rng.random_range(5..=8) {
                    let velocity = Vec2::new(
                        rng.random_range(-120.0..120.0),
                        rng.random_range(20.0..90.0),
                    );
                    let color = Color::srgb(0.9, 0.9, 1.0);
                    spawn_particle(&mut commands, feet, velocity, 0.35, color);
                }
            }
            ParticleCue::LandingDust => {
                for _ in 0..rng.random_range(6..=10) {
                    let velocity = Vec2::new(
                        rng.random_range(-160.0..160.0),
                        rng.random_range(5.0..40.0),
                    );
                    let color = Color::srgb(0.75, 0.7, 0.6);
                    spawn_particle(&mut commands, feet, velocity, 0.4, color);
                }
            }
            _ => {}
        }
    }
}

pub(crate) fn emit_continuous_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut emitters: Query<(&mut ParticleEmitters, &GlobalTransform)>,
) {
    let mut rng = rand::rng();

    for (mut emitter, transform) in &mut emitters {
        let interval = if emitter.run {
            RUN_EMIT_INTERVAL
        } else if emitter.idle {
            IDLE_EMIT_INTERVAL
        } else {
            emitter.timer = 0.0;
            continue;
        };

        emitter.timer += time.delta_secs();
        if emitter.timer < interval {
            continue;
        }
        emitter.timer -= interval;

        let feet = feet_of(transform);
        let velocity = if emitter.run {
            Vec2::new(rng.random_range(-40.0..40.0), rng.random_range(10.0..40.0))
        } else {
            Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(15.0..30.0))
        };
        spawn_particle(&mut commands, feet, velocity, 0.5, Color::srgba(0.8, 0.8, 0.8, 0.7));
    }
}

pub(crate) fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut particles: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut particle, mut transform, mut sprite) in &mut particles {
        particle.age += dt;
        if particle.age >= particle.lifetime {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation += (particle.velocity * dt).extend(0.0);
        let remaining = 1.0 - particle.age / particle.lifetime;
        sprite.color.set_alpha(remaining);
    }
}
