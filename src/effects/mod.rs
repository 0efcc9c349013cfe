//! Effects domain: animation and particle presentation for character cues.

mod animation;
mod layers;
mod particles;

pub use animation::CharacterAnimation;
pub use layers::{BodySprite, LegsSprite, SpriteLayer, UpperSprite};
pub use particles::{Particle, ParticleEmitters};

use bevy::prelude::*;

use crate::character::CharacterSet;
use crate::effects::animation::{
    apply_animation_cues, sync_character_visuals, update_animation_frames,
};
use crate::effects::layers::attach_player_visuals;
use crate::effects::particles::{emit_continuous_particles, handle_particle_cues, update_particles};

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_player_visuals,
                apply_animation_cues,
                handle_particle_cues,
                update_animation_frames,
                sync_character_visuals,
                emit_continuous_particles,
                update_particles,
            )
                .chain()
                .in_set(CharacterSet::Present),
        );
    }
}
