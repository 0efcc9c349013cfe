//! AirAttack: the timed pogo slash.

use bevy::prelude::*;

use crate::character::components::{Appearance, Character, LegsPose};
use crate::character::hooks::AnimationCue;
use crate::character::machine::{CharacterState, TickContext, Transition};
use crate::character::states::air_dash_ready;
use crate::core::Millis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirAttackData {
    pub started_at: Millis,
    /// Pending re-enable of the hitbox after the startup delay.
    pub reaffirm_at: Option<Millis>,
}

impl AirAttackData {
    pub fn new(now: Millis) -> Self {
        Self {
            started_at: now,
            reaffirm_at: None,
        }
    }

    pub fn ends_at(&self, duration_ms: Millis) -> Millis {
        self.started_at + duration_ms
    }
}

fn place_hitbox(character: &mut Character, offset_y: f32) {
    character.hitbox.position = character.body.position + Vec2::new(0.0, offset_y);
}

pub(super) fn enter(data: &mut AirAttackData, character: &mut Character, ctx: &mut TickContext) {
    character.hitbox.size = ctx.tuning.hitbox_size();
    character.hitbox.enabled = true;
    place_hitbox(character, ctx.tuning.hitbox_enter_offset_y);
    data.reaffirm_at = Some(ctx.now + ctx.tuning.hitbox_reaffirm_delay_ms);

    character.appearance = Appearance::Composite { legs: LegsPose::Up };
    ctx.hooks.play_animation(AnimationCue::PogoSlash);

    character.is_sliding = false;
    character.can_wall_jump = false;
}

pub(super) fn execute(
    data: &mut AirAttackData,
    character: &mut Character,
    ctx: &mut TickContext,
) -> Option<Transition> {
    if ctx.input.just_pressed_jump {
        character.timers.jump_buffer = ctx.now;
    }

    if data.reaffirm_at.is_some_and(|at| ctx.now >= at) {
        data.reaffirm_at = None;
        character.hitbox.enabled = true;
        place_hitbox(character, ctx.tuning.hitbox_enter_offset_y);
    }

    if let Appearance::Composite { legs } = &mut character.appearance {
        *legs = LegsPose::for_vertical_speed(character.body.velocity.y, ctx.tuning);
    }

    if air_dash_ready(character, ctx) {
        exit(data, character);
        return Some(Transition::to(CharacterState::AirDash));
    }

    let dir = ctx.input.direction();
    if dir != 0.0 {
        character.body.velocity.x = dir * ctx.tuning.pogo_air_control_speed;
    } else {
        character.body.velocity.x *= ctx.tuning.pogo_decay;
    }

    if ctx.now >= data.ends_at(ctx.tuning.air_attack_duration_ms) {
        if character.should_wall_slide(ctx.input) {
            return Some(Transition::to(CharacterState::WallSlide));
        }
        return Some(Transition::to(CharacterState::Jump));
    }

    if character.hitbox.enabled {
        place_hitbox(character, ctx.tuning.hitbox_track_offset_y);
    }
    None
}

/// Safe to run more than once.
pub(super) fn exit(data: &mut AirAttackData, character: &mut Character) {
    character.hitbox.enabled = false;
    character.appearance = Appearance::Full;
    data.reaffirm_at = None;
}
