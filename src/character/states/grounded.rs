//! Idle and Run: neutral and locomotion behavior on the ground.

use bevy::prelude::*;

use crate::character::components::Character;
use crate::character::hooks::{AnimationCue, ParticleCue};
use crate::character::machine::{CharacterState, EnterParams, TickContext, Transition};
use crate::character::states::take_ground_jump;

fn refresh_ground_contact(character: &mut Character, ctx: &TickContext) {
    if character.is_grounded() {
        character.has_air_dashed = false;
        character.timers.time_last_grounded = ctx.now;
    }
}

/// Dash is a ground-only move from here; a press while airborne is swallowed.
fn ground_dash(character: &Character, ctx: &TickContext) -> Option<Option<Transition>> {
    if !(ctx.input.just_pressed_dash && character.can_dash) {
        return None;
    }
    if character.is_grounded() {
        Some(Some(Transition::to(CharacterState::GroundDash)))
    } else {
        Some(None)
    }
}

pub(super) fn enter_idle(character: &mut Character, params: EnterParams, ctx: &mut TickContext) {
    if params.from_respawn {
        debug!("Character respawned into Idle at {:?}", character.body.position);
    }
    ctx.hooks.play_animation(AnimationCue::Idle);
    character.body.velocity.x = 0.0;
    character.body.drag_x = ctx.tuning.drag;
    refresh_ground_contact(character, ctx);
    ctx.hooks.particles(ParticleCue::RunStop);
    ctx.hooks.particles(ParticleCue::IdleStart);
}

pub(super) fn execute_idle(character: &mut Character, ctx: &mut TickContext) -> Option<Transition> {
    refresh_ground_contact(character, ctx);

    if let Some(dash) = ground_dash(character, ctx) {
        return dash;
    }

    if ctx.input.just_pressed_jump && take_ground_jump(character, ctx) {
        return Some(Transition::actual_jump());
    }

    if character.is_grounded() {
        if ctx.input.any_horizontal() {
            return Some(Transition::to(CharacterState::Run));
        }
    } else if !character.coyote_open(ctx.now, ctx.tuning) {
        return Some(Transition::to(CharacterState::Jump));
    }
    None
}

pub(super) fn exit_idle(ctx: &mut TickContext) {
    ctx.hooks.particles(ParticleCue::IdleStop);
}

pub(super) fn enter_run(character: &mut Character, ctx: &mut TickContext) {
    ctx.hooks.play_animation(AnimationCue::Run);
    refresh_ground_contact(character, ctx);
    ctx.hooks.particles(ParticleCue::IdleStop);
    ctx.hooks.particles(ParticleCue::RunStart);
}

pub(super) fn execute_run(character: &mut Character, ctx: &mut TickContext) -> Option<Transition> {
    refresh_ground_contact(character, ctx);

    if let Some(dash) = ground_dash(character, ctx) {
        return dash;
    }

    if ctx.input.just_pressed_jump && take_ground_jump(character, ctx) {
        return Some(Transition::actual_jump());
    }

    let dir = ctx.input.direction();
    if dir != 0.0 {
        character.body.velocity.x = dir * ctx.tuning.max_speed;
        character.set_facing(dir, false);
    } else if character.is_grounded() {
        return Some(Transition::to(CharacterState::Idle));
    }

    if !character.is_grounded() {
        if character.reattach_allowed(ctx.now) && character.should_wall_slide(ctx.input) {
            return Some(Transition::to(CharacterState::WallSlide));
        }
        if !character.coyote_open(ctx.now, ctx.tuning) {
            return Some(Transition::to(CharacterState::Jump));
        }
    }
    None
}

pub(super) fn exit_run(character: &mut Character, ctx: &mut TickContext) {
    character.body.velocity.x = 0.0;
    ctx.hooks.particles(ParticleCue::RunStop);
}
