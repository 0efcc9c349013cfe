//! Jump: every unsupported vertical motion, from a jump impulse or a plain fall.

use crate::character::components::Character;
use crate::character::hooks::{AnimationCue, ParticleCue};
use crate::character::machine::{CharacterState, EnterParams, TickContext, Transition};
use crate::character::states::{air_dash_ready, apply_jump_cutoff};

pub(super) fn enter(character: &mut Character, params: EnterParams, ctx: &mut TickContext) {
    ctx.hooks.play_animation(AnimationCue::Jump);
    character.body.drag_x = 0.0;

    if params.is_actual_jump {
        character.body.velocity.y = ctx.tuning.jump_velocity;
        character.jump_being_held = true;
        character.jump_cutoff = false;
        character.has_air_dashed = false;
    }
}

pub(super) fn execute(character: &mut Character, ctx: &mut TickContext) -> Option<Transition> {
    apply_jump_cutoff(character, ctx);

    if ctx.input.just_pressed_jump {
        character.timers.jump_buffer = ctx.now;
    }

    if air_dash_ready(character, ctx) {
        return Some(Transition::to(CharacterState::AirDash));
    }

    if !character.is_dashing
        && character.should_wall_slide(ctx.input)
        && character.reattach_allowed(ctx.now)
    {
        return Some(Transition::to(CharacterState::WallSlide));
    }

    character.air_control(ctx.input, ctx.tuning.air_speed);

    if ctx.input.just_pressed_attack {
        return Some(Transition::to(CharacterState::AirAttack));
    }

    if character.is_grounded() {
        if character.jump_buffered(ctx.now, ctx.tuning) {
            character.timers.jump_buffer = 0;
            ctx.hooks.particles(ParticleCue::JumpBurst);
            return Some(Transition::actual_jump());
        }
        if ctx.input.any_horizontal() {
            return Some(Transition::to(CharacterState::Run));
        }
        return Some(Transition::to(CharacterState::Idle));
    }
    None
}

pub(super) fn exit(character: &mut Character) {
    character.jump_being_held = false;
    character.body.velocity.x = 0.0;
}
