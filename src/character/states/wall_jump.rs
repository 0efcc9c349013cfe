//! WallJump: the ballistic push off a wall before air control returns.

use crate::character::components::{Character, WallSide};
use crate::character::hooks::AnimationCue;
use crate::character::machine::{CharacterState, TickContext, Transition};
use crate::character::states::{air_dash_ready, apply_jump_cutoff};
use crate::core::deadline_passed;

pub(super) fn enter(character: &mut Character, ctx: &mut TickContext) -> Option<CharacterState> {
    ctx.hooks.play_animation(AnimationCue::Jump);

    let blocked = character.body.blocked;
    let side = if blocked.left {
        WallSide::Left
    } else if blocked.right {
        WallSide::Right
    } else {
        character.last_wall_side
    };
    if side == WallSide::None {
        return Some(CharacterState::Jump);
    }
    character.last_wall_side = side;

    let dir = side.away_sign();
    character.body.velocity.x = ctx.tuning.wall_jump_x_velocity * dir;
    character.body.velocity.y = ctx.tuning.wall_jump_y_velocity;
    character.set_facing(dir, true);

    character.has_air_dashed = false;
    character.jump_being_held = true;
    character.jump_cutoff = false;
    character.timers.wall_jump_action_until = ctx.now + ctx.tuning.wall_jump_action_delay_ms;
    character.timers.wall_jump_ground_check_until =
        ctx.now + ctx.tuning.wall_jump_ground_check_delay_ms;
    None
}

pub(super) fn execute(character: &mut Character, ctx: &mut TickContext) -> Option<Transition> {
    if ctx.input.just_pressed_jump {
        character.timers.jump_buffer = ctx.now;
    }

    let timers = character.timers;
    if deadline_passed(timers.wall_jump_ground_check_until, ctx.now) && character.is_grounded() {
        if character.jump_buffered(ctx.now, ctx.tuning) {
            character.timers.jump_buffer = 0;
            return Some(Transition::actual_jump());
        }
        return Some(Transition::to(CharacterState::Idle));
    }

    if air_dash_ready(character, ctx) {
        return Some(Transition::to(CharacterState::AirDash));
    }

    if ctx.input.just_pressed_attack {
        return Some(Transition::to(CharacterState::AirAttack));
    }

    let allow_actions = deadline_passed(timers.wall_jump_action_until, ctx.now);
    if allow_actions {
        if character.should_wall_slide(ctx.input) {
            return Some(Transition::to(CharacterState::WallSlide));
        }
        character.air_control(ctx.input, ctx.tuning.air_speed);
    }

    apply_jump_cutoff(character, ctx);
    None
}

/// Horizontal momentum carries into the next state.
pub(super) fn exit(character: &mut Character) {
    character.jump_being_held = false;
}
