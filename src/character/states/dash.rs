//! GroundDash and AirDash: a short gravity-free horizontal burst.

use crate::character::components::{Appearance, Character};
use crate::character::hooks::AnimationCue;
use crate::character::machine::{CharacterState, TickContext, Transition};
use crate::character::timers::DeferredAction;
use crate::core::Millis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashData {
    pub ends_at: Millis,
}

impl DashData {
    pub fn new(now: Millis) -> Self {
        Self { ends_at: now }
    }
}

pub(super) fn enter(data: &mut DashData, character: &mut Character, air: bool, ctx: &mut TickContext) {
    character.appearance = Appearance::Full;
    ctx.hooks.play_animation(AnimationCue::Dash);
    character.is_dashing = true;
    character.can_dash = false;

    let speed = if air {
        ctx.tuning.air_dash_speed
    } else {
        ctx.tuning.dash_speed
    };
    character.body.max_velocity.x = speed;
    character.body.drag_x = 0.0;

    let forced = if air { character.dash_away_from_wall } else { 0.0 };
    character.dash_away_from_wall = 0.0;
    let dir = if forced != 0.0 {
        forced
    } else if ctx.input.any_horizontal() {
        ctx.input.direction()
    } else {
        character.facing.sign()
    };
    character.set_facing(dir, true);

    character.body.velocity.x = speed * dir;
    character.body.velocity.y = 0.0;
    character.body.gravity_enabled = false;
    if air {
        character.has_air_dashed = true;
    }

    data.ends_at = ctx.now + ctx.tuning.dash_duration_ms;
    character
        .deferred
        .schedule(ctx.now + ctx.tuning.dash_cooldown_ms, DeferredAction::ReenableDash);
}

pub(super) fn execute(
    data: &mut DashData,
    character: &mut Character,
    air: bool,
    ctx: &mut TickContext,
) -> Option<Transition> {
    if ctx.input.just_pressed_jump {
        character.timers.jump_buffer = ctx.now;
    }

    if ctx.now >= data.ends_at {
        if !air && character.is_grounded() {
            return Some(Transition::to(CharacterState::Idle));
        }
        return Some(Transition::to(CharacterState::Jump));
    }

    if air && ctx.input.just_pressed_attack {
        return Some(Transition::to(CharacterState::AirAttack));
    }
    None
}

pub(super) fn exit(character: &mut Character, ctx: &mut TickContext) {
    character.is_dashing = false;
    character.body.restore_knobs(ctx.tuning);
    if character.is_grounded() {
        ctx.hooks.play_animation(AnimationCue::Idle);
    } else {
        ctx.hooks.play_animation(AnimationCue::Jump);
    }
}
