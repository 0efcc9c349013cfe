//! Character domain: per-state behavior behind a tagged dispatch.
//!
//! State-owned timers live in the variant payload, so leaving a state drops
//! them and nothing stale can fire afterwards.

mod air_attack;
mod dash;
mod grounded;
mod jump;
mod wall_jump;
mod wall_slide;

use bevy::prelude::*;

use crate::character::components::Character;
use crate::character::hooks::ParticleCue;
use crate::character::machine::{CharacterState, EnterParams, TickContext, Transition};
use crate::core::Millis;

pub use air_attack::AirAttackData;
pub use dash::DashData;
pub use wall_slide::WallSlideData;

#[derive(Debug, Clone, PartialEq)]
pub enum StateData {
    Idle,
    Run,
    Jump,
    AirAttack(AirAttackData),
    WallSlide(WallSlideData),
    WallJump,
    GroundDash(DashData),
    AirDash(DashData),
}

impl StateData {
    pub fn fresh(kind: CharacterState, now: Millis) -> Self {
        match kind {
            CharacterState::Idle => StateData::Idle,
            CharacterState::Run => StateData::Run,
            CharacterState::Jump => StateData::Jump,
            CharacterState::AirAttack => StateData::AirAttack(AirAttackData::new(now)),
            CharacterState::WallSlide => StateData::WallSlide(WallSlideData::default()),
            CharacterState::WallJump => StateData::WallJump,
            CharacterState::GroundDash => StateData::GroundDash(DashData::new(now)),
            CharacterState::AirDash => StateData::AirDash(DashData::new(now)),
        }
    }

    pub fn kind(&self) -> CharacterState {
        match self {
            StateData::Idle => CharacterState::Idle,
            StateData::Run => CharacterState::Run,
            StateData::Jump => CharacterState::Jump,
            StateData::AirAttack(_) => CharacterState::AirAttack,
            StateData::WallSlide(_) => CharacterState::WallSlide,
            StateData::WallJump => CharacterState::WallJump,
            StateData::GroundDash(_) => CharacterState::GroundDash,
            StateData::AirDash(_) => CharacterState::AirDash,
        }
    }
}

/// Returns a fallback state when the entry precondition does not hold.
pub(crate) fn enter(
    data: &mut StateData,
    character: &mut Character,
    params: EnterParams,
    ctx: &mut TickContext,
) -> Option<CharacterState> {
    match data {
        StateData::Idle => grounded::enter_idle(character, params, ctx),
        StateData::Run => grounded::enter_run(character, ctx),
        StateData::Jump => jump::enter(character, params, ctx),
        StateData::AirAttack(attack) => air_attack::enter(attack, character, ctx),
        StateData::WallSlide(slide) => return wall_slide::enter(slide, character, ctx),
        StateData::WallJump => return wall_jump::enter(character, ctx),
        StateData::GroundDash(dash) => dash::enter(dash, character, false, ctx),
        StateData::AirDash(dash) => dash::enter(dash, character, true, ctx),
    }
    None
}

pub(crate) fn execute(
    data: &mut StateData,
    character: &mut Character,
    ctx: &mut TickContext,
) -> Option<Transition> {
    match data {
        StateData::Idle => grounded::execute_idle(character, ctx),
        StateData::Run => grounded::execute_run(character, ctx),
        StateData::Jump => jump::execute(character, ctx),
        StateData::AirAttack(attack) => air_attack::execute(attack, character, ctx),
        StateData::WallSlide(slide) => wall_slide::execute(slide, character, ctx),
        StateData::WallJump => wall_jump::execute(character, ctx),
        StateData::GroundDash(dash) => dash::execute(dash, character, false, ctx),
        StateData::AirDash(dash) => dash::execute(dash, character, true, ctx),
    }
}

pub(crate) fn exit(data: &mut StateData, character: &mut Character, ctx: &mut TickContext) {
    match data {
        StateData::Idle => grounded::exit_idle(ctx),
        StateData::Run => grounded::exit_run(character, ctx),
        StateData::Jump => jump::exit(character),
        StateData::AirAttack(attack) => air_attack::exit(attack, character),
        StateData::WallSlide(slide) => wall_slide::exit(slide, character, ctx),
        StateData::WallJump => wall_jump::exit(character),
        StateData::GroundDash(_) | StateData::AirDash(_) => dash::exit(character, ctx),
    }
}

/// Arm the jump buffer and try to spend it against ground contact or coyote time.
pub(crate) fn take_ground_jump(character: &mut Character, ctx: &mut TickContext) -> bool {
    character.timers.jump_buffer = ctx.now;
    if !character.jump_buffered(ctx.now, ctx.tuning) {
        return false;
    }
    let grounded = character.is_grounded();
    if !grounded && !character.coyote_open(ctx.now, ctx.tuning) {
        return false;
    }
    if !grounded {
        debug!("Coyote jump at {}ms", ctx.now);
    }
    character.timers.jump_buffer = 0;
    character.timers.time_last_grounded = 0;
    ctx.hooks.particles(ParticleCue::JumpBurst);
    true
}

/// Dampen a rising jump once when the button is released early.
pub(crate) fn apply_jump_cutoff(character: &mut Character, ctx: &TickContext) {
    if ctx.input.held_jump {
        character.jump_cutoff = false;
        return;
    }
    if character.jump_being_held && !character.jump_cutoff && character.body.velocity.y < 0.0 {
        character.body.velocity.y *= ctx.tuning.jump_cutoff_factor;
        character.jump_cutoff = true;
    }
}

/// Air dash is available: pressed, off cooldown and not yet spent this excursion.
pub(crate) fn air_dash_ready(character: &Character, ctx: &TickContext) -> bool {
    ctx.input.just_pressed_dash && character.can_dash && !character.has_air_dashed
}
