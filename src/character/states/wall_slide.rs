//! WallSlide: controlled descent against a vertical surface.

use bevy::prelude::*;

use crate::character::components::{Character, WallSide};
use crate::character::hooks::AnimationCue;
use crate::character::machine::{CharacterState, TickContext, Transition};
use crate::character::states::air_dash_ready;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallSlideData {
    /// Set when the slide ended by pressing away; that path arms its own grace.
    pub explicit_detach: bool,
}

fn held_toward(side: WallSide, ctx: &TickContext) -> bool {
    match side {
        WallSide::Left => ctx.input.held_left,
        WallSide::Right => ctx.input.held_right,
        WallSide::None => false,
    }
}

/// Live collision flags first, then held direction while descending.
fn detect_side(character: &Character, incoming_vy: f32, ctx: &TickContext) -> WallSide {
    let blocked = &character.body.blocked;
    if blocked.left {
        WallSide::Left
    } else if blocked.right {
        WallSide::Right
    } else if ctx.input.held_left && incoming_vy > 0.0 {
        WallSide::Left
    } else if ctx.input.held_right && incoming_vy > 0.0 {
        WallSide::Right
    } else {
        WallSide::None
    }
}

pub(super) fn enter(
    _data: &mut WallSlideData,
    character: &mut Character,
    ctx: &mut TickContext,
) -> Option<CharacterState> {
    ctx.hooks.play_animation(AnimationCue::WallSlide);
    let incoming_vy = character.body.velocity.y;
    character.body.velocity = Vec2::ZERO;

    let side = detect_side(character, incoming_vy, ctx);
    if side == WallSide::None {
        warn!("Wall slide entered with no wall in contact or held; falling instead");
        return Some(CharacterState::Jump);
    }

    character.last_wall_side = side;
    character.set_facing(side.away_sign(), true);
    character.body.velocity.x = side.inward_sign() * ctx.tuning.wall_nudge;

    character.timers.time_lost_wall_contact = 0;
    character.is_sliding = true;
    character.can_wall_jump = true;
    character.has_air_dashed = false;
    None
}

pub(super) fn execute(
    data: &mut WallSlideData,
    character: &mut Character,
    ctx: &mut TickContext,
) -> Option<Transition> {
    let observed_vy = character.body.velocity.y;
    let side = character.last_wall_side;
    let away = side.opposite();

    if air_dash_ready(character, ctx) {
        character.dash_away_from_wall = side.away_sign();
        return Some(Transition::to(CharacterState::AirDash));
    }

    if ctx.input.just_pressed_jump {
        return Some(Transition::to(CharacterState::WallJump));
    }

    let pressing_into = held_toward(side, ctx);
    let pressing_away = held_toward(away, ctx) && !pressing_into;

    if pressing_away && !character.body.blocked.side(away) {
        character.timers.wall_reattach_until = ctx.now + ctx.tuning.explicit_detach_grace_ms;
        data.explicit_detach = true;
        character.body.velocity.x = 0.0;
        return Some(Transition::to(CharacterState::Jump));
    }

    character.body.velocity.y = ctx.tuning.wall_slide_speed;
    character.body.velocity.x = if pressing_into {
        side.inward_sign() * ctx.tuning.wall_stick_force
    } else {
        0.0
    };

    if character.is_grounded() {
        return Some(Transition::to(CharacterState::Idle));
    }

    if observed_vy <= 0.0 && ctx.tuning.wall_slide_speed > 0.0 {
        debug!("Wall slide stopped by an external force");
        return Some(Transition::to(CharacterState::Jump));
    }

    if pressing_away {
        // Inner corner: the other wall is already under the held direction.
        debug!("Wall slide switched to the {:?} wall", away);
        character.last_wall_side = away;
        character.set_facing(away.away_sign(), true);
        character.body.velocity.x = away.inward_sign() * ctx.tuning.wall_stick_force;
        character.timers.time_lost_wall_contact = 0;
        return None;
    }

    if !pressing_into {
        character.body.velocity.x = 0.0;
        return Some(Transition::to(CharacterState::Jump));
    }

    if character.body.blocked.side(side) {
        character.timers.time_lost_wall_contact = 0;
    } else if character.timers.time_lost_wall_contact == 0 {
        character.timers.time_lost_wall_contact = ctx.now;
    } else if ctx.now > character.timers.time_lost_wall_contact + ctx.tuning.wall_contact_grace_ms {
        return Some(Transition::to(CharacterState::Jump));
    }
    None
}

pub(super) fn exit(data: &mut WallSlideData, character: &mut Character, ctx: &mut TickContext) {
    character.is_sliding = false;
    character.can_wall_jump = false;
    if !data.explicit_detach {
        character.timers.wall_reattach_until = ctx.now + ctx.tuning.reattach_grace_ms;
    }
}
