//! Debug domain: overlay UI nodes and text formatting.

use bevy::prelude::*;

use crate::character::{Blocked, Character, CharacterState};
use crate::core::Millis;

/// Marker for the info overlay text
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

fn blocked_flags(blocked: &Blocked) -> String {
    let flag = |on: bool, c: char| if on { c } else { '-' };
    format!(
        "{}{}{}{}{}",
        flag(blocked.left, 'L'),
        flag(blocked.right, 'R'),
        flag(blocked.down, 'D'),
        flag(blocked.world_edge_left, '<'),
        flag(blocked.world_edge_right, '>'),
    )
}

fn since(armed: Millis, now: Millis) -> String {
    if armed == 0 {
        "-".to_string()
    } else {
        format!("{}ms ago", now.saturating_sub(armed))
    }
}

pub(crate) fn format_character_info(
    state: CharacterState,
    character: &Character,
    now: Millis,
    deaths: u32,
) -> String {
    let body = &character.body;
    let timers = &character.timers;
    format!(
        "State: {}\nPos: ({:.0}, {:.0})\nVel: ({:.0}, {:.0})\nBlocked: {}\n\
         Dash: can={} air_dashed={} dashing={}\nWall: side={:?} sliding={}\n\
         Grounded: {}\nJump buffer: {}\nReattach until: {}\nDeaths: {}",
        state,
        body.position.x,
        body.position.y,
        body.velocity.x,
        body.velocity.y,
        blocked_flags(&body.blocked),
        character.can_dash,
        character.has_air_dashed,
        character.is_dashing,
        character.last_wall_side,
        character.is_sliding,
        since(timers.time_last_grounded, now),
        since(timers.jump_buffer, now),
        timers.wall_reattach_until,
        deaths,
    )
}
