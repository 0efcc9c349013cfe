//! Debug domain: hotkeys and overlay refresh.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::character::{Player, PlayerController, RespawnRequest};
use crate::core::{Clock, SessionClock};
use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, format_character_info, spawn_debug_info_overlay};
use crate::level::{SessionStats, SpawnPoint};

/// F1 toggles the info overlay, F2 forces a respawn
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    spawn_point: Res<SpawnPoint>,
    player_query: Query<Entity, With<Player>>,
    mut respawns: MessageWriter<RespawnRequest>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_info = !debug_state.show_info;
        info!("Debug overlay: {}", if debug_state.show_info { "ON" } else { "OFF" });
    }

    if keyboard.just_pressed(KeyCode::F2) {
        for entity in &player_query {
            respawns.write(RespawnRequest {
                entity,
                position: spawn_point.0,
            });
        }
        debug_state.set_message("Forced respawn", 1.5);
        info!("Debug: forced respawn");
    }
}

pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, remaining)) = &mut debug_state.status_message {
        *remaining -= time.delta_secs();
        if *remaining <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Update the debug info overlay with current character state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    clock: Res<SessionClock>,
    stats: Res<SessionStats>,
    player_query: Query<&PlayerController, With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some(controller), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let mut info = format_character_info(
            controller.state(),
            &controller.character,
            clock.now(),
            stats.deaths,
        );
        if let Some((message, _)) = &debug_state.status_message {
            info.push('\n');
            info.push_str(message);
        }
        **text = info;
    }
}
