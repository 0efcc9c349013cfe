//! Debug domain: developer overlay and hotkeys (feature `dev-tools`).

mod state;
mod systems;
mod ui;

pub use state::DebugState;

use bevy::prelude::*;

use crate::character::CharacterSet;
use crate::debug::systems::{
    handle_debug_hotkeys, update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (handle_debug_hotkeys, update_status_message)
                    .chain()
                    .before(CharacterSet::Detect),
            )
            .add_systems(
                Update,
                update_debug_info_overlay.after(CharacterSet::Present),
            );
    }
}
