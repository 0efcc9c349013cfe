//! Level domain: practice room geometry, hazards and respawn bookkeeping.

mod components;
mod hazards;
mod spawn;

pub use components::{Hazard, SessionStats, SpawnPoint};
pub(crate) use spawn::spawn_level;

use bevy::prelude::*;

use crate::character::CharacterSet;
use crate::level::hazards::{detect_hazard_contacts, detect_hitbox_overlaps};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnPoint>()
            .init_resource::<SessionStats>()
            .add_systems(Startup, spawn_level)
            .add_systems(
                Update,
                (detect_hazard_contacts, detect_hitbox_overlaps).in_set(CharacterSet::Detect),
            );
    }
}
