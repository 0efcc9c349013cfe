//! Level domain: hazards, spawn point and session counters.

use bevy::prelude::*;

/// Respawn trigger. A pogoable hazard also bounces an attacking character.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    pub pogoable: bool,
}

impl Default for Hazard {
    fn default() -> Self {
        Self { pogoable: true }
    }
}

/// World-space position the player spawns and respawns at.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);

impl Default for SpawnPoint {
    fn default() -> Self {
        Self(Vec2::new(-700.0, -220.0))
    }
}

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SessionStats {
    pub deaths: u32,
}
