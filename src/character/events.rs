//! Character domain: messages exchanged with the level and presentation layers.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::character::hooks::Cue;

/// Published for every animation or particle notification a state emits
#[derive(Debug, Clone, Copy)]
pub struct CharacterCue {
    pub entity: Entity,
    pub cue: Cue,
}

impl Message for CharacterCue {}

/// Fired when a character must be put back at a spawn point
#[derive(Debug, Clone, Copy)]
pub struct RespawnRequest {
    pub entity: Entity,
    /// World-space spawn position
    pub position: Vec2,
}

impl Message for RespawnRequest {}

/// What the attack hitbox touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitboxTarget {
    pub pogoable: bool,
}

/// Fired when an enabled attack hitbox overlaps a hazard
#[derive(Debug, Clone, Copy)]
pub struct HitboxOverlap {
    pub entity: Entity,
    pub target: HitboxTarget,
}

impl Message for HitboxOverlap {}
