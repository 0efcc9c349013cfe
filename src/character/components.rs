//! Character domain: the long-lived character record and its physics body.
//!
//! All positions and velocities here are screen space: y grows downward,
//! so an upward velocity is negative. The physics adapter flips y when it
//! talks to avian.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::input::InputSnapshot;
use crate::character::timers::{DeferredQueue, MovementTimers};
use crate::config::MovementTuning;
use crate::core::{Millis, deadline_passed, window_open};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors, platforms and tiles that block from any side
    Ground,
    /// Vertical surfaces
    Wall,
    /// Player character
    Player,
    /// Spikes and other respawn triggers
    Hazard,
    /// The pogo attack's overlap sensor
    PlayerHitbox,
}

#[derive(Component, Debug)]
pub struct Player;

/// Overlap sensor spawned while `owner`'s attack hitbox is enabled.
#[derive(Component, Debug)]
pub struct AttackSensor {
    pub owner: Entity,
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for the level's outer walls; sliding on them is not allowed.
#[derive(Component, Debug)]
pub struct WorldBound;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn from_sign(dir: f32) -> Option<Self> {
        if dir > 0.0 {
            Some(Facing::Right)
        } else if dir < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    /// Horizontal sign pointing away from the wall (0 when unknown).
    pub fn away_sign(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
            WallSide::None => 0.0,
        }
    }

    /// Horizontal sign pointing into the wall (0 when unknown).
    pub fn inward_sign(self) -> f32 {
        -self.away_sign()
    }

    pub fn opposite(self) -> Self {
        match self {
            WallSide::Left => WallSide::Right,
            WallSide::Right => WallSide::Left,
            WallSide::None => WallSide::None,
        }
    }
}

/// Collision-side flags refreshed by the physics collaborator before each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blocked {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    /// The left contact is the level boundary, not level geometry.
    pub world_edge_left: bool,
    /// The right contact is the level boundary, not level geometry.
    pub world_edge_right: bool,
}

impl Blocked {
    pub fn side(&self, side: WallSide) -> bool {
        match side {
            WallSide::Left => self.left,
            WallSide::Right => self.right,
            WallSide::None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub blocked: Blocked,
    pub gravity_enabled: bool,
    /// Horizontal deceleration in px/s² applied while > 0.
    pub drag_x: f32,
    pub max_velocity: Vec2,
}

impl PhysicsBody {
    pub fn new(position: Vec2, tuning: &MovementTuning) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            blocked: Blocked::default(),
            gravity_enabled: true,
            drag_x: tuning.drag,
            max_velocity: tuning.default_max_velocity(),
        }
    }

    /// Restore gravity, drag and velocity caps to their resting values.
    pub fn restore_knobs(&mut self, tuning: &MovementTuning) {
        self.gravity_enabled = true;
        self.drag_x = tuning.drag;
        self.max_velocity = tuning.default_max_velocity();
    }

    /// Advance velocity by one tick of gravity, drag and velocity caps.
    pub fn integrate(&mut self, dt: f32, tuning: &MovementTuning) {
        if self.gravity_enabled {
            self.velocity.y += tuning.gravity * dt;
        }

        if self.drag_x > 0.0 {
            let decel = self.drag_x * dt;
            if self.velocity.x > 0.0 {
                self.velocity.x = (self.velocity.x - decel).max(0.0);
            } else {
                self.velocity.x = (self.velocity.x + decel).min(0.0);
            }
        }

        self.velocity = self.velocity.clamp(-self.max_velocity, self.max_velocity);
    }
}

/// The pogo attack's overlap box. `position` is its top-center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackHitbox {
    pub enabled: bool,
    pub position: Vec2,
    pub size: Vec2,
}

impl AttackHitbox {
    pub fn new(size: Vec2) -> Self {
        Self {
            enabled: false,
            position: Vec2::ZERO,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(0.0, self.size.y * 0.5)
    }
}

/// Leg sprite shown under the attack's upper body, picked by vertical speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegsPose {
    Up,
    Max,
    #[default]
    Down,
}

impl LegsPose {
    pub fn for_vertical_speed(vy: f32, tuning: &MovementTuning) -> Self {
        if vy < tuning.legs_up_below {
            LegsPose::Up
        } else if vy < tuning.legs_max_below {
            LegsPose::Max
        } else {
            LegsPose::Down
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Full,
    /// Legs and upper body drawn separately during the air attack.
    Composite { legs: LegsPose },
}

#[derive(Debug, Clone)]
pub struct Character {
    pub body: PhysicsBody,
    pub facing: Facing,
    pub can_dash: bool,
    pub has_air_dashed: bool,
    pub is_dashing: bool,
    pub is_sliding: bool,
    pub can_wall_jump: bool,
    pub last_wall_side: WallSide,
    pub jump_being_held: bool,
    pub jump_cutoff: bool,
    /// Forced air-dash direction set when dashing off a wall; 0 when unset.
    pub dash_away_from_wall: f32,
    pub was_airborne: bool,
    pub timers: MovementTimers,
    pub hitbox: AttackHitbox,
    pub appearance: Appearance,
    pub deferred: DeferredQueue,
}

impl Character {
    pub fn new(position: Vec2, tuning: &MovementTuning) -> Self {
        Self {
            body: PhysicsBody::new(position, tuning),
            facing: Facing::Right,
            can_dash: true,
            has_air_dashed: false,
            is_dashing: false,
            is_sliding: false,
            can_wall_jump: false,
            last_wall_side: WallSide::None,
            jump_being_held: false,
            jump_cutoff: false,
            dash_away_from_wall: 0.0,
            was_airborne: false,
            timers: MovementTimers::default(),
            hitbox: AttackHitbox::new(tuning.hitbox_size()),
            appearance: Appearance::Full,
            deferred: DeferredQueue::default(),
        }
    }

    /// Put every flag, timer and physics knob back to its spawn value.
    pub fn reset(&mut self, position: Vec2, tuning: &MovementTuning) {
        let facing = self.facing;
        *self = Self::new(position, tuning);
        self.facing = facing;
        self.was_airborne = true;
    }

    pub fn is_grounded(&self) -> bool {
        self.body.blocked.down
    }

    /// Turn to `dir`. Sliding and dashing lock facing unless `force` is set.
    pub fn set_facing(&mut self, dir: f32, force: bool) {
        if !force && (self.is_sliding || self.is_dashing) {
            return;
        }
        if let Some(facing) = Facing::from_sign(dir) {
            self.facing = facing;
        }
    }

    pub fn coyote_open(&self, now: Millis, tuning: &MovementTuning) -> bool {
        window_open(self.timers.time_last_grounded, now, tuning.coyote_time_ms)
    }

    pub fn jump_buffered(&self, now: Millis, tuning: &MovementTuning) -> bool {
        window_open(self.timers.jump_buffer, now, tuning.jump_buffer_ms)
    }

    pub fn reattach_allowed(&self, now: Millis) -> bool {
        deadline_passed(self.timers.wall_reattach_until, now)
    }

    /// Airborne, falling, and pressing into a blocked side that is not the
    /// level boundary.
    pub fn should_wall_slide(&self, input: &InputSnapshot) -> bool {
        if self.is_dashing {
            return false;
        }
        let blocked = &self.body.blocked;
        if blocked.down || self.body.velocity.y <= 0.0 {
            return false;
        }
        let into_left = blocked.left && input.held_left && !blocked.world_edge_left;
        let into_right = blocked.right && input.held_right && !blocked.world_edge_right;
        into_left || into_right
    }

    /// Apply standard air control: full speed toward the held side, hard stop otherwise.
    pub(crate) fn air_control(&mut self, input: &InputSnapshot, speed: f32) {
        let dir = input.direction();
        self.body.velocity.x = dir * speed;
        self.set_facing(dir, false);
    }
}
