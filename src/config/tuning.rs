//! Movement tuning: every speed, duration and threshold the character core reads.
//!
//! Velocities are in px/s in screen space (y grows downward, so upward
//! velocities are negative). Durations are integer milliseconds.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::Millis;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub schema_version: u32,

    // Ground
    pub max_speed: f32,
    pub drag: f32,

    // Air
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_velocity: f32,
    pub air_speed: f32,
    /// Multiplier applied once to upward velocity when jump is released early.
    pub jump_cutoff_factor: f32,
    pub coyote_time_ms: Millis,
    pub jump_buffer_ms: Millis,

    // Air attack (pogo)
    pub pogo_velocity: f32,
    pub pogo_air_control_speed: f32,
    /// Per-tick horizontal decay while attacking with no input.
    pub pogo_decay: f32,
    pub air_attack_duration_ms: Millis,
    pub hitbox_reaffirm_delay_ms: Millis,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    pub hitbox_enter_offset_y: f32,
    pub hitbox_track_offset_y: f32,
    /// Vertical speed below which the legs show the "up" pose.
    pub legs_up_below: f32,
    /// Vertical speed below which the legs show the "max" pose.
    pub legs_max_below: f32,

    // Walls
    pub wall_slide_speed: f32,
    pub wall_stick_force: f32,
    pub wall_nudge: f32,
    pub wall_contact_grace_ms: Millis,
    pub explicit_detach_grace_ms: Millis,
    pub reattach_grace_ms: Millis,
    pub wall_jump_x_velocity: f32,
    pub wall_jump_y_velocity: f32,
    pub wall_jump_action_delay_ms: Millis,
    pub wall_jump_ground_check_delay_ms: Millis,

    // Dash
    pub dash_speed: f32,
    pub air_dash_speed: f32,
    pub dash_duration_ms: Millis,
    pub dash_cooldown_ms: Millis,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            schema_version: 1,
            max_speed: 350.0,
            drag: 1000.0,
            gravity: 1500.0,
            max_fall_speed: 1500.0,
            jump_velocity: -900.0,
            air_speed: 325.0,
            jump_cutoff_factor: 0.35,
            coyote_time_ms: 100,
            jump_buffer_ms: 100,
            pogo_velocity: -700.0,
            pogo_air_control_speed: 320.0,
            pogo_decay: 0.95,
            air_attack_duration_ms: 400,
            hitbox_reaffirm_delay_ms: 100,
            hitbox_width: 40.0,
            hitbox_height: 60.0,
            hitbox_enter_offset_y: 40.0,
            hitbox_track_offset_y: -10.0,
            legs_up_below: -600.0,
            legs_max_below: -200.0,
            wall_slide_speed: 200.0,
            wall_stick_force: 100.0,
            wall_nudge: 15.0,
            wall_contact_grace_ms: 50,
            explicit_detach_grace_ms: 150,
            reattach_grace_ms: 200,
            wall_jump_x_velocity: 400.0,
            wall_jump_y_velocity: -700.0,
            wall_jump_action_delay_ms: 150,
            wall_jump_ground_check_delay_ms: 60,
            dash_speed: 700.0,
            air_dash_speed: 700.0,
            dash_duration_ms: 250,
            dash_cooldown_ms: 700,
        }
    }
}

/// A tuning value that would break a timing or physics rule.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    ZeroDuration { field: &'static str },
    NonPositive { field: &'static str, value: f32 },
    FactorOutOfRange { field: &'static str, value: f32 },
    CooldownNotLongerThanDash { cooldown_ms: Millis, dash_ms: Millis },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::ZeroDuration { field } => write!(f, "'{}' must be at least 1ms", field),
            TuningError::NonPositive { field, value } => {
                write!(f, "'{}' must be positive, got {}", field, value)
            }
            TuningError::FactorOutOfRange { field, value } => {
                write!(f, "'{}' must be in (0, 1], got {}", field, value)
            }
            TuningError::CooldownNotLongerThanDash {
                cooldown_ms,
                dash_ms,
            } => write!(
                f,
                "dash_cooldown_ms ({}) must exceed dash_duration_ms ({})",
                cooldown_ms, dash_ms
            ),
        }
    }
}

impl std::error::Error for TuningError {}

impl MovementTuning {
    /// Velocity caps applied outside of a dash.
    pub fn default_max_velocity(&self) -> Vec2 {
        Vec2::new(self.max_speed, self.max_fall_speed)
    }

    pub fn hitbox_size(&self) -> Vec2 {
        Vec2::new(self.hitbox_width, self.hitbox_height)
    }

    /// Check the values the state machine relies on.
    pub fn validate(&self) -> Result<(), TuningError> {
        let durations = [
            ("coyote_time_ms", self.coyote_time_ms),
            ("jump_buffer_ms", self.jump_buffer_ms),
            ("air_attack_duration_ms", self.air_attack_duration_ms),
            ("wall_contact_grace_ms", self.wall_contact_grace_ms),
            ("dash_duration_ms", self.dash_duration_ms),
            ("dash_cooldown_ms", self.dash_cooldown_ms),
        ];
        for (field, value) in durations {
            if value == 0 {
                return Err(TuningError::ZeroDuration { field });
            }
        }

        let positives = [
            ("max_speed", self.max_speed),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("air_speed", self.air_speed),
            ("dash_speed", self.dash_speed),
            ("air_dash_speed", self.air_dash_speed),
            ("hitbox_width", self.hitbox_width),
            ("hitbox_height", self.hitbox_height),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let factors = [
            ("jump_cutoff_factor", self.jump_cutoff_factor),
            ("pogo_decay", self.pogo_decay),
        ];
        for (field, value) in factors {
            if value <= 0.0 || value > 1.0 {
                return Err(TuningError::FactorOutOfRange { field, value });
            }
        }

        if self.dash_cooldown_ms <= self.dash_duration_ms {
            return Err(TuningError::CooldownNotLongerThanDash {
                cooldown_ms: self.dash_cooldown_ms,
                dash_ms: self.dash_duration_ms,
            });
        }

        Ok(())
    }
}
