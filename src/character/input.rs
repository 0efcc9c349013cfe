//! Character domain: per-tick input snapshot.

use bevy::prelude::*;

/// Held and just-pressed view of the logical inputs for one tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub held_left: bool,
    pub held_right: bool,
    pub held_jump: bool,
    pub just_pressed_jump: bool,
    pub just_pressed_dash: bool,
    pub just_pressed_attack: bool,
}

impl InputSnapshot {
    /// -1, 0 or 1. Left wins when both are held.
    pub fn direction(&self) -> f32 {
        if self.held_left {
            -1.0
        } else if self.held_right {
            1.0
        } else {
            0.0
        }
    }

    pub fn any_horizontal(&self) -> bool {
        self.held_left || self.held_right
    }
}

pub(crate) fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<InputSnapshot>,
) {
    input.held_left = keyboard.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]);
    input.held_right = keyboard.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]);
    input.held_jump = keyboard.any_pressed([KeyCode::KeyZ, KeyCode::Space]);
    input.just_pressed_jump = keyboard.any_just_pressed([KeyCode::KeyZ, KeyCode::Space]);
    input.just_pressed_attack = keyboard.any_just_pressed([KeyCode::KeyX, KeyCode::KeyK]);
    input.just_pressed_dash = keyboard.any_just_pressed([KeyCode::KeyC, KeyCode::ShiftLeft]);
}
