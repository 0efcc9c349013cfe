//! Core domain: session clock and camera.

mod clock;
mod systems;

pub use clock::{Clock, Millis, SessionClock, deadline_passed, window_open};

use bevy::prelude::*;

use crate::core::clock::advance_clock;
use crate::core::systems::setup_camera;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SessionClock::starting_at(1))
            .add_systems(Startup, setup_camera)
            .add_systems(First, advance_clock);
    }
}
