//! Config domain: movement tuning loaded from `assets/data/movement.ron`.

mod loader;
mod tuning;

pub use loader::{ConfigLoadError, load_movement_tuning, parse_movement_tuning};
pub use tuning::{MovementTuning, TuningError};

use bevy::prelude::*;
use std::path::Path;

pub const MOVEMENT_TUNING_PATH: &str = "assets/data/movement.ron";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .add_systems(Startup, load_movement_config);
    }
}

/// Replace the default tuning with the file contents, keeping defaults on failure.
pub(crate) fn load_movement_config(mut tuning: ResMut<MovementTuning>) {
    match load_movement_tuning(Path::new(MOVEMENT_TUNING_PATH)) {
        Ok(loaded) => {
            info!(
                "Loaded movement tuning v{} from {}",
                loaded.schema_version, MOVEMENT_TUNING_PATH
            );
            *tuning = loaded;
        }
        Err(e) => {
            warn!("{}; using default movement tuning", e);
        }
    }
}
