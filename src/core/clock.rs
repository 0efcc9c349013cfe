//! Core domain: session clock and timestamp windows.
//!
//! Every timing rule in the character core (coyote time, jump buffering,
//! wall grace periods, dash cooldown) is a comparison between `now` and a
//! stored timestamp. A stored value of `0` means "unarmed".

use bevy::prelude::*;

/// Milliseconds since session start.
pub type Millis = u64;

/// Monotonic time source consumed by the character core.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Session clock advanced once per frame from Bevy's `Time`.
#[derive(Resource, Debug, Clone, Default)]
pub struct SessionClock {
    now: Millis,
}

impl SessionClock {
    pub fn starting_at(now: Millis) -> Self {
        Self { now }
    }

    /// Move the clock to `elapsed`, never backwards.
    pub fn sync_to(&mut self, elapsed: Millis) {
        self.now = elapsed.max(self.now);
    }
}

impl Clock for SessionClock {
    fn now(&self) -> Millis {
        self.now
    }
}

/// True while a window armed at `armed_at` is still open at `now`.
pub fn window_open(armed_at: Millis, now: Millis, duration: Millis) -> bool {
    armed_at > 0 && now.saturating_sub(armed_at) < duration
}

/// True once `now` is strictly past the `until` deadline.
pub fn deadline_passed(until: Millis, now: Millis) -> bool {
    now > until
}

/// Offset by one so nothing armed on the first frame reads as unarmed.
pub(crate) fn advance_clock(time: Res<Time>, mut clock: ResMut<SessionClock>) {
    clock.sync_to(time.elapsed().as_millis() as Millis + 1);
}
