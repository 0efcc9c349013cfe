//! Character domain: timestamp fields and the per-character deferred-action list.

use crate::core::Millis;

/// Timestamp fields read by the states. `0` means unarmed.
///
/// `time_last_grounded`, `jump_buffer` and `time_lost_wall_contact` store the
/// moment they were armed; the `*_until` fields store a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementTimers {
    pub time_last_grounded: Millis,
    pub jump_buffer: Millis,
    pub time_lost_wall_contact: Millis,
    pub wall_reattach_until: Millis,
    pub wall_jump_action_until: Millis,
    pub wall_jump_ground_check_until: Millis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    ReenableDash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    due: Millis,
    action: DeferredAction,
}

/// Actions that outlive the state that scheduled them, drained once per tick.
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    entries: Vec<Scheduled>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, due: Millis, action: DeferredAction) {
        self.entries.push(Scheduled { due, action });
    }

    /// Take every entry due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: Millis) -> Vec<DeferredAction> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.entries.retain(|entry| {
            if entry.due <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| entry.due);
        due.into_iter().map(|entry| entry.action).collect()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
