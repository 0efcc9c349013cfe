//! Character domain: state machine tests driven by a manual clock and scripted input.

use bevy::prelude::*;

use super::{
    AnimationCue, Appearance, Blocked, Character, CharacterHooks, CharacterState, DeferredAction,
    DeferredQueue, Facing, HitboxTarget, InputSnapshot, LegsPose, MachineError, MovementTimers,
    ParticleCue, PhysicsBody, PlayerController, TickContext, Transition, WallSide,
};
use crate::config::MovementTuning;
use crate::core::Millis;

const TICK: Millis = 10;
const DT: f32 = 0.01;
const START: Millis = 1000;

#[derive(Default)]
struct RecordingHooks {
    animations: Vec<AnimationCue>,
    particles: Vec<ParticleCue>,
}

impl RecordingHooks {
    fn clear(&mut self) {
        self.animations.clear();
        self.particles.clear();
    }

    fn count(&self, cue: ParticleCue) -> usize {
        self.particles.iter().filter(|c| **c == cue).count()
    }
}

impl CharacterHooks for RecordingHooks {
    fn play_animation(&mut self, cue: AnimationCue) {
        self.animations.push(cue);
    }

    fn particles(&mut self, cue: ParticleCue) {
        self.particles.push(cue);
    }
}

/// Drives one controller tick by tick. After each step a tiny integrator
/// applies gravity, drag and caps, and stops motion into blocked sides.
struct Harness {
    controller: PlayerController,
    tuning: MovementTuning,
    now: Millis,
    input: InputSnapshot,
    blocked: Blocked,
    hooks: RecordingHooks,
    /// Velocity right after the last step, before integration.
    stepped_velocity: Vec2,
}

impl Harness {
    /// Grounded and settled in Idle.
    fn new() -> Self {
        let tuning = MovementTuning::default();
        let input = InputSnapshot::default();
        let mut hooks = RecordingHooks::default();
        let controller = {
            let mut ctx = TickContext {
                now: START,
                input: &input,
                tuning: &tuning,
                hooks: &mut hooks,
            };
            PlayerController::spawn(Vec2::ZERO, &mut ctx).expect("spawn failed")
        };
        let mut harness = Self {
            controller,
            tuning,
            now: START,
            input,
            blocked: Blocked {
                down: true,
                ..default()
            },
            hooks,
            stepped_velocity: Vec2::ZERO,
        };
        harness.tick();
        harness.hooks.clear();
        harness
    }

    fn tick(&mut self) -> Option<CharacterState> {
        self.now += TICK;
        self.controller.character.body.blocked = self.blocked;
        let mut ctx = TickContext {
            now: self.now,
            input: &self.input,
            tuning: &self.tuning,
            hooks: &mut self.hooks,
        };
        let changed = self.controller.step(&mut ctx).expect("step failed");
        self.stepped_velocity = self.controller.character.body.velocity;
        self.simulate();
        self.release_edges();
        changed
    }

    fn simulate(&mut self) {
        let body = &mut self.controller.character.body;
        body.integrate(DT, &self.tuning);
        if self.blocked.down && body.velocity.y > 0.0 {
            body.velocity.y = 0.0;
        }
        if self.blocked.left && body.velocity.x < 0.0 {
            body.velocity.x = 0.0;
        }
        if self.blocked.right && body.velocity.x > 0.0 {
            body.velocity.x = 0.0;
        }
        body.position += body.velocity * DT;
    }

    fn ticks(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Tick until `state` is live, failing after `max` ticks.
    fn tick_until_state(&mut self, state: CharacterState, max: usize) {
        for _ in 0..max {
            if self.state() == state {
                return;
            }
            self.tick();
        }
        assert_eq!(self.state(), state, "state not reached in {} ticks", max);
    }

    /// Tick until `now` equals `at`.
    fn tick_to(&mut self, at: Millis) {
        assert!(at >= self.now, "cannot tick backwards");
        while self.now < at {
            self.tick();
        }
    }

    fn state(&self) -> CharacterState {
        self.controller.state()
    }

    fn character(&self) -> &Character {
        &self.controller.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.controller.character
    }

    /// Edge-triggered presses last exactly one tick.
    fn release_edges(&mut self) {
        self.input.just_pressed_jump = false;
        self.input.just_pressed_dash = false;
        self.input.just_pressed_attack = false;
    }

    fn press_jump(&mut self) {
        self.input.just_pressed_jump = true;
        self.input.held_jump = true;
    }

    fn press_dash(&mut self) {
        self.input.just_pressed_dash = true;
    }

    fn press_attack(&mut self) {
        self.input.just_pressed_attack = true;
    }

    fn hold(&mut self, left: bool, right: bool) {
        self.input.held_left = left;
        self.input.held_right = right;
    }

    /// Walk off the ground and fall until the coyote window closes.
    fn fall(&mut self) {
        self.blocked.down = false;
        self.tick_until_state(CharacterState::Jump, 20);
    }

    /// Ground jump, then leave the ground.
    fn jump(&mut self) {
        self.press_jump();
        self.tick();
        assert_eq!(self.state(), CharacterState::Jump);
        self.blocked.down = false;
    }

    /// Fall onto a wall on the left and start sliding.
    fn slide_on_left_wall(&mut self) {
        self.fall();
        self.blocked.left = true;
        self.hold(true, false);
        self.tick();
        assert_eq!(self.state(), CharacterState::WallSlide);
    }

    fn transition(&mut self, next: Transition) {
        let mut ctx = TickContext {
            now: self.now,
            input: &self.input,
            tuning: &self.tuning,
            hooks: &mut self.hooks,
        };
        self.controller
            .transition(next, &mut ctx)
            .expect("transition failed");
    }

    fn overlap(&mut self, pogoable: bool) -> bool {
        let mut ctx = TickContext {
            now: self.now,
            input: &self.input,
            tuning: &self.tuning,
            hooks: &mut self.hooks,
        };
        self.controller
            .on_hitbox_overlap(HitboxTarget { pogoable }, &mut ctx)
            .expect("overlap failed")
    }

    fn respawn(&mut self, position: Vec2) {
        let mut ctx = TickContext {
            now: self.now,
            input: &self.input,
            tuning: &self.tuning,
            hooks: &mut self.hooks,
        };
        self.controller
            .respawn(position, &mut ctx)
            .expect("respawn failed");
    }
}

// ============================================================================
// Spawn and transition engine
// ============================================================================

#[test]
fn test_spawn_starts_idle_with_dash_available() {
    let h = Harness::new();
    assert_eq!(h.state(), CharacterState::Idle);
    assert!(h.character().can_dash);
    assert!(!h.character().has_air_dashed);
    assert_eq!(h.character().timers.time_last_grounded, START + TICK);
    assert_eq!(h.controller.machine().transition_count(), 1);
}

#[test]
fn test_at_most_one_transition_per_step() {
    let mut h = Harness::new();
    let before = h.controller.machine().transition_count();

    // Jump and a held direction both qualify; only the jump is taken
    h.hold(false, true);
    h.press_jump();
    let changed = h.tick();

    assert_eq!(changed, Some(CharacterState::Jump));
    assert_eq!(h.controller.machine().transition_count(), before + 1);
}

#[test]
fn test_step_without_transition_returns_none() {
    let mut h = Harness::new();
    assert_eq!(h.tick(), None);
    assert_eq!(h.state(), CharacterState::Idle);
}

#[test]
fn test_wall_slide_without_wall_bails_to_jump() {
    let mut h = Harness::new();
    h.blocked.down = false;
    h.controller.character.body.blocked = h.blocked;
    let before = h.controller.machine().transition_count();

    h.transition(Transition::to(CharacterState::WallSlide));

    assert_eq!(h.state(), CharacterState::Jump);
    // The bailing state and its fallback are both counted
    assert_eq!(h.controller.machine().transition_count(), before + 2);
    assert!(!h.character().is_sliding);
    assert_eq!(h.character().last_wall_side, WallSide::None);
}

#[test]
fn test_wall_jump_without_wall_bails_to_jump() {
    let mut h = Harness::new();
    h.blocked.down = false;
    h.controller.character.body.blocked = h.blocked;

    h.transition(Transition::to(CharacterState::WallJump));

    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.character().body.velocity.x, 0.0);
}

#[test]
fn test_machine_error_display() {
    let error = MachineError::TransitionDepthExceeded {
        bailed_from: CharacterState::Jump,
        requested: CharacterState::WallSlide,
    };
    let text = error.to_string();
    assert!(text.contains("Jump"));
    assert!(text.contains("WallSlide"));
}

// ============================================================================
// Ground jump, coyote time, jump buffer
// ============================================================================

#[test]
fn test_ground_jump_sets_jump_velocity_that_tick() {
    let mut h = Harness::new();
    h.press_jump();
    h.tick();

    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.stepped_velocity.y, -900.0);
    assert!(h.character().jump_being_held);
    assert_eq!(h.character().timers.jump_buffer, 0);
    assert_eq!(h.character().timers.time_last_grounded, 0);
    assert_eq!(h.hooks.count(ParticleCue::JumpBurst), 1);
}

#[test]
fn test_coyote_jump_inside_window() {
    let mut h = Harness::new();
    h.hold(false, true);
    h.tick();
    assert_eq!(h.state(), CharacterState::Run);
    h.tick();
    let grounded_at = h.now;
    assert_eq!(h.character().timers.time_last_grounded, grounded_at);

    h.blocked.down = false;
    h.tick_to(grounded_at + 50);
    assert_eq!(h.state(), CharacterState::Run);

    h.press_jump();
    h.tick();
    assert_eq!(h.now, grounded_at + 60);
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.stepped_velocity.y, -900.0);
    assert_eq!(h.character().timers.time_last_grounded, 0);
}

#[test]
fn test_coyote_window_closed_at_duration() {
    let mut h = Harness::new();
    h.hold(false, true);
    h.tick();
    h.tick();
    let grounded_at = h.now;

    h.blocked.down = false;
    h.tick_to(grounded_at + 90);
    assert_eq!(h.state(), CharacterState::Run);

    // Exactly COYOTE_TIME_DURATION later the press is just a buffered fall
    h.press_jump();
    h.tick();
    assert_eq!(h.now, grounded_at + 100);
    assert_eq!(h.state(), CharacterState::Jump);
    assert!(h.stepped_velocity.y > 0.0);
    assert!(!h.character().jump_being_held);
    assert_eq!(h.character().timers.jump_buffer, grounded_at + 100);
}

#[test]
fn test_idle_walks_off_into_fall_after_coyote() {
    let mut h = Harness::new();
    let grounded_at = h.now;
    h.blocked.down = false;

    h.tick_to(grounded_at + 90);
    assert_eq!(h.state(), CharacterState::Idle);
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
}

#[test]
fn test_jump_buffer_honored_on_landing() {
    let mut h = Harness::new();
    h.fall();
    h.ticks(3);

    h.press_jump();
    h.tick();
    let pressed_at = h.now;
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.character().timers.jump_buffer, pressed_at);

    h.tick_to(pressed_at + 40);
    h.blocked.down = true;
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.stepped_velocity.y, -900.0);
    assert_eq!(h.character().timers.jump_buffer, 0);
}

#[test]
fn test_jump_buffer_expired_lands_idle() {
    let mut h = Harness::new();
    h.fall();

    h.press_jump();
    h.tick();
    let pressed_at = h.now;

    h.tick_to(pressed_at + 90);
    h.blocked.down = true;
    h.tick();
    assert_eq!(h.now, pressed_at + 100);
    assert_eq!(h.state(), CharacterState::Idle);
}

#[test]
fn test_landing_with_direction_held_runs() {
    let mut h = Harness::new();
    h.fall();
    h.hold(true, false);
    h.blocked.down = true;
    h.tick();
    assert_eq!(h.state(), CharacterState::Run);
    assert_eq!(h.character().facing, Facing::Left);
}

#[test]
fn test_jump_cutoff_applies_once() {
    let mut h = Harness::new();
    h.jump();
    h.tick();

    h.input.held_jump = false;
    let rising = h.character().body.velocity.y;
    assert!(rising < 0.0);
    h.tick();
    assert!((h.stepped_velocity.y - rising * 0.35).abs() < 1e-3);
    assert!(h.character().jump_cutoff);

    let after_cut = h.character().body.velocity.y;
    h.tick();
    assert_eq!(h.stepped_velocity.y, after_cut);
}

#[test]
fn test_repress_before_release_rearms_cutoff() {
    let mut h = Harness::new();
    h.jump();
    h.tick();

    h.input.held_jump = false;
    h.tick();
    assert!(h.character().jump_cutoff);

    // Pressing again clears the cutoff so the next release dampens once more
    h.press_jump();
    let held = h.character().body.velocity.y;
    h.tick();
    assert!(!h.character().jump_cutoff);
    assert_eq!(h.stepped_velocity.y, held);

    h.input.held_jump = false;
    let rising = h.character().body.velocity.y;
    assert!(rising < 0.0);
    h.tick();
    assert!((h.stepped_velocity.y - rising * 0.35).abs() < 1e-3);
    assert!(h.character().jump_cutoff);
}

#[test]
fn test_jump_press_while_falling_only_buffers() {
    let mut h = Harness::new();
    h.blocked.down = false;
    h.controller.character.body.blocked = h.blocked;
    h.transition(Transition::to(CharacterState::Jump));
    assert!(h.character().coyote_open(h.now + TICK, &h.tuning));

    // Coyote jumps belong to the grounded states; here the press is only stored
    h.press_jump();
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.stepped_velocity.y, 0.0);
    assert_eq!(h.character().timers.jump_buffer, h.now);
}

#[test]
fn test_air_control_hard_stops_without_input() {
    let mut h = Harness::new();
    h.jump();
    h.hold(false, true);
    h.tick();
    assert_eq!(h.stepped_velocity.x, 325.0);

    h.hold(false, false);
    h.tick();
    assert_eq!(h.stepped_velocity.x, 0.0);
}

#[test]
fn test_landing_dust_emitted_once() {
    let mut h = Harness::new();
    h.fall();
    h.hooks.clear();

    h.blocked.down = true;
    h.tick();
    assert_eq!(h.hooks.count(ParticleCue::LandingDust), 1);

    h.hooks.clear();
    h.ticks(3);
    assert_eq!(h.hooks.count(ParticleCue::LandingDust), 0);
}

// ============================================================================
// Dashes
// ============================================================================

#[test]
fn test_air_dash_is_single_use_until_grounded() {
    let mut h = Harness::new();
    h.jump();
    h.tick();

    h.press_dash();
    h.tick();
    let dashed_at = h.now;
    assert_eq!(h.state(), CharacterState::AirDash);
    assert!(h.character().has_air_dashed);
    assert_eq!(h.stepped_velocity, Vec2::new(700.0, 0.0));

    h.tick_until_state(CharacterState::Jump, 30);

    // Wait out the cooldown so only the air-dash allowance blocks the dash
    h.tick_to(dashed_at + 700);
    assert!(h.character().can_dash);
    h.press_dash();
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
    assert!(h.character().has_air_dashed);
    assert_eq!(h.stepped_velocity.x, 0.0);

    h.blocked.down = true;
    h.tick();
    assert!(!h.character().has_air_dashed);
}

#[test]
fn test_dash_cooldown_runs_past_dash_state() {
    let mut h = Harness::new();
    h.press_dash();
    h.tick();
    let dashed_at = h.now;
    assert_eq!(h.state(), CharacterState::GroundDash);
    assert!(!h.character().can_dash);

    h.tick_to(dashed_at + 250);
    assert_eq!(h.state(), CharacterState::Idle);
    assert!(!h.character().can_dash);

    h.tick_to(dashed_at + 690);
    assert!(!h.character().can_dash);
    h.tick();
    assert!(h.character().can_dash);
    assert!(h.character().deferred.is_empty());
}

#[test]
fn test_ground_dash_knobs_restored_on_exit() {
    let mut h = Harness::new();
    h.hold(true, false);
    h.press_dash();
    h.tick();
    assert_eq!(h.state(), CharacterState::GroundDash);

    let body = &h.character().body;
    assert_eq!(h.stepped_velocity, Vec2::new(-700.0, 0.0));
    assert_eq!(h.character().facing, Facing::Left);
    assert!(!body.gravity_enabled);
    assert_eq!(body.drag_x, 0.0);
    assert_eq!(body.max_velocity.x, 700.0);

    h.hold(false, false);
    h.tick_until_state(CharacterState::Idle, 30);
    let body = &h.character().body;
    assert!(body.gravity_enabled);
    assert_eq!(body.drag_x, 1000.0);
    assert_eq!(body.max_velocity, Vec2::new(350.0, 1500.0));
    assert!(!h.character().is_dashing);
}

#[test]
fn test_ground_dash_off_ledge_ends_in_jump() {
    let mut h = Harness::new();
    h.press_dash();
    h.tick();
    h.blocked.down = false;
    h.tick_until_state(CharacterState::Jump, 30);
    assert!(!h.character().has_air_dashed);
}

#[test]
fn test_idle_dash_press_while_airborne_is_swallowed() {
    let mut h = Harness::new();
    h.blocked.down = false;
    h.press_dash();
    h.tick();
    assert_eq!(h.state(), CharacterState::Idle);
    assert!(h.character().can_dash);
}

#[test]
fn test_air_dash_into_air_attack() {
    let mut h = Harness::new();
    h.jump();
    h.press_dash();
    h.tick();
    assert_eq!(h.state(), CharacterState::AirDash);

    h.press_attack();
    h.tick();
    assert_eq!(h.state(), CharacterState::AirAttack);
    assert!(h.character().body.gravity_enabled);
}

#[test]
fn test_jump_pressed_during_air_dash_is_buffered() {
    let mut h = Harness::new();
    h.jump();
    h.tick();
    h.press_dash();
    h.tick();
    let dashed_at = h.now;
    assert_eq!(h.state(), CharacterState::AirDash);

    h.tick_to(dashed_at + 220);
    h.press_jump();
    h.tick();
    let pressed_at = h.now;
    assert_eq!(h.character().timers.jump_buffer, pressed_at);

    h.blocked.down = true;
    h.tick();
    assert_eq!(h.state(), CharacterState::AirDash);
    h.tick();
    assert_eq!(h.now, dashed_at + 250);
    assert_eq!(h.state(), CharacterState::Jump);

    h.tick();
    assert_eq!(h.now, pressed_at + 30);
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.stepped_velocity.y, -900.0);
    assert_eq!(h.character().timers.jump_buffer, 0);
}

#[test]
fn test_stale_press_during_air_dash_lands_idle() {
    let mut h = Harness::new();
    h.jump();
    h.tick();
    h.press_dash();
    h.tick();
    let dashed_at = h.now;

    h.tick_to(dashed_at + 100);
    h.press_jump();
    h.tick();
    let pressed_at = h.now;

    h.tick_to(dashed_at + 250);
    assert_eq!(h.state(), CharacterState::Jump);
    h.blocked.down = true;
    h.tick();
    assert!(h.now - pressed_at >= 100);
    assert_eq!(h.state(), CharacterState::Idle);
}

// ============================================================================
// Wall slide
// ============================================================================

#[test]
fn test_run_off_ledge_into_wall_starts_slide() {
    let mut h = Harness::new();
    h.hold(true, false);
    h.tick();
    assert_eq!(h.state(), CharacterState::Run);
    h.tick();

    h.blocked.down = false;
    h.blocked.left = true;
    // Not yet descending on the first airborne tick
    h.tick();
    assert_eq!(h.state(), CharacterState::Run);
    h.tick();
    assert_eq!(h.state(), CharacterState::WallSlide);
    assert_eq!(h.character().last_wall_side, WallSide::Left);
}

#[test]
fn test_run_off_ledge_without_wall_stays_run_in_coyote() {
    let mut h = Harness::new();
    h.hold(true, false);
    h.tick();
    h.tick();
    let grounded_at = h.now;

    h.blocked.down = false;
    h.tick_to(grounded_at + 90);
    assert_eq!(h.state(), CharacterState::Run);
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
}

#[test]
fn test_wall_slide_entry_faces_away_and_nudges_inward() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    let character = h.character();
    assert_eq!(character.last_wall_side, WallSide::Left);
    assert_eq!(character.facing, Facing::Right);
    assert!(character.is_sliding);
    assert!(character.can_wall_jump);
    assert!(!character.has_air_dashed);
    assert_eq!(character.timers.time_lost_wall_contact, 0);
    assert_eq!(h.stepped_velocity, Vec2::new(-15.0, 0.0));
}

#[test]
fn test_wall_slide_applies_slide_speed_and_stick() {
    let mut h = Harness::new();
    h.slide_on_left_wall();
    h.tick();
    assert_eq!(h.state(), CharacterState::WallSlide);
    assert_eq!(h.stepped_velocity, Vec2::new(-100.0, 200.0));
}

#[test]
fn test_wall_slide_facing_is_locked() {
    let mut h = Harness::new();
    h.slide_on_left_wall();
    h.character_mut().set_facing(-1.0, false);
    assert_eq!(h.character().facing, Facing::Right);
    h.character_mut().set_facing(-1.0, true);
    assert_eq!(h.character().facing, Facing::Left);
}

#[test]
fn test_world_edge_does_not_start_wall_slide() {
    let mut h = Harness::new();
    h.fall();
    h.blocked.left = true;
    h.blocked.world_edge_left = true;
    h.hold(true, false);
    h.ticks(5);
    assert_eq!(h.state(), CharacterState::Jump);
}

#[test]
fn test_wall_contact_grace_expires() {
    let mut h = Harness::new();
    h.slide_on_left_wall();
    h.tick();

    h.blocked.left = false;
    h.tick();
    let lost_at = h.now;
    assert_eq!(h.character().timers.time_lost_wall_contact, lost_at);

    h.tick_to(lost_at + 50);
    assert_eq!(h.state(), CharacterState::WallSlide);
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
}

#[test]
fn test_wall_contact_regained_resets_grace() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.blocked.left = false;
    h.tick();
    let lost_at = h.now;
    h.tick_to(lost_at + 30);

    h.blocked.left = true;
    h.tick();
    assert_eq!(h.character().timers.time_lost_wall_contact, 0);

    h.tick_to(lost_at + 150);
    assert_eq!(h.state(), CharacterState::WallSlide);
}

#[test]
fn test_explicit_detach_arms_short_grace() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.hold(false, true);
    h.tick();
    let detached_at = h.now;
    assert_eq!(h.state(), CharacterState::Jump);
    // Exit must not overwrite the explicit-detach window with the general one
    assert_eq!(h.character().timers.wall_reattach_until, detached_at + 150);
    assert!(!h.character().is_sliding);

    h.hold(true, false);
    h.tick_to(detached_at + 150);
    assert_eq!(h.state(), CharacterState::Jump);
    h.tick();
    assert_eq!(h.state(), CharacterState::WallSlide);
}

#[test]
fn test_releasing_wall_arms_general_reattach_grace() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.hold(false, false);
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.character().timers.wall_reattach_until, h.now + 200);
}

#[test]
fn test_wall_slide_lands_idle() {
    let mut h = Harness::new();
    h.slide_on_left_wall();
    h.blocked.down = true;
    h.tick();
    assert_eq!(h.state(), CharacterState::Idle);
}

#[test]
fn test_wall_slide_stopped_externally_falls() {
    let mut h = Harness::new();
    h.slide_on_left_wall();
    h.tick();

    h.character_mut().body.velocity.y = 0.0;
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
}

#[test]
fn test_inner_corner_switches_wall() {
    let mut h = Harness::new();
    h.slide_on_left_wall();
    h.tick();

    h.blocked.right = true;
    h.hold(false, true);
    h.tick();

    assert_eq!(h.state(), CharacterState::WallSlide);
    assert_eq!(h.character().last_wall_side, WallSide::Right);
    assert_eq!(h.character().facing, Facing::Left);
    assert_eq!(h.stepped_velocity.x, 100.0);
}

#[test]
fn test_dash_off_wall_goes_away_from_wall() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.press_dash();
    h.tick();
    assert_eq!(h.state(), CharacterState::AirDash);
    // Held toward the wall, yet the dash goes away from it
    assert_eq!(h.stepped_velocity.x, 700.0);
    assert_eq!(h.character().dash_away_from_wall, 0.0);
}

// ============================================================================
// Wall jump
// ============================================================================

#[test]
fn test_wall_jump_then_single_air_dash() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.press_jump();
    h.tick();
    assert_eq!(h.state(), CharacterState::WallJump);
    assert_eq!(h.stepped_velocity, Vec2::new(400.0, -700.0));
    assert_eq!(h.character().facing, Facing::Right);

    h.blocked.left = false;
    h.hold(false, false);
    h.tick();

    h.press_dash();
    h.tick();
    let dashed_at = h.now;
    assert_eq!(h.state(), CharacterState::AirDash);
    assert!(h.character().has_air_dashed);
    assert_eq!(h.stepped_velocity.x, 700.0);

    h.tick_until_state(CharacterState::Jump, 30);
    h.tick_to(dashed_at + 700);
    assert!(h.character().can_dash);

    h.press_dash();
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
    assert!(h.character().has_air_dashed);
}

#[test]
fn test_wall_jump_action_delay_gates_air_control() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.press_jump();
    h.tick();
    let jumped_at = h.now;
    h.blocked.left = false;

    h.tick_to(jumped_at + 150);
    assert_eq!(h.state(), CharacterState::WallJump);
    assert!(h.stepped_velocity.x > 0.0);

    h.tick();
    assert_eq!(h.stepped_velocity.x, -325.0);
    assert_eq!(h.character().facing, Facing::Left);
}

#[test]
fn test_wall_jump_reattaches_only_after_action_delay() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.press_jump();
    h.tick();
    let jumped_at = h.now;
    assert_eq!(h.state(), CharacterState::WallJump);
    // Drifting back down the same wall while still holding into it
    h.character_mut().body.velocity.y = 100.0;

    h.tick_to(jumped_at + 150);
    assert_eq!(h.state(), CharacterState::WallJump);
    h.tick();
    assert_eq!(h.state(), CharacterState::WallSlide);
    assert_eq!(h.character().last_wall_side, WallSide::Left);
}

#[test]
fn test_wall_jump_ground_check_delay() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.blocked.down = true;
    h.press_jump();
    h.tick();
    let jumped_at = h.now;
    assert_eq!(h.state(), CharacterState::WallJump);

    h.tick_to(jumped_at + 60);
    assert_eq!(h.state(), CharacterState::WallJump);
    h.tick();
    assert_eq!(h.state(), CharacterState::Idle);
}

#[test]
fn test_wall_jump_landing_honors_buffer() {
    let mut h = Harness::new();
    h.slide_on_left_wall();

    h.press_jump();
    h.tick();
    let jumped_at = h.now;
    h.blocked.left = false;

    h.tick_to(jumped_at + 40);
    h.press_jump();
    h.tick();
    h.blocked.down = true;
    h.tick();
    assert_eq!(h.now, jumped_at + 60);
    assert_eq!(h.state(), CharacterState::WallJump);
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.stepped_velocity.y, -900.0);
}

#[test]
fn test_wall_jump_falls_back_to_remembered_side() {
    let mut h = Harness::new();
    h.blocked.down = false;
    h.controller.character.body.blocked = h.blocked;
    h.character_mut().last_wall_side = WallSide::Right;

    h.transition(Transition::to(CharacterState::WallJump));

    assert_eq!(h.state(), CharacterState::WallJump);
    assert_eq!(h.character().body.velocity, Vec2::new(-400.0, -700.0));
    assert_eq!(h.character().facing, Facing::Left);
}

#[test]
fn test_wall_jump_exit_keeps_momentum() {
    let mut h = Harness::new();
    h.slide_on_left_wall();
    h.press_jump();
    h.tick();
    h.blocked.left = false;

    h.press_attack();
    h.tick();
    assert_eq!(h.state(), CharacterState::AirAttack);
    assert!(!h.character().jump_being_held);
    assert!(h.character().body.velocity.x > 0.0);
}

// ============================================================================
// Air attack and pogo
// ============================================================================

#[test]
fn test_air_attack_enables_hitbox_and_composite() {
    let mut h = Harness::new();
    h.jump();
    h.press_attack();
    h.tick();
    assert_eq!(h.state(), CharacterState::AirAttack);

    let character = h.character();
    assert!(character.hitbox.enabled);
    assert_eq!(character.hitbox.size, Vec2::new(40.0, 60.0));
    assert_eq!(
        character.appearance,
        Appearance::Composite { legs: LegsPose::Up }
    );
    assert!(h.hooks.animations.contains(&AnimationCue::PogoSlash));
    assert!(!character.can_wall_jump);
}

#[test]
fn test_air_attack_hitbox_tracks_body() {
    let mut h = Harness::new();
    h.jump();
    h.press_attack();
    h.tick();

    let position = h.character().body.position;
    h.tick();
    assert_eq!(h.character().hitbox.position, position + Vec2::new(0.0, -10.0));
}

#[test]
fn test_air_attack_hitbox_reaffirmed_after_delay() {
    let mut h = Harness::new();
    h.jump();
    h.press_attack();
    h.tick();
    let attacked_at = h.now;

    h.character_mut().hitbox.enabled = false;
    h.tick_to(attacked_at + 90);
    assert!(!h.character().hitbox.enabled);
    h.tick();
    assert!(h.character().hitbox.enabled);
}

#[test]
fn test_air_attack_forced_exit_after_duration() {
    let mut h = Harness::new();
    h.jump();
    h.press_attack();
    h.tick();
    let attacked_at = h.now;

    h.tick_to(attacked_at + 390);
    assert_eq!(h.state(), CharacterState::AirAttack);
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
    assert!(!h.character().hitbox.enabled);
    assert_eq!(h.character().appearance, Appearance::Full);
}

#[test]
fn test_air_attack_pogo_control_decays() {
    let mut h = Harness::new();
    h.jump();
    h.hold(false, true);
    h.press_attack();
    h.tick();
    h.tick();
    assert_eq!(h.stepped_velocity.x, 320.0);
    // Facing is not changed by pogo control
    h.hold(true, false);
    h.tick();
    assert_eq!(h.stepped_velocity.x, -320.0);
    assert_eq!(h.character().facing, Facing::Right);

    h.hold(false, false);
    let before = h.character().body.velocity.x;
    h.tick();
    assert!((h.stepped_velocity.x - before * 0.95).abs() < 1e-3);
}

#[test]
fn test_dash_cancels_attack_without_stale_exit() {
    let mut h = Harness::new();
    h.jump();
    h.press_attack();
    h.tick();
    let attacked_at = h.now;

    h.tick_to(attacked_at + 200);
    h.press_dash();
    h.tick();
    assert_eq!(h.state(), CharacterState::AirDash);
    assert!(!h.character().hitbox.enabled);
    assert_eq!(h.character().appearance, Appearance::Full);

    // The attack's own 400ms exit must not cut the dash short
    h.tick_to(attacked_at + 400);
    assert_eq!(h.state(), CharacterState::AirDash);
}

#[test]
fn test_air_attack_end_starts_wall_slide() {
    let mut h = Harness::new();
    h.fall();
    h.press_attack();
    h.tick();
    let attacked_at = h.now;
    assert_eq!(h.state(), CharacterState::AirAttack);

    h.blocked.left = true;
    h.hold(true, false);
    h.tick_to(attacked_at + 390);
    assert_eq!(h.state(), CharacterState::AirAttack);
    h.tick();
    assert_eq!(h.state(), CharacterState::WallSlide);
    assert!(!h.character().hitbox.enabled);
    assert_eq!(h.character().appearance, Appearance::Full);
}

#[test]
fn test_jump_pressed_during_air_attack_is_buffered() {
    let mut h = Harness::new();
    h.fall();
    h.press_attack();
    h.tick();
    let attacked_at = h.now;

    h.tick_to(attacked_at + 380);
    h.press_jump();
    h.tick();
    let pressed_at = h.now;
    assert_eq!(h.state(), CharacterState::AirAttack);
    assert_eq!(h.character().timers.jump_buffer, pressed_at);

    h.blocked.down = true;
    h.tick();
    assert_eq!(h.now, attacked_at + 400);
    assert_eq!(h.state(), CharacterState::Jump);
    h.tick();
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.stepped_velocity.y, -900.0);
}

#[test]
fn test_pogo_bounce_on_pogoable_target() {
    let mut h = Harness::new();
    h.jump();
    h.press_attack();
    h.tick();
    h.character_mut().has_air_dashed = true;

    assert!(h.overlap(true));
    assert_eq!(h.state(), CharacterState::Jump);
    assert_eq!(h.character().body.velocity.y, -700.0);
    assert!(!h.character().has_air_dashed);
    assert!(!h.character().hitbox.enabled);
}

#[test]
fn test_pogo_rejected_outside_attack_or_on_plain_hazard() {
    let mut h = Harness::new();
    h.jump();
    assert!(!h.overlap(true));
    assert_eq!(h.state(), CharacterState::Jump);

    h.press_attack();
    h.tick();
    let velocity = h.character().body.velocity;
    assert!(!h.overlap(false));
    assert_eq!(h.state(), CharacterState::AirAttack);
    assert_eq!(h.character().body.velocity, velocity);
}

#[test]
fn test_legs_pose_bands() {
    let tuning = MovementTuning::default();
    assert_eq!(LegsPose::for_vertical_speed(-700.0, &tuning), LegsPose::Up);
    assert_eq!(LegsPose::for_vertical_speed(-600.0, &tuning), LegsPose::Max);
    assert_eq!(LegsPose::for_vertical_speed(-300.0, &tuning), LegsPose::Max);
    assert_eq!(LegsPose::for_vertical_speed(-200.0, &tuning), LegsPose::Down);
    assert_eq!(LegsPose::for_vertical_speed(400.0, &tuning), LegsPose::Down);
}

// ============================================================================
// Respawn
// ============================================================================

#[test]
fn test_respawn_resets_everything_from_air_dash() {
    let mut h = Harness::new();
    h.slide_on_left_wall();
    h.press_dash();
    h.tick();
    assert_eq!(h.state(), CharacterState::AirDash);
    h.hooks.clear();

    h.respawn(Vec2::new(100.0, 50.0));

    assert_eq!(h.state(), CharacterState::Idle);
    let character = h.character();
    let tuning = MovementTuning::default();
    assert_eq!(character.body.position, Vec2::new(100.0, 50.0));
    assert_eq!(character.body.velocity, Vec2::ZERO);
    assert!(character.body.gravity_enabled);
    assert_eq!(character.body.drag_x, tuning.drag);
    assert_eq!(character.body.max_velocity, tuning.default_max_velocity());
    assert!(character.can_dash);
    assert!(!character.has_air_dashed);
    assert!(!character.is_dashing);
    assert!(!character.is_sliding);
    assert!(!character.can_wall_jump);
    assert!(!character.jump_being_held);
    assert!(!character.jump_cutoff);
    assert_eq!(character.last_wall_side, WallSide::None);
    assert_eq!(character.dash_away_from_wall, 0.0);
    assert_eq!(character.timers, MovementTimers::default());
    assert!(character.deferred.is_empty());
    assert!(!character.hitbox.enabled);
    assert_eq!(character.appearance, Appearance::Full);
    // The dash's exit never ran, so only Idle's animation was played
    assert_eq!(h.hooks.animations, vec![AnimationCue::Idle]);
}

#[test]
fn test_respawn_from_air_attack_clears_hitbox() {
    let mut h = Harness::new();
    h.jump();
    h.press_attack();
    h.tick();

    h.respawn(Vec2::ZERO);
    assert_eq!(h.state(), CharacterState::Idle);
    assert!(!h.character().hitbox.enabled);
    assert_eq!(h.character().appearance, Appearance::Full);
}

#[test]
fn test_respawn_is_idempotent() {
    let mut h = Harness::new();
    h.jump();
    h.respawn(Vec2::new(10.0, 20.0));
    let first = h.character().clone();
    h.respawn(Vec2::new(10.0, 20.0));
    let second = h.character();

    assert_eq!(h.state(), CharacterState::Idle);
    assert_eq!(first.body, second.body);
    assert_eq!(first.timers, second.timers);
    assert_eq!(first.can_dash, second.can_dash);
}

#[test]
fn test_landing_after_respawn_raises_dust() {
    let mut h = Harness::new();
    h.respawn(Vec2::ZERO);
    h.hooks.clear();
    h.tick();
    assert_eq!(h.hooks.count(ParticleCue::LandingDust), 1);
}

// ============================================================================
// Building blocks
// ============================================================================

#[test]
fn test_integrate_gravity_drag_and_caps() {
    let tuning = MovementTuning::default();
    let mut body = PhysicsBody::new(Vec2::ZERO, &tuning);
    body.velocity = Vec2::new(500.0, 1490.0);

    body.integrate(0.1, &tuning);
    // Drag 1000 px/s² over 0.1s takes off 100, then the 350 cap applies
    assert_eq!(body.velocity.x, 350.0);
    assert_eq!(body.velocity.y, 1500.0);

    body.gravity_enabled = false;
    body.drag_x = 0.0;
    body.velocity = Vec2::new(-200.0, 0.0);
    body.integrate(0.1, &tuning);
    assert_eq!(body.velocity, Vec2::new(-200.0, 0.0));
}

#[test]
fn test_drag_stops_at_zero() {
    let tuning = MovementTuning::default();
    let mut body = PhysicsBody::new(Vec2::ZERO, &tuning);
    body.gravity_enabled = false;
    body.velocity.x = -50.0;
    body.integrate(0.1, &tuning);
    assert_eq!(body.velocity.x, 0.0);
}

#[test]
fn test_input_direction_prefers_left() {
    let input = InputSnapshot {
        held_left: true,
        held_right: true,
        ..default()
    };
    assert_eq!(input.direction(), -1.0);
    assert_eq!(InputSnapshot::default().direction(), 0.0);
}

#[test]
fn test_wall_side_signs() {
    assert_eq!(WallSide::Left.away_sign(), 1.0);
    assert_eq!(WallSide::Right.away_sign(), -1.0);
    assert_eq!(WallSide::Left.inward_sign(), -1.0);
    assert_eq!(WallSide::None.away_sign(), 0.0);
    assert_eq!(WallSide::Left.opposite(), WallSide::Right);
}

#[test]
fn test_deferred_queue_drains_due_in_order() {
    let mut queue = DeferredQueue::default();
    queue.schedule(300, DeferredAction::ReenableDash);
    queue.schedule(100, DeferredAction::ReenableDash);

    assert!(queue.drain_due(99).is_empty());
    assert_eq!(queue.drain_due(100), vec![DeferredAction::ReenableDash]);
    assert!(!queue.is_empty());
    assert_eq!(queue.drain_due(1000).len(), 1);
    assert!(queue.is_empty());
}

#[test]
fn test_missing_hooks_are_no_ops() {
    let tuning = MovementTuning::default();
    let input = InputSnapshot::default();
    let mut hooks = super::NoHooks;
    let mut ctx = TickContext {
        now: START,
        input: &input,
        tuning: &tuning,
        hooks: &mut hooks,
    };
    let mut controller = PlayerController::spawn(Vec2::ZERO, &mut ctx).expect("spawn failed");
    controller.character.body.blocked.down = true;
    ctx.now += TICK;
    assert_eq!(controller.step(&mut ctx), Ok(None));
}
