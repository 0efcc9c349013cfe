//! Character domain: the public surface of one controllable character.

use bevy::prelude::*;

use crate::character::components::Character;
use crate::character::events::HitboxTarget;
use crate::character::hooks::ParticleCue;
use crate::character::machine::{
    CharacterState, EnterParams, MachineError, StateMachine, TickContext, Transition,
};
use crate::character::timers::DeferredAction;

/// A character plus the state machine driving it.
#[derive(Component, Debug)]
pub struct PlayerController {
    pub character: Character,
    machine: StateMachine,
}

impl PlayerController {
    /// Create a character at `position` (screen space) and enter `Idle`.
    pub fn spawn(position: Vec2, ctx: &mut TickContext) -> Result<Self, MachineError> {
        let mut character = Character::new(position, ctx.tuning);
        let machine =
            StateMachine::start(&mut character, CharacterState::Idle, EnterParams::default(), ctx)?;
        Ok(Self { character, machine })
    }

    pub fn state(&self) -> CharacterState {
        self.machine.state()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    /// One simulation tick: drain deferred actions, then run the live state.
    ///
    /// Collision flags and velocity must already be refreshed for this tick.
    pub fn step(&mut self, ctx: &mut TickContext) -> Result<Option<CharacterState>, MachineError> {
        for action in self.character.deferred.drain_due(ctx.now) {
            match action {
                DeferredAction::ReenableDash => self.character.can_dash = true,
            }
        }

        let grounded = self.character.is_grounded();
        if grounded && self.character.was_airborne {
            ctx.hooks.particles(ParticleCue::LandingDust);
        }
        self.character.was_airborne = !grounded;

        self.machine.step(&mut self.character, ctx)
    }

    pub fn transition(
        &mut self,
        next: Transition,
        ctx: &mut TickContext,
    ) -> Result<(), MachineError> {
        self.machine.transition(&mut self.character, next, ctx)
    }

    /// Put the character back at `position` with every flag and timer reset,
    /// skipping the live state's exit.
    pub fn respawn(&mut self, position: Vec2, ctx: &mut TickContext) -> Result<(), MachineError> {
        info!("Respawning character from {} at {:?}", self.state(), position);
        ctx.hooks.particles(ParticleCue::RunStop);
        ctx.hooks.particles(ParticleCue::IdleStop);
        self.character.reset(position, ctx.tuning);
        self.machine.reinitialize(
            &mut self.character,
            Transition::with(CharacterState::Idle, EnterParams::respawn()),
            ctx,
        )
    }

    /// Resolve an attack-hitbox overlap. Returns whether a pogo bounce happened.
    pub fn on_hitbox_overlap(
        &mut self,
        target: HitboxTarget,
        ctx: &mut TickContext,
    ) -> Result<bool, MachineError> {
        if self.state() != CharacterState::AirAttack || !self.character.hitbox.enabled {
            return Ok(false);
        }
        if !target.pogoable {
            return Ok(false);
        }

        debug!("Pogo bounce at {}ms", ctx.now);
        self.character.hitbox.enabled = false;
        self.character.body.velocity.y = ctx.tuning.pogo_velocity;
        self.character.has_air_dashed = false;
        self.transition(Transition::to(CharacterState::Jump), ctx)?;
        Ok(true)
    }
}
