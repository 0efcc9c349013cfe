//! Character domain: the transition engine.
//!
//! Exactly one [`StateData`] is live at a time. `step` runs the live state's
//! `execute` and performs at most one transition; a state's `enter` may bail
//! out once to a fallback, and a second bail is a fatal logic error.

use std::fmt;

use bevy::prelude::*;

use crate::character::components::Character;
use crate::character::hooks::CharacterHooks;
use crate::character::input::InputSnapshot;
use crate::character::states::{self, StateData};
use crate::config::MovementTuning;
use crate::core::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterState {
    Idle,
    Run,
    Jump,
    AirAttack,
    WallSlide,
    WallJump,
    GroundDash,
    AirDash,
}

impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Named entry parameters. States ignore the fields they do not accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnterParams {
    /// Jump: apply the jump impulse instead of just falling.
    pub is_actual_jump: bool,
    /// Idle: entered through a respawn.
    pub from_respawn: bool,
}

impl EnterParams {
    pub fn actual_jump() -> Self {
        Self {
            is_actual_jump: true,
            ..default()
        }
    }

    pub fn respawn() -> Self {
        Self {
            from_respawn: true,
            ..default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub target: CharacterState,
    pub params: EnterParams,
}

impl Transition {
    pub fn to(target: CharacterState) -> Self {
        Self {
            target,
            params: EnterParams::default(),
        }
    }

    pub fn with(target: CharacterState, params: EnterParams) -> Self {
        Self { target, params }
    }

    pub fn actual_jump() -> Self {
        Self::with(CharacterState::Jump, EnterParams::actual_jump())
    }
}

/// Everything a state may read during one tick besides the character itself.
pub struct TickContext<'a> {
    pub now: Millis,
    pub input: &'a InputSnapshot,
    pub tuning: &'a MovementTuning,
    pub hooks: &'a mut dyn CharacterHooks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    /// A fallback state's `enter` tried to bail out again. `Jump` is the only
    /// fallback and never bails, so this is unreachable unless a state's
    /// entry rules change.
    TransitionDepthExceeded {
        bailed_from: CharacterState,
        requested: CharacterState,
    },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineError::TransitionDepthExceeded {
                bailed_from,
                requested,
            } => write!(
                f,
                "Transition depth exceeded: fallback state {} bailed again to {}",
                bailed_from, requested
            ),
        }
    }
}

impl std::error::Error for MachineError {}

#[derive(Debug)]
pub struct StateMachine {
    current: StateData,
    transitions: u64,
}

impl StateMachine {
    /// Construct the machine and enter `initial`.
    pub fn start(
        character: &mut Character,
        initial: CharacterState,
        params: EnterParams,
        ctx: &mut TickContext,
    ) -> Result<Self, MachineError> {
        let mut machine = Self {
            current: StateData::fresh(initial, ctx.now),
            transitions: 0,
        };
        machine.install(character, Transition::with(initial, params), ctx)?;
        Ok(machine)
    }

    pub fn state(&self) -> CharacterState {
        self.current.kind()
    }

    /// Number of states entered since the machine started, fallbacks included.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    /// Run the live state's `execute` once and apply whatever it requests.
    pub fn step(
        &mut self,
        character: &mut Character,
        ctx: &mut TickContext,
    ) -> Result<Option<CharacterState>, MachineError> {
        match states::execute(&mut self.current, character, ctx) {
            Some(next) => {
                self.transition(character, next, ctx)?;
                Ok(Some(self.state()))
            }
            None => Ok(None),
        }
    }

    /// Exit the live state and enter `next`.
    pub fn transition(
        &mut self,
        character: &mut Character,
        next: Transition,
        ctx: &mut TickContext,
    ) -> Result<(), MachineError> {
        debug!(
            "Character state: {} -> {} ({:?})",
            self.state(),
            next.target,
            next.params
        );
        states::exit(&mut self.current, character, ctx);
        self.install(character, next, ctx)
    }

    /// Replace the live state without running its `exit`.
    pub(crate) fn reinitialize(
        &mut self,
        character: &mut Character,
        next: Transition,
        ctx: &mut TickContext,
    ) -> Result<(), MachineError> {
        debug!("Character state reinitialized: {} -> {}", self.state(), next.target);
        self.install(character, next, ctx)
    }

    fn install(
        &mut self,
        character: &mut Character,
        next: Transition,
        ctx: &mut TickContext,
    ) -> Result<(), MachineError> {
        self.current = StateData::fresh(next.target, ctx.now);
        self.transitions += 1;

        let Some(fallback) = states::enter(&mut self.current, character, next.params, ctx) else {
            return Ok(());
        };

        debug!("Character state {} bailed to {}", next.target, fallback);
        states::exit(&mut self.current, character, ctx);
        self.current = StateData::fresh(fallback, ctx.now);
        self.transitions += 1;

        match states::enter(&mut self.current, character, EnterParams::default(), ctx) {
            None => Ok(()),
            Some(requested) => Err(MachineError::TransitionDepthExceeded {
                bailed_from: fallback,
                requested,
            }),
        }
    }
}
