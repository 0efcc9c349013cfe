//! Character domain: fire-and-forget notifications for animation and particles.

/// Animation the full-body sprite should switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    Idle,
    Run,
    Jump,
    WallSlide,
    Dash,
    PogoSlash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleCue {
    JumpBurst,
    LandingDust,
    RunStart,
    RunStop,
    IdleStart,
    IdleStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Animation(AnimationCue),
    Particles(ParticleCue),
}

/// Visual sink called unconditionally by the states. Every method defaults
/// to a no-op, so an unwired sink is simply silent.
pub trait CharacterHooks {
    fn play_animation(&mut self, _cue: AnimationCue) {}

    fn particles(&mut self, _cue: ParticleCue) {}
}

/// Sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl CharacterHooks for NoHooks {}

/// Sink that records cues in order for later publishing.
#[derive(Debug, Default, Clone)]
pub struct CueBuffer {
    cues: Vec<Cue>,
}

impl CueBuffer {
    pub fn drain(&mut self) -> impl Iterator<Item = Cue> + '_ {
        self.cues.drain(..)
    }
}

impl CharacterHooks for CueBuffer {
    fn play_animation(&mut self, cue: AnimationCue) {
        self.cues.push(Cue::Animation(cue));
    }

    fn particles(&mut self, cue: ParticleCue) {
        self.cues.push(Cue::Particles(cue));
    }
}
