//! Effects domain: animation cue playback on the layered sprites.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::character::{
    AnimationCue, Appearance, CharacterCue, Cue, Facing, LegsPose, PlayerController,
};
use crate::effects::layers::{BodySprite, LegsSprite, UpperSprite};

/// Current animation and its frame clock.
#[derive(Component, Debug)]
pub struct CharacterAnimation {
    pub cue: AnimationCue,
    pub current_frame: u32,
    pub frame_timer: f32,
}

impl Default for CharacterAnimation {
    fn default() -> Self {
        Self {
            cue: AnimationCue::Idle,
            current_frame: 0,
            frame_timer: 0.0,
        }
    }
}

impl CharacterAnimation {
    pub fn play(&mut self, cue: AnimationCue) {
        if self.cue != cue {
            self.cue = cue;
            self.current_frame = 0;
            self.frame_timer = 0.0;
        }
    }

    pub fn frame_count(&self) -> u32 {
        match self.cue {
            AnimationCue::Idle => 4,
            AnimationCue::Run => 6,
            AnimationCue::Jump => 2,
            AnimationCue::WallSlide => 2,
            AnimationCue::Dash => 3,
            AnimationCue::PogoSlash => 4,
        }
    }

    pub fn frame_duration(&self) -> f32 {
        match self.cue {
            AnimationCue::Dash | AnimationCue::PogoSlash => 0.08,
            _ => 0.15,
        }
    }

    /// Placeholder art: a base tint per animation.
    pub fn tint(&self) -> Color {
        match self.cue {
            AnimationCue::Idle => Color::srgb(0.9, 0.9, 0.9),
            AnimationCue::Run => Color::srgb(0.85, 0.95, 0.85),
            AnimationCue::Jump => Color::srgb(0.85, 0.85, 1.0),
            AnimationCue::WallSlide => Color::srgb(0.7, 0.8, 1.0),
            AnimationCue::Dash => Color::srgb(1.0, 1.0, 0.6),
            AnimationCue::PogoSlash => Color::srgb(1.0, 0.85, 0.5),
        }
    }
}

fn legs_color(pose: LegsPose) -> Color {
    match pose {
        LegsPose::Up => Color::srgb(0.5, 0.8, 1.0),
        LegsPose::Max => Color::srgb(0.7, 0.7, 0.9),
        LegsPose::Down => Color::srgb(0.9, 0.6, 0.6),
    }
}

pub(crate) fn apply_animation_cues(
    mut cues: MessageReader<CharacterCue>,
    mut query: Query<&mut CharacterAnimation>,
) {
    for event in cues.read() {
        let Cue::Animation(cue) = event.cue else {
            continue;
        };
        if let Ok(mut animation) = query.get_mut(event.entity) {
            animation.play(cue);
        }
    }
}

pub(crate) fn update_animation_frames(time: Res<Time>, mut query: Query<&mut CharacterAnimation>) {
    for mut animation in &mut query {
        animation.frame_timer += time.delta_secs();
        let duration = animation.frame_duration();
        if animation.frame_timer >= duration {
            animation.frame_timer -= duration;
            animation.current_frame = (animation.current_frame + 1) % animation.frame_count();
        }
    }
}

/// Push facing, appearance and animation frame onto the sprite layers.
pub(crate) fn sync_character_visuals(
    players: Query<(&PlayerController, &CharacterAnimation, &Children)>,
    mut body: Query<
        (&mut Sprite, &mut Visibility),
        (With<BodySprite>, Without<LegsSprite>, Without<UpperSprite>),
    >,
    mut legs: Query<
        (&mut Sprite, &mut Visibility),
        (With<LegsSprite>, Without<BodySprite>, Without<UpperSprite>),
    >,
    mut upper: Query<
        (&mut Sprite, &mut Visibility),
        (With<UpperSprite>, Without<BodySprite>, Without<LegsSprite>),
    >,
) {
    for (controller, animation, children) in &players {
        let character = &controller.character;
        let flip = character.facing == Facing::Left;
        // Alternate frames slightly darker so frame progression is visible
        let shade = if animation.current_frame % 2 == 0 { 1.0 } else { 0.85 };
        let tint = animation.tint().to_srgba();
        let body_color = Color::srgb(tint.red * shade, tint.green * shade, tint.blue * shade);

        let (full_visible, legs_pose) = match character.appearance {
            Appearance::Full => (true, None),
            Appearance::Composite { legs } => (false, Some(legs)),
        };

        for child in children.iter() {
            if let Ok((mut sprite, mut visibility)) = body.get_mut(child) {
                sprite.color = body_color;
                sprite.flip_x = flip;
                *visibility = if full_visible {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            } else if let Ok((mut sprite, mut visibility)) = legs.get_mut(child) {
                sprite.flip_x = flip;
                match legs_pose {
                    Some(pose) => {
                        sprite.color = legs_color(pose);
                        *visibility = Visibility::Inherited;
                    }
                    None => *visibility = Visibility::Hidden,
                }
            } else if let Ok((mut sprite, mut visibility)) = upper.get_mut(child) {
                sprite.flip_x = flip;
                *visibility = if legs_pose.is_some() {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}
