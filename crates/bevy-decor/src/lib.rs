//! # Bevy Decor Crate
//!
//! Text-frame decorations for Bevy 0.17 loading screens: frame-cycling
//! spinners and a blinking cursor. Stateless beyond each component; your app
//! decides where they live and when they are visible.
//!
//! ## Usage
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_decor::{DecorPlugin, Spinner};
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((
//!         Text::new(""),
//!         TextFont {
//!             font_size: 28.0,
//!             ..default()
//!         },
//!         Spinner::hamster_wheel(),
//!     ));
//! }
//!
//! fn main() {
//!     App::new().add_plugins(DecorPlugin).add_systems(Startup, setup);
//! }
//! ```

use bevy::prelude::*;

pub struct DecorPlugin;

impl Plugin for DecorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (advance_spinners, blink_cursors));
    }
}

/// Cycles the attached `Text` through a fixed frame list.
#[derive(Component)]
pub struct Spinner {
    frames: Vec<String>,
    timer: Timer,
    index: usize,
}

impl Spinner {
    pub fn new(frames: Vec<String>, seconds_per_frame: f32) -> Self {
        Self {
            frames,
            timer: Timer::from_seconds(seconds_per_frame, TimerMode::Repeating),
            index: 0,
        }
    }

    /// The classic hamster-in-a-wheel loader, reduced to spokes.
    pub fn hamster_wheel() -> Self {
        Self::new(
            vec![
                "( | )".to_string(),
                "( / )".to_string(),
                "( - )".to_string(),
                "( \\ )".to_string(),
            ],
            0.12,
        )
    }

    /// A slowly tumbling leaf for popup dressing.
    pub fn spinning_leaf() -> Self {
        Self::new(
            vec![
                "v".to_string(),
                "<".to_string(),
                "^".to_string(),
                ">".to_string(),
            ],
            0.35,
        )
    }

    pub fn current_frame(&self) -> &str {
        &self.frames[self.index]
    }
}

/// Toggles the attached `TextColor` between opaque and transparent.
#[derive(Component)]
pub struct BlinkingCursor {
    timer: Timer,
    visible: bool,
}

impl BlinkingCursor {
    pub fn new(seconds_per_phase: f32) -> Self {
        Self {
            timer: Timer::from_seconds(seconds_per_phase, TimerMode::Repeating),
            visible: true,
        }
    }
}

impl Default for BlinkingCursor {
    fn default() -> Self {
        Self::new(0.5)
    }
}

fn advance_spinners(time: Res<Time>, mut spinners: Query<(&mut Spinner, &mut Text)>) {
    for (mut spinner, mut text) in spinners.iter_mut() {
        if spinner.frames.is_empty() {
            continue;
        }
        spinner.timer.tick(time.delta());
        if spinner.timer.just_finished() {
            spinner.index = (spinner.index + 1) % spinner.frames.len();
        }
        let frame = &spinner.frames[spinner.index];
        if text.0 != *frame {
            text.0 = frame.clone();
        }
    }
}

fn blink_cursors(time: Res<Time>, mut cursors: Query<(&mut BlinkingCursor, &mut TextColor)>) {
    for (mut cursor, mut color) in cursors.iter_mut() {
        cursor.timer.tick(time.delta());
        if cursor.timer.just_finished() {
            cursor.visible = !cursor.visible;
            let alpha = if cursor.visible { 1.0 } else { 0.0 };
            color.0 = color.0.with_alpha(alpha);
        }
    }
}
