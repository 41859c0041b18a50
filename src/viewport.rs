use crate::overlay::OverlaySettings;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportWarning>()
            .add_systems(Startup, seed_initial_width)
            .add_systems(Update, watch_resize);
    }
}

/// Advisory monitor output, recomputed on every resize notification. It never
/// gates stage progression; the overlay only renders it inside the start
/// popup.
#[derive(Resource, Default)]
pub(crate) struct ViewportWarning {
    pub width: f32,
    pub too_narrow: bool,
}

pub(crate) fn viewport_too_narrow(width: f32, threshold: f32) -> bool {
    width < threshold
}

fn seed_initial_width(
    window: Query<&Window, With<PrimaryWindow>>,
    settings: Res<OverlaySettings>,
    mut warning: ResMut<ViewportWarning>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    warning.width = window.resolution.width();
    warning.too_narrow = viewport_too_narrow(
        warning.width,
        settings.config.display.narrow_viewport_px,
    );
}

fn watch_resize(
    mut resize_events: EventReader<WindowResized>,
    settings: Res<OverlaySettings>,
    mut warning: ResMut<ViewportWarning>,
) {
    for event in resize_events.read() {
        warning.width = event.width;
        warning.too_narrow =
            viewport_too_narrow(event.width, settings.config.display.narrow_viewport_px);
    }
}
