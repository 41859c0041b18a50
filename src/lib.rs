mod capability;
mod core;
mod experience;
mod loading;
mod overlay;
mod ui;
mod viewport;

pub use crate::loading::{LoadedSource, LoadingPlugin};
pub use crate::overlay::{EntryContext, LoadingScreenDone, OverlayPlugin};

use crate::core::state::AppState;
use crate::experience::ExperiencePlugin;
use crate::ui::UIPlugin;
use crate::viewport::ViewportPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_decor::DecorPlugin;

pub struct AntechamberPlugin;

impl Plugin for AntechamberPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>().add_plugins((
            OverlayPlugin,
            LoadingPlugin,
            ViewportPlugin,
            UIPlugin,
            DecorPlugin,
            ExperiencePlugin,
        ));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
