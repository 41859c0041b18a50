pub(crate) mod components;
mod systems;

use bevy::prelude::*;
use sequencer::{OverlayConfig, OverlayMachine};

pub(crate) const CONFIG_PATH: &str = "overlay_config.toml";

pub struct OverlayPlugin;

/// Process entry flags, captured once at startup. The `debug_bypass` flag is
/// the native analog of a `?debug` query parameter: it sends the overlay
/// straight through the start gate.
#[derive(Resource, Default)]
pub struct EntryContext {
    pub debug_bypass: bool,
}

/// Outbound one-shot notification: the host may take over input and
/// rendering.
#[derive(Event, Debug, Clone, Copy)]
pub struct LoadingScreenDone;

#[derive(Resource)]
pub(crate) struct OverlaySettings {
    pub config: OverlayConfig,
}

#[derive(Resource)]
pub(crate) struct Overlay {
    pub machine: OverlayMachine,
}

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        let config = OverlayConfig::load_from_file(CONFIG_PATH).unwrap_or_else(|err| {
            warn!("{CONFIG_PATH} not loaded ({err}), using built-in defaults");
            OverlayConfig::default()
        });
        app.insert_resource(OverlaySettings {
            config: config.clone(),
        })
        .insert_resource(Overlay {
            machine: OverlayMachine::new(config),
        })
        .init_resource::<EntryContext>()
        .add_event::<LoadingScreenDone>()
        .add_systems(
            Startup,
            (systems::resolve_entry, systems::spawn_overlay).chain(),
        )
        .add_systems(
            Update,
            (
                systems::ingest_load_events,
                systems::mirror_viewport_width,
                systems::advance_machine,
                systems::handle_start_button,
                systems::finalize_start,
                systems::sync_boot_text,
                systems::sync_opacity,
                systems::sync_visibility,
            )
                .chain(),
        );
    }
}
