use crate::core::state::AppState;
use bevy::asset::{LoadState, LoadedUntypedAsset};
use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

pub struct LoadingPlugin;

/// Inbound notification from the loader, one per completed source. The
/// overlay consumes these; it never loads anything itself.
#[derive(Event, Debug, Clone)]
pub struct LoadedSource {
    pub source_name: String,
    pub progress: f32,
    pub to_load: u32,
    pub loaded: u32,
}

const TRACKED_SOURCES: &[&str] = &[
    "models/island.glb",
    "models/leaf.glb",
    "models/hamster.glb",
    "textures/foliage.png",
];

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LoadedSource>()
            .add_loading_state(
                LoadingState::new(AppState::AssetLoading)
                    .continue_to_state(AppState::Experience)
                    .load_collection::<SceneAssets>(),
            )
            .add_systems(Startup, begin_tracking)
            .add_systems(Update, report_loaded_sources);
    }
}

#[derive(AssetCollection, Resource)]
pub struct SceneAssets {
    #[asset(path = "models/island.glb#Scene0")]
    pub island: Handle<Scene>,
    #[asset(path = "models/leaf.glb#Scene0")]
    pub leaf: Handle<Scene>,
    #[asset(path = "models/hamster.glb#Scene0")]
    pub hamster: Handle<Scene>,
    #[asset(path = "textures/foliage.png")]
    pub foliage: Handle<Image>,
}

struct PendingSource {
    name: String,
    handle: Handle<LoadedUntypedAsset>,
    resolved: bool,
}

#[derive(Resource, Default)]
struct SourceTracker {
    pending: Vec<PendingSource>,
    loaded: u32,
}

fn begin_tracking(mut commands: Commands, asset_server: Res<AssetServer>) {
    let pending = TRACKED_SOURCES
        .iter()
        .map(|path| PendingSource {
            name: source_name(path).to_string(),
            handle: asset_server.load_untyped(*path),
            resolved: false,
        })
        .collect();
    commands.insert_resource(SourceTracker { pending, loaded: 0 });
}

/// Reports each source exactly once, as soon as it finished loading with its
/// dependencies. Completion order is whatever the asset backend produced; a
/// failed source is logged and simply never counts toward the total.
fn report_loaded_sources(
    asset_server: Res<AssetServer>,
    mut tracker: ResMut<SourceTracker>,
    mut events: EventWriter<LoadedSource>,
) {
    let SourceTracker { pending, loaded } = &mut *tracker;
    let to_load = pending.len() as u32;
    for source in pending.iter_mut() {
        if source.resolved {
            continue;
        }
        match asset_server.load_state(source.handle.id()) {
            LoadState::Loaded => {
                source.resolved = true;
                *loaded += 1;
                events.write(LoadedSource {
                    source_name: source.name.clone(),
                    progress: *loaded as f32 / to_load as f32,
                    to_load,
                    loaded: *loaded,
                });
            }
            LoadState::Failed(err) => {
                source.resolved = true;
                warn!("Failed to load {}: {err}", source.name);
            }
            _ => {}
        }
    }
}

fn source_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
