use crate::core::state::AppState;
use crate::loading::SceneAssets;
use crate::overlay::LoadingScreenDone;
use bevy::log::info;
use bevy::prelude::*;
use std::f32::consts::PI;

pub struct ExperiencePlugin;

impl Plugin for ExperiencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExperienceActive>()
            .add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(AppState::Experience), spawn_scene)
            .add_systems(
                Update,
                (activate_on_done, orbit_scene).run_if(in_state(AppState::Experience)),
            );
    }
}

/// Set once the overlay hands over control; the scene idles until then.
#[derive(Resource, Default)]
struct ExperienceActive(bool);

#[derive(Component)]
struct ExperienceRoot;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 3.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, 1.0, -PI / 4.)),
        DirectionalLight::default(),
    ));

    info!("Camera spawned");
}

fn spawn_scene(mut commands: Commands, assets: Res<SceneAssets>) {
    commands.spawn((
        SceneRoot(assets.island.clone()),
        Transform::default(),
        ExperienceRoot,
    ));
}

fn activate_on_done(
    mut events: EventReader<LoadingScreenDone>,
    mut active: ResMut<ExperienceActive>,
) {
    for _ in events.read() {
        if !active.0 {
            active.0 = true;
            info!("Overlay handed over, experience active");
        }
    }
}

fn orbit_scene(
    active: Res<ExperienceActive>,
    time: Res<Time>,
    mut scene: Query<&mut Transform, With<ExperienceRoot>>,
) {
    if !active.0 {
        return;
    }
    let dt = time.delta().as_secs_f32();
    for mut transform in scene.iter_mut() {
        transform.rotate_y(0.1 * dt);
    }
}
