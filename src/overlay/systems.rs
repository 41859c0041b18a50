use crate::capability;
use crate::loading::LoadedSource;
use crate::overlay::components::*;
use crate::overlay::{EntryContext, LoadingScreenDone, Overlay};
use crate::ui::bundles::{LabelBundle, PopupFrameBundle};
use crate::ui::widgets::spawn_button_with_marker;
use crate::viewport::ViewportWarning;
use bevy::ecs::relationship::RelatedSpawnerCommands;
use bevy::picking::Pickable;
use bevy::prelude::*;
use bevy::render::renderer::RenderAdapterInfo;
use bevy_decor::{BlinkingCursor, Spinner};
use sequencer::{Channel, Channels, LoadEvent, Stage};

const BIOS_GREEN: Color = Color::srgb(0.0, 1.0, 0.0);
const BIOS_YELLOW: Color = Color::srgb(1.0, 1.0, 0.0);
const BIOS_RED: Color = Color::srgb(1.0, 0.2, 0.2);

/// Resolves the entry branch once: probe the render adapter, honor the debug
/// bypass, otherwise wait for input while loading runs underneath.
pub(crate) fn resolve_entry(
    mut overlay: ResMut<Overlay>,
    entry: Res<EntryContext>,
    adapter: Option<Res<RenderAdapterInfo>>,
) {
    let capability_ok = capability::probe(adapter.as_deref());
    if overlay.machine.begin(capability_ok, entry.debug_bypass) {
        info!("Debug bypass: overlay skipped");
    }
}

pub(crate) fn ingest_load_events(
    mut events: EventReader<LoadedSource>,
    mut overlay: ResMut<Overlay>,
) {
    for event in events.read() {
        overlay.machine.on_load_event(&LoadEvent {
            source_name: event.source_name.clone(),
            progress: event.progress,
            to_load: event.to_load,
            loaded: event.loaded,
        });
    }
}

pub(crate) fn mirror_viewport_width(warning: Res<ViewportWarning>, mut overlay: ResMut<Overlay>) {
    if warning.is_changed() {
        overlay.machine.set_viewport_width(warning.width);
    }
}

pub(crate) fn advance_machine(time: Res<Time>, mut overlay: ResMut<Overlay>) {
    overlay.machine.tick(time.delta());
}

pub(crate) fn handle_start_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<StartButton>)>,
    mut overlay: ResMut<Overlay>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            overlay.machine.start();
        }
    }
}

/// Runs the one-shot start effects on the frame the machine reached
/// `Started`: notify the host, then stop the overlay region from swallowing
/// pointer input. Safe when the overlay root was never spawned.
pub(crate) fn finalize_start(
    overlay: Res<Overlay>,
    mut fired: Local<bool>,
    mut done: EventWriter<LoadingScreenDone>,
    mut commands: Commands,
    root: Query<Entity, With<OverlayRoot>>,
) {
    if *fired || overlay.machine.stage() != Stage::Started {
        return;
    }
    *fired = true;
    done.write(LoadingScreenDone);
    if let Ok(entity) = root.single() {
        commands.entity(entity).insert(Pickable::IGNORE);
    }
    info!("Loading overlay finished");
}

pub(crate) fn sync_boot_text(
    overlay: Res<Overlay>,
    mut texts: ParamSet<(
        Query<&mut Text, With<ActivityLogText>>,
        Query<&mut Text, With<ProgressReadout>>,
    )>,
) {
    let machine = &overlay.machine;

    let joined = machine.log().lines().collect::<Vec<_>>().join("\n");
    for mut text in texts.p0().iter_mut() {
        if text.0 != joined {
            text.0 = joined.clone();
        }
    }

    let readout = format!(
        "Resource check {}/{} ... {}%",
        machine.loaded(),
        machine.to_load(),
        machine.percent()
    );
    for mut text in texts.p1().iter_mut() {
        if text.0 != readout {
            text.0 = readout.clone();
        }
    }
}

/// Eases each faded node's alpha toward its channel target. A zero
/// transition snaps to the target on the same frame.
pub(crate) fn sync_opacity(
    time: Res<Time>,
    overlay: Res<Overlay>,
    mut faded: Query<(&mut Faded, Option<&mut BackgroundColor>, Option<&mut TextColor>)>,
) {
    let channels = overlay.machine.channels();
    let dt = time.delta().as_secs_f32();
    for (mut fade, bg_color, text_color) in faded.iter_mut() {
        let target = channels.get(fade.channel);
        if fade.transition_secs <= 0.0 {
            fade.current = target;
        } else {
            let step = dt / fade.transition_secs;
            fade.current += (target - fade.current).clamp(-step, step);
        }
        if let Some(mut bg) = bg_color {
            bg.0 = bg.0.with_alpha(fade.current);
        }
        if let Some(mut color) = text_color {
            color.0 = color.0.with_alpha(fade.current);
        }
    }
}

pub(crate) fn sync_visibility(
    overlay: Res<Overlay>,
    mut nodes: ParamSet<(
        Query<&mut Visibility, With<BootInfoPanel>>,
        Query<&mut Visibility, With<StartPopup>>,
        Query<&mut Visibility, With<ErrorPopup>>,
        Query<&mut Visibility, With<BlinkingCursorBox>>,
        Query<&mut Visibility, With<NarrowViewportWarning>>,
        Query<(&Faded, &mut Visibility), With<OverlayRoot>>,
    )>,
) {
    let machine = &overlay.machine;
    let channels = *machine.channels();

    show(
        nodes.p0(),
        machine.boot_info_visible() && channels.loading_text > 0.0,
    );
    show(nodes.p1(), channels.start_popup > 0.0);
    show(nodes.p2(), channels.error_popup > 0.0);
    show(nodes.p3(), machine.blinking_cursor_visible());
    show(nodes.p4(), machine.mobile_warning());

    // the root stays up until its exit fade has played out
    for (fade, mut visibility) in nodes.p5().iter_mut() {
        let gone = machine.stage() == Stage::Started && fade.current <= 0.01;
        *visibility = if gone {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
    }
}

fn show<F: bevy::ecs::query::QueryFilter>(
    mut nodes: Query<&mut Visibility, F>,
    visible: bool,
) {
    for mut visibility in nodes.iter_mut() {
        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub(crate) fn spawn_overlay(mut commands: Commands, overlay: Res<Overlay>) {
    let machine = &overlay.machine;
    let channels = *machine.channels();
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            ZIndex(100),
            OverlayRoot,
            Faded {
                channel: Channel::Overlay,
                transition_secs: 0.2,
                current: channels.overlay,
            },
        ))
        .with_children(|parent| {
            spawn_boot_info(parent, machine.boot_info_visible());
            spawn_hamster(parent, channels);
            spawn_blinking_cursor(parent);
            spawn_start_popup(parent, machine.mobile_warning());
            spawn_error_popup(parent);
        });
}

fn spawn_boot_info(parent: &mut RelatedSpawnerCommands<ChildOf>, visible: bool) {
    parent
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(32.0)),
                ..default()
            },
            BootInfoPanel,
            if visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            },
        ))
        .with_children(|parent| {
            // Header
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                })
                .with_children(|parent| {
                    parent.spawn(LabelBundle::new(
                        "ANTECHAMBER MODEL 7 BIOS v2.1",
                        16.0,
                        Color::WHITE,
                    ));
                    let date = chrono::Local::now().format("%m/%d/%Y");
                    parent.spawn(LabelBundle::new(
                        &format!("BIOS Date: {date}"),
                        16.0,
                        Color::WHITE,
                    ));
                });

            // Footer: progress readout above the rolling resource list
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                })
                .with_children(|parent| {
                    parent.spawn((
                        LabelBundle::new("Resource check 0/0 ... 0%", 16.0, Color::WHITE),
                        ProgressReadout,
                    ));
                    parent.spawn((
                        LabelBundle::new("", 16.0, Color::WHITE),
                        ActivityLogText,
                    ));
                });
        });
}

fn spawn_hamster(parent: &mut RelatedSpawnerCommands<ChildOf>, channels: Channels) {
    parent
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            HamsterSlot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Spinner::hamster_wheel(),
                Faded {
                    channel: Channel::Hamster,
                    transition_secs: 1.0,
                    current: channels.hamster,
                },
            ));
        });
}

fn spawn_blinking_cursor(parent: &mut RelatedSpawnerCommands<ChildOf>) {
    parent
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(48.0)),
                ..default()
            },
            BlinkingCursorBox,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("_"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                BlinkingCursor::default(),
            ));
        });
}

fn spawn_start_popup(parent: &mut RelatedSpawnerCommands<ChildOf>, warning_on: bool) {
    parent
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            StartPopup,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent
                .spawn(PopupFrameBundle::rim(500.0))
                .with_children(|parent| {
                    parent
                        .spawn(PopupFrameBundle::body())
                        .with_children(|parent| {
                            parent.spawn((
                                Text::new(""),
                                TextFont {
                                    font_size: 20.0,
                                    ..default()
                                },
                                TextColor(BIOS_GREEN),
                                Spinner::spinning_leaf(),
                            ));
                            parent.spawn(
                                LabelBundle::new(
                                    "THIS EXPERIENCE IS STILL GROWING",
                                    16.0,
                                    BIOS_GREEN,
                                )
                                .with_margin(UiRect::top(Val::Px(8.0))),
                            );
                            parent.spawn(LabelBundle::new(
                                "But do enjoy what is here so far :)",
                                16.0,
                                Color::WHITE,
                            ));
                            parent.spawn(
                                LabelBundle::new("Antechamber Showcase 2025", 16.0, Color::WHITE)
                                    .with_margin(UiRect::top(Val::Px(32.0))),
                            );
                            spawn_viewport_warning(parent, warning_on);
                            parent
                                .spawn(Node {
                                    justify_content: JustifyContent::Center,
                                    align_items: AlignItems::Center,
                                    margin: UiRect::top(Val::Px(16.0)),
                                    ..default()
                                })
                                .with_children(|parent| {
                                    spawn_button_with_marker(
                                        parent,
                                        "START",
                                        Color::srgb(0.75, 0.75, 0.75),
                                        Color::srgb(0.85, 0.85, 0.85),
                                        Color::srgb(0.6, 0.6, 0.6),
                                        StartButton,
                                    );
                                });
                        });
                });
        });
}

fn spawn_viewport_warning(parent: &mut RelatedSpawnerCommands<ChildOf>, warning_on: bool) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                margin: UiRect::top(Val::Px(16.0)),
                ..default()
            },
            NarrowViewportWarning,
            if warning_on {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            },
        ))
        .with_children(|parent| {
            parent.spawn(LabelBundle::new(
                "WARNING: This experience is best viewed on",
                16.0,
                BIOS_YELLOW,
            ));
            parent.spawn(LabelBundle::new(
                "a desktop or laptop computer.",
                16.0,
                BIOS_YELLOW,
            ));
        });
}

fn spawn_error_popup(parent: &mut RelatedSpawnerCommands<ChildOf>) {
    parent
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            ErrorPopup,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent
                .spawn(PopupFrameBundle::rim(500.0))
                .with_children(|parent| {
                    parent
                        .spawn(PopupFrameBundle::body())
                        .with_children(|parent| {
                            parent.spawn(LabelBundle::new(
                                "CRITICAL ERROR: No compatible graphics adapter",
                                16.0,
                                BIOS_RED,
                            ));
                            parent.spawn(
                                LabelBundle::new(
                                    "A working graphics adapter is required to run",
                                    16.0,
                                    Color::WHITE,
                                )
                                .with_margin(UiRect::top(Val::Px(32.0))),
                            );
                            parent.spawn(LabelBundle::new(
                                "this experience. Please update your drivers or",
                                16.0,
                                Color::WHITE,
                            ));
                            parent.spawn(LabelBundle::new(
                                "switch to a device with rendering support.",
                                16.0,
                                Color::WHITE,
                            ));
                        });
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlaySettings;
    use sequencer::{OverlayConfig, OverlayMachine};
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_event::<LoadedSource>();
        app.add_event::<LoadingScreenDone>();
        app.insert_resource(Time::<()>::default());
        app.insert_resource(OverlaySettings {
            config: OverlayConfig::default(),
        });
        app.init_resource::<ViewportWarning>();
        app.insert_resource(Overlay {
            machine: OverlayMachine::new(OverlayConfig::default()),
        });
        app.add_systems(
            Update,
            (
                ingest_load_events,
                mirror_viewport_width,
                advance_machine,
                finalize_start,
            )
                .chain(),
        );
        app
    }

    fn tick(app: &mut App, delta: Duration) {
        let mut time = app.world_mut().resource_mut::<Time>();
        time.advance_by(delta);
        app.update();
    }

    fn send_source(app: &mut App, name: &str, loaded: u32, to_load: u32, progress: f32) {
        app.world_mut()
            .resource_mut::<Events<LoadedSource>>()
            .write(LoadedSource {
                source_name: name.into(),
                progress,
                to_load,
                loaded,
            });
    }

    fn done_count(app: &App) -> usize {
        app.world().resource::<Events<LoadingScreenDone>>().len()
    }

    #[test]
    fn full_flow_emits_exactly_one_done_event() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<Overlay>()
            .machine
            .begin(true, false);

        send_source(&mut app, "scene.bin", 4, 4, 1.0);
        tick(&mut app, Duration::from_millis(1500));
        assert_eq!(done_count(&app), 0, "not started yet");

        // two rapid triggers, one notification
        {
            let mut overlay = app.world_mut().resource_mut::<Overlay>();
            overlay.machine.start();
            overlay.machine.start();
        }
        tick(&mut app, Duration::from_millis(16));
        assert_eq!(done_count(&app), 1);

        // the first notification is still retained; no second one joined it
        tick(&mut app, Duration::from_millis(16));
        assert_eq!(done_count(&app), 1);
    }

    #[test]
    fn load_events_reach_the_machine_in_order() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<Overlay>()
            .machine
            .begin(true, false);

        send_source(&mut app, "leaf.glb", 1, 4, 0.25);
        send_source(&mut app, "hamster.glb", 2, 4, 0.5);
        tick(&mut app, Duration::from_millis(16));

        let overlay = app.world().resource::<Overlay>();
        assert_eq!(overlay.machine.log().len(), 2);
        assert_eq!(overlay.machine.percent(), 50);
        assert_eq!(overlay.machine.stage(), Stage::Loading);
    }

    #[test]
    fn viewport_resource_feeds_the_machine() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<Overlay>()
            .machine
            .begin(true, false);
        {
            let mut warning = app.world_mut().resource_mut::<ViewportWarning>();
            warning.width = 600.0;
            warning.too_narrow = true;
        }
        tick(&mut app, Duration::from_millis(16));
        assert!(app.world().resource::<Overlay>().machine.mobile_warning());
    }
}
