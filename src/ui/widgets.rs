use crate::ui::bundles::*;
use bevy::ecs::relationship::RelatedSpawnerCommands;
use bevy::prelude::*;

pub fn spawn_button_with_marker<T: Component>(
    parent: &mut RelatedSpawnerCommands<ChildOf>,
    text: &str,
    normal_color: Color,
    hover_color: Color,
    pressed_color: Color,
    marker: T,
) -> Entity {
    parent
        .spawn((
            ButtonBundle::new(160.0, 44.0, normal_color, hover_color, pressed_color),
            marker,
        ))
        .with_children(|parent| {
            parent.spawn(LabelBundle::new(text, 18.0, Color::BLACK));
        })
        .id()
}
