use crate::ui::components::*;
use bevy::color::Color;
use bevy::prelude::*;

#[derive(Bundle)]
pub struct LabelBundle {
    pub text: Text,
    pub font: TextFont,
    pub color: TextColor,
    pub node: Node,
}

impl LabelBundle {
    pub fn new(text: &str, font_size: f32, color: Color) -> Self {
        Self {
            text: Text::new(text),
            font: TextFont {
                font_size,
                ..default()
            },
            color: TextColor(color),
            node: Node::default(),
        }
    }

    pub fn with_margin(mut self, margin: UiRect) -> Self {
        self.node.margin = margin;
        self
    }
}

#[derive(Bundle)]
pub struct ButtonBundle {
    pub button: Button,
    pub node: Node,
    pub background: BackgroundColor,
    pub interaction: Interaction,
    pub config: ButtonConfig,
    pub marker: UIButton,
}

impl ButtonBundle {
    pub fn new(
        width: f32,
        height: f32,
        normal_color: Color,
        hover_color: Color,
        pressed_color: Color,
    ) -> Self {
        Self {
            button: Button,
            node: Node {
                width: Val::Px(width),
                height: Val::Px(height),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            background: BackgroundColor(normal_color),
            interaction: Interaction::None,
            config: ButtonConfig {
                normal_color,
                hover_color,
                pressed_color,
            },
            marker: UIButton,
        }
    }
}

/// The boxy popup frame: a white rim around a near-black body, emulating a
/// thick solid border with two nested nodes.
#[derive(Bundle)]
pub struct PopupFrameBundle {
    pub node: Node,
    pub background: BackgroundColor,
}

impl PopupFrameBundle {
    pub fn rim(max_width: f32) -> Self {
        Self {
            node: Node {
                max_width: Val::Px(max_width),
                padding: UiRect::all(Val::Px(7.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            background: BackgroundColor(Color::WHITE),
        }
    }

    pub fn body() -> Self {
        Self {
            node: Node {
                padding: UiRect::all(Val::Px(24.0)),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            background: BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.95)),
        }
    }
}
