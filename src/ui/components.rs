use bevy::prelude::*;

// Button Components
#[derive(Component)]
pub struct UIButton;

#[derive(Component)]
pub struct ButtonConfig {
    pub normal_color: Color,
    pub hover_color: Color,
    pub pressed_color: Color,
}
