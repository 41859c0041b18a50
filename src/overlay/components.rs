use bevy::prelude::*;
use sequencer::Channel;

#[derive(Component)]
pub struct OverlayRoot;

#[derive(Component)]
pub struct BootInfoPanel;

#[derive(Component)]
pub struct ActivityLogText;

#[derive(Component)]
pub struct ProgressReadout;

#[derive(Component)]
pub struct HamsterSlot;

#[derive(Component)]
pub struct StartPopup;

#[derive(Component)]
pub struct ErrorPopup;

#[derive(Component)]
pub struct StartButton;

#[derive(Component)]
pub struct BlinkingCursorBox;

#[derive(Component)]
pub struct NarrowViewportWarning;

/// Ties a node's colors to one machine opacity channel. `transition_secs` of
/// zero snaps to the target; anything else eases toward it, standing in for
/// the CSS transitions of a browser overlay.
#[derive(Component)]
pub struct Faded {
    pub channel: Channel,
    pub transition_secs: f32,
    pub current: f32,
}
