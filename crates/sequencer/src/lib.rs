pub mod activity;
pub mod config;
pub mod machine;
pub mod progress;
pub mod schedule;

pub use activity::ActivityLog;
pub use config::OverlayConfig;
pub use machine::{Channel, Channels, OverlayMachine, Stage};
pub use progress::LoadEvent;
