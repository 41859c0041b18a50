use serde::{Deserialize, Serialize};

/// One load-completion notification from the external loader. The loader is
/// the source of truth: fields overwrite whatever the tracker held before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadEvent {
    pub source_name: String,
    pub progress: f32,
    pub to_load: u32,
    pub loaded: u32,
}

/// Aggregated view of the load stream.
///
/// Incoming `progress` is not trusted to be monotonic; the displayed fraction
/// is the running maximum clamped to [0, 1] so a regressive event never
/// rewinds the UI. The raw value of the latest event is kept alongside.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    loaded: u32,
    to_load: u32,
    raw: f32,
    display: f32,
}

impl ProgressTracker {
    pub fn record(&mut self, event: &LoadEvent) {
        self.loaded = event.loaded;
        self.to_load = event.to_load;
        self.raw = event.progress;
        self.display = self.display.max(event.progress).clamp(0.0, 1.0);
    }

    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    pub fn to_load(&self) -> u32 {
        self.to_load
    }

    pub fn raw_progress(&self) -> f32 {
        self.raw
    }

    pub fn display_progress(&self) -> f32 {
        self.display
    }

    pub fn percent(&self) -> u32 {
        (self.display * 100.0).round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.display >= 1.0
    }
}
