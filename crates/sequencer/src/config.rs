use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub timings: TimingConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    pub text_fade_delay_ms: u64,
    pub popup_reveal_delay_ms: u64,
    pub error_reveal_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub log_capacity: usize,
    pub name_column_width: usize,
    pub narrow_viewport_px: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            timings: TimingConfig {
                text_fade_delay_ms: 1000,
                popup_reveal_delay_ms: 500,
                error_reveal_delay_ms: 500,
            },
            display: DisplayConfig {
                log_capacity: 8,
                name_column_width: 24,
                narrow_viewport_px: 768.0,
            },
        }
    }
}

impl OverlayConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: OverlayConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn text_fade_delay(&self) -> Duration {
        Duration::from_millis(self.timings.text_fade_delay_ms)
    }

    pub fn popup_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.timings.popup_reveal_delay_ms)
    }

    pub fn error_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.timings.error_reveal_delay_ms)
    }
}
