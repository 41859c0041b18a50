use crate::activity::{ActivityLog, format_entry};
use crate::config::OverlayConfig;
use crate::progress::{LoadEvent, ProgressTracker};
use crate::schedule::{FadeSchedule, FadeStep};
use std::time::Duration;

/// The mutually exclusive control modes of the overlay. `Initializing` is the
/// entry stage, `Started` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Initializing,
    WaitingForInput { debug_bypass: bool },
    ErrorNoCapability,
    Loading,
    ReadyToStart,
    Started,
}

/// Identifies one faded visual element. Channels are owned exclusively by the
/// machine; callers only read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Overlay,
    LoadingText,
    Hamster,
    StartPopup,
    ErrorPopup,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channels {
    pub overlay: f32,
    pub loading_text: f32,
    pub hamster: f32,
    pub start_popup: f32,
    pub error_popup: f32,
}

impl Channels {
    fn new() -> Self {
        Self {
            overlay: 1.0,
            loading_text: 1.0,
            hamster: 1.0,
            start_popup: 0.0,
            error_popup: 0.0,
        }
    }

    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Overlay => self.overlay,
            Channel::LoadingText => self.loading_text,
            Channel::Hamster => self.hamster,
            Channel::StartPopup => self.start_popup,
            Channel::ErrorPopup => self.error_popup,
        }
    }
}

/// The staged state machine behind the loading overlay.
///
/// All mutation enters through `begin`, `on_load_event`, `tick`,
/// `set_viewport_width` and `start`; time only moves through `tick`, so every
/// timed transition is deterministic under test.
pub struct OverlayMachine {
    config: OverlayConfig,
    stage: Stage,
    channels: Channels,
    tracker: ProgressTracker,
    log: ActivityLog,
    schedule: FadeSchedule,
    done_loading: bool,
    boot_info_visible: bool,
    mobile_warning: bool,
}

impl OverlayMachine {
    pub fn new(config: OverlayConfig) -> Self {
        let log = ActivityLog::new(config.display.log_capacity);
        Self {
            config,
            stage: Stage::Initializing,
            channels: Channels::new(),
            tracker: ProgressTracker::default(),
            log,
            schedule: FadeSchedule::default(),
            done_loading: false,
            boot_info_visible: false,
            mobile_warning: false,
        }
    }

    /// Resolves the entry branch exactly once. The capability probe runs
    /// regardless, but a debug bypass wins over its result and goes straight
    /// through the start gate. Returns true when the bypass fired the gate.
    pub fn begin(&mut self, capability_ok: bool, debug_bypass: bool) -> bool {
        if self.stage != Stage::Initializing {
            return false;
        }
        if debug_bypass {
            self.stage = Stage::WaitingForInput { debug_bypass: true };
            return self.fire_start_gate();
        }
        if !capability_ok {
            self.stage = Stage::ErrorNoCapability;
            self.schedule
                .schedule_in(self.config.error_reveal_delay(), FadeStep::ShowErrorPopup);
            return false;
        }
        self.stage = Stage::WaitingForInput {
            debug_bypass: false,
        };
        self.boot_info_visible = true;
        false
    }

    /// Aggregates one loader notification. Events are never dropped, even
    /// after completion or in the error stage; they only stop causing stage
    /// transitions.
    pub fn on_load_event(&mut self, event: &LoadEvent) {
        self.tracker.record(event);
        self.log.push(format_entry(
            &event.source_name,
            event.progress,
            self.config.display.name_column_width,
        ));

        if let Stage::WaitingForInput {
            debug_bypass: false,
        } = self.stage
        {
            self.stage = Stage::Loading;
        }

        if self.stage == Stage::Loading && self.tracker.is_complete() && !self.done_loading {
            self.done_loading = true;
            self.stage = Stage::ReadyToStart;
            let text_delay = self.config.text_fade_delay();
            let popup_delay = text_delay + self.config.popup_reveal_delay();
            self.schedule
                .schedule_in(text_delay, FadeStep::HideLoadingText);
            self.schedule
                .schedule_in(popup_delay, FadeStep::ShowStartPopup);
        }
    }

    /// Advances simulated time and applies any fade step that came due.
    pub fn tick(&mut self, delta: Duration) {
        for step in self.schedule.advance(delta) {
            self.apply(step);
        }
    }

    fn apply(&mut self, step: FadeStep) {
        match step {
            FadeStep::HideLoadingText => {
                self.channels.loading_text = 0.0;
                self.channels.hamster = 0.0;
            }
            FadeStep::ShowStartPopup => self.channels.start_popup = 1.0,
            FadeStep::ShowErrorPopup => self.channels.error_popup = 1.0,
        }
    }

    /// The start gate. Fires from `ReadyToStart` (or the debug-bypass entry
    /// path); everything else is a no-op. Returns true exactly once.
    pub fn start(&mut self) -> bool {
        match self.stage {
            Stage::ReadyToStart => self.fire_start_gate(),
            Stage::WaitingForInput { debug_bypass: true } => self.fire_start_gate(),
            _ => false,
        }
    }

    fn fire_start_gate(&mut self) -> bool {
        if self.stage == Stage::Started {
            return false;
        }
        self.stage = Stage::Started;
        self.channels.overlay = 0.0;
        true
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.mobile_warning = width < self.config.display.narrow_viewport_px;
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn loaded(&self) -> u32 {
        self.tracker.loaded()
    }

    pub fn to_load(&self) -> u32 {
        self.tracker.to_load()
    }

    pub fn percent(&self) -> u32 {
        self.tracker.percent()
    }

    pub fn done_loading(&self) -> bool {
        self.done_loading
    }

    pub fn boot_info_visible(&self) -> bool {
        self.boot_info_visible
    }

    pub fn mobile_warning(&self) -> bool {
        self.mobile_warning
    }

    /// The cosmetic blinking indicator is shown in the gap where both the
    /// loading text and the start popup are fully transparent.
    pub fn blinking_cursor_visible(&self) -> bool {
        self.channels.loading_text <= 0.0 && self.channels.start_popup <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> OverlayMachine {
        OverlayMachine::new(OverlayConfig::default())
    }

    fn event(name: &str, loaded: u32, to_load: u32, progress: f32) -> LoadEvent {
        LoadEvent {
            source_name: name.into(),
            progress,
            to_load,
            loaded,
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn normal_entry_waits_for_input() {
        let mut m = machine();
        let fired = m.begin(true, false);
        assert!(!fired);
        assert_eq!(
            m.stage(),
            Stage::WaitingForInput {
                debug_bypass: false
            }
        );
        assert!(m.boot_info_visible());
        assert_eq!(m.channels().overlay, 1.0);
    }

    #[test]
    fn missing_capability_is_a_dead_end() {
        let mut m = machine();
        m.begin(false, false);
        assert_eq!(m.stage(), Stage::ErrorNoCapability);

        // error popup reveals after 500 ms, not before
        m.tick(ms(499));
        assert_eq!(m.channels().error_popup, 0.0);
        m.tick(ms(1));
        assert_eq!(m.channels().error_popup, 1.0);

        // no amount of loading makes ReadyToStart reachable
        m.on_load_event(&event("scene.bin", 4, 4, 1.0));
        m.tick(ms(10_000));
        assert_eq!(m.stage(), Stage::ErrorNoCapability);
        assert!(!m.start());
    }

    #[test]
    fn error_stage_still_aggregates_events() {
        let mut m = machine();
        m.begin(false, false);
        m.on_load_event(&event("leaf.glb", 1, 4, 0.25));
        assert_eq!(m.log().len(), 1);
        assert_eq!(m.percent(), 25);
    }

    #[test]
    fn first_event_moves_waiting_to_loading() {
        let mut m = machine();
        m.begin(true, false);
        m.on_load_event(&event("leaf.glb", 1, 4, 0.25));
        assert_eq!(m.stage(), Stage::Loading);
    }

    #[test]
    fn completion_schedules_the_fade_sequence() {
        let mut m = machine();
        m.begin(true, false);
        m.on_load_event(&event("scene.bin", 4, 4, 1.0));
        assert_eq!(m.stage(), Stage::ReadyToStart);
        assert!(m.done_loading());

        // +999 ms: nothing yet
        m.tick(ms(999));
        assert_eq!(m.channels().loading_text, 1.0);
        assert_eq!(m.channels().hamster, 1.0);

        // +1000 ms: text and hamster drop together
        m.tick(ms(1));
        assert_eq!(m.channels().loading_text, 0.0);
        assert_eq!(m.channels().hamster, 0.0);
        assert_eq!(m.channels().start_popup, 0.0);
        assert!(m.blinking_cursor_visible());

        // +1500 ms: start popup comes up
        m.tick(ms(499));
        assert_eq!(m.channels().start_popup, 0.0);
        m.tick(ms(1));
        assert_eq!(m.channels().start_popup, 1.0);
        assert!(!m.blinking_cursor_visible());
    }

    #[test]
    fn late_events_do_not_restart_the_schedule() {
        let mut m = machine();
        m.begin(true, false);
        m.on_load_event(&event("scene.bin", 4, 4, 1.0));
        m.tick(ms(900));
        // straggler after completion
        m.on_load_event(&event("extra.bin", 5, 4, 1.0));
        m.tick(ms(100));
        assert_eq!(m.channels().loading_text, 0.0);
        m.tick(ms(500));
        assert_eq!(m.channels().start_popup, 1.0);
        // the straggler still reached the log
        assert_eq!(m.log().len(), 2);
    }

    #[test]
    fn regressive_progress_cannot_untrigger_ready() {
        let mut m = machine();
        m.begin(true, false);
        m.on_load_event(&event("scene.bin", 4, 4, 1.0));
        m.on_load_event(&event("ghost.bin", 1, 4, 0.25));
        assert_eq!(m.stage(), Stage::ReadyToStart);
        assert_eq!(m.percent(), 100);
    }

    #[test]
    fn start_fires_once_and_only_from_ready() {
        let mut m = machine();
        m.begin(true, false);
        assert!(!m.start(), "start before ready must be a no-op");

        m.on_load_event(&event("scene.bin", 4, 4, 1.0));
        m.tick(ms(1500));

        assert!(m.start());
        assert_eq!(m.stage(), Stage::Started);
        assert_eq!(m.channels().overlay, 0.0);

        assert!(!m.start(), "second trigger must not fire again");
        assert_eq!(m.channels().overlay, 0.0);
    }

    #[test]
    fn stale_timers_after_start_change_nothing_observable() {
        let mut m = machine();
        m.begin(true, false);
        m.on_load_event(&event("scene.bin", 4, 4, 1.0));
        m.tick(ms(1500));
        m.start();
        m.tick(ms(60_000));
        assert_eq!(m.stage(), Stage::Started);
        assert_eq!(m.channels().overlay, 0.0);
    }

    #[test]
    fn debug_bypass_reaches_started_without_events() {
        let mut m = machine();
        // capability probe says no, bypass does not care
        let fired = m.begin(false, true);
        assert!(fired);
        assert_eq!(m.stage(), Stage::Started);
        assert_eq!(m.channels().overlay, 0.0);
        assert!(!m.begin(false, true), "begin resolves only once");
    }

    #[test]
    fn viewport_warning_toggles_without_stage_effect() {
        let mut m = machine();
        m.begin(true, false);
        m.set_viewport_width(1024.0);
        assert!(!m.mobile_warning());
        m.set_viewport_width(767.0);
        assert!(m.mobile_warning());
        m.set_viewport_width(768.0);
        assert!(!m.mobile_warning());
        assert_eq!(
            m.stage(),
            Stage::WaitingForInput {
                debug_bypass: false
            }
        );
    }

    #[test]
    fn blinking_cursor_only_in_the_gap() {
        let mut m = machine();
        m.begin(true, false);
        assert!(!m.blinking_cursor_visible(), "loading text still visible");
        m.on_load_event(&event("scene.bin", 4, 4, 1.0));
        m.tick(ms(1000));
        assert!(m.blinking_cursor_visible());
        m.tick(ms(500));
        assert!(!m.blinking_cursor_visible(), "popup now visible");
    }

    /// The worked example: three events, a three-line log ending in the
    /// scene line, and exactly one ready sequence.
    #[test]
    fn three_event_example_flow() {
        let mut m = machine();
        m.begin(true, false);
        m.on_load_event(&event("leaf.glb", 1, 4, 0.25));
        m.on_load_event(&event("hamster.glb", 2, 4, 0.5));
        m.on_load_event(&event("scene.bin", 4, 4, 1.0));

        assert_eq!(m.log().len(), 3);
        let last = m.log().lines().last().unwrap();
        assert!(last.starts_with("Loaded scene.bin"));
        assert!(last.ends_with("100%"));

        assert_eq!(m.stage(), Stage::ReadyToStart);
        m.tick(ms(1500));
        assert_eq!(m.channels().start_popup, 1.0);

        // a second completion event must not schedule another sequence
        m.on_load_event(&event("scene.bin", 4, 4, 1.0));
        m.tick(ms(1500));
        assert_eq!(m.channels().start_popup, 1.0);
        assert_eq!(m.channels().loading_text, 0.0);
    }
}
