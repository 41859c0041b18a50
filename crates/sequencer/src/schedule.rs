use std::time::Duration;

/// A visual change the machine has committed to performing at a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStep {
    HideLoadingText,
    ShowStartPopup,
    ShowErrorPopup,
}

/// Deadline queue for the timed fade sequence. Time only moves through
/// `advance`, so tests drive the schedule with simulated durations instead of
/// wall-clock waits. Steps are not cancelable once scheduled.
#[derive(Debug, Default)]
pub struct FadeSchedule {
    elapsed: Duration,
    pending: Vec<(Duration, FadeStep)>,
}

impl FadeSchedule {
    /// Schedules `step` to fire `delay` from the current simulated instant.
    pub fn schedule_in(&mut self, delay: Duration, step: FadeStep) {
        let due = self.elapsed + delay;
        self.pending.push((due, step));
        // stable: equal deadlines keep scheduling order
        self.pending.sort_by_key(|(at, _)| *at);
    }

    /// Moves time forward and returns every step whose deadline has passed,
    /// in deadline order.
    pub fn advance(&mut self, delta: Duration) -> Vec<FadeStep> {
        self.elapsed += delta;
        let elapsed = self.elapsed;
        let mut due = Vec::new();
        self.pending.retain(|(at, step)| {
            if *at <= elapsed {
                due.push(*step);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut schedule = FadeSchedule::default();
        schedule.schedule_in(Duration::from_millis(1500), FadeStep::ShowStartPopup);
        schedule.schedule_in(Duration::from_millis(1000), FadeStep::HideLoadingText);

        let fired = schedule.advance(Duration::from_secs(2));
        assert_eq!(
            fired,
            vec![FadeStep::HideLoadingText, FadeStep::ShowStartPopup]
        );
        assert_eq!(schedule.pending_len(), 0);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut schedule = FadeSchedule::default();
        schedule.schedule_in(Duration::from_millis(1000), FadeStep::HideLoadingText);

        assert!(schedule.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(
            schedule.advance(Duration::from_millis(1)),
            vec![FadeStep::HideLoadingText]
        );
    }

    #[test]
    fn deadlines_accumulate_across_partial_ticks() {
        let mut schedule = FadeSchedule::default();
        schedule.schedule_in(Duration::from_millis(100), FadeStep::ShowErrorPopup);

        for _ in 0..9 {
            assert!(schedule.advance(Duration::from_millis(10)).is_empty());
        }
        assert_eq!(
            schedule.advance(Duration::from_millis(10)),
            vec![FadeStep::ShowErrorPopup]
        );
    }

    #[test]
    fn later_scheduling_is_relative_to_current_instant() {
        let mut schedule = FadeSchedule::default();
        schedule.advance(Duration::from_secs(5));
        schedule.schedule_in(Duration::from_millis(500), FadeStep::ShowStartPopup);

        assert!(schedule.advance(Duration::from_millis(499)).is_empty());
        assert_eq!(
            schedule.advance(Duration::from_millis(1)),
            vec![FadeStep::ShowStartPopup]
        );
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let mut schedule = FadeSchedule::default();
        schedule.schedule_in(Duration::from_millis(100), FadeStep::HideLoadingText);
        schedule.schedule_in(Duration::from_millis(100), FadeStep::ShowStartPopup);

        assert_eq!(
            schedule.advance(Duration::from_millis(100)),
            vec![FadeStep::HideLoadingText, FadeStep::ShowStartPopup]
        );
    }
}
