//! Tick-counted repeating timer.
//!
//! Actions use [`IntervalTimer`] to gate slow progress (training, research,
//! repair strokes, attack cooldowns). The timer consumes elapsed tick deltas,
//! never wall-clock time, so it is safe inside the lockstep core.

/// An interval-triggering countdown used by actions.
///
/// Each time the accumulated elapsed time reaches `interval`, one trigger
/// fires and the remainder carries over, so a single large `update` can fire
/// several triggers without losing any. An optional `max_triggers` cap makes
/// the timer permanently [`finished`](IntervalTimer::finished) once reached.
///
/// # Invariants
///
/// - `time_left` (ticks accounted towards the next trigger) stays in
///   `[0, interval)` between updates
/// - `triggers` is monotonically non-decreasing
/// - once finished, `update` is a no-op
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalTimer {
    interval: u32,
    max_triggers: Option<u32>,
    time_left: u32,
    triggers: u32,
    primed: bool,
}

impl IntervalTimer {
    /// Constructs a timer which fires every `interval` ticks, forever.
    pub fn new(interval: u32) -> Self {
        Self::with_max_triggers(interval, None)
    }

    /// Constructs a timer which stops after `max_triggers` firings.
    pub fn capped(interval: u32, max_triggers: u32) -> Self {
        Self::with_max_triggers(interval, Some(max_triggers))
    }

    fn with_max_triggers(interval: u32, max_triggers: Option<u32>) -> Self {
        debug_assert!(interval > 0, "zero-interval timer would trigger forever");
        Self {
            interval: interval.max(1),
            max_triggers,
            time_left: 0,
            triggers: 0,
            primed: false,
        }
    }

    /// Forces the next `update` call to fire immediately, even with a zero
    /// elapsed delta.
    ///
    /// Used to start actions "primed", e.g. the first gather stroke or the
    /// first attack after closing into range.
    pub fn skip_to_trigger(&mut self) {
        if !self.finished() {
            self.primed = true;
        }
    }

    /// Consumes `elapsed` ticks. Returns true iff at least one trigger fired.
    pub fn update(&mut self, elapsed: u32) -> bool {
        if self.finished() {
            return false;
        }
        if self.primed {
            self.primed = false;
            self.time_left += self.interval;
        }
        self.time_left += elapsed;
        let mut fired = false;
        while self.time_left >= self.interval {
            self.time_left -= self.interval;
            self.triggers += 1;
            fired = true;
            if self.finished() {
                break;
            }
        }
        fired
    }

    /// Ticks already accounted towards the next trigger.
    pub fn get_time_left(&self) -> u32 {
        self.time_left
    }

    /// Fractional progress towards the next trigger, in `[0, 1)`.
    ///
    /// Presentation-only: progress bars and animation pacing.
    pub fn get_progress(&self) -> f32 {
        self.time_left as f32 / self.interval as f32
    }

    /// True if at least one interval has passed.
    pub fn has_triggers(&self) -> bool {
        self.triggers > 0
    }

    /// True once the trigger cap has been reached (never true uncapped).
    pub fn finished(&self) -> bool {
        self.max_triggers.is_some_and(|max| self.triggers >= max)
    }

    pub fn get_triggers(&self) -> u32 {
        self.triggers
    }

    pub fn get_interval(&self) -> u32 {
        self.interval
    }

    /// Changes the interval; accumulated time carries over.
    pub fn set_interval(&mut self, interval: u32) {
        self.interval = interval.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn triggers_at_cumulative_interval() {
        // interval=10, three updates of 4: 8 < 10 after two, 12 >= 10 on the
        // third, leaving 2 ticks towards the next trigger.
        let mut timer = IntervalTimer::new(10);
        assert!(!timer.update(4));
        assert!(!timer.update(4));
        assert!(timer.update(4));
        assert_eq!(timer.get_triggers(), 1);
        assert_eq!(timer.get_time_left(), 2);
    }

    #[test]
    fn large_elapsed_fires_multiple_triggers() {
        let mut timer = IntervalTimer::new(10);
        assert!(timer.update(35));
        assert_eq!(timer.get_triggers(), 3);
        assert_eq!(timer.get_time_left(), 5);
    }

    #[test]
    fn capped_timer_stops_at_max() {
        let mut timer = IntervalTimer::capped(5, 2);
        timer.update(100);
        assert_eq!(timer.get_triggers(), 2);
        assert!(timer.finished());
        // Further updates leave the count unchanged.
        assert!(!timer.update(100));
        assert_eq!(timer.get_triggers(), 2);
    }

    #[test]
    fn skip_to_trigger_primes_next_update() {
        let mut timer = IntervalTimer::new(50);
        timer.skip_to_trigger();
        assert!(timer.update(0));
        assert_eq!(timer.get_triggers(), 1);
    }

    #[test]
    fn priming_keeps_progress_in_bounds() {
        let mut timer = IntervalTimer::new(10);
        timer.skip_to_trigger();
        // Priming is consumed by the next update, not reflected beforehand.
        assert_eq!(timer.get_progress(), 0.0);
        assert!(timer.get_time_left() < timer.get_interval());
        assert!(timer.update(0));
        assert_eq!(timer.get_time_left(), 0);
    }

    #[test]
    fn zero_elapsed_is_a_no_op() {
        let mut timer = IntervalTimer::new(10);
        assert!(!timer.update(0));
        assert_eq!(timer.get_time_left(), 0);
        assert_eq!(timer.get_triggers(), 0);
    }

    #[test]
    fn progress_stays_below_one() {
        let mut timer = IntervalTimer::new(10);
        timer.update(9);
        assert!((timer.get_progress() - 0.9).abs() < f32::EPSILON);
        timer.update(1);
        assert_eq!(timer.get_progress(), 0.0);
    }

    proptest! {
        #[test]
        fn trigger_count_is_monotonic(steps in proptest::collection::vec(0u32..50, 0..64)) {
            let mut timer = IntervalTimer::new(7);
            let mut last = 0;
            for step in steps {
                timer.update(step);
                prop_assert!(timer.get_triggers() >= last);
                prop_assert!(timer.get_time_left() < timer.get_interval());
                last = timer.get_triggers();
            }
        }

        #[test]
        fn finished_timer_is_frozen(interval in 1u32..20, cap in 1u32..5, extra in 0u32..100) {
            let mut timer = IntervalTimer::capped(interval, cap);
            timer.update(interval * cap);
            prop_assert!(timer.finished());
            let count = timer.get_triggers();
            timer.update(extra);
            prop_assert_eq!(timer.get_triggers(), count);
        }
    }
}
