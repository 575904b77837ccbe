use std::time::{Duration, Instant};

/// Identifies one scheduled repeating timer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wraps a scheduler-specific timer id.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

/// Capability for scheduling the repeating tick timer.
///
/// The owner of a handle is told about due ticks through whatever loop
/// drives the scheduler; the scheduler itself never runs game logic.
pub trait Scheduler {
    /// Starts a repeating timer firing every `interval`.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;

    /// Stops the timer behind `handle`. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    handle: TimerHandle,
    interval: Duration,
    next_due: Instant,
}

/// Wall-clock scheduler polled by the cooperative main loop.
///
/// Holds at most one timer; scheduling a new one replaces the previous.
#[derive(Debug, Default)]
pub struct IntervalTimer {
    next_id: u64,
    active: Option<ActiveTimer>,
}

impl IntervalTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the active timer is due at `now`, then re-arms it.
    ///
    /// Reports at most one tick per call. A loop that fell behind by more
    /// than one interval resumes from `now` instead of firing a burst.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        let Some(timer) = self.active.as_mut() else {
            return false;
        };

        if now < timer.next_due {
            return false;
        }

        timer.next_due += timer.interval;
        if timer.next_due <= now {
            timer.next_due = now + timer.interval;
        }

        true
    }

    /// Time left until the next tick, if a timer is active.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.active
            .map(|timer| timer.next_due.saturating_duration_since(now))
    }

    fn schedule_at(&mut self, interval: Duration, now: Instant) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::from_raw(self.next_id);
        self.active = Some(ActiveTimer {
            handle,
            interval,
            next_due: now + interval,
        });
        handle
    }
}

impl Scheduler for IntervalTimer {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.schedule_at(interval, Instant::now())
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.active.is_some_and(|timer| timer.handle == handle) {
            self.active = None;
        }
    }
}
