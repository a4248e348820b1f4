//! Timer service used by the controllers.
//!
//! Controllers never call the platform's timer API directly. They receive a
//! [`Timers`] implementation and keep the returned [`TimerHandle`] for as long
//! as the timer should live; dropping the handle cancels the timer. The browser
//! build wraps Leptos' interval/timeout helpers, tests drive [`ManualTimers`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Source of intervals and timeouts.
pub trait Timers {
    /// Call `tick` every `period` until the handle is dropped.
    fn interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle;

    /// Call `fire` once after `delay` unless the handle is dropped first.
    fn timeout(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Timers shared between the controllers of one view.
pub type SharedTimers = Rc<dyn Timers>;

/// Owns a scheduled timer. Dropping it cancels the timer.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    /// Wrap the platform's cancel operation.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle for a timer that was never scheduled.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Cancel now instead of at drop.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

enum Job {
    Interval {
        period: Duration,
        tick: Box<dyn FnMut()>,
    },
    Timeout(Box<dyn FnOnce()>),
}

struct Entry {
    due: Duration,
    job: Job,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
    // interval whose tick is running, and whether its handle was dropped meanwhile
    running: Option<u64>,
    running_cancelled: bool,
}

/// Deterministic [`Timers`]: time only moves when [`ManualTimers::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualTimers {
    clock: Rc<RefCell<Clock>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of timers still scheduled.
    pub fn pending(&self) -> usize {
        self.clock.borrow().entries.len()
    }

    fn schedule(&self, delay: Duration, job: Job) -> TimerHandle {
        let id = {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + delay;
            clock.entries.insert(id, Entry { due, job });
            id
        };
        let weak: Weak<RefCell<Clock>> = Rc::downgrade(&self.clock);
        TimerHandle::new(move || {
            if let Some(clock) = weak.upgrade() {
                let removed = {
                    let mut clock = clock.borrow_mut();
                    let removed = clock.entries.remove(&id);
                    if removed.is_none() && clock.running == Some(id) {
                        clock.running_cancelled = true;
                    }
                    removed
                };
                // callbacks may own handles of their own; drop outside the borrow
                drop(removed);
            }
        })
    }

    /// Move time forward by `by`, running every callback that falls due in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next = {
                let clock = self.clock.borrow();
                clock
                    .entries
                    .iter()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(id, entry)| (entry.due, **id))
                    .map(|(id, _)| *id)
            };
            let Some(id) = next else { break };
            let Some(entry) = ({
                let mut clock = self.clock.borrow_mut();
                let entry = clock.entries.remove(&id);
                if let Some(entry) = &entry {
                    clock.now = entry.due;
                }
                entry
            }) else {
                continue;
            };

            match entry.job {
                Job::Timeout(fire) => fire(),
                Job::Interval { period, mut tick } => {
                    {
                        let mut clock = self.clock.borrow_mut();
                        clock.running = Some(id);
                        clock.running_cancelled = false;
                    }
                    tick();
                    let cancelled = {
                        let mut clock = self.clock.borrow_mut();
                        clock.running = None;
                        std::mem::take(&mut clock.running_cancelled)
                    };
                    if cancelled {
                        drop(tick);
                    } else {
                        let due = entry.due + period;
                        self.clock.borrow_mut().entries.insert(
                            id,
                            Entry {
                                due,
                                job: Job::Interval { period, tick },
                            },
                        );
                    }
                }
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

impl Timers for ManualTimers {
    fn interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle {
        // a zero period would make `advance` spin forever
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Job::Interval { period, tick })
    }

    fn timeout(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> TimerHandle {
        self.schedule(delay, Job::Timeout(fire))
    }
}

impl fmt::Debug for ManualTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTimers")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn interval_fires_once_per_period() {
        let timers = ManualTimers::new();
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let _handle = timers.interval(Duration::from_secs(5), Box::new(move || seen.set(seen.get() + 1)));

        timers.advance(Duration::from_millis(4999));
        assert_eq!(count.get(), 0);
        timers.advance(Duration::from_millis(1));
        assert_eq!(count.get(), 1);
        timers.advance(Duration::from_secs(15));
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn dropping_the_handle_cancels() {
        let timers = ManualTimers::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let handle = timers.timeout(Duration::from_secs(3), Box::new(move || flag.set(true)));
        assert_eq!(timers.pending(), 1);
        drop(handle);
        assert_eq!(timers.pending(), 0);
        timers.advance(Duration::from_secs(10));
        assert!(!fired.get());
    }

    #[test]
    fn interval_cancelled_from_its_own_tick_stops() {
        let timers = ManualTimers::new();
        let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));
        let (inner_slot, inner_count) = (slot.clone(), count.clone());
        let handle = timers.interval(
            Duration::from_secs(1),
            Box::new(move || {
                inner_count.set(inner_count.get() + 1);
                inner_slot.borrow_mut().take();
            }),
        );
        *slot.borrow_mut() = Some(handle);

        timers.advance(Duration::from_secs(5));
        assert_eq!(count.get(), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn dropping_a_fired_timeout_leaves_no_trace() {
        let timers = ManualTimers::new();
        let handle = timers.timeout(Duration::from_secs(1), Box::new(|| {}));
        timers.advance(Duration::from_secs(1));
        drop(handle);

        let clock = timers.clock.borrow();
        assert!(clock.entries.is_empty());
        assert_eq!(clock.running, None);
        assert!(!clock.running_cancelled);
    }

    #[test]
    fn interval_survives_a_fired_timeout_dropped_in_its_tick() {
        let timers = ManualTimers::new();
        let fired: Rc<RefCell<Option<TimerHandle>>> =
            Rc::new(RefCell::new(Some(timers.timeout(Duration::from_millis(500), Box::new(|| {})))));
        let count = Rc::new(Cell::new(0));
        let (slot, seen) = (fired.clone(), count.clone());
        let _interval = timers.interval(
            Duration::from_secs(1),
            Box::new(move || {
                seen.set(seen.get() + 1);
                slot.borrow_mut().take();
            }),
        );

        timers.advance(Duration::from_secs(3));
        assert_eq!(count.get(), 3);
        assert_eq!(timers.pending(), 1);
        assert!(!timers.clock.borrow().running_cancelled);
    }

    #[test]
    fn handles_outliving_the_clock_are_harmless() {
        let timers = ManualTimers::new();
        let handle = timers.timeout(Duration::from_secs(1), Box::new(|| {}));
        drop(timers);
        handle.cancel();
    }
}
