//! Indexed rotation over N items.
//!
//! [`CarouselState`] is the pure state machine; [`Carousel`] couples it with an
//! auto-advance interval from [`Timers`] and notifies an observer after every
//! change. The hero slider and the featured-lectures strip both use it.
//!
//! Rules:
//! - the timer only runs while auto-play is on, the pointer is not hovering
//!   and there are at least two items
//! - any manual navigation turns auto-play off for good
//! - hovering pauses without touching auto-play

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::trace;

use crate::config::CarouselSettings;
use crate::timer::{SharedTimers, TimerHandle};

/// Position and play flags of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    len: usize,
    auto_playing: bool,
    paused: bool,
}

impl CarouselState {
    pub fn new(len: usize, autoplay: bool) -> Self {
        Self {
            index: 0,
            len,
            auto_playing: autoplay,
            paused: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Prev/next/dots are only offered with more than one item.
    pub fn shows_controls(&self) -> bool {
        self.len > 1
    }

    /// Whether the auto-advance timer should be running.
    pub fn is_ticking(&self) -> bool {
        self.auto_playing && !self.paused && self.len > 1
    }

    /// Timer step. Returns whether the index moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_ticking() {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        true
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
        self.auto_playing = false;
    }

    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + self.len - 1) % self.len;
        self.auto_playing = false;
    }

    /// Jump to `index`. Out-of-range requests are ignored and return `false`.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        self.auto_playing = false;
        true
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Change the item count, clamping the index into range.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }
}

type Observer = Rc<dyn Fn(CarouselState)>;

struct Inner {
    state: Cell<CarouselState>,
    period: Duration,
    timers: SharedTimers,
    timer: RefCell<Option<TimerHandle>>,
    observer: RefCell<Option<Observer>>,
    disposed: Cell<bool>,
}

impl Inner {
    fn notify(&self) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(self.state.get());
        }
    }

    /// Start or stop the interval so it runs exactly while the state is ticking.
    fn sync_timer(self: &Rc<Self>) {
        let wanted = !self.disposed.get() && self.state.get().is_ticking();
        let running = self.timer.borrow().is_some();
        if wanted && !running {
            let weak: Weak<Inner> = Rc::downgrade(self);
            let handle = self.timers.interval(
                self.period,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.on_tick();
                    }
                }),
            );
            *self.timer.borrow_mut() = Some(handle);
        } else if !wanted && running {
            let handle = self.timer.borrow_mut().take();
            drop(handle);
        }
    }

    fn on_tick(self: &Rc<Self>) {
        if self.disposed.get() {
            return;
        }
        let mut state = self.state.get();
        if state.tick() {
            trace!(index = state.index(), "carousel auto-advance");
            self.state.set(state);
            self.notify();
        }
        self.sync_timer();
    }
}

/// A [`CarouselState`] driven by an auto-advance timer.
///
/// Dropping the controller (or calling [`Carousel::dispose`]) cancels the
/// timer; a tick already queued by the platform finds nothing to update.
pub struct Carousel {
    inner: Rc<Inner>,
}

impl Carousel {
    pub fn new(len: usize, settings: &CarouselSettings, timers: SharedTimers) -> Self {
        let inner = Rc::new(Inner {
            state: Cell::new(CarouselState::new(len, settings.autoplay)),
            period: settings.interval(),
            timers,
            timer: RefCell::new(None),
            observer: RefCell::new(None),
            disposed: Cell::new(false),
        });
        inner.sync_timer();
        Self { inner }
    }

    /// Register the observer called after every state change.
    pub fn on_change(&self, observer: impl Fn(CarouselState) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub fn state(&self) -> CarouselState {
        self.inner.state.get()
    }

    /// Whether an auto-advance timer is currently scheduled.
    pub fn timer_armed(&self) -> bool {
        self.inner.timer.borrow().is_some()
    }

    fn apply<R>(&self, change: impl FnOnce(&mut CarouselState) -> R) -> R {
        if self.inner.disposed.get() {
            let mut scratch = self.inner.state.get();
            return change(&mut scratch);
        }
        let before = self.inner.state.get();
        let mut state = before;
        let result = change(&mut state);
        self.inner.state.set(state);
        self.inner.sync_timer();
        if state != before {
            self.inner.notify();
        }
        result
    }

    pub fn next(&self) {
        self.apply(CarouselState::next)
    }

    pub fn previous(&self) {
        self.apply(CarouselState::previous)
    }

    /// Jump to `index`; see [`CarouselState::go_to`].
    pub fn go_to(&self, index: usize) -> bool {
        self.apply(|state| state.go_to(index))
    }

    /// Pointer entered the carousel.
    pub fn pause(&self) {
        self.apply(CarouselState::pause)
    }

    /// Pointer left the carousel.
    pub fn resume(&self) {
        self.apply(CarouselState::resume)
    }

    pub fn set_len(&self, len: usize) {
        self.apply(|state| state.set_len(len))
    }

    /// Cancel the timer and detach the observer. Further calls are no-ops.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        let handle = self.inner.timer.borrow_mut().take();
        drop(handle);
        let observer = self.inner.observer.borrow_mut().take();
        drop(observer);
    }
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("state", &self.state())
            .field("period", &self.inner.period)
            .field("timer_armed", &self.timer_armed())
            .field("disposed", &self.inner.disposed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_wraps_to_the_end() {
        let mut state = CarouselState::new(3, true);
        state.previous();
        assert_eq!(state.index(), 2);
        assert!(!state.is_auto_playing());
    }

    #[test]
    fn single_item_never_ticks_or_shows_controls() {
        let mut state = CarouselState::new(1, true);
        assert!(!state.shows_controls());
        assert!(!state.is_ticking());
        assert!(!state.tick());
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn empty_carousel_ignores_navigation() {
        let mut state = CarouselState::new(0, true);
        state.next();
        state.previous();
        assert!(!state.go_to(0));
        assert_eq!(state.index(), 0);
        assert!(state.is_empty());
    }

    #[test]
    fn out_of_range_go_to_keeps_auto_play() {
        let mut state = CarouselState::new(3, true);
        assert!(!state.go_to(3));
        assert!(state.is_auto_playing());
    }

    #[test]
    fn hover_pauses_without_touching_auto_play() {
        let mut state = CarouselState::new(3, true);
        state.pause();
        assert!(!state.is_ticking());
        assert!(state.is_auto_playing());
        state.resume();
        assert!(state.is_ticking());
    }

    #[test]
    fn shrinking_clamps_the_index() {
        let mut state = CarouselState::new(5, false);
        state.go_to(4);
        state.set_len(2);
        assert_eq!(state.index(), 1);
        state.set_len(0);
        assert_eq!(state.index(), 0);
    }
}
