use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use academy::carousel::Carousel;
use academy::config::CarouselSettings;
use academy::timer::ManualTimers;
use pretty_assertions::assert_eq;

const PERIOD: Duration = Duration::from_millis(5000);

fn hero(len: usize) -> (Carousel, ManualTimers) {
    let timers = ManualTimers::new();
    let carousel = Carousel::new(len, &CarouselSettings::default(), Rc::new(timers.clone()));
    (carousel, timers)
}

#[test]
fn auto_advance_visits_every_slide_in_order() {
    let (carousel, timers) = hero(3);
    let mut seen = vec![carousel.state().index()];
    for _ in 0..7 {
        timers.advance(PERIOD);
        seen.push(carousel.state().index());
    }
    assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0, 1]);
}

#[test]
fn index_after_k_ticks_is_k_mod_n() {
    for len in 2..6 {
        let (carousel, timers) = hero(len);
        let ticks = 13;
        timers.advance(PERIOD * ticks);
        assert_eq!(carousel.state().index(), ticks as usize % len, "len {len}");
    }
}

#[test]
fn partial_period_does_not_advance() {
    let (carousel, timers) = hero(3);
    timers.advance(Duration::from_millis(4999));
    assert_eq!(carousel.state().index(), 0);
    timers.advance(Duration::from_millis(1));
    assert_eq!(carousel.state().index(), 1);
}

#[test]
fn manual_navigation_stops_auto_play_for_good() {
    let (carousel, timers) = hero(4);
    timers.advance(PERIOD);
    carousel.next();
    assert_eq!(carousel.state().index(), 2);
    assert!(!carousel.state().is_auto_playing());
    assert!(!carousel.timer_armed());

    // hover in and out must not bring it back
    carousel.pause();
    carousel.resume();
    timers.advance(PERIOD * 10);
    assert_eq!(carousel.state().index(), 2);
    assert_eq!(timers.pending(), 0);
}

#[test]
fn go_to_lands_exactly_and_ignores_out_of_range() {
    let (carousel, _timers) = hero(3);
    assert!(!carousel.go_to(7));
    assert!(carousel.state().is_auto_playing());

    assert!(carousel.go_to(2));
    assert_eq!(carousel.state().index(), 2);
    assert!(!carousel.state().is_auto_playing());
}

#[test]
fn previous_from_first_wraps_to_last() {
    let (carousel, _timers) = hero(5);
    carousel.previous();
    assert_eq!(carousel.state().index(), 4);
}

#[test]
fn hover_holds_the_slide_and_leaving_resumes() {
    let (carousel, timers) = hero(3);
    carousel.pause();
    assert!(!carousel.timer_armed());
    timers.advance(PERIOD * 3);
    assert_eq!(carousel.state().index(), 0);

    carousel.resume();
    assert!(carousel.state().is_auto_playing());
    timers.advance(PERIOD);
    assert_eq!(carousel.state().index(), 1);
}

#[test]
fn single_slide_schedules_nothing() {
    let (carousel, timers) = hero(1);
    assert!(!carousel.state().shows_controls());
    assert_eq!(timers.pending(), 0);
    timers.advance(PERIOD * 5);
    assert_eq!(carousel.state().index(), 0);
}

#[test]
fn lectures_strip_defaults_to_manual_only() {
    let timers = ManualTimers::new();
    let settings = CarouselSettings {
        autoplay: false,
        ..CarouselSettings::default()
    };
    let carousel = Carousel::new(4, &settings, Rc::new(timers.clone()));
    assert!(carousel.state().shows_controls());
    assert_eq!(timers.pending(), 0);
    carousel.next();
    assert_eq!(carousel.state().index(), 1);
}

#[test]
fn observer_sees_every_change() {
    let (carousel, timers) = hero(3);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    carousel.on_change(move |state| sink.borrow_mut().push(state.index()));

    timers.advance(PERIOD * 2);
    carousel.go_to(0);
    assert_eq!(*log.borrow(), vec![1, 2, 0]);
}

#[test]
fn dispose_cancels_the_timer() {
    let (carousel, timers) = hero(3);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    carousel.on_change(move |state| sink.borrow_mut().push(state.index()));

    carousel.dispose();
    assert_eq!(timers.pending(), 0);
    timers.advance(PERIOD * 4);
    carousel.next();
    assert!(log.borrow().is_empty());
    assert_eq!(carousel.state().index(), 0);
}

#[test]
fn dropping_the_controller_cancels_the_timer() {
    let (carousel, timers) = hero(3);
    assert_eq!(timers.pending(), 1);
    drop(carousel);
    assert_eq!(timers.pending(), 0);
    timers.advance(PERIOD * 2);
}
