//! Browser implementation of the core timer service.

use std::cell::RefCell;
use std::time::Duration;

use academy::timer::{TimerHandle, Timers};
use leptos::prelude::{set_interval_with_handle, set_timeout_with_handle};
use tracing::warn;
use wasm_bindgen::JsValue;

/// Intervals and timeouts on the window's event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

fn scheduled<H: 'static>(
    kind: &str,
    result: Result<H, JsValue>,
    clear: impl FnOnce(H) + 'static,
) -> TimerHandle {
    match result {
        Ok(handle) => TimerHandle::new(move || clear(handle)),
        Err(err) => {
            warn!(kind, ?err, "could not schedule timer");
            TimerHandle::inert()
        }
    }
}

impl Timers for BrowserTimers {
    fn interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle {
        let tick = RefCell::new(tick);
        let result = set_interval_with_handle(move || (tick.borrow_mut())(), period);
        scheduled("interval", result, |handle| handle.clear())
    }

    fn timeout(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> TimerHandle {
        let result = set_timeout_with_handle(fire, delay);
        scheduled("timeout", result, |handle| handle.clear())
    }
}
