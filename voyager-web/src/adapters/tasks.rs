use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use voyager_core::runtime::LocalBoxFuture;
use voyager_core::{TaskSpawner, TimerId, TimerScheduler};

/// Spawns onto the browser microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

impl TaskSpawner for WasmSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// `setTimeout`-backed timers. Cancelling or dropping clears the browser timer.
#[derive(Default)]
pub struct BrowserTimers {
    active: RefCell<HashMap<TimerId, Timeout>>,
}

impl BrowserTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerScheduler for BrowserTimers {
    fn schedule(&self, timer: TimerId, delay: Duration, fire: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let handle = Timeout::new(millis, fire);
        if let Some(previous) = self.active.borrow_mut().insert(timer, handle) {
            previous.cancel();
        }
    }

    fn cancel(&self, timer: TimerId) {
        if let Some(handle) = self.active.borrow_mut().remove(&timer) {
            handle.cancel();
        }
    }
}
