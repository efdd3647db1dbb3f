use giving::schedule::{Scheduler, Task, TaskHandle, TaskKind};
use giving::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// `setTimeout` / `requestAnimationFrame` on the page's window.
///
/// Callbacks are handed to JS with `Closure::once_into_js`, which frees them
/// after they run. A cancelled callback is never freed; the modal cancels at
/// most one per reopen, so the leak stays bounded by user clicks.
pub(super) struct BrowserScheduler {
    window: web_sys::Window,
}

impl BrowserScheduler {
    pub(super) fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskHandle {
        let cb = Closure::once_into_js(move || task());
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
            .unwrap_or_else(|_| {
                super::warn("setTimeout failed");
                0
            });
        TaskHandle::new(TaskKind::Timeout, id as u64)
    }

    fn request_frame(&self, task: Task) -> TaskHandle {
        let cb = Closure::once_into_js(move || task());
        let id = self
            .window
            .request_animation_frame(cb.unchecked_ref())
            .unwrap_or_else(|_| {
                super::warn("requestAnimationFrame failed");
                0
            });
        TaskHandle::new(TaskKind::Frame, id as u64)
    }

    fn cancel(&self, handle: TaskHandle) {
        // Browsers never hand out id 0, so it marks a task that was never scheduled.
        if handle.id() == 0 {
            return;
        }
        let id = handle.id() as i32;
        match handle.kind() {
            TaskKind::Timeout => self.window.clear_timeout_with_handle(id),
            TaskKind::Frame => {
                let _ = self.window.cancel_animation_frame(id);
            }
        }
    }
}
