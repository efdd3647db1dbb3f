//! DOM binding for the foundation site controllers in [`giving`].
//!
//! [`start`] finds the page's elements, mounts the controllers and attaches
//! click listeners and the stats visibility observer. It exists only with
//! `--features web` on `wasm32`; other builds carry just the pure helpers
//! below so the workspace still builds and tests on the host.

/// `document.readyState` while the parser is still running.
pub const READY_STATE_LOADING: &str = "loading";

/// Whether binding has to wait for `DOMContentLoaded` given the document's
/// current `readyState`. `"interactive"` and `"complete"` documents are
/// already parsed.
pub fn waits_for_dom_content(ready_state: &str) -> bool {
    ready_state == READY_STATE_LOADING
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
