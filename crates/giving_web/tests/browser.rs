//! Browser tests for the DOM binding.
//!
//! Run with `wasm-pack test --headless --firefox crates/giving_web -- --features web`.

#![cfg(all(feature = "web", target_arch = "wasm32"))]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit, HtmlButtonElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<nav>
  <button id="menu-toggle">☰</button>
  <ul id="nav-menu"><li><a id="team-link" href="#team">Team</a></li></ul>
</nav>
<section id="team">Team</section>
<a class="donate-btn" id="donate-hero" href="#">Donate</a>
<div id="donation-modal" style="display: none">
  <div id="modal-content">
    <span id="modal-close">x</span>
    <div id="step-1">
      <button class="amount-btn" id="amount-25">$25</button>
      <button class="amount-btn" id="amount-50">$50</button>
      <button id="process-payment">Complete Donation</button>
    </div>
    <div id="step-2" style="display: none">
      <button id="success-close">Close</button>
    </div>
  </div>
</div>
"##;

fn el(id: &str) -> HtmlElement {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .unwrap_or_else(|| panic!("missing #{id}"))
}

fn display(id: &str) -> String {
    el(id).style().get_property_value("display").unwrap_or_default()
}

/// Dispatch a cancelable click; returns whether a listener cancelled it.
fn click_was_cancelled(id: &str) -> bool {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let ev = Event::new_with_event_init_dict("click", &init).expect("click event");
    let not_cancelled = el(id).dispatch_event(&ev).expect("dispatch");
    !not_cancelled
}

// One test: `start` binds listeners on every call, so the page is mounted once.
#[wasm_bindgen_test]
fn binds_navigation_and_donation() {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .expect("document body");
    body.set_inner_html(PAGE);
    giving_web::start();

    let panel = el("nav-menu");
    let toggle = el("menu-toggle");
    toggle.click();
    assert!(panel.class_list().contains("active"));
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));
    assert_eq!(toggle.text_content().as_deref(), Some("✕"));

    assert!(click_was_cancelled("team-link"));
    assert!(!panel.class_list().contains("active"));
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));

    assert!(click_was_cancelled("donate-hero"));
    assert_eq!(display("donation-modal"), "flex");
    assert!(!click_was_cancelled("amount-25"));

    el("success-close").click();
    assert_eq!(display("donation-modal"), "none");

    el("donate-hero").click();
    assert_eq!(display("donation-modal"), "flex");
    assert_eq!(display("step-1"), "block");

    el("amount-25").click();
    el("amount-50").click();
    assert!(!el("amount-25").class_list().contains("selected"));
    assert!(el("amount-50").class_list().contains("selected"));

    el("modal-content").click();
    assert_eq!(display("donation-modal"), "flex");

    el("process-payment").click();
    let process = el("process-payment").unchecked_into::<HtmlButtonElement>();
    assert!(process.disabled());
    assert_eq!(process.inner_html(), "Processing...");

    el("donation-modal").click();
    assert_eq!(display("donation-modal"), "none");
}
