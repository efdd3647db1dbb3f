use std::rc::Rc;

use giving::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod config;
mod dom;
mod listeners;
mod scheduler;

use dom::{DomElement, DomPage};
use listeners::on_click;
use scheduler::BrowserScheduler;

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Bind the controllers to the current document, waiting for
/// `DOMContentLoaded` if the document is still parsing.
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if crate::waits_for_dom_content(&document.ready_state()) {
        let doc = document.clone();
        let cb = Closure::once_into_js(move || init(window, doc));
        if document
            .add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())
            .is_err()
        {
            warn("failed to wait for DOMContentLoaded");
        }
    } else {
        init(window, document);
    }
}

fn init(window: web_sys::Window, document: web_sys::Document) {
    let cfg = config::load_site_config(&document);
    let page = DomPage::new(document);
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window));
    let clock: Rc<dyn Clock> = Rc::new(SystemClock::new());

    let site = Site::mount(&page, &cfg, scheduler, clock);
    bind_navigation(&site);
    bind_smooth_scroll(&site, &page);
    bind_stats(&site);
    bind_donation(&site);

    log(&format!("Foundation site initialized ({})", site.summary()));
}

fn bind_navigation(site: &Site<DomElement>) {
    let Some(nav) = site.navigation.clone() else {
        return;
    };
    let toggle = nav.toggle_element().raw().clone();
    on_click(&toggle, move |_| {
        nav.toggle();
    });
}

fn bind_smooth_scroll(site: &Site<DomElement>, page: &DomPage) {
    for (i, link) in site.smooth_scroll.links().iter().enumerate() {
        let scroll = Rc::clone(&site.smooth_scroll);
        let page = page.clone();
        on_click(link.raw(), move |ev| {
            ev.prevent_default();
            scroll.handle_link_click(i, |id| page.by_id(id));
        });
    }
}

fn bind_stats(site: &Site<DomElement>) {
    let Some(stats) = site.stats.clone() else {
        return;
    };

    let watched = Rc::clone(&stats);
    let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                    continue;
                };
                report_visibility(&watched, entry.is_intersecting(), || {
                    observer.unobserve(&entry.target())
                });
            }
        },
    );

    let opts = web_sys::IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(stats.threshold()));
    match web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &opts)
    {
        Ok(observer) => {
            observer.observe(stats.section().raw());
            callback.forget();
        }
        Err(_) => warn("IntersectionObserver unavailable; stats stay static"),
    }
}

/// Forward one observer entry; `unobserve` runs once counting has started.
fn report_visibility<E, F>(stats: &Rc<StatsAnimation<E>>, is_intersecting: bool, unobserve: F)
where
    E: UiElement + Clone + 'static,
    F: FnOnce(),
{
    if stats.on_visibility(is_intersecting).should_unobserve() {
        unobserve();
    }
}

fn bind_donation(site: &Site<DomElement>) {
    let Some(modal) = site.donation.clone() else {
        return;
    };
    let els = modal.elements();

    for trigger in &els.triggers {
        let modal = Rc::clone(&modal);
        on_click(trigger.raw(), move |ev| {
            ev.prevent_default();
            modal.open();
        });
    }

    for close in [&els.close, &els.success_close].into_iter().flatten() {
        let modal = Rc::clone(&modal);
        on_click(close.raw(), move |_| modal.close());
    }

    {
        let handler = Rc::clone(&modal);
        let root: JsValue = els.modal.raw().clone().into();
        on_click(els.modal.raw(), move |ev| {
            let target = match ev.target() {
                Some(t) if JsValue::from(t) == root => ClickTarget::Backdrop,
                _ => ClickTarget::Content,
            };
            handler.handle_overlay_click(target);
        });
    }

    for (i, amount) in els.amounts.iter().enumerate() {
        let modal = Rc::clone(&modal);
        on_click(amount.raw(), move |_| modal.select_amount(i));
    }

    if let Some(process) = &els.process {
        let modal = Rc::clone(&modal);
        on_click(process.raw(), move |_| {
            modal.process_payment();
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use wasm_bindgen_test::*;

    use super::*;

    #[wasm_bindgen_test]
    fn stops_observing_once_counting_starts() {
        let sched = ManualScheduler::new();
        let counter = HeadlessElement::new("stat-0").with_text("1,250+");
        let stats = StatsAnimation::new(
            HeadlessElement::new("stats"),
            vec![counter.clone()],
            StatsConfig::default(),
            Rc::new(sched.clone()),
            Rc::new(sched.clone()),
        );
        let unobserved = Cell::new(0);

        report_visibility(&stats, false, || unobserved.set(unobserved.get() + 1));
        assert_eq!(unobserved.get(), 0);

        report_visibility(&stats, true, || unobserved.set(unobserved.get() + 1));
        assert_eq!(unobserved.get(), 1);
        assert_eq!(stats.state(), AnimationState::Running);

        report_visibility(&stats, true, || unobserved.set(unobserved.get() + 1));
        assert_eq!(unobserved.get(), 1);

        sched.advance(Duration::from_millis(2000));
        assert_eq!(counter.text(), "1,250+");
    }
}
