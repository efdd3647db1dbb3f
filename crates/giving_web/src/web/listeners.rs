use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Attach a click handler for the lifetime of the page.
pub(super) fn on_click<F>(target: &web_sys::EventTarget, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if target
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .is_err()
    {
        super::warn("failed to attach click listener");
    }
    closure.forget();
}
