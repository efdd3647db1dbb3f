//! The presentation boundary.
//!
//! Controllers compute state and then push it through [`UiElement`]. The browser
//! binding implements it for live DOM nodes; [`crate::headless`] implements it
//! in memory.

/// The slice of an element's surface the controllers mutate.
///
/// Methods take `&self`: element handles are shared references into a
/// document that owns the real state.
pub trait UiElement {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    /// Markup of the element's children. Button labels may carry icons, so
    /// they are captured and restored as markup rather than text.
    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);

    fn set_style(&self, property: &str, value: &str);
    fn set_disabled(&self, disabled: bool);

    /// Smoothly scroll the element to the top of the viewport.
    fn scroll_into_view(&self);
}

/// Element lookup over a document.
pub trait Page {
    type Element: UiElement + Clone + 'static;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// Every element matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn by_id(&self, id: &str) -> Option<Self::Element>;
}

/// Show or hide an element through its inline `display` property.
pub fn set_display<E: UiElement>(el: &E, shown: bool, shown_value: &str) {
    el.set_style("display", if shown { shown_value } else { "none" });
}
