use giving::element::{Page, UiElement};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

/// A live DOM element.
///
/// DOM calls that can throw (`classList.add` with an empty token, invalid CSS
/// properties) are ignored: a broken decoration must not stop the handler.
#[derive(Debug, Clone)]
pub(super) struct DomElement(HtmlElement);

impl DomElement {
    pub(super) fn from_element(el: Element) -> Option<Self> {
        el.dyn_into::<HtmlElement>().ok().map(Self)
    }

    pub(super) fn raw(&self) -> &HtmlElement {
        &self.0
    }
}

impl UiElement for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(btn) = self.0.dyn_ref::<HtmlButtonElement>() {
            btn.set_disabled(disabled);
        } else if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    fn scroll_into_view(&self) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Start);
        self.0.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

/// The current document as a [`Page`].
#[derive(Clone)]
pub(super) struct DomPage {
    document: Document,
}

impl DomPage {
    pub(super) fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Page for DomPage {
    type Element = DomElement;

    fn query(&self, selector: &str) -> Option<DomElement> {
        match self.document.query_selector(selector) {
            Ok(found) => found.and_then(DomElement::from_element),
            Err(_) => {
                super::warn(&format!("invalid selector: {selector}"));
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(_) => {
                super::warn(&format!("invalid selector: {selector}"));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .collect()
    }

    fn by_id(&self, id: &str) -> Option<DomElement> {
        self.document
            .get_element_by_id(id)
            .and_then(DomElement::from_element)
    }
}
