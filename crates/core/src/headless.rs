//! In-memory elements and pages.
//!
//! Used by the unit tests and by the `giving` demo binary to drive the
//! controllers without a browser. Every mutation is appended to a shared
//! [`Journal`] so callers can assert on ordering across elements.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::element::{Page, UiElement};

/// One observable mutation applied to a headless element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddClass { id: String, class: String },
    RemoveClass { id: String, class: String },
    SetAttribute { id: String, name: String, value: String },
    SetText { id: String, text: String },
    SetStyle { id: String, property: String, value: String },
    SetDisabled { id: String, disabled: bool },
    ScrollIntoView { id: String },
}

/// Shared, append-only record of effects.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<Effect>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, effect: Effect) {
        self.entries.borrow_mut().push(effect);
    }

    pub fn entries(&self) -> Vec<Effect> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[derive(Debug, Default)]
struct ElementState {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    style: BTreeMap<String, String>,
    disabled: bool,
    scrolls: u32,
}

/// An element that lives only in memory.
///
/// Clones share state, like two handles to one DOM node.
#[derive(Debug, Clone)]
pub struct HeadlessElement {
    id: Rc<str>,
    state: Rc<RefCell<ElementState>>,
    journal: Journal,
}

impl HeadlessElement {
    pub fn new(id: &str) -> Self {
        Self::with_journal(id, &Journal::new())
    }

    pub fn with_journal(id: &str, journal: &Journal) -> Self {
        Self {
            id: Rc::from(id),
            state: Rc::new(RefCell::new(ElementState::default())),
            journal: journal.clone(),
        }
    }

    pub fn with_text(self, text: &str) -> Self {
        self.state.borrow_mut().text = text.to_string();
        self
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.state.borrow_mut().classes.push(class.to_string());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().style.get(property).cloned()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    pub fn scroll_count(&self) -> u32 {
        self.state.borrow().scrolls
    }

    /// `display` is not `none`. Elements never styled count as shown.
    pub fn is_displayed(&self) -> bool {
        self.style("display").map_or(true, |d| d != "none")
    }

    pub fn same_node(&self, other: &HeadlessElement) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    fn record(&self, effect: Effect) {
        self.journal.push(effect);
    }
}

impl UiElement for HeadlessElement {
    fn add_class(&self, class: &str) {
        {
            let mut s = self.state.borrow_mut();
            if !s.classes.iter().any(|c| c == class) {
                s.classes.push(class.to_string());
            }
        }
        self.record(Effect::AddClass {
            id: self.id.to_string(),
            class: class.to_string(),
        });
    }

    fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.retain(|c| c != class);
        self.record(Effect::RemoveClass {
            id: self.id.to_string(),
            class: class.to_string(),
        });
    }

    fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self.record(Effect::SetAttribute {
            id: self.id.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
        self.record(Effect::SetText {
            id: self.id.to_string(),
            text: text.to_string(),
        });
    }

    // Headless elements have no child nodes; markup and text are the same string.
    fn inner_html(&self) -> String {
        self.text()
    }

    fn set_inner_html(&self, html: &str) {
        self.set_text(html);
    }

    fn set_style(&self, property: &str, value: &str) {
        self.state
            .borrow_mut()
            .style
            .insert(property.to_string(), value.to_string());
        self.record(Effect::SetStyle {
            id: self.id.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
        self.record(Effect::SetDisabled {
            id: self.id.to_string(),
            disabled,
        });
    }

    fn scroll_into_view(&self) {
        self.state.borrow_mut().scrolls += 1;
        self.record(Effect::ScrollIntoView {
            id: self.id.to_string(),
        });
    }
}

/// A page assembled by hand: selectors map to element lists.
///
/// Selectors are matched literally; `by_id("x")` is `query("#x")`.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPage {
    journal: Journal,
    elements: BTreeMap<String, Vec<HeadlessElement>>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Create an element sharing the page's journal.
    pub fn element(&self, id: &str) -> HeadlessElement {
        HeadlessElement::with_journal(id, &self.journal)
    }

    /// Register `el` under `selector` (appending to any existing matches).
    pub fn insert(&mut self, selector: &str, el: HeadlessElement) -> HeadlessElement {
        self.elements
            .entry(selector.to_string())
            .or_default()
            .push(el.clone());
        el
    }

    /// Register `el` under `#id` and under `selector`.
    pub fn insert_with_id(&mut self, selector: &str, el: HeadlessElement) -> HeadlessElement {
        let by_id = format!("#{}", el.id());
        if by_id != selector {
            self.insert(&by_id, el.clone());
        }
        self.insert(selector, el)
    }
}

impl Page for HeadlessPage {
    type Element = HeadlessElement;

    fn query(&self, selector: &str) -> Option<HeadlessElement> {
        self.elements.get(selector).and_then(|v| v.first().cloned())
    }

    fn query_all(&self, selector: &str) -> Vec<HeadlessElement> {
        self.elements.get(selector).cloned().unwrap_or_default()
    }

    fn by_id(&self, id: &str) -> Option<HeadlessElement> {
        self.query(&format!("#{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state_and_journal() {
        let journal = Journal::new();
        let a = HeadlessElement::with_journal("nav", &journal);
        let b = a.clone();

        a.add_class("active");
        assert!(b.has_class("active"));
        assert!(a.same_node(&b));

        b.remove_class("active");
        assert!(!a.has_class("active"));
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn add_class_does_not_duplicate() {
        let el = HeadlessElement::new("x");
        el.add_class("selected");
        el.add_class("selected");
        el.remove_class("selected");
        assert!(!el.has_class("selected"));
    }

    #[test]
    fn page_lookup_by_id_and_selector() {
        let mut page = HeadlessPage::new();
        let el = page.element("team");
        page.insert_with_id("section", el);

        assert!(page.by_id("team").is_some());
        assert_eq!(page.query_all("section").len(), 1);
        assert!(page.by_id("missing").is_none());
        assert!(page.query_all(".nothing").is_empty());
    }
}
