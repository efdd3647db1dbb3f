use std::rc::Rc;

use crate::element::UiElement;
use crate::navigation::Navigation;

/// How a link's `href` should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentAction<'a> {
    /// Not an in-page link; left to the browser.
    NotInPage,
    /// The bare `#` anchor.
    Ignore,
    ScrollTo(&'a str),
}

pub fn fragment_action(href: &str) -> FragmentAction<'_> {
    match href.strip_prefix('#') {
        None => FragmentAction::NotInPage,
        Some("") => FragmentAction::Ignore,
        Some(id) => FragmentAction::ScrollTo(id),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollOutcome {
    Ignored,
    Scrolled(String),
    TargetMissing(String),
}

/// Anything that can force the mobile menu closed.
pub trait MenuCloser {
    fn close_menu(&self) -> bool;
}

impl<E: UiElement> MenuCloser for Navigation<E> {
    fn close_menu(&self) -> bool {
        Navigation::close_menu(self)
    }
}

impl<T: MenuCloser + ?Sized> MenuCloser for Rc<T> {
    fn close_menu(&self) -> bool {
        (**self).close_menu()
    }
}

/// In-page link controller.
///
/// The binding suppresses the browser's jump for every link it manages; this
/// type decides whether to scroll and then closes the mobile menu.
pub struct SmoothScroll<E: UiElement, M: MenuCloser> {
    links: Vec<E>,
    menu: Option<M>,
}

impl<E: UiElement, M: MenuCloser> SmoothScroll<E, M> {
    pub fn new(links: Vec<E>, menu: Option<M>) -> Self {
        Self { links, menu }
    }

    pub fn links(&self) -> &[E] {
        &self.links
    }

    /// Handle a click on the link at `index`, reading its `href`.
    pub fn handle_link_click<T, F>(&self, index: usize, lookup: F) -> ScrollOutcome
    where
        T: UiElement,
        F: FnOnce(&str) -> Option<T>,
    {
        let href = self
            .links
            .get(index)
            .and_then(|l| l.attribute("href"))
            .unwrap_or_default();
        self.handle_click(&href, lookup)
    }

    /// Scroll to the element named by `href`, then close the menu.
    pub fn handle_click<T, F>(&self, href: &str, lookup: F) -> ScrollOutcome
    where
        T: UiElement,
        F: FnOnce(&str) -> Option<T>,
    {
        let id = match fragment_action(href) {
            FragmentAction::ScrollTo(id) => id,
            FragmentAction::Ignore | FragmentAction::NotInPage => return ScrollOutcome::Ignored,
        };

        let Some(target) = lookup(id) else {
            tracing::debug!("scroll target #{} not found", id);
            return ScrollOutcome::TargetMissing(id.to_string());
        };

        target.scroll_into_view();
        if let Some(menu) = &self.menu {
            menu.close_menu();
        }
        ScrollOutcome::Scrolled(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavigationConfig;
    use crate::element::Page;
    use crate::headless::{Effect, HeadlessElement, HeadlessPage};

    type Scroll = SmoothScroll<HeadlessElement, Rc<Navigation<HeadlessElement>>>;

    fn setup() -> (HeadlessPage, Rc<Navigation<HeadlessElement>>, Scroll) {
        let mut page = HeadlessPage::new();
        let toggle = page.element("menu-toggle");
        let panel = page.element("nav-menu");
        let team = page.element("team");
        page.insert_with_id("section", team);

        let link = page.element("team-link").with_attribute("href", "#team");
        let top = page.element("top-link").with_attribute("href", "#");
        page.insert("a", link.clone());
        page.insert("a", top.clone());

        let nav = Rc::new(Navigation::new(toggle, panel, NavigationConfig::default()));
        let scroll = SmoothScroll::new(vec![link, top], Some(nav.clone()));
        (page, nav, scroll)
    }

    #[test]
    fn classifies_hrefs() {
        assert_eq!(fragment_action("#"), FragmentAction::Ignore);
        assert_eq!(fragment_action("#team"), FragmentAction::ScrollTo("team"));
        assert_eq!(fragment_action("/about"), FragmentAction::NotInPage);
        assert_eq!(fragment_action(""), FragmentAction::NotInPage);
    }

    #[test]
    fn scrolls_then_closes_menu_in_order() {
        let (page, nav, scroll) = setup();
        nav.toggle();
        page.journal().clear();

        let out = scroll.handle_link_click(0, |id| page.by_id(id));
        assert_eq!(out, ScrollOutcome::Scrolled("team".to_string()));
        assert!(!nav.state().is_open());

        let entries = page.journal().entries();
        assert_eq!(
            entries.first(),
            Some(&Effect::ScrollIntoView {
                id: "team".to_string()
            })
        );
        assert!(entries
            .iter()
            .skip(1)
            .any(|e| matches!(e, Effect::RemoveClass { id, .. } if id == "nav-menu")));
    }

    #[test]
    fn bare_hash_does_nothing() {
        let (page, nav, scroll) = setup();
        nav.toggle();
        page.journal().clear();

        assert_eq!(
            scroll.handle_link_click(1, |id| page.by_id(id)),
            ScrollOutcome::Ignored
        );
        assert!(page.journal().is_empty());
        assert!(nav.state().is_open());
    }

    #[test]
    fn missing_target_is_silent() {
        let (page, nav, scroll) = setup();
        nav.toggle();
        page.journal().clear();

        let out = scroll.handle_click("#nowhere", |id| page.by_id(id));
        assert_eq!(out, ScrollOutcome::TargetMissing("nowhere".to_string()));
        assert!(page.journal().is_empty());
        assert!(nav.state().is_open());
    }

    #[test]
    fn works_without_a_navigation() {
        let mut page = HeadlessPage::new();
        let team = page.element("team");
        page.insert_with_id("section", team.clone());
        let scroll: Scroll = SmoothScroll::new(Vec::new(), None);

        let out = scroll.handle_click("#team", |id| page.by_id(id));
        assert_eq!(out, ScrollOutcome::Scrolled("team".to_string()));
        assert_eq!(team.scroll_count(), 1);
    }
}
