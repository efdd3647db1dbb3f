use std::cell::Cell;

use crate::config::NavigationConfig;
use crate::element::UiElement;

/// Whether the mobile menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    pub fn view(self, cfg: &NavigationConfig) -> MenuView<'_> {
        MenuView {
            open: self.open,
            aria_expanded: if self.open { "true" } else { "false" },
            glyph: if self.open {
                &cfg.close_glyph
            } else {
                &cfg.open_glyph
            },
        }
    }
}

/// What the toggle button and panel should show for a given [`MenuState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView<'a> {
    pub open: bool,
    pub aria_expanded: &'static str,
    pub glyph: &'a str,
}

/// Mobile menu controller: a toggle button driving a navigation panel.
pub struct Navigation<E: UiElement> {
    toggle: E,
    panel: E,
    cfg: NavigationConfig,
    state: Cell<MenuState>,
}

impl<E: UiElement> Navigation<E> {
    /// The initial state is read from the panel's open class.
    pub fn new(toggle: E, panel: E, cfg: NavigationConfig) -> Self {
        let state = MenuState::new(panel.has_class(&cfg.open_class));
        Self {
            toggle,
            panel,
            cfg,
            state: Cell::new(state),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state.get()
    }

    pub fn toggle_element(&self) -> &E {
        &self.toggle
    }

    /// Flip the menu. Returns the new state.
    pub fn toggle(&self) -> MenuState {
        let next = self.state.get().toggled();
        self.state.set(next);
        self.render(next);
        tracing::debug!("menu toggled: open={}", next.is_open());
        next
    }

    /// Close the menu if it is open. Returns whether anything changed.
    pub fn close_menu(&self) -> bool {
        let current = self.state.get();
        if !current.is_open() {
            return false;
        }
        let next = current.closed();
        self.state.set(next);
        self.render(next);
        tracing::debug!("menu closed");
        true
    }

    fn render(&self, state: MenuState) {
        let view = state.view(&self.cfg);
        if view.open {
            self.panel.add_class(&self.cfg.open_class);
        } else {
            self.panel.remove_class(&self.cfg.open_class);
        }
        self.toggle.set_attribute("aria-expanded", view.aria_expanded);
        self.toggle.set_text(view.glyph);
    }
}
