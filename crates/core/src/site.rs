//! Page-level composition of the four controllers.

use std::fmt;
use std::rc::Rc;

use crate::config::SiteConfig;
use crate::donation::{DonationElements, DonationModal};
use crate::element::{Page, UiElement};
use crate::navigation::Navigation;
use crate::schedule::Scheduler;
use crate::smooth_scroll::SmoothScroll;
use crate::stats::StatsAnimation;
use crate::time::Clock;

/// Every controller bound to one page. Controllers whose required elements
/// are missing are `None`.
pub struct Site<E: UiElement + Clone + 'static> {
    pub navigation: Option<Rc<Navigation<E>>>,
    pub smooth_scroll: Rc<SmoothScroll<E, Rc<Navigation<E>>>>,
    pub stats: Option<Rc<StatsAnimation<E>>>,
    pub donation: Option<Rc<DonationModal<E>>>,
}

impl<E: UiElement + Clone + 'static> Site<E> {
    /// Look up every element role and build the controllers, in the order
    /// navigation, smooth scroll, stats, donation.
    pub fn mount<P>(
        page: &P,
        cfg: &SiteConfig,
        scheduler: Rc<dyn Scheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self
    where
        P: Page<Element = E>,
    {
        let sel = &cfg.selectors;

        let navigation = match (page.query(&sel.menu_toggle), page.query(&sel.nav_panel)) {
            (Some(toggle), Some(panel)) => Some(Rc::new(Navigation::new(
                toggle,
                panel,
                cfg.navigation.clone(),
            ))),
            _ => None,
        };

        let smooth_scroll = Rc::new(SmoothScroll::new(
            page.query_all(&sel.fragment_links),
            navigation.clone(),
        ));

        let stats = page.query(&sel.stats_section).map(|section| {
            StatsAnimation::new(
                section,
                page.query_all(&sel.counters),
                cfg.stats.clone(),
                scheduler.clone(),
                clock,
            )
        });

        let donation = page.query(&sel.donation_modal).map(|modal| {
            let els = DonationElements {
                modal,
                triggers: page.query_all(&sel.donate_triggers),
                close: page.query(&sel.modal_close),
                amounts: page.query_all(&sel.amount_buttons),
                process: page.query(&sel.process_payment),
                step_form: page.query(&sel.step_form),
                step_success: page.query(&sel.step_success),
                success_close: page.query(&sel.success_close),
            };
            DonationModal::new(els, cfg.donation.clone(), scheduler.clone())
        });

        let site = Self {
            navigation,
            smooth_scroll,
            stats,
            donation,
        };
        tracing::info!("site initialized: {}", site.summary());
        site
    }

    pub fn summary(&self) -> MountSummary {
        MountSummary {
            navigation: self.navigation.is_some(),
            fragment_links: self.smooth_scroll.links().len(),
            stats: self.stats.is_some(),
            donation: self.donation.is_some(),
        }
    }
}

/// Which controllers are live after [`Site::mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountSummary {
    pub navigation: bool,
    pub fragment_links: usize,
    pub stats: bool,
    pub donation: bool,
}

impl fmt::Display for MountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn on(b: bool) -> &'static str {
            if b {
                "on"
            } else {
                "off"
            }
        }
        write!(
            f,
            "navigation={} links={} stats={} donation={}",
            on(self.navigation),
            self.fragment_links,
            on(self.stats),
            on(self.donation)
        )
    }
}
