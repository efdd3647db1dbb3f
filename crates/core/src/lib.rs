//! # giving
//!
//! Interaction layer for the foundation website: the mobile menu, smooth
//! in-page scrolling, the scroll-triggered stats counters and the donation
//! modal with its simulated payment.
//!
//! Every controller is a plain value that takes its elements as parameters.
//! State transitions are pure; rendering goes through [`element::UiElement`],
//! and deferred work through [`schedule::Scheduler`]. That keeps the whole
//! crate testable on the host with [`headless`] elements and a
//! [`schedule::ManualScheduler`]; the `giving_web` crate binds the same
//! controllers to the browser DOM.
//!
//! ## Quick Start
//!
//! ```
//! use giving::prelude::*;
//! use std::rc::Rc;
//!
//! let mut page = HeadlessPage::new();
//! let toggle = page.element("menu-toggle");
//! page.insert("#menu-toggle", toggle);
//! let panel = page.element("nav-menu");
//! page.insert("#nav-menu", panel.clone());
//!
//! let sched = ManualScheduler::new();
//! let site = Site::mount(&page, &SiteConfig::default(), Rc::new(sched.clone()), Rc::new(sched));
//!
//! site.navigation.as_ref().unwrap().toggle();
//! assert!(panel.has_class("active"));
//! ```
//!
//! ## Modules
//!
//! - [`navigation`]: mobile menu toggle
//! - [`smooth_scroll`]: in-page link scrolling
//! - [`stats`]: counters animated on first visibility
//! - [`donation`]: donation modal and simulated payment
//! - [`site`]: composition of the four

pub mod config;
pub mod element;
pub mod error;
pub mod headless;
pub mod schedule;
pub mod site;
pub mod time;

#[path = "core/navigation.rs"]
pub mod navigation;

#[path = "core/smooth_scroll.rs"]
pub mod smooth_scroll;

#[path = "core/stats.rs"]
pub mod stats;

#[path = "core/donation.rs"]
pub mod donation;

/// Prelude module for convenient imports.
///
/// ```
/// use giving::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{
        DonationConfig, NavigationConfig, SelectorConfig, SiteConfig, StatsConfig,
    };
    pub use crate::donation::{
        ClickTarget, DonationElements, DonationModal, DonationState, ModalState, Step,
    };
    pub use crate::element::{Page, UiElement};
    pub use crate::error::ConfigError;
    pub use crate::headless::{Effect, HeadlessElement, HeadlessPage, Journal};
    pub use crate::navigation::{MenuState, Navigation};
    pub use crate::schedule::{ManualScheduler, Scheduler, Task, TaskHandle, TaskKind};
    pub use crate::site::{MountSummary, Site};
    pub use crate::smooth_scroll::{fragment_action, FragmentAction, ScrollOutcome, SmoothScroll};
    pub use crate::stats::{AnimationState, CounterAnimation, StatsAnimation, VisibilityOutcome};
    pub use crate::time::{Clock, Duration, SystemClock};
}
