//! Site configuration.
//!
//! Every field has a default matching the stock page markup, so an empty JSON
//! object (or no config at all) yields a working setup. Unknown fields are
//! ignored to keep older pages loading after a field is retired.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: SelectorConfig,
    pub navigation: NavigationConfig,
    pub stats: StatsConfig,
    pub donation: DonationConfig,
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SiteConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.stats.threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::Threshold(t));
        }
        if self.stats.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration("stats.duration_ms"));
        }
        if self.donation.payment_delay_ms == 0 {
            return Err(ConfigError::ZeroDuration("donation.payment_delay_ms"));
        }
        self.selectors.validate()
    }
}

/// CSS selectors for every element role the controllers bind to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub menu_toggle: String,
    pub nav_panel: String,
    pub fragment_links: String,
    pub stats_section: String,
    pub counters: String,
    pub donation_modal: String,
    pub donate_triggers: String,
    pub modal_close: String,
    pub amount_buttons: String,
    pub process_payment: String,
    pub step_form: String,
    pub step_success: String,
    pub success_close: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            menu_toggle: "#menu-toggle".to_string(),
            nav_panel: "#nav-menu".to_string(),
            fragment_links: "a[href^=\"#\"]".to_string(),
            stats_section: "#stats".to_string(),
            counters: ".stat-number".to_string(),
            donation_modal: "#donation-modal".to_string(),
            donate_triggers: ".donate-btn".to_string(),
            modal_close: "#modal-close".to_string(),
            amount_buttons: ".amount-btn".to_string(),
            process_payment: "#process-payment".to_string(),
            step_form: "#step-1".to_string(),
            step_success: "#step-2".to_string(),
            success_close: "#success-close".to_string(),
        }
    }
}

impl SelectorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let all: [(&'static str, &str); 13] = [
            ("menu_toggle", self.menu_toggle.as_str()),
            ("nav_panel", self.nav_panel.as_str()),
            ("fragment_links", self.fragment_links.as_str()),
            ("stats_section", self.stats_section.as_str()),
            ("counters", self.counters.as_str()),
            ("donation_modal", self.donation_modal.as_str()),
            ("donate_triggers", self.donate_triggers.as_str()),
            ("modal_close", self.modal_close.as_str()),
            ("amount_buttons", self.amount_buttons.as_str()),
            ("process_payment", self.process_payment.as_str()),
            ("step_form", self.step_form.as_str()),
            ("step_success", self.step_success.as_str()),
            ("success_close", self.success_close.as_str()),
        ];
        match all.iter().find(|(_, sel)| sel.trim().is_empty()) {
            Some((name, _)) => Err(ConfigError::EmptySelector(*name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Class on the panel while the mobile menu is open.
    pub open_class: String,
    /// Glyph shown on the toggle while the menu is closed.
    pub open_glyph: String,
    /// Glyph shown on the toggle while the menu is open.
    pub close_glyph: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            open_class: "active".to_string(),
            open_glyph: "☰".to_string(),
            close_glyph: "✕".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Fraction of the section that must be visible before counting starts.
    pub threshold: f64,
    pub duration_ms: u32,
    pub grouping_separator: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            duration_ms: 2000,
            grouping_separator: ",".to_string(),
        }
    }
}

impl StatsConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationConfig {
    pub payment_delay_ms: u32,
    /// Markup shown on the confirm button while the payment is "processing".
    pub processing_label: String,
    pub dimmed_opacity: String,
    pub selected_class: String,
    /// `display` value for the visible overlay.
    pub modal_display: String,
    /// `display` value for the visible step container.
    pub step_display: String,
    /// Cancel the previous session's pending payment when the modal reopens.
    /// `false` keeps the legacy behaviour where a stale payment can still
    /// flip a freshly opened modal to the success step.
    pub cancel_stale_payment: bool,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            payment_delay_ms: 2000,
            processing_label: "Processing...".to_string(),
            dimmed_opacity: "0.7".to_string(),
            selected_class: "selected".to_string(),
            modal_display: "flex".to_string(),
            step_display: "block".to_string(),
            cancel_stale_payment: true,
        }
    }
}

impl DonationConfig {
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = SiteConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SiteConfig::default());
        assert_eq!(cfg.stats.duration(), Duration::from_millis(2000));
        assert_eq!(cfg.donation.payment_delay(), Duration::from_millis(2000));
        assert!(cfg.donation.cancel_stale_payment);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = SiteConfig::from_json(
            r##"{"stats": {"grouping_separator": "."}, "selectors": {"nav_panel": "#menu"}}"##,
        )
        .unwrap();
        assert_eq!(cfg.stats.grouping_separator, ".");
        assert_eq!(cfg.stats.threshold, 0.5);
        assert_eq!(cfg.selectors.nav_panel, "#menu");
        assert_eq!(cfg.selectors.menu_toggle, "#menu-toggle");
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = SiteConfig::from_json(r#"{"stats": {"threshold": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Threshold(t) if t == 1.5));

        let err = SiteConfig::from_json(r#"{"stats": {"threshold": 0.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Threshold(_)));
    }

    #[test]
    fn rejects_zero_durations_and_empty_selectors() {
        let err = SiteConfig::from_json(r#"{"donation": {"payment_delay_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration("donation.payment_delay_ms")));

        let err = SiteConfig::from_json(r#"{"selectors": {"counters": "  "}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySelector("counters")));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn pretty_json_parses_back() {
        let cfg = SiteConfig::default();
        let json = cfg.to_json_pretty().unwrap();
        assert!(json.contains("\"cancel_stale_payment\": true"));
        let again = SiteConfig::from_json(&json).unwrap();
        assert_eq!(cfg, again);
    }
}
