use giving::config::SiteConfig;

/// Id of the optional `<script type="application/json">` block holding a
/// [`SiteConfig`].
pub(super) const CONFIG_ELEMENT_ID: &str = "giving-config";

/// The page's inline config, or defaults when it is absent or invalid.
pub(super) fn load_site_config(document: &web_sys::Document) -> SiteConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };

    match SiteConfig::from_json(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            super::warn(&format!("{CONFIG_ELEMENT_ID}: {e}; using defaults"));
            SiteConfig::default()
        }
    }
}
