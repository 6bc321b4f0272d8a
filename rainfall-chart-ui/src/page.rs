//! Settings embedded in the host page.

use rainfall_core::config::UpdaterConfig;

/// Id of an optional `<script type="application/json">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "rainfall-config";

/// Read [`UpdaterConfig`] overrides from the page, or the defaults.
///
/// A malformed block is logged and ignored.
pub fn page_config() -> UpdaterConfig {
    let text = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    match text {
        Some(json) if !json.trim().is_empty() => UpdaterConfig::from_json(&json).unwrap_or_else(|err| {
            log::warn!("ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, err);
            UpdaterConfig::default()
        }),
        _ => UpdaterConfig::default(),
    }
}
