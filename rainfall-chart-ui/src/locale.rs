//! Date labels in the browser's own locale.

use rainfall_core::record::RawTimestamp;
use rainfall_core::series::{DateLabeler, INVALID_DATE};
use wasm_bindgen::JsValue;

const FALLBACK_LOCALE: &str = "en-US";

/// Labels dates the way `Date.prototype.toLocaleDateString` does.
#[derive(Debug, Clone)]
pub struct BrowserLocaleLabeler {
    locale: String,
}

impl BrowserLocaleLabeler {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    /// Use `navigator.language`, falling back to en-US.
    pub fn from_navigator() -> Self {
        let locale = web_sys::window()
            .and_then(|window| window.navigator().language())
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string());
        Self::new(locale)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl DateLabeler for BrowserLocaleLabeler {
    fn label(&self, timestamp: Option<&RawTimestamp>) -> String {
        let value = match timestamp {
            Some(RawTimestamp::Text(text)) => JsValue::from_str(text),
            Some(RawTimestamp::Millis(ms)) => JsValue::from_f64(*ms),
            None => return INVALID_DATE.to_string(),
        };
        let date = js_sys::Date::new(&value);
        if date.get_time().is_nan() {
            return INVALID_DATE.to_string();
        }
        String::from(date.to_locale_date_string(&self.locale, &JsValue::UNDEFINED))
    }
}
