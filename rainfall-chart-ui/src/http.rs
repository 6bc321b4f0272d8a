//! Prediction source backed by the browser's `fetch`.

use rainfall_core::record::{parse_records, PredictionRecord};
use rainfall_core::updater::PredictionSource;
use rainfall_core::FetchError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Issues `GET <path>` against the page origin.
#[derive(Debug, Clone)]
pub struct HttpPredictionSource {
    path: String,
}

impl HttpPredictionSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl PredictionSource for HttpPredictionSource {
    async fn fetch_latest(&self) -> Result<Vec<PredictionRecord>, FetchError> {
        let window =
            web_sys::window().ok_or_else(|| FetchError::Unavailable("no window".to_string()))?;

        let init = RequestInit::new();
        init.set_method("GET");
        let request = Request::new_with_str_and_init(&self.path, &init).map_err(transport)?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(transport)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(transport)?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        let body = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?
            .as_string()
            .ok_or_else(|| FetchError::Decode("response body is not text".to_string()))?;
        parse_records(&body)
    }
}

fn transport(err: JsValue) -> FetchError {
    FetchError::Transport(describe_js_error(&err))
}

/// Best-effort human readable text for a thrown JS value.
pub(crate) fn describe_js_error(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", err)
}
