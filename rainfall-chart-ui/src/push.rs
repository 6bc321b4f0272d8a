//! Socket.IO push channel bridge.
//!
//! The Socket.IO client is a page global, so the connection is opened from
//! JS. Its event handler calls back into a Rust closure parked on `window`,
//! which forwards to a [`PushSubscription`]. Reconnects are left entirely to
//! the Socket.IO client.

use rainfall_core::notify::{push_endpoint, PushSubscription};
use wasm_bindgen::prelude::*;

use crate::js_bridge::{call_js, js_string, PLOT_POLL_LIMIT};

/// Name of the `window` property holding the Rust event callback.
const CALLBACK_GLOBAL: &str = "__rainfallPushEvent";

/// Push endpoint for the current page: `http://<document.domain>:<location.port>`.
pub fn page_push_endpoint() -> Option<String> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let domain = js_sys::Reflect::get(&document, &JsValue::from_str("domain"))
        .ok()?
        .as_string()?;
    let port = window.location().port().ok()?;
    Some(push_endpoint(&domain, &port))
}

/// Connect to `endpoint` and forward the subscribed event into `subscription`.
///
/// The callback lives for the rest of the page. Waits for the Socket.IO
/// client script to finish loading before connecting, giving up with a
/// console warning after [`PLOT_POLL_LIMIT`] 100ms ticks.
pub fn connect(endpoint: &str, subscription: PushSubscription) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let event = subscription.event().to_string();

    let callback = Closure::<dyn FnMut(String)>::new(move |event: String| {
        subscription.dispatch(&event);
    });
    js_sys::Reflect::set(&window, &JsValue::from_str(CALLBACK_GLOBAL), callback.as_ref())?;
    callback.forget();

    let endpoint_js = js_string(endpoint);
    let event = js_string(&event);
    let callback_global = js_string(CALLBACK_GLOBAL);
    call_js(&format!(
        r#"
        (function() {{
            function open() {{
                var socket = io.connect({endpoint_js});
                socket.on({event}, function() {{
                    window[{callback_global}]({event});
                }});
                window.__rainfallSocket = socket;
                console.log('[Rainfall] push channel opened');
            }}
            if (typeof io !== 'undefined') {{
                open();
            }} else {{
                var ticks = 0;
                var poll = setInterval(function() {{
                    ticks += 1;
                    if (typeof io !== 'undefined') {{
                        clearInterval(poll);
                        open();
                    }} else if (ticks >= {limit}) {{
                        clearInterval(poll);
                        console.warn('[Rainfall] Socket.IO client never loaded, no live updates');
                    }}
                }}, 100);
            }}
        }})();
        "#,
        limit = PLOT_POLL_LIMIT,
    ));
    log::info!("subscribing to push channel at {}", endpoint);
    Ok(())
}
