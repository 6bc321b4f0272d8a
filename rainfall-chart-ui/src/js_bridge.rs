//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Plotly.js and the Socket.IO client are plain `<script>` globals loaded
//! at runtime. Calls into them are wrapped in try/catch so a missing
//! library or element only produces a console warning.

use rainfall_core::chart::{ChartState, Renderer};

/// Plotly.js bundle loaded by [`load_libraries`].
pub const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Socket.IO client matching the server's protocol revision.
pub const SOCKET_IO_SRC: &str = "https://cdn.socket.io/4.7.5/socket.io.min.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Rainfall JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a Rust string as a JS string literal.
pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Append `<script>` tags for Plotly and Socket.IO unless already present.
pub fn load_libraries() {
    load_script("Plotly", PLOTLY_SRC);
    load_script("io", SOCKET_IO_SRC);
}

/// Add a `<script src>` to `<head>` unless `global` is already defined.
pub fn load_script(global: &str, src: &str) {
    let global = js_string(global);
    let src = js_string(src);
    call_js(&format!(
        r#"
        if (typeof window[{global}] === 'undefined' &&
            !document.querySelector('script[src=' + JSON.stringify({src}) + ']')) {{
            var s = document.createElement('script');
            s.src = {src};
            document.head.appendChild(s);
        }}
        "#,
    ));
}

/// Ticks of the shared 100ms plot poll before pending draws are dropped.
pub const PLOT_POLL_LIMIT: u32 = 300;

/// Draw (or fully redraw) a Plotly chart in `container_id`.
///
/// Draws straight away when Plotly and the container exist. Otherwise the
/// draw is parked and one page-wide poll retries every 100ms; only the newest
/// parked draw per container is kept. After [`PLOT_POLL_LIMIT`] ticks the poll
/// stops and the parked draws are dropped with a warning.
pub fn new_plot(container_id: &str, data_json: &str, layout_json: &str) {
    call_js(&new_plot_script(container_id, data_json, layout_json));
}

fn new_plot_script(container_id: &str, data_json: &str, layout_json: &str) -> String {
    let id = js_string(container_id);
    let data = js_string(data_json);
    let layout = js_string(layout_json);
    format!(
        r#"
        (function() {{
            var pending = window.__rainfallPendingPlots = window.__rainfallPendingPlots || {{}};
            function ready(id) {{
                return typeof window.Plotly !== 'undefined' && document.getElementById(id);
            }}
            function draw(id, plot) {{
                try {{
                    window.Plotly.newPlot(id, JSON.parse(plot.data), JSON.parse(plot.layout));
                }} catch(e) {{ console.error('[Rainfall] Plotly.newPlot error:', e); }}
            }}
            var plot = {{ data: {data}, layout: {layout} }};
            if (ready({id}) && !pending[{id}]) {{
                draw({id}, plot);
                return;
            }}
            pending[{id}] = plot;
            if (window.__rainfallPlotPoll) {{
                return;
            }}
            var ticks = 0;
            window.__rainfallPlotPoll = setInterval(function() {{
                ticks += 1;
                Object.keys(pending).forEach(function(id) {{
                    if (ready(id)) {{
                        var next = pending[id];
                        delete pending[id];
                        draw(id, next);
                    }}
                }});
                var left = Object.keys(pending);
                if (left.length === 0 || ticks >= {limit}) {{
                    clearInterval(window.__rainfallPlotPoll);
                    window.__rainfallPlotPoll = null;
                    if (left.length > 0) {{
                        console.warn('[Rainfall] Plotly or chart container never appeared, dropping draws for', left);
                        left.forEach(function(id) {{ delete pending[id]; }});
                    }}
                }}
            }}, 100);
        }})();
        "#,
        limit = PLOT_POLL_LIMIT,
    )
}

/// Destroy/clean up a chart in the given container.
pub fn purge_chart(container_id: &str) {
    let id = js_string(container_id);
    call_js(&format!(
        "var el = document.getElementById({id}); if (el && window.Plotly) window.Plotly.purge(el);"
    ));
}

/// [`Renderer`] drawing through Plotly's page-global `newPlot`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlotlyRenderer;

impl Renderer for PlotlyRenderer {
    fn init(&mut self, target: &str, state: &ChartState) {
        new_plot(target, &state.data_json(), &state.layout_json());
    }

    fn replace_data(&mut self, target: &str, state: &ChartState) {
        new_plot(target, &state.data_json(), &state.layout_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_plot_uses_one_capped_poll() {
        let script = new_plot_script("rainfall-chart", "[]", "{}");
        assert_eq!(script.matches("setInterval(").count(), 1);
        assert!(script.contains("if (window.__rainfallPlotPoll)"));
        assert!(script.contains(&format!("ticks >= {}", PLOT_POLL_LIMIT)));
        assert!(script.contains("clearInterval(window.__rainfallPlotPoll)"));
    }

    #[test]
    fn test_new_plot_quotes_payloads() {
        let script = new_plot_script("chart'); alert(1); ('", r#"[{"x":[]}]"#, "{}");
        assert!(script.contains(r#""chart'); alert(1); ('""#));
        assert!(script.contains(r#"data: "[{\"x\":[]}]""#));
    }
}
