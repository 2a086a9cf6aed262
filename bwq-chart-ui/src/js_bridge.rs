//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js forecast chart and the download helper live in `assets/js/*.js`
//! and are evaluated as globals (no ES modules) exposed via `window.*`.
//! This module serializes data into JS string literals and calls those globals.

// Embed the JS files at compile time
static FORECAST_CHART_JS: &str = include_str!("../assets/js/forecast-chart.js");
static DOWNLOAD_JS: &str = include_str!("../assets/js/download.js");

/// D3 v7, loaded on demand when the host page does not provide it.
const D3_URL: &str = "https://cdn.jsdelivr.net/npm/d3@7";

/// Encode `s` as a JS string literal. JSON string syntax is a subset of JS.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "''".to_string())
}

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('BWQ JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Build the polling call that waits for the chart scripts and the container
/// element before invoking `window.<function>(container, data, config)`.
fn render_call(function: &str, container_id: &str, data_json: &str, config_json: &str) -> String {
    let container = js_string(container_id);
    let data = js_string(data_json);
    let config = js_string(config_json);
    format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__bwqChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById({container})) {{
                    clearInterval(poll);
                    try {{
                        window.{function}({container}, {data}, {config});
                    }} catch(e) {{ console.error('[BWQ] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    )
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The download helper does not need D3 and is installed immediately. The
/// chart script is evaluated at global scope (indirect eval) once D3 is ready,
/// and its functions are promoted to `window.*`. Safe to call repeatedly.
pub fn init_charts() {
    let _ = js_sys::eval(&format!(
        "(0, eval)({}); window.downloadTextFile = downloadTextFile;",
        js_string(DOWNLOAD_JS)
    ));

    let store_js = format!(
        "if (!window.__bwqChartsReady) {{ window.__bwqChartScripts = {}; }}",
        js_string(FORECAST_CHART_JS)
    );
    let _ = js_sys::eval(&store_js);

    let init_js = format!(
        r#"
        (function() {{
            if (window.__bwqChartsReady || window.__bwqChartsPending) return;
            window.__bwqChartsPending = true;
            if (typeof d3 === 'undefined' && !document.getElementById('bwq-d3')) {{
                var s = document.createElement('script');
                s.id = 'bwq-d3';
                s.src = {d3_url};
                document.head.appendChild(s);
            }}
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined') {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__bwqChartScripts);
                    delete window.__bwqChartScripts;
                    if (typeof renderForecastChart !== 'undefined') window.renderForecastChart = renderForecastChart;
                    if (typeof destroyForecastChart !== 'undefined') window.destroyForecastChart = destroyForecastChart;
                    window.__bwqChartsPending = false;
                    window.__bwqChartsReady = true;
                    console.log('BWQ charts initialized');
                }}
            }}, 100);
        }})();
        "#,
        d3_url = js_string(D3_URL)
    );
    let _ = js_sys::eval(&init_js);
}

/// Render the animated forecast chart.
///
/// `payload_json` is a serialized `bwq_data::chart::AnimationPayload`.
pub fn render_forecast_chart(container_id: &str, payload_json: &str, config_json: &str) {
    call_js(&render_call(
        "renderForecastChart",
        container_id,
        payload_json,
        config_json,
    ));
}

/// Stop any running animation and clear the container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "if (window.destroyForecastChart) {{ window.destroyForecastChart({id}); }} \
         else {{ var el = document.getElementById({id}); if (el) el.innerHTML = ''; }}",
        id = js_string(container_id)
    ));
}

/// Offer `text` to the browser as a CSV file download.
pub fn download_csv(file_name: &str, text: &str) {
    call_js(&format!(
        "window.downloadTextFile({}, {}, 'text/csv;charset=utf-8');",
        js_string(file_name),
        js_string(text)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_string_escapes_quotes_and_newlines() {
        assert_eq!(js_string("it's \"x\"\n"), r#""it's \"x\"\n""#);
    }

    #[test]
    fn render_call_embeds_escaped_arguments() {
        let code = render_call("renderForecastChart", "chart", r#"{"a":"b'c"}"#, "{}");
        assert!(code.contains(r#"window.renderForecastChart("chart", "{\"a\":\"b'c\"}", "{}")"#));
        assert!(code.contains(r#"document.getElementById("chart")"#));
    }

    #[test]
    fn scripts_define_the_promoted_functions() {
        assert!(FORECAST_CHART_JS.contains("function renderForecastChart("));
        assert!(FORECAST_CHART_JS.contains("function destroyForecastChart("));
        assert!(DOWNLOAD_JS.contains("function downloadTextFile("));
    }
}
