//! Plotly Bindings
//!
//! Thin wasm-bindgen shim over the Plotly global that `index.html` loads
//! from the CDN.

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::heatmap::RenderSpec;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn new_plot(el: &HtmlElement, data: &JsValue, layout: &JsValue) -> Result<(), JsValue>;
}

/// Draw the heatmap into the given element
pub fn draw(el: &HtmlElement, spec: &RenderSpec) -> Result<(), JsValue> {
    let data = js_sys::JSON::parse(&serde_json::json!([spec.trace()]).to_string())?;
    let layout = js_sys::JSON::parse(&spec.layout().to_string())?;
    new_plot(el, &data, &layout)
}
