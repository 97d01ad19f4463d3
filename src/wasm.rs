//! WASM bindings for showing selection breadcrumbs in the browser.
//!
//! The page hands over its markup and the two endpoints as locators; the
//! result is the same text or JSON the command line prints.

use wasm_bindgen::prelude::*;

use crate::document::Document;
use crate::error::Result;
use crate::selection::EndpointLocator;
use crate::trail::TrailOptions;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn select(html: &str, anchor: Option<String>, focus: Option<String>) -> Result<Document> {
    let mut doc = Document::from_html(html);
    if let Some(anchor) = anchor {
        let anchor: EndpointLocator = anchor.parse()?;
        let focus = focus.map(|f| f.parse::<EndpointLocator>()).transpose()?;
        doc.select_locators(&anchor, focus.as_ref())?;
    }
    Ok(doc)
}

/// Render anchor and focus trails as two numbered lists.
///
/// Without an anchor both lists show `<No selection>`.
#[wasm_bindgen]
pub fn breadcrumbs(
    html: &str,
    anchor: Option<String>,
    focus: Option<String>,
) -> std::result::Result<String, JsValue> {
    let doc = select(html, anchor, focus).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(doc.breadcrumbs(&TrailOptions::default()).to_string())
}

/// Same as [`breadcrumbs`], as `{"anchor": [...], "focus": [...]}`.
#[wasm_bindgen]
pub fn breadcrumbs_json(
    html: &str,
    anchor: Option<String>,
    focus: Option<String>,
) -> std::result::Result<String, JsValue> {
    let doc = select(html, anchor, focus).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&doc.breadcrumbs(&TrailOptions::default()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
