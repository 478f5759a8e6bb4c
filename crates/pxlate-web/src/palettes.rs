//! Palette listing bindings for the UI's palette picker.

use js_sys::Array;
use pxlate_core::palette::PASSTHROUGH_KEY;
use pxlate_core::PaletteRegistry;
use wasm_bindgen::prelude::*;

pub(crate) fn palette_names() -> Vec<String> {
    PaletteRegistry::builtin()
        .names()
        .map(str::to_string)
        .collect()
}

pub(crate) fn palette_hex(name: &str) -> Option<Vec<String>> {
    PaletteRegistry::builtin()
        .get(name)
        .map(|p| p.colors().iter().map(|c| c.to_hex()).collect())
}

/// List the built-in palette keys in display order.
///
/// `"none"` is not included; pass it (or `undefined`) to skip palette mapping.
#[wasm_bindgen]
pub fn list_palettes() -> Array {
    palette_names().into_iter().map(JsValue::from).collect()
}

/// Get the colors of a built-in palette as `#rrggbb` strings.
///
/// # Errors
///
/// Returns an error for an unknown key, including `"none"`.
#[wasm_bindgen]
pub fn palette_colors(name: &str) -> Result<Array, JsValue> {
    palette_hex(name)
        .map(|colors| colors.into_iter().map(JsValue::from).collect())
        .ok_or_else(|| {
            let hint = if name.eq_ignore_ascii_case(PASSTHROUGH_KEY) {
                " (passthrough has no colors)"
            } else {
                ""
            };
            JsValue::from_str(&format!("Unknown palette: {}{}", name, hint))
        })
}
