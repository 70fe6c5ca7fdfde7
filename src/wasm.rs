//! WebAssembly exports.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{EditError, Pipeline, PixelBuffer};

fn to_js_err(err: EditError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Apply a JSON list of operations to an interleaved u8 image.
///
/// # Arguments
/// * `data` - Flat array of bytes (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1 (grayscale) or 3 (RGB)
/// * `operations_json` - e.g. `[{"type": "sharpen", "amount": 1.5}]`
///
/// # Returns
/// Flat array of bytes with the same layout, or an error message.
#[wasm_bindgen]
pub fn apply_operations_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    operations_json: &str,
) -> Result<Vec<u8>, JsValue> {
    let pipeline = Pipeline::from_json(operations_json).map_err(to_js_err)?;
    let input = PixelBuffer::new(height, width, channels, data.to_vec()).map_err(to_js_err)?;
    Ok(pipeline.apply(input).into_samples())
}

/// Names of the supported operation types.
#[wasm_bindgen]
pub fn supported_operations_wasm() -> Vec<String> {
    crate::StageFactory::supported_kinds()
        .into_iter()
        .map(str::to_string)
        .collect()
}
