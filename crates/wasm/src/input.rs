//! Conversions from raw DOM event values to controller inputs.

const DOM_DELTA_LINE: u32 = 1;
const DOM_DELTA_PAGE: u32 = 2;
const LINE_HEIGHT_PX: f64 = 16.0;

/// Convert a wheel `deltaY` to pixels according to its `deltaMode`.
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32, page_height: f64) -> f64 {
    match delta_mode {
        DOM_DELTA_LINE => delta_y * LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => delta_y * page_height,
        _ => delta_y,
    }
}

/// Section index from a JavaScript number. Fractions truncate and huge
/// values saturate; the controller clamps the rest. NaN and infinities
/// carry no index at all.
pub fn js_index(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// Whether key presses inside an element with this tag belong to the
/// element (form fields) rather than to page navigation.
pub fn is_text_entry(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    )
}
