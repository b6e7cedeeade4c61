use crate::error::VizResult;
use js_sys::Math;
use web_sys::Element;

/// Random opaque-ish CSS colour, e.g. `rgba(12,200,87,0.75)`.
pub fn random_color() -> String {
    let channel = || (Math::random() * 255.0).floor() as u8;
    format!("rgba({},{},{},0.75)", channel(), channel(), channel())
}

/// Uniform sample in `0.0..1.0`.
pub fn random() -> f64 {
    Math::random()
}

pub fn go_fullscreen(element: &Element) -> VizResult<()> {
    element.request_fullscreen()?;
    Ok(())
}
