//! Error types for the visualizer

use thiserror::Error;

/// Errors raised while wiring the page or talking to the browser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VizError {
    /// A required element is not present in the document
    #[error("element not found: {0}")]
    MissingElement(String),

    /// An element exists but is not of the expected kind
    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    /// A browser API call rejected or threw
    #[error("browser error: {0}")]
    Js(String),

    /// The browser lacks a capability the visualizer needs
    #[error("not supported: {0}")]
    Unsupported(&'static str),
}

/// Result type for visualizer operations
pub type VizResult<T> = Result<T, VizError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for VizError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        VizError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<VizError> for wasm_bindgen::JsValue {
    fn from(err: VizError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
