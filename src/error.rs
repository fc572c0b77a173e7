//! Error types. Gameplay itself is total; these only cover configuration,
//! asset fetching and mounting onto the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Rejected game configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("round length must be positive, got {0} ms")]
    RoundLength(f64),
    #[error("{field} must be at least 1")]
    ZeroValue { field: &'static str },
    #[cfg(feature = "serde_json")]
    #[error("invalid config json: {0}")]
    Json(String),
}

/// An image that never made it into the asset set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("failed to load {name} from {src}")]
    Load { name: &'static str, src: String },
    #[error("could not create image element for {0}")]
    Element(&'static str),
}

/// Failure attaching the game to the document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MountError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
