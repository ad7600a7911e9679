//! Crate-wide error type.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    /// `start_game` was called before the card and back lists arrived.
    #[error("game data is still loading, please wait")]
    DataNotLoaded,
    #[error("no card categories are available")]
    EmptyCatalog,
    #[error("not enough card pairs (required: {required}, available: {available})")]
    InsufficientCards { required: usize, available: usize },
    #[error("malformed card data: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("failed to fetch {0}")]
    Fetch(String),
    #[error("unknown grid mode '{0}'")]
    InvalidGridMode(String),
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
