//! Fetching the static card and back lists.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window, window};

use crate::catalog::CardCatalog;
use crate::config::AssetLayout;
use crate::error::GameError;

async fn fetch_text(win: &Window, url: &str) -> Result<String, GameError> {
    let failed = || GameError::Fetch(url.to_string());
    let resp_value = JsFuture::from(win.fetch_with_str(url)).await.map_err(|_| failed())?;
    let resp: Response = resp_value.dyn_into().map_err(|_| failed())?;
    if !resp.ok() {
        return Err(GameError::Fetch(format!("{url} (HTTP {})", resp.status())));
    }
    let text_promise = resp.text().map_err(|_| failed())?;
    let text = JsFuture::from(text_promise).await.map_err(|_| failed())?;
    text.as_string().ok_or_else(failed)
}

pub async fn load_catalog(assets: &AssetLayout) -> Result<CardCatalog, GameError> {
    let win = window().ok_or_else(|| GameError::Dom("no window".into()))?;
    let cards = fetch_text(&win, &assets.cards_url).await?;
    let backs = fetch_text(&win, &assets.backs_url).await?;
    CardCatalog::from_json(&cards, &backs)
}
