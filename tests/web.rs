// Browser smoke tests, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use memo_pairs::catalog::escape_html;
use memo_pairs::{CardCatalog, GameConfig, GameOptions, GameSession, Viewport};
use memo_pairs::rng::GameRng;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn escapes_markup_in_category_names() {
    assert_eq!(escape_html("<b>\"Fruit\"</b>"), "&lt;b&gt;&quot;Fruit&quot;&lt;/b&gt;");
}

#[wasm_bindgen_test]
fn session_deals_from_sample_data() {
    let catalog = CardCatalog::from_json(
        include_str!("../www/cards.json"),
        include_str!("../www/backs.json"),
    )
    .unwrap();
    let mut session = GameSession::new(GameConfig::default(), GameRng::from_entropy(), Viewport::new(1280.0, 800.0));
    session.load(catalog);
    let events = session.start_game(&GameOptions::default(), 0.0).unwrap();
    assert!(!events.is_empty());
}
