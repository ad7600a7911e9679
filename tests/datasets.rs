// Sanity checks for the sample card data shipped in `www/`.
// Native-friendly: the JSON is embedded at compile time.

use std::collections::HashSet;

use memo_pairs::catalog::folder_name;
use memo_pairs::CardCatalog;

const CARDS: &str = include_str!("../www/cards.json");
const BACKS: &str = include_str!("../www/backs.json");

fn catalog() -> CardCatalog {
    CardCatalog::from_json(CARDS, BACKS).expect("sample data must parse")
}

#[test]
fn sample_data_parses_and_is_not_empty() {
    let catalog = catalog();
    assert!(!catalog.is_empty());
    assert!(catalog.default_back().is_some());
}

#[test]
fn card_names_are_unique_within_each_category() {
    let catalog = catalog();
    for category in catalog.category_names() {
        let pairs = catalog.pairs_for(category);
        assert!(!pairs.is_empty(), "category '{}' has no cards", category);
        let mut seen = HashSet::new();
        for pair in &pairs {
            assert!(seen.insert(pair.name.clone()), "duplicate card '{}' in '{}'", pair.name, category);
            assert!(!pair.name.trim().is_empty(), "blank card name in '{}'", category);
        }
    }
}

#[test]
fn asset_folders_are_plain_ascii() {
    for category in catalog().category_names() {
        let folder = folder_name(category);
        assert!(
            folder.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "folder '{}' for category '{}' is not a safe path segment",
            folder,
            category
        );
    }
}

#[test]
fn backs_are_unique_png_files() {
    let catalog = catalog();
    let mut seen = HashSet::new();
    for back in catalog.backs() {
        assert!(back.ends_with(".png"), "back '{}' is not a png", back);
        assert!(seen.insert(back.as_str()), "duplicate back '{}'", back);
    }
}

#[test]
fn sample_data_fills_a_desktop_auto_board() {
    // Auto on desktop wants 18 pairs from the whole catalog.
    assert!(catalog().pair_count() >= 18);
}
