//! Card data: category → card names, plus the list of back images.
//! Categories keep the order of the cards document.
//!
//! Both documents are plain JSON served next to the page:
//!
//! ```json
//! { "Мебель": ["chair", "table"], "Fruit": ["apple", "pear"] }
//! ["classic.png", "stars.png"]
//! ```
//!
//! Every card name yields one [`CardPair`]: two face images (`<name>.png` and
//! `<name>_pair.png`) that must be matched together, and an optional sound played
//! when they are.

use indexmap::IndexMap;

use crate::config::AssetLayout;
use crate::error::GameError;

/// Folder names for categories whose display name is not a usable path segment.
const FOLDER_NAMES: &[(&str, &str)] = &[("Мебель", "mebel"), ("Одежда", "odyag")];

/// One matchable pair, immutable once drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardPair {
    /// `<category>_<name>`, unique per pair.
    pub id: String,
    pub name: String,
    pub category: String,
    pub image_a: String,
    pub image_b: String,
    pub match_sound: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardCatalog {
    categories: IndexMap<String, Vec<String>>,
    backs: Vec<String>,
    assets: AssetLayout,
}

impl CardCatalog {
    pub fn new(categories: IndexMap<String, Vec<String>>, backs: Vec<String>) -> Self {
        Self {
            categories,
            backs,
            assets: AssetLayout::default(),
        }
    }

    /// Parse the card and back documents.
    pub fn from_json(cards_json: &str, backs_json: &str) -> Result<Self, GameError> {
        let categories: IndexMap<String, Vec<String>> = serde_json::from_str(cards_json)?;
        let backs: Vec<String> = serde_json::from_str(backs_json)?;
        Ok(Self::new(categories, backs))
    }

    /// Use a non-default asset layout for derived image and sound paths.
    pub fn with_assets(mut self, assets: AssetLayout) -> Self {
        self.assets = assets;
        self
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn backs(&self) -> &[String] {
        &self.backs
    }

    pub fn default_back(&self) -> Option<&str> {
        self.backs.first().map(String::as_str)
    }

    /// Number of pairs across all categories.
    pub fn pair_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pair_count() == 0
    }

    /// Pair candidates of one category, in catalog order. Unknown categories yield none.
    pub fn pairs_for(&self, category: &str) -> Vec<CardPair> {
        match self.categories.get(category) {
            Some(names) => names
                .iter()
                .map(|name| self.make_pair(category, name))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn all_pairs(&self) -> Vec<CardPair> {
        self.categories
            .iter()
            .flat_map(|(category, names)| names.iter().map(move |name| (category, name)))
            .map(|(category, name)| self.make_pair(category, name))
            .collect()
    }

    fn make_pair(&self, category: &str, name: &str) -> CardPair {
        let folder = folder_name(category);
        let a = &self.assets;
        CardPair {
            id: format!("{category}_{name}"),
            name: name.to_string(),
            category: category.to_string(),
            image_a: format!("{}/{folder}/{name}{}", a.cards_dir, a.image_ext),
            image_b: format!("{}/{folder}/{name}_pair{}", a.cards_dir, a.image_ext),
            match_sound: Some(format!("{}/{folder}/{name}{}", a.sounds_dir, a.sound_ext)),
        }
    }
}

/// Asset folder for a category: fixed table first, lower-cased name otherwise.
pub fn folder_name(category: &str) -> String {
    FOLDER_NAMES
        .iter()
        .find(|(display, _)| *display == category)
        .map(|(_, folder)| (*folder).to_string())
        .unwrap_or_else(|| category.to_lowercase())
}

/// Escape text for insertion into HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
