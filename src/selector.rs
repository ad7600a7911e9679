//! Drawing the pairs for one game from the selected categories.

use rand::Rng;

use crate::catalog::{CardCatalog, CardPair};
use crate::rng::shuffled;

/// Every pair the selection can draw from.
///
/// The pool is every pair of every selected category. No selection, or a selection
/// whose categories are all empty, falls back to the whole catalog.
pub fn candidate_pool<S: AsRef<str>>(categories: &[S], catalog: &CardCatalog) -> Vec<CardPair> {
    let pool: Vec<CardPair> = categories
        .iter()
        .flat_map(|category| catalog.pairs_for(category.as_ref()))
        .collect();
    if !pool.is_empty() {
        return pool;
    }
    if !categories.is_empty() {
        log::warn!("selected categories hold no cards, using the whole catalog");
    }
    catalog.all_pairs()
}

/// Number of pairs [`select_pairs`] can draw for this selection.
pub fn pool_size<S: AsRef<str>>(categories: &[S], catalog: &CardCatalog) -> usize {
    candidate_pool(categories, catalog).len()
}

/// Draw up to `count` distinct pairs from `categories`.
///
/// When the pool holds fewer than `count` pairs it is returned as-is, unshuffled,
/// so the caller can tell the shortfall apart and refuse to start. Otherwise the
/// result is a uniformly shuffled copy of the pool cut to `count`.
pub fn select_pairs<S, R>(categories: &[S], count: usize, catalog: &CardCatalog, rng: &mut R) -> Vec<CardPair>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let pool = candidate_pool(categories, catalog);
    if pool.is_empty() {
        log::warn!("card catalog is empty");
        return pool;
    }

    if pool.len() < count {
        log::warn!(
            "not enough card pairs (required: {}, available: {})",
            count,
            pool.len()
        );
        return pool;
    }

    let mut drawn = shuffled(&pool, rng);
    drawn.truncate(count);
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use std::collections::HashSet;

    use indexmap::IndexMap;

    fn catalog() -> CardCatalog {
        let mut categories = IndexMap::new();
        categories.insert("Fruit".to_string(), vec!["apple".into(), "pear".into(), "plum".into()]);
        categories.insert("Toys".to_string(), vec!["ball".into(), "kite".into()]);
        categories.insert("Empty".to_string(), Vec::new());
        CardCatalog::new(categories, vec!["classic.png".into()])
    }

    #[test]
    fn draws_exact_count_of_unique_pairs() {
        let cat = catalog();
        let mut rng = GameRng::new(3);
        let drawn = select_pairs(&["Fruit", "Toys"], 4, &cat, &mut rng);
        assert_eq!(drawn.len(), 4);
        let ids: HashSet<_> = drawn.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), 4);
        let pool = cat.all_pairs();
        assert!(drawn.iter().all(|p| pool.contains(p)));
    }

    #[test]
    fn only_selected_categories_are_used() {
        let cat = catalog();
        let drawn = select_pairs(&["Toys"], 2, &cat, &mut GameRng::new(5));
        assert!(drawn.iter().all(|p| p.category == "Toys"));
    }

    #[test]
    fn no_selection_uses_whole_catalog() {
        let cat = catalog();
        let none: [&str; 0] = [];
        let drawn = select_pairs(&none, 5, &cat, &mut GameRng::new(11));
        assert_eq!(drawn.len(), 5);
    }

    #[test]
    fn empty_selection_falls_back_to_catalog() {
        let cat = catalog();
        let drawn = select_pairs(&["Empty"], 2, &cat, &mut GameRng::new(11));
        assert_eq!(drawn.len(), 2);
    }

    #[test]
    fn short_pool_is_returned_in_catalog_order() {
        let cat = catalog();
        let drawn = select_pairs(&["Fruit"], 10, &cat, &mut GameRng::new(1));
        assert_eq!(drawn, cat.pairs_for("Fruit"));
    }

    #[test]
    fn pool_size_matches_fallback() {
        let cat = catalog();
        assert_eq!(pool_size(&["Fruit"], &cat), 3);
        assert_eq!(pool_size(&["Empty"], &cat), 5);
        assert_eq!(pool_size(&["Fruit", "Toys"], &cat), 5);
    }

    #[test]
    fn empty_catalog_gives_nothing() {
        let cat = CardCatalog::default();
        let drawn = select_pairs(&["Fruit"], 2, &cat, &mut GameRng::new(1));
        assert!(drawn.is_empty());
    }
}
