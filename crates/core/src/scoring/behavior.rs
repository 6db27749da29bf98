//! Behavior-history boosting.

use crate::catalog::Catalog;
use crate::domain::product::Product;
use crate::domain::profile::UserProfile;

/// Upper bound on the combined behavior multiplier.
pub const BEHAVIOR_BOOST_CAP: f64 = 3.5;

/// How many recent favorites are considered for the category match.
const RECENT_FAVORITES: usize = 3;

/// How many recent search keywords are matched against the product name.
const RECENT_SEARCHES: usize = 2;

/// Derives a multiplier in [1.0, 3.5] from favorites, searches, and clicks.
///
/// Each rule fires at most once; the product of all fired rules is clamped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BehaviorBooster;

impl BehaviorBooster {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, product: &Product, profile: &UserProfile, catalog: &Catalog) -> f64 {
        let mut boost: f64 = 1.0;
        let name_lower = product.name.to_lowercase();

        for favorite_id in profile.favorite_product_ids.iter().take(RECENT_FAVORITES) {
            let Some(favorite) = catalog.get(*favorite_id) else { continue };
            if favorite.large_category == product.large_category {
                boost *= 1.5;
                break;
            }
        }

        for keyword in profile.search_keywords.iter().take(RECENT_SEARCHES) {
            if !keyword.is_empty() && name_lower.contains(&keyword.to_lowercase()) {
                boost *= 1.8;
                break;
            }
        }

        if profile.clicked_categories.iter().any(|category| *category == product.large_category) {
            boost *= 1.2;
        }

        boost.min(BEHAVIOR_BOOST_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{ProductId, ProductRecord};
    use crate::domain::profile::{ActivityLevel, AgeGroup, UserId};

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            ProductRecord {
                id: ProductId(1),
                name: "혼밥 도시락".to_string(),
                price: 4_000,
                large_category: Some("가공식품".to_string()),
                medium_category: None,
                small_category: None,
            },
            ProductRecord {
                id: ProductId(2),
                name: "미니 냄비".to_string(),
                price: 9_000,
                large_category: Some("주방용품".to_string()),
                medium_category: None,
                small_category: None,
            },
        ])
    }

    fn profile() -> UserProfile {
        UserProfile {
            user_id: UserId(1),
            base_interest_category: None,
            age_group: AgeGroup::Twenties,
            gender: None,
            search_keywords: Vec::new(),
            favorite_product_ids: Vec::new(),
            favorite_categories: Vec::new(),
            clicked_categories: Vec::new(),
            activity: ActivityLevel::New,
        }
    }

    #[test]
    fn neutral_profile_yields_unit_boost() {
        let catalog = catalog();
        let product = catalog.get(ProductId(1)).unwrap();
        let boost = BehaviorBooster::new().apply(product, &profile(), &catalog);
        assert_eq!(boost, 1.0);
    }

    #[test]
    fn favorite_category_match_fires_once() {
        let catalog = catalog();
        let product = catalog.get(ProductId(1)).unwrap();
        let mut profile = profile();
        // Two favorites in the same category must still boost only once.
        profile.favorite_product_ids = vec![ProductId(1), ProductId(1)];
        let boost = BehaviorBooster::new().apply(product, &profile, &catalog);
        assert_eq!(boost, 1.5);
    }

    #[test]
    fn favorites_beyond_recent_window_are_ignored() {
        let catalog = catalog();
        let product = catalog.get(ProductId(1)).unwrap();
        let mut profile = profile();
        profile.favorite_product_ids =
            vec![ProductId(2), ProductId(2), ProductId(2), ProductId(1)];
        let boost = BehaviorBooster::new().apply(product, &profile, &catalog);
        assert_eq!(boost, 1.0);
    }

    #[test]
    fn search_match_is_case_insensitive_substring() {
        let catalog = catalog();
        let product = catalog.get(ProductId(1)).unwrap();
        let mut profile = profile();
        profile.search_keywords = vec!["도시락".to_string()];
        let boost = BehaviorBooster::new().apply(product, &profile, &catalog);
        assert_eq!(boost, 1.8);
    }

    #[test]
    fn all_rules_clamp_at_cap() {
        let catalog = catalog();
        let product = catalog.get(ProductId(1)).unwrap();
        let mut profile = profile();
        profile.favorite_product_ids = vec![ProductId(1)];
        profile.search_keywords = vec!["도시락".to_string()];
        profile.clicked_categories = vec!["가공식품".to_string()];
        // 1.5 × 1.8 × 1.2 = 3.24, under the cap.
        let boost = BehaviorBooster::new().apply(product, &profile, &catalog);
        assert!(boost <= BEHAVIOR_BOOST_CAP);
        assert!((boost - 3.24).abs() < 1e-9);
    }
}
