//! Catalog construction and lookup.
//!
//! The catalog is the read-only product universe for one engine instance.
//! Construction normalizes category levels, derives the display/text fields,
//! and precomputes both suitability scores. Row positions are stable so a
//! vector index built over the same snapshot stays aligned.

use std::collections::HashMap;

use crate::domain::product::{Product, ProductId, ProductRecord};
use crate::scoring::suitability::ScoreCalculator;

const FALLBACK_CATEGORY: &str = "기타";

#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Normalize and score raw records. Duplicate ids keep the first row.
    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let calculator = ScoreCalculator::new();
        let mut products = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for record in records {
            if by_id.contains_key(&record.id) {
                continue;
            }

            let large = category_level(record.large_category);
            let medium = category_level(record.medium_category);
            let small = category_level(record.small_category);

            let category_path = format!("{large} > {medium} > {small}");
            let category_text = format!("{large} {medium} {small}");

            let flexible_single_score =
                calculator.flexible_score(&record.name, record.price, &category_text);
            let base_single_score = calculator.base_score(&record.name, record.price);

            by_id.insert(record.id, products.len());
            products.push(Product {
                id: record.id,
                name: record.name,
                price: record.price,
                large_category: large,
                medium_category: medium,
                small_category: small,
                category_path,
                category_text,
                base_single_score,
                flexible_single_score,
            });
        }

        Self { products, by_id }
    }

    /// Products in snapshot row order, aligned with any vector index built
    /// over the same snapshot.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.by_id.get(&id).map(|row| &self.products[*row])
    }

    pub fn by_row(&self, row: usize) -> Option<&Product> {
        self.products.get(row)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn category_level(level: Option<String>) -> String {
    match level {
        Some(value) if !value.trim().is_empty() => value,
        _ => FALLBACK_CATEGORY.to_string(),
    }
}
