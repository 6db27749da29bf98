//! Single-household suitability scoring.
//!
//! Two independent, deterministic scores per product: a coarse 0–10 score
//! used as a cheap pre-filter feature, and the refined 0–25 "flexible" score
//! that ranks category pools. Missing fields contribute zero; scoring never
//! fails.

/// Keywords that strongly indicate single-serving or individually packaged
/// items.
const LEGENDARY_KEYWORDS: &[&str] = &["1인용", "혼밥", "미니", "소포장", "개별포장", "1인분"];

/// Keywords indicating convenience or small size.
const GOOD_KEYWORDS: &[&str] =
    &["간편", "소량", "작은", "컴팩트", "휴대용", "간단", "즉석", "소형"];

/// Name keywords that pair with a food category for the context bonus.
const READY_TO_EAT_KEYWORDS: &[&str] = &["즉석", "간편", "바로"];

/// Name keywords that pair with kitchenware for the context bonus.
const COMPACT_KEYWORDS: &[&str] = &["미니", "소형", "컴팩트"];

/// Food category markers for the ready-to-eat context bonus.
const FOOD_CATEGORY_MARKERS: &[&str] = &["신선식품", "가공식품"];

const KITCHENWARE_MARKER: &str = "주방용품";

const PRIMARY_KEYWORDS: &[&str] = &["1인용", "혼밥", "소포장", "미니", "원룸", "소량"];

const SECONDARY_KEYWORDS: &[&str] = &["간편", "간단", "즉석", "개별", "포션", "1개입"];

pub const FLEXIBLE_SCORE_MAX: f64 = 25.0;
pub const BASE_SCORE_MAX: f64 = 10.0;

/// Computes both suitability scores from name, price, and category text.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreCalculator;

impl ScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Refined 0–25 suitability score.
    pub fn flexible_score(&self, name: &str, price: u32, category_text: &str) -> f64 {
        let name_lower = name.to_lowercase();
        let mut score = 0.0;

        for keyword in LEGENDARY_KEYWORDS {
            if name_lower.contains(keyword) {
                score += 15.0;
            }
        }

        for keyword in GOOD_KEYWORDS {
            if name_lower.contains(keyword) {
                score += 8.0;
            }
        }

        score += if price <= 5_000 {
            10.0
        } else if price <= 15_000 {
            7.0
        } else if price <= 30_000 {
            4.0
        } else {
            0.0
        };

        score += self.context_bonus(&name_lower, category_text);

        score.min(FLEXIBLE_SCORE_MAX)
    }

    /// +5 once: ready-to-eat food, or compact kitchenware. First match wins.
    fn context_bonus(&self, name_lower: &str, category_text: &str) -> f64 {
        let is_food = FOOD_CATEGORY_MARKERS.iter().any(|marker| category_text.contains(marker));
        if is_food && READY_TO_EAT_KEYWORDS.iter().any(|keyword| name_lower.contains(keyword)) {
            return 5.0;
        }

        if category_text.contains(KITCHENWARE_MARKER)
            && COMPACT_KEYWORDS.iter().any(|keyword| name_lower.contains(keyword))
        {
            return 5.0;
        }

        0.0
    }

    /// Coarse 0–10 suitability feature.
    pub fn base_score(&self, name: &str, price: u32) -> f64 {
        let name_lower = name.to_lowercase();
        let mut score: f64 = 0.0;

        for keyword in PRIMARY_KEYWORDS {
            if name_lower.contains(keyword) {
                score += 3.0;
            }
        }

        for keyword in SECONDARY_KEYWORDS {
            if name_lower.contains(keyword) {
                score += 1.5;
            }
        }

        if price < 5_000 {
            score += 2.0;
        } else if price < 15_000 {
            score += 1.0;
        }

        score.min(BASE_SCORE_MAX)
    }
}
