use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

/// Numeric user identifier. Also seeds the per-user deterministic sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age bucket derived from the birth year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "20대")]
    Twenties,
    #[serde(rename = "30대")]
    Thirties,
    #[serde(rename = "40대+")]
    FortiesPlus,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        if age < 30 {
            AgeGroup::Twenties
        } else if age < 40 {
            AgeGroup::Thirties
        } else {
            AgeGroup::FortiesPlus
        }
    }
}

/// Activity classification from the total recorded action count
/// (searches + clicks + favorites).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    New,
    Active,
    Power,
}

impl ActivityLevel {
    pub fn from_action_count(total_actions: usize) -> Self {
        if total_actions <= 5 {
            ActivityLevel::New
        } else if total_actions <= 20 {
            ActivityLevel::Active
        } else {
            ActivityLevel::Power
        }
    }
}

/// Per-user snapshot consumed by the recommendation cascade. Built once per
/// request or batch run; read-only during recommendation.
///
/// Behavioral lists are ordered most-recent-first. Absent data degrades to
/// empty lists, never to an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    /// Declared preferred category; gets priority slot allocation.
    #[serde(default)]
    pub base_interest_category: Option<String>,
    pub age_group: AgeGroup,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub search_keywords: Vec<String>,
    #[serde(default)]
    pub favorite_product_ids: Vec<ProductId>,
    #[serde(default)]
    pub favorite_categories: Vec<String>,
    #[serde(default)]
    pub clicked_categories: Vec<String>,
    pub activity: ActivityLevel,
}

/// Raw per-user behavior extract, as pulled from upstream logs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserActivityRecord {
    pub user_id: u64,
    /// Birth date string; only the leading year digits are read.
    #[serde(default)]
    pub birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub base_interest_category: Option<String>,
    /// Most-recent-first search keywords.
    #[serde(default)]
    pub search_keywords: Vec<String>,
    /// Most-recent-first favorited product ids.
    #[serde(default)]
    pub favorite_product_ids: Vec<u64>,
    #[serde(default)]
    pub favorite_categories: Vec<String>,
    #[serde(default)]
    pub clicked_categories: Vec<String>,
}

/// Builds [`UserProfile`] snapshots from raw behavior extracts.
pub struct UserProfiler {
    current_year: i32,
}

impl UserProfiler {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Profiler anchored to the current calendar year.
    pub fn from_today() -> Self {
        use chrono::Datelike;
        Self::new(chrono::Utc::now().year())
    }

    /// Parse the leading year of a birth string. Unparseable input yields
    /// `None` rather than an error.
    fn birth_year(birth: &str) -> Option<i32> {
        let digits: String = birth.chars().take(4).collect();
        digits.parse::<i32>().ok().filter(|year| (1900..=2100).contains(year))
    }

    fn age_group(&self, birth: Option<&str>) -> AgeGroup {
        let age = birth
            .and_then(Self::birth_year)
            .map(|year| (self.current_year - year).max(0) as u32)
            .unwrap_or(30);
        AgeGroup::from_age(age)
    }

    pub fn build(&self, record: &UserActivityRecord) -> UserProfile {
        let total_actions = record.search_keywords.len()
            + record.clicked_categories.len()
            + record.favorite_product_ids.len();

        UserProfile {
            user_id: UserId(record.user_id),
            base_interest_category: record.base_interest_category.clone(),
            age_group: self.age_group(record.birth.as_deref()),
            gender: record.gender.clone(),
            search_keywords: record.search_keywords.clone(),
            favorite_product_ids: record
                .favorite_product_ids
                .iter()
                .copied()
                .map(ProductId)
                .collect(),
            favorite_categories: record.favorite_categories.clone(),
            clicked_categories: record.clicked_categories.clone(),
            activity: ActivityLevel::from_action_count(total_actions),
        }
    }
}
