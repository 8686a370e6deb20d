use serde::{Deserialize, Serialize};

/// Big Five traits, each raw 1–5 source value divided by 5.
///
/// Values are not clamped: an out-of-range source value (e.g. 7) yields a
/// trait above 1.0 here and is only bounded in the derived scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    #[serde(rename = "O")]
    pub openness: f64,
    #[serde(rename = "C")]
    pub conscientiousness: f64,
    #[serde(rename = "E")]
    pub extraversion: f64,
    #[serde(rename = "A")]
    pub agreeableness: f64,
    #[serde(rename = "N")]
    pub neuroticism: f64,
}

/// A validated, scored candidate built from one source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub title: String,
    /// Source order, not deduplicated.
    pub skills: Vec<String>,
    /// First six of `skills`.
    pub top_skills: Vec<String>,
    pub personality: Personality,
    /// 0.3 – 1.0
    pub composite_score: f64,
    pub skill_score: f64,
    pub network_score: f64,
    pub semantic_score: f64,
    pub years_experience: u32,
    pub business_unit: String,
    pub past_projects: String,
    pub rationale_short: String,
    pub rationale_full: String,
}

impl Candidate {
    /// Case-insensitive substring match against name, title, business unit and skills.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.title.to_lowercase().contains(needle_lower)
            || self.business_unit.to_lowercase().contains(needle_lower)
            || self
                .skills
                .iter()
                .any(|s| s.to_lowercase().contains(needle_lower))
    }
}
