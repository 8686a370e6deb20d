use serde::{Deserialize, Serialize};

use crate::models::candidate::Personality;

pub const COMPOSITE_FLOOR: f64 = 0.3;
pub const COMPOSITE_CEILING: f64 = 1.0;

/// Source traits are on a 1–5 scale.
const TRAIT_SCALE: f64 = 5.0;
/// Skill count at which `skill_score` saturates.
const SKILL_SATURATION: f64 = 10.0;
const DEFAULT_YEARS: u32 = 5;

/// Title keywords → estimated years. First matching tier wins.
const EXPERIENCE_TIERS: &[(&[&str], u32)] = &[
    (&["head", "director", "chief"], 15),
    (&["senior", "sr."], 8),
    (&["manager", "lead"], 6),
    (&["specialist", "analyst", "engineer"], 4),
    (&["junior", "jr."], 2),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    /// Applied to `1 - N`.
    pub emotional_stability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            openness: 0.2,
            conscientiousness: 0.3,
            extraversion: 0.2,
            agreeableness: 0.2,
            emotional_stability: 0.1,
        }
    }
}

/// Parses a raw trait value and divides by the scale.
///
/// Unparseable, blank, NaN or infinite → 0. Out-of-range finite values
/// pass through unclamped.
pub fn normalize_trait(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v / TRAIT_SCALE,
        _ => 0.0,
    }
}

/// Unjittered weighted blend of normalized traits. Neuroticism is inverted.
pub fn compute_composite_score(p: &Personality, weights: &ScoringWeights) -> f64 {
    p.openness * weights.openness
        + p.conscientiousness * weights.conscientiousness
        + p.extraversion * weights.extraversion
        + p.agreeableness * weights.agreeableness
        + (1.0 - p.neuroticism) * weights.emotional_stability
}

/// Adds jitter and clamps into `[COMPOSITE_FLOOR, COMPOSITE_CEILING]`.
pub fn finalize_composite(base: f64, jitter: f64) -> f64 {
    (base + jitter).clamp(COMPOSITE_FLOOR, COMPOSITE_CEILING)
}

pub fn compute_skill_score(skill_count: usize) -> f64 {
    (skill_count as f64 / SKILL_SATURATION).min(1.0)
}

/// Extraversion × agreeableness, bounded to `[0, 1]`.
pub fn compute_network_score(p: &Personality) -> f64 {
    (p.extraversion * p.agreeableness).clamp(0.0, 1.0)
}

/// Openness, bounded to `[0, 1]`.
pub fn compute_semantic_score(p: &Personality) -> f64 {
    p.openness.clamp(0.0, 1.0)
}

/// Estimates years of experience from the role title.
pub fn estimate_experience(role: &str) -> u32 {
    let role_lower = role.to_lowercase();
    EXPERIENCE_TIERS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| role_lower.contains(k)))
        .map(|(_, years)| *years)
        .unwrap_or(DEFAULT_YEARS)
}

/// Explicit years column, if it holds a finite non-negative number.
pub fn explicit_experience(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.round() as u32)
}
