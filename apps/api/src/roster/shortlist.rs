use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::models::candidate::Candidate;

pub const DEFAULT_FRACTION: f64 = 0.3;
const TOP_SKILL_LIMIT: usize = 8;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortlist {
    pub candidates: Vec<Candidate>,
    pub total: usize,
    pub pool_size: usize,
    pub fraction: f64,
    pub average_score: f64,
    pub top_skills: Vec<String>,
}

/// True when `fraction` is a usable shortlist share.
pub fn valid_fraction(fraction: f64) -> bool {
    fraction > 0.0 && fraction <= 1.0
}

/// Descending by composite score. Stable, so ties keep source order.
pub fn rank_by_composite(candidates: &[Candidate]) -> Vec<Candidate> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Keeps the top `ceil(len × fraction)` candidates by composite score.
pub fn build_shortlist(candidates: &[Candidate], fraction: f64) -> Shortlist {
    let pool_size = candidates.len();
    let keep = if pool_size == 0 {
        0
    } else {
        ((pool_size as f64 * fraction).ceil() as usize).clamp(1, pool_size)
    };

    let mut ranked = rank_by_composite(candidates);
    ranked.truncate(keep);

    let average_score = if ranked.is_empty() {
        0.0
    } else {
        ranked.iter().map(|c| c.composite_score).sum::<f64>() / ranked.len() as f64
    };

    let top_skills = most_common_skills(&ranked, TOP_SKILL_LIMIT);

    Shortlist {
        total: ranked.len(),
        candidates: ranked,
        pool_size,
        fraction,
        average_score,
        top_skills,
    }
}

/// Most frequent `top_skills` across candidates; ties keep first-seen order.
fn most_common_skills(candidates: &[Candidate], limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for skill in candidates.iter().flat_map(|c| c.top_skills.iter()) {
        let count = counts.entry(skill.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(skill.as_str());
        }
        *count += 1;
    }

    first_seen.sort_by(|a, b| counts[b].cmp(&counts[a]));
    first_seen
        .into_iter()
        .take(limit)
        .map(String::from)
        .collect()
}
