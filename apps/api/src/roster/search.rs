//! Roster search: skill-coverage ranking plus a free-text filter.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::candidate::Candidate;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

/// Skills arrive either as a list or as one `,`/`;` separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

impl SkillsInput {
    /// Lower-cased, trimmed, empties removed, deduplicated.
    pub fn normalized(&self) -> BTreeSet<String> {
        let raw: Vec<&str> = match self {
            SkillsInput::List(items) => items.iter().map(String::as_str).collect(),
            SkillsInput::Text(text) => text.split([',', ';']).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub project_name: Option<String>,
    pub query: Option<String>,
    pub required_skills: Option<SkillsInput>,
    pub nice_to_have: Option<SkillsInput>,
    pub team_size: Option<u32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub coverage_required: f64,
    pub coverage_nice: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Echoed from the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub candidates: Vec<SearchHit>,
    pub total: usize,
}

impl SearchRequest {
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// |candidate skills ∩ wanted| / max(1, |wanted|), case-insensitive.
pub fn coverage(candidate: &Candidate, wanted: &BTreeSet<String>) -> f64 {
    if wanted.is_empty() {
        return 0.0;
    }
    let have: BTreeSet<String> = candidate.skills.iter().map(|s| s.to_lowercase()).collect();
    wanted.intersection(&have).count() as f64 / wanted.len() as f64
}

/// Ranks by required coverage, nice-to-have coverage, then composite score;
/// applies the text filter (ignored when nothing matches) and the limit.
pub fn search(candidates: &[Candidate], request: &SearchRequest) -> SearchResults {
    let required = request
        .required_skills
        .as_ref()
        .map(SkillsInput::normalized)
        .unwrap_or_default();
    let nice = request
        .nice_to_have
        .as_ref()
        .map(SkillsInput::normalized)
        .unwrap_or_default();

    let mut hits: Vec<SearchHit> = candidates
        .iter()
        .map(|c| SearchHit {
            coverage_required: coverage(c, &required),
            coverage_nice: coverage(c, &nice),
            candidate: c.clone(),
        })
        .collect();

    hits.sort_by(|a, b| {
        cmp_desc(a.coverage_required, b.coverage_required)
            .then_with(|| cmp_desc(a.coverage_nice, b.coverage_nice))
            .then_with(|| cmp_desc(a.candidate.composite_score, b.candidate.composite_score))
    });

    if let Some(query) = request.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let needle = query.to_lowercase();
        let filtered: Vec<SearchHit> = hits
            .iter()
            .filter(|h| h.candidate.matches_text(&needle))
            .cloned()
            .collect();
        if !filtered.is_empty() {
            hits = filtered;
        }
    }

    let total = hits.len();
    hits.truncate(request.effective_limit());

    SearchResults {
        project_name: request.project_name.clone(),
        candidates: hits,
        total,
    }
}

fn cmp_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
