//! Team archetypes and composition summaries built from the roster.
//!
//! Each archetype is the top three candidates under one ordering:
//! experience, skill coverage, or collaboration.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::candidate::Candidate;

const CORE_SIZE: usize = 3;
const MIN_POOL: usize = 3;
/// Years at which the experience metric saturates.
const EXPERIENCE_CEILING_YEARS: f64 = 15.0;
const HIGHLIGHT_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct TeamMetric {
    pub label: &'static str,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberRef {
    pub id: String,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamRecommendation {
    pub id: &'static str,
    pub name: &'static str,
    /// 0 – 100
    pub score: u32,
    pub focus: &'static str,
    pub summary: String,
    pub metrics: Vec<TeamMetric>,
    pub members: Vec<MemberRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamComposition {
    pub members: Vec<MemberRef>,
    pub unknown_ids: Vec<String>,
    pub highlighted_skills: Vec<SkillCount>,
}

struct Archetype {
    id: &'static str,
    name: &'static str,
    focus: &'static str,
    pitch: &'static str,
    order: fn(&Candidate, &Candidate) -> Ordering,
}

const ARCHETYPES: &[Archetype] = &[
    Archetype {
        id: "strategic-anchor",
        name: "Strategic Anchor Team",
        focus: "Strength: Senior-led strategy & complex decision making",
        pitch: "bring calm decision making for complex stakeholder moments.",
        order: by_experience,
    },
    Archetype {
        id: "insight-ops",
        name: "Insight Ops Team",
        focus: "Strength: Data-first execution & risk control",
        pitch: "keep experimentation grounded in data and fast measurement loops.",
        order: by_skill,
    },
    Archetype {
        id: "momentum-builders",
        name: "Momentum Builders",
        focus: "Strength: Collaboration & growth mindset",
        pitch: "create tight rituals and keep energy high for rapid delivery.",
        order: by_collaboration,
    },
];

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn by_experience(a: &Candidate, b: &Candidate) -> Ordering {
    b.years_experience
        .cmp(&a.years_experience)
        .then_with(|| desc(a.composite_score, b.composite_score))
}

fn by_skill(a: &Candidate, b: &Candidate) -> Ordering {
    desc(a.skill_score, b.skill_score).then_with(|| desc(a.composite_score, b.composite_score))
}

fn by_collaboration(a: &Candidate, b: &Candidate) -> Ordering {
    desc(a.network_score, b.network_score).then_with(|| desc(a.skill_score, b.skill_score))
}

/// Three archetype lineups. Empty when the pool has fewer than three candidates.
pub fn recommend_teams(candidates: &[Candidate]) -> Vec<TeamRecommendation> {
    if candidates.len() < MIN_POOL {
        return Vec::new();
    }

    ARCHETYPES
        .iter()
        .map(|archetype| {
            let mut ordered: Vec<&Candidate> = candidates.iter().collect();
            ordered.sort_by(|a, b| (archetype.order)(a, b));
            ordered.truncate(CORE_SIZE);
            build_team(archetype, &ordered)
        })
        .collect()
}

fn build_team(archetype: &Archetype, core: &[&Candidate]) -> TeamRecommendation {
    let overall = mean(core, |c| c.composite_score).clamp(0.0, 1.0);
    let avg_years = mean(core, |c| c.years_experience as f64);

    TeamRecommendation {
        id: archetype.id,
        name: archetype.name,
        score: (overall * 100.0).round() as u32,
        focus: archetype.focus,
        summary: format!("{} {}", list_members(core), archetype.pitch),
        metrics: vec![
            metric("Skill Fit", mean(core, |c| c.skill_score)),
            metric("Experience", (avg_years / EXPERIENCE_CEILING_YEARS).min(1.0)),
            metric("Collaboration", mean(core, |c| c.network_score)),
            metric("Innovation", mean(core, |c| c.semantic_score)),
        ],
        members: core.iter().map(|c| member_ref(c)).collect(),
    }
}

fn mean(members: &[&Candidate], value: impl Fn(&Candidate) -> f64) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    members.iter().map(|c| value(c)).sum::<f64>() / members.len() as f64
}

fn metric(label: &'static str, value: f64) -> TeamMetric {
    let value = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };
    TeamMetric {
        label,
        value,
        display: format!("{}%", (value * 100.0).round() as u32),
    }
}

fn format_member(c: &Candidate) -> String {
    if c.title.is_empty() {
        c.name.clone()
    } else {
        format!("{} - {}", c.name, c.title)
    }
}

/// "A", "A and B", "A, B, and C"
fn list_members(members: &[&Candidate]) -> String {
    let formatted: Vec<String> = members.iter().map(|c| format_member(c)).collect();
    match formatted.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} and {b}"),
        [a, b, c, ..] => format!("{a}, {b}, and {c}"),
    }
}

fn member_ref(c: &Candidate) -> MemberRef {
    MemberRef {
        id: c.id.clone(),
        name: c.name.clone(),
        title: c.title.clone(),
    }
}

/// Resolves a hand-picked team and summarises its most common skills.
pub fn compose_team(candidates: &[Candidate], ids: &[String]) -> TeamComposition {
    let index: HashMap<&str, &Candidate> =
        candidates.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut seen = HashSet::new();
    let mut members = Vec::new();
    let mut unknown_ids = Vec::new();

    for id in ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        match index.get(id.as_str()) {
            Some(c) => members.push(*c),
            None => unknown_ids.push(id.clone()),
        }
    }

    TeamComposition {
        members: members.iter().map(|c| member_ref(c)).collect(),
        unknown_ids,
        highlighted_skills: highlighted_skills(&members),
    }
}

/// Skill counts across members, by count desc then name asc.
fn highlighted_skills(members: &[&Candidate]) -> Vec<SkillCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for skill in members.iter().flat_map(|m| m.skills.iter()) {
        if !skill.is_empty() {
            *counts.entry(skill.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<SkillCount> = counts
        .into_iter()
        .map(|(skill, count)| SkillCount {
            skill: skill.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.skill.cmp(&b.skill)));
    ranked.truncate(HIGHLIGHT_LIMIT);
    ranked
}
