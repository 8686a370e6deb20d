//! Candidate ingestion: turns delimited source text into scored `Candidate`s.
//!
//! Tolerant by construction: preamble lines before the header, short rows,
//! delimiter-only rows and individual bad rows are all skipped. The only
//! whole-input failure is a missing header.

pub mod jitter;
pub mod rationale;
pub mod record;
pub mod scoring;
pub mod tokenizer;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::ingest::jitter::{JitterSource, RngJitter};
use crate::ingest::rationale::{full_rationale, short_rationale, RationaleInput};
use crate::ingest::record::{Column, HeaderLayout, RawRecord};
use crate::ingest::scoring::{
    compute_composite_score, compute_network_score, compute_semantic_score, compute_skill_score,
    estimate_experience, explicit_experience, finalize_composite, normalize_trait,
    ScoringWeights,
};
use crate::models::candidate::{Candidate, Personality};

const TOP_SKILLS: usize = 6;
const DEFAULT_TITLE: &str = "Team Member";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not find a header line (expected one of EmployeeID, Name, BusinessUnit)")]
    HeaderNotFound,
}

/// A row that was dropped for a reportable reason.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    /// 1-based position among non-blank lines.
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct IngestReport {
    pub candidates: Vec<Candidate>,
    /// Data lines after the header, including skipped ones.
    pub rows_scanned: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Parses source text with entropy-seeded jitter, dropping the row report.
#[allow(dead_code)]
pub fn parse_source(text: &str) -> Result<Vec<Candidate>, IngestError> {
    let mut jitter = RngJitter::from_entropy();
    parse_source_with(text, &mut jitter, &ScoringWeights::default()).map(|r| r.candidates)
}

/// Parses source text, drawing one jitter value per converted row.
pub fn parse_source_with<J: JitterSource + ?Sized>(
    text: &str,
    jitter: &mut J,
    weights: &ScoringWeights,
) -> Result<IngestReport, IngestError> {
    let lines = tokenizer::non_blank_lines(text);
    let header_index = tokenizer::find_header(&lines).ok_or(IngestError::HeaderNotFound)?;

    let layout = HeaderLayout::new(&tokenizer::parse_header(lines[header_index]));
    if !layout.has(Column::EmployeeId) || !layout.has(Column::Name) {
        warn!(
            "Header at line {} lacks {} or {}; every row will be rejected",
            header_index + 1,
            Column::EmployeeId.label(),
            Column::Name.label()
        );
    }

    let mut candidates = Vec::new();
    let mut rejected = Vec::new();
    let data_lines = &lines[header_index + 1..];

    for (offset, line) in data_lines.iter().enumerate() {
        let line_no = header_index + offset + 2;

        if tokenizer::is_delimiter_only(line) {
            continue;
        }

        let tokens = tokenizer::tokenize_row(line);
        if tokens.len() < layout.width() {
            debug!(
                "Skipping short row at line {line_no}: {} of {} fields",
                tokens.len(),
                layout.width()
            );
            continue;
        }

        let result = layout
            .record(&tokens)
            .validate()
            .map(|record| convert_record(record, jitter, weights));

        match result {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                warn!("Rejected row at line {line_no}: {e}");
                rejected.push(RejectedRow {
                    line: line_no,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(IngestReport {
        candidates,
        rows_scanned: data_lines.len(),
        rejected,
    })
}

/// Converts a validated record into a scored candidate.
pub fn convert_record<J: JitterSource + ?Sized>(
    record: RawRecord,
    jitter: &mut J,
    weights: &ScoringWeights,
) -> Candidate {
    let personality = Personality {
        openness: normalize_trait(&record.o_score),
        conscientiousness: normalize_trait(&record.c_score),
        extraversion: normalize_trait(&record.e_score),
        agreeableness: normalize_trait(&record.a_score),
        neuroticism: normalize_trait(&record.n_score),
    };

    let skills = record.skill_list();
    let base = compute_composite_score(&personality, weights);
    let composite_score = finalize_composite(base, jitter.next_jitter());

    let years_experience = explicit_experience(&record.years_experience)
        .unwrap_or_else(|| estimate_experience(&record.role));

    let title = if record.role.trim().is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        record.role.clone()
    };

    let rationale_short = short_rationale(skills.len(), years_experience, &record.business_unit);
    let rationale_full = full_rationale(&RationaleInput {
        name: &record.name,
        title: &title,
        business_unit: &record.business_unit,
        skills: &skills,
        past_projects: &record.past_projects,
        performance_summary: &record.performance_summary,
    });

    Candidate {
        id: record.employee_id,
        name: record.name,
        title,
        top_skills: skills.iter().take(TOP_SKILLS).cloned().collect(),
        skill_score: compute_skill_score(skills.len()),
        skills,
        network_score: compute_network_score(&personality),
        semantic_score: compute_semantic_score(&personality),
        personality,
        composite_score,
        years_experience,
        business_unit: record.business_unit,
        past_projects: record.past_projects,
        rationale_short,
        rationale_full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::jitter::NoJitter;

    const HEADER: &str = "EmployeeID,Name,BusinessUnit,Role,Skills,O_Score,C_Score,E_Score,A_Score,N_Score,PastProjects,PerformanceReviewSummary";
    const JANE: &str = r#"E1,Jane Doe,Engineering,Senior Engineer,"Go, Kubernetes",4,5,3,4,2,Migrated billing system,Exceeds expectations"#;

    fn exact(text: &str) -> IngestReport {
        parse_source_with(text, &mut NoJitter, &ScoringWeights::default()).unwrap()
    }

    #[test]
    fn test_reference_row() {
        let candidates = parse_source(&format!("{HEADER}\n{JANE}\n")).unwrap();
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.id, "E1");
        assert_eq!(c.name, "Jane Doe");
        assert_eq!(c.skills, vec!["Go", "Kubernetes"]);
        assert_eq!(c.years_experience, 8);
        assert!((0.3..=1.0).contains(&c.composite_score));
    }

    #[test]
    fn test_reference_row_exact_scores() {
        let report = exact(&format!("{HEADER}\n{JANE}"));
        let c = &report.candidates[0];
        assert!((c.composite_score - 0.80).abs() < 1e-9);
        assert!((c.skill_score - 0.2).abs() < 1e-12);
        assert!((c.network_score - 0.48).abs() < 1e-12);
        assert!((c.semantic_score - 0.8).abs() < 1e-12);
        assert_eq!(c.title, "Senior Engineer");
        assert_eq!(c.top_skills, vec!["Go", "Kubernetes"]);
        assert_eq!(c.business_unit, "Engineering");
        assert_eq!(c.past_projects, "Migrated billing system");
        assert!(!c.rationale_short.is_empty());
        assert!(c.rationale_full.contains("Exceeds expectations"));
    }

    #[test]
    fn test_missing_id_row_excluded() {
        // Empty first field is absorbed by the leading-column drop, leaving a short row.
        let no_id = JANE.replacen("E1", "", 1);
        let report = exact(&format!("{HEADER}\n{no_id}\n{JANE}"));
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].id, "E1");
    }

    #[test]
    fn test_missing_id_in_inner_column_is_rejected() {
        let text = "Name,EmployeeID,Role\nJane,,Engineer\nJoe,E2,Analyst";
        let report = exact(text);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].id, "E2");
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 2);
        assert_eq!(report.rejected[0].reason, "missing employee identifier");
    }

    #[test]
    fn test_header_not_found() {
        let result = parse_source("Quarterly talent export\n");
        assert!(matches!(result, Err(IngestError::HeaderNotFound)));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(parse_source(""), Err(IngestError::HeaderNotFound)));
    }

    #[test]
    fn test_header_found_after_preamble() {
        let text = format!("Talent export\n\n,,,\nGenerated for Q3\n{HEADER}\n{JANE}\n");
        let report = exact(&text);
        assert_eq!(report.candidates.len(), 1);
    }

    #[test]
    fn test_short_row_dropped_not_padded() {
        let text = format!("{HEADER}\nE2,Short Row,Finance\n{JANE}");
        let report = exact(&text);
        assert_eq!(report.candidates.len(), 1);
        assert!(report.rejected.is_empty());
        assert_eq!(report.rows_scanned, 2);
    }

    #[test]
    fn test_delimiter_only_row_skipped() {
        let text = format!("{HEADER}\n,,,,,,,,,,,,\n{JANE}");
        assert_eq!(exact(&text).candidates.len(), 1);
    }

    #[test]
    fn test_leading_empty_column_is_dropped_on_both_sides() {
        let text = format!(",{HEADER}\n,{JANE}\r\n");
        let report = exact(&text);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].id, "E1");
    }

    #[test]
    fn test_quoted_name_with_comma() {
        let row = r#"E9,"Smith, John",Finance,Analyst,SQL,3,3,3,3,3,,"#;
        let report = exact(&format!("{HEADER}\n{row}"));
        assert_eq!(report.candidates[0].name, "Smith, John");
        assert_eq!(report.candidates[0].years_experience, 4);
    }

    #[test]
    fn test_non_finite_traits_default_to_zero() {
        let text = "EmployeeID,Name,Role,O_Score,C_Score\nE1,Jane,Analyst,NaN,4\nE2,Joe,Analyst,Infinity,4";
        let report = exact(text);
        assert!(report.rejected.is_empty());
        assert_eq!(report.candidates.len(), 2);
        for c in &report.candidates {
            assert_eq!(c.personality.openness, 0.0);
            assert!((c.personality.conscientiousness - 0.8).abs() < 1e-12);
            // 0.8*0.3 + (1-0)*0.1 = 0.34
            assert!((c.composite_score - 0.34).abs() < 1e-9);
            assert_eq!(c.semantic_score, 0.0);
        }
    }

    #[test]
    fn test_missing_traits_clamp_to_floor() {
        let row = "E3,No Traits,Ops,,,,,,,,,";
        let report = exact(&format!("{HEADER}\n{row}"));
        let c = &report.candidates[0];
        assert_eq!(c.composite_score, 0.3);
        assert_eq!(c.title, "Team Member");
        assert_eq!(c.years_experience, 5);
        assert!(c.skills.is_empty());
        assert!(c.rationale_short.starts_with("Diverse background"));
    }

    #[test]
    fn test_output_preserves_row_order() {
        let rows: Vec<String> = (1..=5)
            .map(|i| format!("E{i},Person {i},Ops,Analyst,SQL,3,3,3,3,3,,"))
            .collect();
        let report = exact(&format!("{HEADER}\n{}", rows.join("\n")));
        let ids: Vec<_> = report.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2", "E3", "E4", "E5"]);
    }

    #[test]
    fn test_top_skills_capped_at_six() {
        let row = r#"E4,Many Skills,Ops,Analyst,"a,b,c,d,e,f,g,h",3,3,3,3,3,,"#;
        let c = &exact(&format!("{HEADER}\n{row}")).candidates[0];
        assert_eq!(c.skills.len(), 8);
        assert_eq!(c.top_skills, vec!["a", "b", "c", "d", "e", "f"]);
        assert!((c.skill_score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_parses_agree_modulo_jitter() {
        let rows: Vec<String> = (1..=20)
            .map(|i| format!("E{i},Person {i},Ops,Lead {i},\"SQL, Go\",{},4,3,2,1,,", i % 5 + 1))
            .collect();
        let text = format!("{HEADER}\n{}", rows.join("\n"));
        let first = parse_source(&text).unwrap();
        let second = parse_source(&text).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.name, b.name);
            assert_eq!(a.skills, b.skills);
            assert_eq!(a.years_experience, b.years_experience);
            assert!((a.composite_score - b.composite_score).abs() <= 0.1);
        }
    }

    #[test]
    fn test_all_scores_in_range_under_adversarial_traits() {
        let rows = [
            "E1,A,Ops,Chief,x,-5,-5,-5,-5,-5,,",
            "E2,B,Ops,Chief,x,99,99,99,99,99,,",
            "E3,C,Ops,Chief,x,abc,,1e3,-1e3,0,,",
        ];
        let text = format!("{HEADER}\n{}", rows.join("\n"));
        let candidates = parse_source(&text).unwrap();
        assert_eq!(candidates.len(), 3);
        for c in &candidates {
            assert!((0.3..=1.0).contains(&c.composite_score), "{c:?}");
            assert!((0.0..=1.0).contains(&c.skill_score));
            assert!((0.0..=1.0).contains(&c.network_score));
            assert!((0.0..=1.0).contains(&c.semantic_score));
        }
    }

    #[test]
    fn test_years_experience_column_overrides_heuristic() {
        let text = "EmployeeID,Name,Role,YearsExperience\nE1,Jane,Senior Engineer,12\nE2,Joe,Senior Engineer,n/a";
        let report = exact(text);
        assert_eq!(report.candidates[0].years_experience, 12);
        assert_eq!(report.candidates[1].years_experience, 8);
    }

    #[test]
    fn test_seeded_jitter_reproducible_scores() {
        let text = format!("{HEADER}\n{JANE}");
        let weights = ScoringWeights::default();
        let a = parse_source_with(&text, &mut RngJitter::seeded(7), &weights).unwrap();
        let b = parse_source_with(&text, &mut RngJitter::seeded(7), &weights).unwrap();
        assert_eq!(a.candidates[0].composite_score, b.candidates[0].composite_score);
    }
}
