//! Human-readable summaries shown next to each candidate. Not used in scoring.

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// "6 key skills with 8 years experience in Engineering"
pub fn short_rationale(skill_count: usize, years: u32, business_unit: &str) -> String {
    let skills = if skill_count > 0 {
        format!("{skill_count} key skills")
    } else {
        "Diverse background".to_string()
    };
    format!(
        "{skills} with {years} years experience in {}",
        or_fallback(business_unit, "various domains")
    )
}

pub struct RationaleInput<'a> {
    pub name: &'a str,
    pub title: &'a str,
    pub business_unit: &'a str,
    pub skills: &'a [String],
    pub past_projects: &'a str,
    pub performance_summary: &'a str,
}

pub fn full_rationale(input: &RationaleInput<'_>) -> String {
    let key_skills = if input.skills.is_empty() {
        "none listed".to_string()
    } else {
        input.skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
    };
    format!(
        "{} works in {} as {}. Key skills: {}. Past projects: {}. Performance: {}",
        input.name,
        or_fallback(input.business_unit, "various domains"),
        input.title,
        key_skills,
        or_fallback(input.past_projects, "Various initiatives"),
        or_fallback(input.performance_summary, "Strong contributor"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_rationale_with_skills() {
        assert_eq!(
            short_rationale(2, 8, "Engineering"),
            "2 key skills with 8 years experience in Engineering"
        );
    }

    #[test]
    fn test_short_rationale_fallbacks() {
        assert_eq!(
            short_rationale(0, 5, ""),
            "Diverse background with 5 years experience in various domains"
        );
    }

    #[test]
    fn test_full_rationale_uses_first_three_skills() {
        let skills: Vec<String> = ["Go", "Rust", "SQL", "Kafka"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let text = full_rationale(&RationaleInput {
            name: "Jane Doe",
            title: "Senior Engineer",
            business_unit: "Engineering",
            skills: &skills,
            past_projects: "",
            performance_summary: "Exceeds expectations",
        });
        assert_eq!(
            text,
            "Jane Doe works in Engineering as Senior Engineer. Key skills: Go, Rust, SQL. \
             Past projects: Various initiatives. Performance: Exceeds expectations"
        );
    }
}
