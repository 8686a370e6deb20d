use thiserror::Error;

/// Columns the pipeline understands. Anything else in the header is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    EmployeeId,
    Name,
    BusinessUnit,
    Role,
    Skills,
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
    PastProjects,
    PerformanceSummary,
    YearsExperience,
}

impl Column {
    /// Maps a trimmed header name (or one of its aliases) to a known column.
    pub fn from_header(name: &str) -> Option<Self> {
        let column = match name {
            "EmployeeID" | "employee_id" => Column::EmployeeId,
            "Name" => Column::Name,
            "BusinessUnit" | "Business Unit" => Column::BusinessUnit,
            "Role" | "Title" => Column::Role,
            "Skills" | "Skill" => Column::Skills,
            "O_Score" => Column::Openness,
            "C_Score" => Column::Conscientiousness,
            "E_Score" => Column::Extraversion,
            "A_Score" => Column::Agreeableness,
            "N_Score" => Column::Neuroticism,
            "PastProjects" => Column::PastProjects,
            "PerformanceReviewSummary" | "Summary" => Column::PerformanceSummary,
            "YearsExperience" | "Years Experience" => Column::YearsExperience,
            _ => return None,
        };
        Some(column)
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::EmployeeId => "EmployeeID",
            Column::Name => "Name",
            Column::BusinessUnit => "BusinessUnit",
            Column::Role => "Role",
            Column::Skills => "Skills",
            Column::Openness => "O_Score",
            Column::Conscientiousness => "C_Score",
            Column::Extraversion => "E_Score",
            Column::Agreeableness => "A_Score",
            Column::Neuroticism => "N_Score",
            Column::PastProjects => "PastProjects",
            Column::PerformanceSummary => "PerformanceReviewSummary",
            Column::YearsExperience => "YearsExperience",
        }
    }
}

/// Per-row failure. The row is dropped and ingestion continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("missing employee identifier")]
    MissingId,

    #[error("missing name")]
    MissingName,
}

/// Header positions resolved to known columns, fixed once per ingestion.
#[derive(Debug, Clone)]
pub struct HeaderLayout {
    columns: Vec<Option<Column>>,
}

impl HeaderLayout {
    pub fn new(names: &[String]) -> Self {
        Self {
            columns: names.iter().map(|n| Column::from_header(n)).collect(),
        }
    }

    /// Total header width, known or not. Rows shorter than this are dropped.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&Some(column))
    }

    /// Zips tokens onto the layout. Later duplicates of a column overwrite earlier ones.
    pub fn record(&self, tokens: &[String]) -> RawRecord {
        let mut record = RawRecord::default();
        for (position, column) in self.columns.iter().enumerate() {
            let Some(column) = column else { continue };
            let value = tokens.get(position).cloned().unwrap_or_default();
            record.set(*column, value);
        }
        record
    }
}

/// One header-mapped source row. Absent columns are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub employee_id: String,
    pub name: String,
    pub business_unit: String,
    pub role: String,
    pub skills: String,
    pub o_score: String,
    pub c_score: String,
    pub e_score: String,
    pub a_score: String,
    pub n_score: String,
    pub past_projects: String,
    pub performance_summary: String,
    pub years_experience: String,
}

impl RawRecord {
    fn set(&mut self, column: Column, value: String) {
        let slot = match column {
            Column::EmployeeId => &mut self.employee_id,
            Column::Name => &mut self.name,
            Column::BusinessUnit => &mut self.business_unit,
            Column::Role => &mut self.role,
            Column::Skills => &mut self.skills,
            Column::Openness => &mut self.o_score,
            Column::Conscientiousness => &mut self.c_score,
            Column::Extraversion => &mut self.e_score,
            Column::Agreeableness => &mut self.a_score,
            Column::Neuroticism => &mut self.n_score,
            Column::PastProjects => &mut self.past_projects,
            Column::PerformanceSummary => &mut self.performance_summary,
            Column::YearsExperience => &mut self.years_experience,
        };
        *slot = value;
    }

    /// Rejects rows without an identifier or a name.
    pub fn validate(self) -> Result<Self, RowError> {
        if self.employee_id.trim().is_empty() {
            return Err(RowError::MissingId);
        }
        if self.name.trim().is_empty() {
            return Err(RowError::MissingName);
        }
        Ok(self)
    }

    /// Comma-separated skills, trimmed, empties removed, source order kept.
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn tokens(list: &[&str]) -> Vec<String> {
        names(list)
    }

    #[test]
    fn test_column_aliases_resolve() {
        assert_eq!(Column::from_header("employee_id"), Some(Column::EmployeeId));
        assert_eq!(Column::from_header("Title"), Some(Column::Role));
        assert_eq!(Column::from_header("Business Unit"), Some(Column::BusinessUnit));
        assert_eq!(Column::from_header("Summary"), Some(Column::PerformanceSummary));
        assert_eq!(Column::from_header("Salary"), None);
    }

    #[test]
    fn test_layout_ignores_unknown_columns() {
        let layout = HeaderLayout::new(&names(&["EmployeeID", "Salary", "Name"]));
        assert_eq!(layout.width(), 3);
        let record = layout.record(&tokens(&["E1", "100k", "Jane"]));
        assert_eq!(record.employee_id, "E1");
        assert_eq!(record.name, "Jane");
    }

    #[test]
    fn test_layout_later_duplicate_wins() {
        let layout = HeaderLayout::new(&names(&["EmployeeID", "Name", "Role", "Title"]));
        let record = layout.record(&tokens(&["E1", "Jane", "Engineer", "Director"]));
        assert_eq!(record.role, "Director");
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let layout = HeaderLayout::new(&names(&["EmployeeID", "Name"]));
        let record = layout.record(&tokens(&["E1", "Jane"]));
        assert_eq!(record.skills, "");
        assert_eq!(record.o_score, "");
        assert!(!layout.has(Column::Skills));
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let record = RawRecord {
            employee_id: "  ".to_string(),
            name: "Jane".to_string(),
            ..Default::default()
        };
        assert_eq!(record.validate(), Err(RowError::MissingId));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let record = RawRecord {
            employee_id: "E1".to_string(),
            ..Default::default()
        };
        assert_eq!(record.validate(), Err(RowError::MissingName));
    }

    #[test]
    fn test_skill_list_trims_and_drops_empties() {
        let record = RawRecord {
            skills: " Go, ,Kubernetes ,Go".to_string(),
            ..Default::default()
        };
        assert_eq!(record.skill_list(), vec!["Go", "Kubernetes", "Go"]);
    }
}
