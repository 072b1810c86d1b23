/// One job opening as displayed in the table.
///
/// Optional fields are `None` when the upstream value was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobPosting {
    pub company_name: String,
    pub role: String,
    pub years_of_experience: Option<String>,
    pub batch_eligible: Vec<String>,
    pub apply_link: String,
    pub salary: Option<String>,
}

impl JobPosting {
    pub fn years_display(&self) -> &str {
        self.years_of_experience
            .as_deref()
            .filter(|years| !years.is_empty())
            .unwrap_or(crate::NOT_AVAILABLE)
    }

    pub fn batch_display(&self) -> String {
        if self.batch_eligible.is_empty() {
            crate::NOT_AVAILABLE.to_string()
        } else {
            self.batch_eligible.join(", ")
        }
    }

    pub fn salary_display(&self) -> &str {
        self.salary
            .as_deref()
            .filter(|salary| !salary.is_empty())
            .unwrap_or(crate::NOT_DISCLOSED)
    }
}
