use crate::JobPosting;

/// Substitute for missing years of experience or batch eligibility.
pub const NOT_AVAILABLE: &str = "N/A";
/// Substitute for a missing salary.
pub const NOT_DISCLOSED: &str = "Not Disclosed";

/// Builds the multi-line summary that the share action copies.
pub fn share_text(posting: &JobPosting) -> String {
    format!(
        "Company Name: {company}\n\
         Role: {role}\n\
         Years of Experience: {years}\n\
         Batch Eligible: {batch}\n\
         Apply Link: {link}\n\
         Salary: {salary}",
        company = posting.company_name,
        role = posting.role,
        years = posting.years_display(),
        batch = posting.batch_display(),
        link = posting.apply_link,
        salary = posting.salary_display(),
    )
}
