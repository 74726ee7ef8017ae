//! Per-subject annotation progress.

use serde::Serialize;

use super::SubjectCode;

/// Domain counts for one subject across all reviewers.
///
/// Serialises as `{subjectCode, totalDomains, ratedDomains,
/// completionPercentage}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    subject_code: SubjectCode,
    total_domains: u64,
    rated_domains: u64,
    completion_percentage: f64,
}

impl SubjectStats {
    /// Build stats from raw counts; the percentage is derived.
    pub fn new(subject_code: SubjectCode, total_domains: u64, rated_domains: u64) -> Self {
        Self {
            subject_code,
            total_domains,
            rated_domains,
            completion_percentage: completion_percentage(rated_domains, total_domains),
        }
    }

    pub fn subject_code(&self) -> &SubjectCode {
        &self.subject_code
    }

    pub fn total_domains(&self) -> u64 {
        self.total_domains
    }

    /// Distinct domains with at least one rating from any reviewer.
    pub fn rated_domains(&self) -> u64 {
        self.rated_domains
    }

    pub fn completion_percentage(&self) -> f64 {
        self.completion_percentage
    }
}

/// `rated / total * 100` rounded to two decimals; zero when `total` is zero.
///
/// # Examples
/// ```
/// use rating_backend::domain::completion_percentage;
///
/// assert_eq!(completion_percentage(1, 3), 33.33);
/// assert_eq!(completion_percentage(0, 0), 0.0);
/// ```
pub fn completion_percentage(rated: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = rated as f64 / total as f64;
    (ratio * 10_000.0).round() / 100.0
}

/// Aggregated progress for every subject, ordered by subject code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    stats: Vec<SubjectStats>,
}

impl StatsReport {
    /// Sort `stats` by subject code and wrap them.
    pub fn new(mut stats: Vec<SubjectStats>) -> Self {
        stats.sort_by(|a, b| a.subject_code.cmp(&b.subject_code));
        Self { stats }
    }

    pub fn stats(&self) -> &[SubjectStats] {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn code(raw: &str) -> SubjectCode {
        SubjectCode::new(raw).expect("valid subject code")
    }

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(0, 10, 0.0)]
    #[case(10, 10, 100.0)]
    #[case(1, 3, 33.33)]
    #[case(2, 3, 66.67)]
    #[case(1, 8, 12.5)]
    fn percentage_rounds_to_two_decimals(
        #[case] rated: u64,
        #[case] total: u64,
        #[case] expected: f64,
    ) {
        assert!((completion_percentage(rated, total) - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn report_orders_subjects_and_serialises_camel_case() {
        let report = StatsReport::new(vec![
            SubjectStats::new(code("PHYS"), 4, 1),
            SubjectStats::new(code("BIO"), 2, 2),
        ]);
        let value = serde_json::to_value(&report).expect("serialise");
        assert_eq!(
            value,
            json!({
                "stats": [
                    { "subjectCode": "BIO", "totalDomains": 2, "ratedDomains": 2, "completionPercentage": 100.0 },
                    { "subjectCode": "PHYS", "totalDomains": 4, "ratedDomains": 1, "completionPercentage": 25.0 },
                ]
            })
        );
    }
}
