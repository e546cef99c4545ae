use serde::{Deserialize, Serialize};

/// Completed suitability analysis, exactly as the backend AI produces it.
///
/// Field names are snake_case on the wire; the backend passes the AI
/// payload through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub suitability_score: u8,
    pub is_suitable: bool,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub key_strengths: Vec<String>,
    #[serde(default)]
    pub key_gaps: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
}

impl AnalysisReport {
    /// Verdict banding used by the original result card: >= 80 strong,
    /// >= 50 worth a review, below that a weak fit.
    pub fn verdict(&self) -> &'static str {
        if self.suitability_score >= 80 && self.is_suitable {
            "Highly Recommended"
        } else if self.suitability_score >= 50 {
            "Further Review Needed"
        } else {
            "Weak Fit"
        }
    }
}

/// Outcome of a successful analysis submission.
///
/// `PendingTimeout` is not an error: the backend accepted the job but did
/// not finish scoring synchronously. The result shows up in the history
/// later, so callers must direct the user there instead of retrying.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Complete(AnalysisReport),
    PendingTimeout { message: Option<String> },
}

impl AnalysisOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, AnalysisOutcome::PendingTimeout { .. })
    }
}

/// Authenticated session: an opaque bearer token plus the username it was
/// issued for. Persisted by [`crate::services::SessionStore`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

/// One row of the user's analysis history (GET /api/profile/history).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(rename = "jobTitle", default)]
    pub job_title: Option<String>,
    #[serde(rename = "suitabilityScore", default)]
    pub suitability_score: Option<i32>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::NaiveDateTime,
    #[serde(rename = "fileUrl", default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Profile data for the logged-in user (GET /api/profile/user).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: Option<String>,
}

/// Aggregate counters shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(rename = "totalUsers")]
    pub total_users: u64,
    #[serde(rename = "totalAnalyses")]
    pub total_analyses: u64,
}

/// One user row in the admin user table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    pub role: String,
    #[serde(rename = "analysisCount", default)]
    pub analysis_count: u64,
}

/// One analysis row in the admin analyses table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAnalysis {
    pub id: i64,
    #[serde(rename = "jobTitle", default)]
    pub job_title: Option<String>,
    #[serde(rename = "suitabilityScore", default)]
    pub suitability_score: Option<i32>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_verdict_bands() {
        let mut report = AnalysisReport {
            suitability_score: 85,
            is_suitable: true,
            job_title: None,
            key_strengths: vec![],
            key_gaps: vec![],
            recommendation: String::new(),
        };
        assert_eq!(report.verdict(), "Highly Recommended");

        report.suitability_score = 60;
        assert_eq!(report.verdict(), "Further Review Needed");

        report.suitability_score = 20;
        assert_eq!(report.verdict(), "Weak Fit");

        // A high score without the suitable flag is still only a review
        report.suitability_score = 90;
        report.is_suitable = false;
        assert_eq!(report.verdict(), "Further Review Needed");
    }

    #[test]
    fn test_history_entry_camel_case() {
        let json = r#"{
            "id": 7,
            "jobTitle": "Backend Engineer",
            "suitabilityScore": 72,
            "createdAt": "2026-08-01T10:15:30",
            "fileUrl": null
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.job_title.as_deref(), Some("Backend Engineer"));
        assert_eq!(entry.suitability_score, Some(72));
        assert!(entry.file_url.is_none());
    }
}
