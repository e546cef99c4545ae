//! Plain-text rendering of API results, the terminal counterpart of the
//! original result cards and tables.

use crate::models::{
    AdminStats, AnalysisOutcome, AnalysisPage, HistoryEntry, UserPage, UserProfile,
};
use std::fmt::Write;

/// Renders an analysis outcome. A pending timeout gets the "check back
/// later" notice and deliberately no score card.
pub fn render_outcome(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::PendingTimeout { message } => {
            let mut out = String::from(
                "The analysis is taking longer than expected and is still processing.\n\
                 Check `resume-match history` later for the result.",
            );
            if let Some(message) = message {
                let _ = write!(out, "\nServer says: {}", message);
            }
            out
        }
        AnalysisOutcome::Complete(report) => {
            let mut out = String::new();
            let _ = writeln!(out, "Suitability Assessment");
            let _ = writeln!(out, "======================");
            if let Some(title) = &report.job_title {
                let _ = writeln!(out, "Position:  {}", title);
            }
            let _ = writeln!(out, "Score:     {} / 100", report.suitability_score);
            let _ = writeln!(out, "Verdict:   {}", report.verdict());

            if !report.key_strengths.is_empty() {
                let _ = writeln!(out, "\nKey Strengths (Matches)");
                for item in &report.key_strengths {
                    let _ = writeln!(out, "  + {}", item);
                }
            }
            if !report.key_gaps.is_empty() {
                let _ = writeln!(out, "\nKey Gaps (Areas to Improve)");
                for item in &report.key_gaps {
                    let _ = writeln!(out, "  - {}", item);
                }
            }
            if !report.recommendation.is_empty() {
                let _ = writeln!(out, "\nRecommendation");
                let _ = writeln!(out, "  {}", report.recommendation);
            }
            out.trim_end().to_string()
        }
    }
}

pub fn render_history(history: &[HistoryEntry]) -> String {
    if history.is_empty() {
        return "No analyses yet. Run `resume-match analyze` to get started!".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:<20} {:<6} {}", "ID", "DATE", "SCORE", "JOB TITLE");
    for entry in history {
        let _ = writeln!(
            out,
            "{:<6} {:<20} {:<6} {}",
            entry.id,
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry
                .suitability_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            entry.job_title.as_deref().unwrap_or("Analysis"),
        );
    }
    out.trim_end().to_string()
}

pub fn render_profile(profile: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Username:  {}", profile.username);
    let _ = writeln!(
        out,
        "Full name: {}",
        profile.full_name.as_deref().unwrap_or("(not set)")
    );
    let _ = writeln!(
        out,
        "Email:     {}",
        profile.email.as_deref().unwrap_or("(not set)")
    );
    if let Some(picture) = &profile.profile_picture {
        let _ = writeln!(out, "Picture:   {}", picture);
    }
    out.trim_end().to_string()
}

pub fn render_stats(stats: &AdminStats) -> String {
    format!(
        "Total users:    {}\nTotal analyses: {}",
        stats.total_users, stats.total_analyses
    )
}

pub fn render_users(page: &UserPage) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<16} {:<26} {:<8} {}",
        "ID", "USERNAME", "EMAIL", "ROLE", "ANALYSES"
    );
    for user in &page.users {
        let _ = writeln!(
            out,
            "{:<6} {:<16} {:<26} {:<8} {}",
            user.id,
            user.username,
            user.email.as_deref().unwrap_or("-"),
            user.role,
            user.analysis_count,
        );
    }
    let _ = write!(out, "Page {} of {}", page.current_page + 1, page.total_pages.max(1));
    out
}

pub fn render_analyses(page: &AnalysisPage) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<16} {:<6} {}",
        "ID", "USERNAME", "SCORE", "JOB TITLE"
    );
    for analysis in &page.analyses {
        let _ = writeln!(
            out,
            "{:<6} {:<16} {:<6} {}",
            analysis.id,
            analysis.username,
            analysis
                .suitability_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            analysis.job_title.as_deref().unwrap_or("Analysis"),
        );
    }
    let _ = write!(out, "Page {} of {}", page.current_page + 1, page.total_pages.max(1));
    out
}
