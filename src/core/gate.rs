use crate::models::{ResumeFile, Session};
use thiserror::Error;

/// Hard upload limit enforced before any network call: 5 MiB.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// File types the analyzer accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "png", "jpg", "jpeg"];

/// Local input problems. Shown inline to the user, never sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("missing file or description")]
    MissingInput,

    #[error("file size exceeds the 5 MiB limit ({size} bytes)")]
    FileTooLarge { size: u64 },

    #[error("unsupported file type: {extension} (accepted: pdf, doc, docx, png, jpg, jpeg)")]
    UnsupportedType { extension: String },
}

/// What the submission gate decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Input is complete and a session exists; hand off to the executor.
    Proceed,
    /// No session; the user has to log in before submitting.
    RedirectToLogin,
    /// Input is incomplete or the file is unacceptable.
    Invalid(ValidationIssue),
}

/// Validates an analysis submission before it touches the network.
///
/// Order is canonical: fields first (presence, size, type), then the
/// session. A submission with both a bad file and no session reports the
/// bad file.
pub fn check_submission(
    file: Option<&ResumeFile>,
    job_description: &str,
    session: Option<&Session>,
) -> GateDecision {
    let file = match file {
        Some(f) => f,
        None => return GateDecision::Invalid(ValidationIssue::MissingInput),
    };

    if job_description.trim().is_empty() {
        return GateDecision::Invalid(ValidationIssue::MissingInput);
    }

    if file.size() > MAX_RESUME_BYTES {
        return GateDecision::Invalid(ValidationIssue::FileTooLarge { size: file.size() });
    }

    match file.extension() {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => {}
        other => {
            return GateDecision::Invalid(ValidationIssue::UnsupportedType {
                extension: other.unwrap_or_else(|| "(none)".to_string()),
            })
        }
    }

    if session.is_none() {
        return GateDecision::RedirectToLogin;
    }

    GateDecision::Proceed
}
