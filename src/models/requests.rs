use serde::{Deserialize, Serialize};
use validator::Validate;

/// A resume file read from disk, ready for multipart upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

/// Everything needed for one analysis submission. Built from local input,
/// validated by the submission gate, never persisted.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: ResumeFile,
    pub job_description: String,
}

/// Body for POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body for POST /api/auth/register
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Body for PUT /api/profile/user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

/// Body for PUT /api/admin/users/{id}/role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}
