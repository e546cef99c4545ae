use crate::models::domain::{AdminAnalysis, AdminUser};
use serde::{Deserialize, Serialize};

/// Response for POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// Generic `{message}` confirmation body (register, deletes, role update).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error envelope the backend attaches to 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Response for POST /api/profile/picture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureResponse {
    #[serde(rename = "profilePicture")]
    pub profile_picture: String,
}

/// One page of the admin user table (GET /api/admin/users)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<AdminUser>,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// One page of the admin analyses table (GET /api/admin/analyses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPage {
    pub analyses: Vec<AdminAnalysis>,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}
