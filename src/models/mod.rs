// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AdminAnalysis, AdminStats, AdminUser, AnalysisOutcome, AnalysisReport, HistoryEntry, Session,
    UserProfile,
};
pub use requests::{
    AnalysisRequest, LoginRequest, RegisterRequest, ResumeFile, UpdateProfileRequest,
    UpdateRoleRequest,
};
pub use responses::{
    AnalysisPage, ErrorBody, LoginResponse, MessageResponse, PictureResponse, UserPage,
};
