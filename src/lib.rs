//! Resume Match - client for the AI resume suitability analyzer
//!
//! This library wraps the analyzer's REST API behind typed calls. The one
//! piece of real protocol logic is the resilient analysis submission:
//! multipart upload, exponential-backoff retries, and classification of
//! the response into a complete report, a pending-timeout notice, or an
//! error the caller can act on.

pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::executor::{ExecutorError, ExecutorState, RetryPolicy};
pub use crate::core::gate::{check_submission, GateDecision};
pub use crate::models::{AnalysisOutcome, AnalysisReport, AnalysisRequest, ResumeFile, Session};
pub use crate::services::{ApiClient, ApiError, SessionStore};
