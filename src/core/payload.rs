use crate::core::executor::ExecutorError;
use crate::models::{AnalysisOutcome, AnalysisReport};
use serde_json::Value;

/// Normalizes a 2xx analysis body to a JSON object.
///
/// Some backend revisions return the AI payload double-encoded: the HTTP
/// body is a JSON string whose content is the actual JSON object. Accept
/// both forms and unwrap the string form exactly once.
fn normalize(body: &str) -> Result<Value, ExecutorError> {
    let value: Value = serde_json::from_str(body.trim())
        .map_err(|e| ExecutorError::InvalidResponse(format!("body is not JSON: {}", e)))?;

    match value {
        Value::String(inner) => serde_json::from_str(&inner).map_err(|e| {
            ExecutorError::InvalidResponse(format!("string body is not JSON: {}", e))
        }),
        other => Ok(other),
    }
}

/// Parses a successful analysis response into its outcome.
///
/// A body carrying `status: "PENDING_TIMEOUT"` means the scoring job is
/// still running server-side; everything else must be a complete report.
pub fn parse_outcome(body: &str) -> Result<AnalysisOutcome, ExecutorError> {
    let value = normalize(body)?;

    if value.get("status").and_then(Value::as_str) == Some("PENDING_TIMEOUT") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Ok(AnalysisOutcome::PendingTimeout { message });
    }

    let report: AnalysisReport = serde_json::from_value(value)
        .map_err(|e| ExecutorError::InvalidResponse(format!("unexpected report shape: {}", e)))?;
    Ok(AnalysisOutcome::Complete(report))
}
