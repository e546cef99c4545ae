// Core submission logic exports
pub mod executor;
pub mod gate;
pub mod payload;

pub use executor::{classify_status, Disposition, ExecutorError, ExecutorState, RetryPolicy};
pub use gate::{check_submission, GateDecision, ValidationIssue, ACCEPTED_EXTENSIONS, MAX_RESUME_BYTES};
pub use payload::parse_outcome;
