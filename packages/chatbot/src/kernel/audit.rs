//! Audit sink helpers.
//!
//! Audit lines are best effort: a sink failure is traced and swallowed.

use tracing::{debug, error};

use super::BaseAuditSink;

/// Send one line to the audit sink, tracing (not returning) delivery failures.
pub async fn audit_log(sink: &dyn BaseAuditSink, message: &str) {
    debug!(message = %message, "audit");

    if let Err(e) = sink.send(message).await {
        error!(error = %e, message = %message, "Failed to deliver audit line");
    }
}
