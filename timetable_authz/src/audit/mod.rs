//! Audit emitter seam
//!
//! The core decides *what* security-relevant events to emit; storing them
//! is an external collaborator's job. Applications install their own
//! [`AuditSink`]; the default sink writes structured log lines via
//! `tracing`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock, RwLock};

/// Kind of security-relevant event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditKind {
    LoginSuccess,
    Logout,
    AccessDenied,
}

impl AuditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditKind::LoginSuccess => "LOGIN_SUCCESS",
            AuditKind::Logout => "LOGOUT",
            AuditKind::AccessDenied => "ACCESS_DENIED",
        }
    }
}

/// A single audit record handed to the sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub principal_id: String,
    pub kind: AuditKind,
    pub timestamp: DateTime<Utc>,
}

/// Destination for audit events; persistence lives behind this seam
pub trait AuditSink: Send + Sync {
    fn emit(&self, event: &AuditEvent);
}

/// Default sink: structured log lines
struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, event: &AuditEvent) {
        tracing::info!(
            kind = event.kind.as_str(),
            principal_id = %event.principal_id,
            timestamp = %event.timestamp,
            "audit event"
        );
    }
}

static AUDIT_SINK: LazyLock<RwLock<Arc<dyn AuditSink>>> =
    LazyLock::new(|| RwLock::new(Arc::new(TracingAuditSink)));

/// Install an application-provided audit sink, replacing the default
pub fn set_audit_sink(sink: Arc<dyn AuditSink>) {
    let mut guard = match AUDIT_SINK.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = sink;
}

/// Emit one event through the currently installed sink
pub(crate) fn emit_audit_event(kind: AuditKind, principal_id: &str) {
    let event = AuditEvent {
        principal_id: principal_id.to_string(),
        kind,
        timestamp: Utc::now(),
    };

    let sink = {
        let guard = match AUDIT_SINK.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(&*guard)
    };
    sink.emit(&event);
}
