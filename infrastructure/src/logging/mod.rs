//! Logging infrastructure: the invocation audit log.
//!
//! Provides [`JsonlAuditLog`], an append-only JSONL writer that implements
//! the [`AuditLog`](rollcall_application::AuditLog) port.

mod jsonl_audit_log;

pub use jsonl_audit_log::JsonlAuditLog;
