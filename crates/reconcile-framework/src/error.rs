//! # Reconciliation Errors
//!
//! This module defines the error types shared by every reconciler. Centralizing them
//! keeps the diagnostics the host shows to users consistent across entity kinds.
//!
//! Two layers exist:
//! - [`RemoteError`] is what an outbound API call reports (status code or transport failure).
//! - [`ReconcileError`] is what a reconciler operation reports to the host. Remote failures
//!   are wrapped, never flattened, so the status code stays inspectable through `source()`.

use std::fmt;

/// Failure of a single outbound call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl RemoteError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        RemoteError::Status {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::status(404, message)
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// The call never got an answer from the remote.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            RemoteError::Transport(_) | RemoteError::Cancelled | RemoteError::DeadlineExceeded
        )
    }
}

/// The remote step an operation was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    ReadBack,
    Patch(&'static str),
    Delete,
    List,
    Invoke,
}

impl Operation {
    /// True when the call targets one existing remote entity by id.
    pub fn addresses_entity(&self) -> bool {
        !matches!(self, Operation::Create | Operation::List)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => f.write_str("create"),
            Operation::Read => f.write_str("read"),
            Operation::ReadBack => f.write_str("read-back"),
            Operation::Patch(field) => write!(f, "patch of `{field}`"),
            Operation::Delete => f.write_str("delete"),
            Operation::List => f.write_str("list"),
            Operation::Invoke => f.write_str("invoke"),
        }
    }
}

/// Who has to act on an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The declaration or provider setup is invalid.
    Configuration,
    /// The remote system answered and refused or lacked the entity.
    Rejected,
    /// The remote system could not be reached in time.
    Unreachable,
}

/// Errors reported by reconciler operations.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("one of {} must be set to a non-empty value", .candidates.join(", "))]
    MissingIdentifier { candidates: Vec<&'static str> },

    #[error("{resource}: `{field}` cannot be changed after creation (stored {stored}, declared {declared}); recreate the resource instead")]
    ImmutableFieldChanged {
        resource: &'static str,
        field: &'static str,
        stored: String,
        declared: String,
    },

    #[error("{resource} cannot be updated; create a new resource to run the action again")]
    UpdateNotSupported { resource: &'static str },

    #[error("{resource}: remote create response is incomplete: {detail}")]
    IncompleteCreateResponse {
        resource: &'static str,
        detail: String,
    },

    #[error("{resource} `{id}` not found: {source}")]
    RemoteNotFound {
        resource: &'static str,
        id: String,
        #[source]
        source: RemoteError,
    },

    #[error("{resource}: {operation} of `{target}` failed: {source}")]
    RemoteOperationFailed {
        resource: &'static str,
        operation: Operation,
        target: String,
        #[source]
        source: RemoteError,
    },

    #[error("{resource}: provider client is not configured")]
    NotConfigured { resource: &'static str },

    #[error("expected provider data of type {expected}, got {actual}")]
    ClientTypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid value for `{attribute}`: {reason}")]
    InvalidAttribute {
        attribute: &'static str,
        reason: String,
    },
}

impl ReconcileError {
    /// Wraps a remote failure.
    ///
    /// A 404 becomes [`ReconcileError::RemoteNotFound`] only when `operation` addresses an
    /// existing entity; a 404 from a create or a list is an ordinary failure.
    pub fn remote(
        resource: &'static str,
        operation: Operation,
        target: impl Into<String>,
        source: RemoteError,
    ) -> Self {
        let target = target.into();
        if source.is_not_found() && operation.addresses_entity() {
            ReconcileError::RemoteNotFound {
                resource,
                id: target,
                source,
            }
        } else {
            ReconcileError::RemoteOperationFailed {
                resource,
                operation,
                target,
                source,
            }
        }
    }

    /// Short title for host diagnostics.
    pub fn summary(&self) -> &'static str {
        match self {
            ReconcileError::MissingIdentifier { .. } => "Missing Identifier",
            ReconcileError::ImmutableFieldChanged { .. } => "Attribute Change Not Supported",
            ReconcileError::UpdateNotSupported { .. } => "Update Not Supported",
            ReconcileError::IncompleteCreateResponse { .. } => "Incomplete Create Response",
            ReconcileError::RemoteNotFound { .. } => "Resource Not Found",
            ReconcileError::RemoteOperationFailed { .. } => "Remote Operation Failed",
            ReconcileError::NotConfigured { .. } => "Provider Not Configured",
            ReconcileError::ClientTypeMismatch { .. } => "Unexpected Configure Type",
            ReconcileError::InvalidAttribute { .. } => "Invalid Attribute Value",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ReconcileError::MissingIdentifier { .. }
            | ReconcileError::ImmutableFieldChanged { .. }
            | ReconcileError::UpdateNotSupported { .. }
            | ReconcileError::NotConfigured { .. }
            | ReconcileError::ClientTypeMismatch { .. }
            | ReconcileError::InvalidAttribute { .. } => ErrorKind::Configuration,
            ReconcileError::IncompleteCreateResponse { .. }
            | ReconcileError::RemoteNotFound { .. } => ErrorKind::Rejected,
            ReconcileError::RemoteOperationFailed { source, .. } => {
                if source.is_unreachable() {
                    ErrorKind::Unreachable
                } else {
                    ErrorKind::Rejected
                }
            }
        }
    }

    /// The host should drop the entity from state instead of failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReconcileError::RemoteNotFound { .. })
    }

    pub fn remote_status(&self) -> Option<u16> {
        match self {
            ReconcileError::RemoteNotFound { source, .. }
            | ReconcileError::RemoteOperationFailed { source, .. } => source.status_code(),
            _ => None,
        }
    }
}
