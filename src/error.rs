// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::api::core::v1::ObjectReference;
use std::fmt;
use thiserror::Error;

pub type Result<T, E = ReplicatorError> = std::result::Result<T, E>;

/// Reason codes attached to warning events for classified replication failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Unexpected API interaction failure
    Internal,
    /// Replica creation failed
    Create,
    /// Replica update failed
    Update,
    /// Target namespace missing, terminating, or unlistable
    InvalidNamespace,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Internal => "InternalError",
            Reason::Create => "CreateError",
            Reason::Update => "UpdateError",
            Reason::InvalidNamespace => "InvalidNamespace",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified replication failure tied to a source object, and optionally
/// to the destination object where it occurred. These are the failures the
/// reporter turns into Kubernetes events.
#[derive(Debug)]
pub struct ReplicationError {
    pub reason: Reason,
    pub src: ObjectReference,
    pub dst: Option<ObjectReference>,
    pub message: String,
    pub cause: Option<kube::Error>,
}

impl ReplicationError {
    pub fn new(reason: Reason, src: ObjectReference, message: impl Into<String>) -> Self {
        Self {
            reason,
            src,
            dst: None,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_dst(mut self, dst: ObjectReference) -> Self {
        self.dst = Some(dst);
        self
    }

    pub fn with_cause(mut self, cause: kube::Error) -> Self {
        self.cause = Some(cause);
        self
    }
}

impl fmt::Display for ReplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.message, cause),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ReplicationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[derive(Debug, Error)]
pub enum ReplicatorError {
    #[error(transparent)]
    Replication(Box<ReplicationError>),

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("unable to hash secret data: {0}")]
    Hash(#[from] serde_json::Error),

    #[error("unable to find source secret {namespace}/{name}")]
    SourceSecretLookup {
        namespace: String,
        name: String,
        #[source]
        cause: kube::Error,
    },

    #[error("{}", join_messages(.0))]
    Aggregate(Vec<ReplicatorError>),
}

impl From<ReplicationError> for ReplicatorError {
    fn from(err: ReplicationError) -> Self {
        ReplicatorError::Replication(Box::new(err))
    }
}

impl ReplicatorError {
    /// Combine a batch of failures into a single error, `None` when the batch is empty
    pub fn aggregate(errors: Vec<ReplicatorError>) -> Option<ReplicatorError> {
        if errors.is_empty() {
            None
        } else {
            Some(ReplicatorError::Aggregate(errors))
        }
    }
}

fn join_messages(errors: &[ReplicatorError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" - ")
}
