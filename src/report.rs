// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Batch failure reporting: warning events for classified failures,
//! log-and-passthrough for everything else.

use crate::constants::OPERATOR_NAME;
use crate::error::{ReplicationError, ReplicatorError};
use kube::runtime::events::{Event, EventType, Recorder, Reporter};
use kube::Client;
use tracing::{error, warn};

/// Reports replication failures as Kubernetes warning events.
pub struct ErrorReporter {
    recorder: Recorder,
}

impl ErrorReporter {
    pub fn new(client: Client) -> Self {
        let reporter = Reporter {
            controller: OPERATOR_NAME.to_string(),
            instance: None,
        };
        Self {
            recorder: Recorder::new(client, reporter),
        }
    }

    /// Report a batch of failures collected during a reconciliation pass.
    ///
    /// Classified failures are published as warning events on their source
    /// (and destination, where set) and dropped from the result; an event
    /// that cannot be published keeps its record in the result instead of
    /// failing the batch. Unclassified failures are logged and passed
    /// through. Returns the aggregate of everything left over, `Ok` for an
    /// empty batch.
    pub async fn report(&self, errors: Vec<ReplicatorError>) -> Result<(), ReplicatorError> {
        let mut remaining = Vec::new();

        for err in flatten(errors) {
            match err {
                ReplicatorError::Replication(record) => {
                    if let Err(e) = self.emit(&record).await {
                        warn!("Unable to record replication failure event: {}", e);
                        remaining.push(ReplicatorError::Replication(record));
                    }
                }
                other => {
                    error!("Unclassified replication failure: {}", other);
                    remaining.push(other);
                }
            }
        }

        match ReplicatorError::aggregate(remaining) {
            None => Ok(()),
            Some(aggregate) => Err(aggregate),
        }
    }

    async fn emit(&self, record: &ReplicationError) -> kube::Result<()> {
        let event = Event {
            type_: EventType::Warning,
            reason: record.reason.to_string(),
            note: Some(record.to_string()),
            action: "Replicate".to_string(),
            secondary: None,
        };
        let src_result = self.recorder.publish(&event, &record.src).await;
        if let Some(dst) = &record.dst {
            self.recorder.publish(&event, dst).await?;
        }
        src_result
    }
}

/// Flatten one level of aggregates into a flat batch
fn flatten(errors: Vec<ReplicatorError>) -> Vec<ReplicatorError> {
    let mut flat = Vec::with_capacity(errors.len());
    for err in errors {
        match err {
            ReplicatorError::Aggregate(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    flat
}
