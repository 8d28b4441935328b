// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Target namespace resolution and validation.

use crate::annotations::{Annotations, ReplicationMode};
use crate::error::{Reason, ReplicationError};
use k8s_openapi::api::core::v1::{Namespace, Secret};
use kube::{api::ListParams, Api, Client, Resource, ResourceExt};

/// Resolve the validated list of target namespaces for a source secret.
///
/// In explicit mode every listed namespace must exist and must not be
/// terminating; any violation fails the whole pass, since a broken target
/// list is a configuration error rather than a per-target failure. In "all"
/// mode the full namespace listing is returned unfiltered, including the
/// source's own namespace. A source without replication annotations yields
/// an empty list.
pub async fn resolve_target_namespaces(
    client: &Client,
    secret: &Secret,
    annotations: &Annotations,
) -> Result<Vec<String>, ReplicationError> {
    match annotations.mode(secret.annotations()) {
        ReplicationMode::None => Ok(Vec::new()),
        ReplicationMode::Explicit(names) => {
            let namespaces: Api<Namespace> = Api::all(client.clone());
            for name in &names {
                let namespace = namespaces.get(name).await.map_err(|e| {
                    ReplicationError::new(
                        Reason::InvalidNamespace,
                        secret.object_ref(&()),
                        format!("unable to get namespace {name}"),
                    )
                    .with_cause(e)
                })?;
                if namespace.metadata.deletion_timestamp.is_some() {
                    return Err(ReplicationError::new(
                        Reason::InvalidNamespace,
                        secret.object_ref(&()),
                        format!("namespace {name} is marked for deletion"),
                    ));
                }
            }
            Ok(names)
        }
        ReplicationMode::All => {
            let namespaces: Api<Namespace> = Api::all(client.clone());
            let list = namespaces.list(&ListParams::default()).await.map_err(|e| {
                ReplicationError::new(
                    Reason::InvalidNamespace,
                    secret.object_ref(&()),
                    "unable to list all namespaces",
                )
                .with_cause(e)
            })?;
            Ok(list.items.iter().map(ResourceExt::name_any).collect())
        }
    }
}
