// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update of a single replica, gated by ownership and content hash.

use crate::constants::annotations::{LAST_OBSERVED_HASH, REPLICA_OF};
use crate::error::{Reason, ReplicationError, Result};
use crate::replication::hash::secret_hash;
use k8s_openapi::api::core::v1::Secret;
use kube::api::{ObjectMeta, PostParams};
use kube::{Api, Client, Resource, ResourceExt};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Replicates one source secret into target namespaces.
///
/// Each [`Replicator::replicate_to`] call performs exactly one GET and at
/// most one POST or PUT; retries are left to the controller runtime's
/// requeue mechanism.
pub struct Replicator<'a> {
    client: Client,
    source: &'a Secret,
}

impl<'a> Replicator<'a> {
    pub fn new(client: Client, source: &'a Secret) -> Self {
        Self { client, source }
    }

    /// Ensure a current replica of the source exists in the given namespace
    #[instrument(skip(self), fields(source = %object_key(self.source)))]
    pub async fn replicate_to(&self, namespace: &str) -> Result<()> {
        let name = self.source.name_any();
        let replicas: Api<Secret> = Api::namespaced(self.client.clone(), namespace);

        let existing = match replicas.get(&name).await {
            Ok(secret) => secret,
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("Replica {}/{} not found, creating", namespace, name);
                return self.create_replica(&replicas, namespace).await;
            }
            Err(e) => {
                return Err(ReplicationError::new(
                    Reason::Internal,
                    self.source.object_ref(&()),
                    format!("unable to get replica in namespace {namespace}"),
                )
                .with_cause(e)
                .into());
            }
        };

        let Some(src_hash) = is_applicable_for_update(self.source, &existing, false)? else {
            return Ok(());
        };
        debug!("Replica {}/{} out of date, updating", namespace, name);

        let mut updated = existing;
        updated.data.clone_from(&self.source.data);
        updated
            .metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(LAST_OBSERVED_HASH.to_string(), src_hash);

        replicas
            .replace(&name, &PostParams::default(), &updated)
            .await
            .map_err(|e| {
                ReplicationError::new(
                    Reason::Update,
                    self.source.object_ref(&()),
                    format!("unable to update replicated secret in namespace {namespace}"),
                )
                .with_dst(updated.object_ref(&()))
                .with_cause(e)
            })?;
        Ok(())
    }

    async fn create_replica(&self, replicas: &Api<Secret>, namespace: &str) -> Result<()> {
        let replica = build_replica(self.source, namespace)?;
        match replicas.create(&PostParams::default(), &replica).await {
            Ok(_) => Ok(()),
            // Lost a create race; the replica exists now and the next pass
            // will bring it up to date if needed.
            Err(kube::Error::Api(err)) if err.code == 409 => Ok(()),
            Err(e) => Err(ReplicationError::new(
                Reason::Create,
                self.source.object_ref(&()),
                format!("unable to create replicated secret in namespace {namespace}"),
            )
            .with_cause(e)
            .into()),
        }
    }
}

/// Canonical "{namespace}/{name}" identity of a secret
pub fn object_key(secret: &Secret) -> String {
    format!(
        "{}/{}",
        secret.namespace().unwrap_or_default(),
        secret.name_any()
    )
}

/// Ownership + change gate for replica updates.
///
/// Returns the fresh source hash when the destination should be overwritten,
/// `None` when it must be left alone. An up-to-date observed hash
/// short-circuits before the ownership check. A destination without a
/// replica-of marker is only adopted when `force` is set; a marker pointing
/// at a different source means the destination belongs to someone else and
/// the update is refused without an error.
pub fn is_applicable_for_update(src: &Secret, dst: &Secret, force: bool) -> Result<Option<String>> {
    let src_hash = secret_hash(src)?;

    if dst.annotations().get(LAST_OBSERVED_HASH) == Some(&src_hash) {
        return Ok(None);
    }

    match dst.annotations().get(REPLICA_OF) {
        None => Ok(force.then_some(src_hash)),
        Some(marker) if *marker == object_key(src) => Ok(Some(src_hash)),
        Some(_) => Ok(None),
    }
}

/// Build the replica object for a source secret in a target namespace
pub fn build_replica(source: &Secret, namespace: &str) -> Result<Secret> {
    let src_hash = secret_hash(source)?;
    Ok(Secret {
        metadata: ObjectMeta {
            name: source.metadata.name.clone(),
            namespace: Some(namespace.to_string()),
            annotations: Some(BTreeMap::from([
                (REPLICA_OF.to_string(), object_key(source)),
                (LAST_OBSERVED_HASH.to_string(), src_hash),
            ])),
            ..Default::default()
        },
        data: source.data.clone(),
        type_: source.type_.clone(),
        ..Default::default()
    })
}
