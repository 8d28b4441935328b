// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ingress reconciler - pulls TLS secrets referenced by an ingress from a
//! designated source namespace into the ingress's own namespace.

use crate::annotations::Annotations;
use crate::constants::ERROR_REQUEUE_SECS;
use crate::error::{Reason, ReplicationError, ReplicatorError, Result};
use crate::replication::Replicator;
use crate::report::ErrorReporter;
use futures::StreamExt;
use k8s_openapi::api::core::v1::{Namespace, Secret};
use k8s_openapi::api::networking::v1::Ingress;
use kube::{
    runtime::{controller::Action, watcher, Controller},
    Api, Client, Resource, ResourceExt,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

pub struct IngressReconciler {
    client: Client,
    annotations: Arc<Annotations>,
    reporter: ErrorReporter,
}

impl IngressReconciler {
    pub fn new(client: Client, annotations: Arc<Annotations>) -> Self {
        let reporter = ErrorReporter::new(client.clone());
        Self {
            client,
            annotations,
            reporter,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let ingresses: Api<Ingress> = Api::all(self.client.clone());
        let context = Arc::new(self);

        Controller::new(ingresses, watcher::Config::default())
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled ingress: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile(ingress: Arc<Ingress>, ctx: Arc<IngressReconciler>) -> Result<Action> {
    let name = ingress.name_any();
    let target_namespace = ingress.namespace().unwrap_or_default();

    debug!(
        "Checking replication for ingress {}/{}",
        target_namespace, name
    );

    let Some(source_namespace) = ctx
        .annotations
        .from_namespace
        .get(ingress.annotations())
        .map(str::to_string)
    else {
        debug!(
            "Ingress {}/{} not applicable for replication",
            target_namespace, name
        );
        return Ok(Action::await_change());
    };

    let secret_names = tls_secret_names(&ingress);
    if secret_names.is_empty() {
        debug!("No secrets used by ingress {}/{}", target_namespace, name);
        return Ok(Action::await_change());
    }

    // The namespace to pull from must exist before any secret is touched.
    let namespaces: Api<Namespace> = Api::all(ctx.client.clone());
    if let Err(e) = namespaces.get(&source_namespace).await {
        let record = ReplicationError::new(
            Reason::InvalidNamespace,
            ingress.object_ref(&()),
            format!("namespace {source_namespace:?} not found"),
        )
        .with_cause(e);
        ctx.reporter.report(vec![record.into()]).await?;
        return Ok(Action::await_change());
    }

    let sources: Api<Secret> = Api::namespaced(ctx.client.clone(), &source_namespace);
    let mut failures = Vec::new();
    for secret_name in &secret_names {
        // Only secrets that exist in the source namespace are synced.
        let source = match sources.get(secret_name).await {
            Ok(secret) => secret,
            Err(e) => {
                failures.push(ReplicatorError::SourceSecretLookup {
                    namespace: source_namespace.clone(),
                    name: secret_name.clone(),
                    cause: e,
                });
                continue;
            }
        };

        if let Err(e) = Replicator::new(ctx.client.clone(), &source)
            .replicate_to(&target_namespace)
            .await
        {
            failures.push(e);
        }
    }

    ctx.reporter.report(failures).await?;
    Ok(Action::await_change())
}

/// Deduplicated, sorted TLS secret names referenced by the ingress
fn tls_secret_names(ingress: &Ingress) -> Vec<String> {
    let mut names = BTreeSet::new();
    for tls in ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.tls.as_ref())
        .into_iter()
        .flatten()
    {
        if let Some(name) = &tls.secret_name {
            names.insert(name.clone());
        }
    }
    names.into_iter().collect()
}

fn error_policy(
    _ingress: Arc<Ingress>,
    error: &ReplicatorError,
    _ctx: Arc<IngressReconciler>,
) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
}
