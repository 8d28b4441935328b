// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret reconciler - replicates annotated secrets into their target namespaces.

use crate::annotations::Annotations;
use crate::constants::ERROR_REQUEUE_SECS;
use crate::error::{ReplicatorError, Result};
use crate::replication::{resolve_target_namespaces, Replicator};
use crate::report::ErrorReporter;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

pub struct SecretReconciler {
    client: Client,
    annotations: Arc<Annotations>,
    reporter: ErrorReporter,
}

impl SecretReconciler {
    pub fn new(client: Client, annotations: Arc<Annotations>) -> Self {
        let reporter = ErrorReporter::new(client.clone());
        Self {
            client,
            annotations,
            reporter,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let secrets: Api<Secret> = Api::all(self.client.clone());
        let context = Arc::new(self);

        Controller::new(secrets, WatcherConfig::default())
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled secret: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile(secret: Arc<Secret>, ctx: Arc<SecretReconciler>) -> Result<Action> {
    let name = secret.name_any();
    let namespace = secret.namespace().unwrap_or_default();

    debug!("Checking replication for secret {}/{}", namespace, name);

    if !ctx.annotations.eligible(secret.annotations()) {
        debug!(
            "Secret {}/{} not applicable for replication",
            namespace, name
        );
        return Ok(Action::await_change());
    }

    let targets = match resolve_target_namespaces(&ctx.client, &secret, &ctx.annotations).await {
        Ok(targets) => targets,
        // A broken target namespace configuration aborts the whole pass
        // before any replica is touched.
        Err(e) => {
            ctx.reporter.report(vec![e.into()]).await?;
            return Ok(Action::await_change());
        }
    };

    let replicator = Replicator::new(ctx.client.clone(), &secret);
    let mut failures = Vec::new();
    for target in &targets {
        // Every target gets its attempt; failures are aggregated afterwards.
        if let Err(e) = replicator.replicate_to(target).await {
            failures.push(e);
        }
    }

    ctx.reporter.report(failures).await?;
    Ok(Action::await_change())
}

fn error_policy(
    _secret: Arc<Secret>,
    error: &ReplicatorError,
    _ctx: Arc<SecretReconciler>,
) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
}
