// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use std::sync::Arc;
use tracing::{info, warn};

use secret_replicator::annotations::Annotations;
use secret_replicator::config::Config;
use secret_replicator::reconcilers::{IngressReconciler, SecretReconciler};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting secret-replicator operator");

    // Load configuration and build the annotation registry once; it is
    // shared read-only with every reconciler.
    let config = Config::from_env()?;
    let annotations = Arc::new(Annotations::from_config(&config));
    for set in [
        &annotations.namespaces,
        &annotations.all,
        &annotations.from_namespace,
    ] {
        for key in set.keys().iter().skip(1) {
            info!("Configured alternative annotation {:?}", key);
        }
    }

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let secret_reconciler = SecretReconciler::new(client.clone(), annotations.clone());
    let ingress_reconciler = IngressReconciler::new(client, annotations);

    info!("Starting reconcilers...");

    // Run both reconcilers concurrently
    tokio::try_join!(secret_reconciler.run(), ingress_reconciler.run())?;

    // This should never be reached as reconcilers run forever
    warn!("All reconcilers stopped unexpectedly");
    Ok(())
}
