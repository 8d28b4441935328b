// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys used by the replicator
pub mod annotations {
    /// Default prefix under which the user-facing annotations are recognized.
    /// Alternate prefixes can be registered via configuration.
    pub const DEFAULT_PREFIX: &str = "replicator.geeko.me";

    /// Logical annotation name: comma-separated list of target namespaces
    pub const NAMESPACES: &str = "namespaces";
    /// Logical annotation name: replicate to every namespace when set to "true"
    pub const ALL: &str = "all";
    /// Logical annotation name: namespace to pull referenced secrets from (on Ingresses)
    pub const FROM_NAMESPACE: &str = "from-namespace";

    /// Owner identity marker written on every replica, "{namespace}/{name}" of the source
    pub const REPLICA_OF: &str = "replicator.geeko.me/replica-of";
    /// Digest of the source payload as of the last successful sync
    pub const LAST_OBSERVED_HASH: &str = "replicator.geeko.me/last-observed-hash";
}

/// The operator name used for event reporting
pub const OPERATOR_NAME: &str = "secret-replicator";

/// Requeue delay in seconds after a failed reconciliation pass
pub const ERROR_REQUEUE_SECS: u64 = 60;
