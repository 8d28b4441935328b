// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Core replication logic: hashing, target resolution, create-or-update.

pub mod hash;
pub mod namespaces;
pub mod replicator;

pub use hash::secret_hash;
pub use namespaces::resolve_target_namespaces;
pub use replicator::{is_applicable_for_update, object_key, Replicator};
