// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Canonical payload digest used for change detection.

use crate::error::Result;
use k8s_openapi::api::core::v1::Secret;
use sha2::{Digest, Sha256};

/// Compute the digest of a secret's data.
///
/// The data map is rendered to JSON first; `BTreeMap` keys are ordered, so
/// the same logical payload always serializes identically regardless of how
/// it was assembled. This is a change-detection fingerprint, not a security
/// boundary.
pub fn secret_hash(secret: &Secret) -> Result<String> {
    let canonical = serde_json::to_vec(&secret.data)?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}
