// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Result};
use std::env;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Annotation prefixes recognized in addition to the default one
    pub alternative_prefixes: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Comma-separated list of alternate annotation prefixes, e.g. "replication.example.org"
        let alternative_prefixes: Vec<String> = env::var("REPLICATOR_ANNOTATION_PREFIXES")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        for prefix in &alternative_prefixes {
            if prefix.contains('/') {
                bail!("invalid annotation prefix {:?}: must not contain '/'", prefix);
            }
        }

        Ok(Config {
            alternative_prefixes,
        })
    }
}
