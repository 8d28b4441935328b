// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Multi-prefix annotation lookup and replication mode resolution.

use crate::config::Config;
use crate::constants::annotations;
use std::collections::BTreeMap;

/// A logical annotation and every concrete key it may appear under.
///
/// Keys are looked up in registration order, the default prefix first.
#[derive(Debug, Clone)]
pub struct AnnotationSet {
    keys: Vec<String>,
}

impl AnnotationSet {
    fn new(logical_name: &str, alternative_prefixes: &[String]) -> Self {
        let mut keys = vec![format!("{}/{}", annotations::DEFAULT_PREFIX, logical_name)];
        keys.extend(
            alternative_prefixes
                .iter()
                .map(|prefix| format!("{prefix}/{logical_name}")),
        );
        Self { keys }
    }

    /// Return the value of the first matching key
    pub fn get<'a>(&self, annotations: &'a BTreeMap<String, String>) -> Option<&'a str> {
        self.keys
            .iter()
            .find_map(|key| annotations.get(key))
            .map(String::as_str)
    }

    /// Check whether any of the registered keys is present
    pub fn matches(&self, annotations: &BTreeMap<String, String>) -> bool {
        self.get(annotations).is_some()
    }

    /// All concrete keys this set matches, in lookup order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// How a source secret selects its replication targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationMode {
    /// Replicate to the listed namespaces
    Explicit(Vec<String>),
    /// Replicate to every namespace in the cluster
    All,
    /// Not annotated for replication
    None,
}

/// Registry of the user-facing annotations.
///
/// Built once at startup from [`Config`] and shared by reference; never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Annotations {
    pub namespaces: AnnotationSet,
    pub all: AnnotationSet,
    pub from_namespace: AnnotationSet,
}

impl Annotations {
    pub fn new(alternative_prefixes: &[String]) -> Self {
        Self {
            namespaces: AnnotationSet::new(annotations::NAMESPACES, alternative_prefixes),
            all: AnnotationSet::new(annotations::ALL, alternative_prefixes),
            from_namespace: AnnotationSet::new(annotations::FROM_NAMESPACE, alternative_prefixes),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.alternative_prefixes)
    }

    /// A secret is replication-eligible iff it carries a target-selecting annotation
    pub fn eligible(&self, annotations: &BTreeMap<String, String>) -> bool {
        self.namespaces.matches(annotations) || self.all.matches(annotations)
    }

    /// Resolve the replication mode from a source's annotations.
    ///
    /// An explicit namespace list wins over the "all" annotation. The list is
    /// split literally on ','; a name with stray whitespace is a distinct,
    /// likely invalid, name. "all" only triggers on the exact value "true".
    pub fn mode(&self, annotations: &BTreeMap<String, String>) -> ReplicationMode {
        if let Some(value) = self.namespaces.get(annotations) {
            return ReplicationMode::Explicit(value.split(',').map(str::to_string).collect());
        }
        if self.all.get(annotations) == Some("true") {
            return ReplicationMode::All;
        }
        ReplicationMode::None
    }
}
