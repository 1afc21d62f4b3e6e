// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::constants::controller::{DEFAULT_REQUEUE_SECS, DEFAULT_THREADINESS};

const DEFAULT_WATCH_KINDS: &str = "clusters,etcdbackups,notifiers";

/// Watchable kinds served by `project.cattle.io`
pub const PROJECT_KINDS: [&str; 2] = ["pipelines", "pipelineexecutions"];

/// Watcher configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace to watch; empty means all namespaces
    pub watch_namespace: String,
    /// Number of workers per controller
    pub threadiness: usize,
    /// Plural resource names to attach handlers to
    pub watch_kinds: Vec<String>,
    /// Delay before a failed key is retried
    pub requeue_after: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let watch_namespace = lookup("WATCH_NAMESPACE").unwrap_or_default();

        let threadiness = match lookup("CONTROLLER_THREADINESS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("CONTROLLER_THREADINESS is not a number: {}", v))?,
            None => DEFAULT_THREADINESS,
        };

        let requeue_secs: u64 = match lookup("RESYNC_REQUEUE_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("RESYNC_REQUEUE_SECS is not a number: {}", v))?,
            None => DEFAULT_REQUEUE_SECS,
        };

        let watch_kinds = lookup("WATCH_KINDS")
            .unwrap_or_else(|| DEFAULT_WATCH_KINDS.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            watch_namespace,
            threadiness: threadiness.max(1),
            watch_kinds,
            requeue_after: Duration::from_secs(requeue_secs),
        })
    }

    /// Whether any configured kind needs the project API group
    pub fn watches_project_kinds(&self) -> bool {
        self.watch_kinds
            .iter()
            .any(|k| PROJECT_KINDS.contains(&k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.watch_namespace, "");
        assert_eq!(config.threadiness, DEFAULT_THREADINESS);
        assert_eq!(config.watch_kinds, vec!["clusters", "etcdbackups", "notifiers"]);
        assert_eq!(config.requeue_after, Duration::from_secs(DEFAULT_REQUEUE_SECS));
        assert!(!config.watches_project_kinds());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("WATCH_NAMESPACE", "c-abcde"),
            ("CONTROLLER_THREADINESS", "2"),
            ("WATCH_KINDS", " Pipelines , tokens,,"),
            ("RESYNC_REQUEUE_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.watch_namespace, "c-abcde");
        assert_eq!(config.threadiness, 2);
        assert_eq!(config.watch_kinds, vec!["pipelines", "tokens"]);
        assert!(config.watches_project_kinds());
        assert_eq!(config.requeue_after, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_threadiness_is_clamped() {
        let config = Config::from_lookup(lookup_from(&[("CONTROLLER_THREADINESS", "0")])).unwrap();
        assert_eq!(config.threadiness, 1);
    }

    #[test]
    fn test_invalid_threadiness() {
        let err = Config::from_lookup(lookup_from(&[("CONTROLLER_THREADINESS", "many")]));
        assert!(err.is_err());
    }
}
