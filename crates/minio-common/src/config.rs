//! Operator-wide configuration
//!
//! Settings that are not part of any MinIOInstance but shape the resources
//! compiled from it. Resolution order (highest priority first):
//! 1. Explicit value (e.g. a CLI flag)
//! 2. `CLUSTER_DOMAIN` environment variable
//! 3. Built-in default (`cluster.local`)

use serde::{Deserialize, Serialize};

use crate::DEFAULT_CLUSTER_DOMAIN;

/// Environment variable the CLI reads the cluster domain from
pub const CLUSTER_DOMAIN_ENV: &str = "CLUSTER_DOMAIN";

/// Configuration shared by every compilation the operator performs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorConfig {
    /// DNS suffix of the Kubernetes cluster, used in pod and service hostnames
    pub cluster_domain: String,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            cluster_domain: DEFAULT_CLUSTER_DOMAIN.to_string(),
        }
    }
}

impl OperatorConfig {
    /// Build a config with an explicit cluster domain.
    pub fn with_cluster_domain(cluster_domain: impl Into<String>) -> Self {
        Self {
            cluster_domain: cluster_domain.into(),
        }
    }

    /// Resolve a config from an optional cluster domain value.
    ///
    /// Empty or whitespace-only values fall back to the default domain.
    pub fn resolve(cluster_domain: Option<&str>) -> Self {
        match cluster_domain.map(str::trim) {
            Some(domain) if !domain.is_empty() => Self::with_cluster_domain(domain),
            _ => Self::default(),
        }
    }
}
