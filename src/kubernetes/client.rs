// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation for the management plane and for downstream clusters.

use crate::error::{CattleError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::{debug, instrument};

/// Client from the in-cluster environment or the local kubeconfig
pub async fn default_client() -> Result<Client> {
    let config = kube::Config::infer()
        .await
        .map_err(|e| CattleError::KubeconfigError(format!("Failed to infer config: {}", e)))?;
    debug!("Using API server {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| CattleError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Client from a kubeconfig document, e.g. one stored for a downstream cluster
#[instrument(skip(kubeconfig))]
pub async fn client_from_kubeconfig(kubeconfig: &str) -> Result<Client> {
    let parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| CattleError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    let config = kube::Config::from_custom_kubeconfig(parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| CattleError::KubeconfigError(format!("Failed to create config: {}", e)))?;

    Client::try_from(config)
        .map_err(|e| CattleError::KubeconfigError(format!("Failed to create client: {}", e)))
}
