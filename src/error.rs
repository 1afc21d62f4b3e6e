// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CattleError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("{resource}.{group} \"{key}\" not found")]
    NotFound {
        group: String,
        resource: String,
        key: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Handler {name} failed: {message}")]
    HandlerError { name: String, message: String },

    #[error("Index with name {0} does not exist")]
    UnknownIndex(String),

    #[error("Informer cache for {0} stopped before it was populated")]
    CacheNotSynced(String),
}

impl CattleError {
    pub fn not_found(group: &str, resource: &str, key: &str) -> Self {
        CattleError::NotFound {
            group: group.to_string(),
            resource: resource.to_string(),
            key: key.to_string(),
        }
    }

    pub fn handler(name: &str, message: impl std::fmt::Display) -> Self {
        CattleError::HandlerError {
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    /// True for cache misses and for 404 responses from the API server
    pub fn is_not_found(&self) -> bool {
        match self {
            CattleError::NotFound { .. } => true,
            CattleError::KubeError(kube::Error::Api(err)) => err.code == 404,
            _ => false,
        }
    }

    /// True when the API server rejected a write because the object changed underneath us
    pub fn is_conflict(&self) -> bool {
        matches!(self, CattleError::KubeError(kube::Error::Api(err)) if err.code == 409)
    }
}

pub type Result<T> = std::result::Result<T, CattleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kube::error::ErrorResponse;

    fn api_error(code: u16) -> CattleError {
        CattleError::KubeError(kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: "boom".to_string(),
            reason: "Whatever".to_string(),
            code,
        }))
    }

    #[test]
    fn test_not_found_message() {
        let err = CattleError::not_found("management.cattle.io", "etcdBackup", "c-1/backup");
        assert_eq!(
            err.to_string(),
            "etcdBackup.management.cattle.io \"c-1/backup\" not found"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_api_404_is_not_found() {
        assert!(api_error(404).is_not_found());
        assert!(!api_error(500).is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        assert!(api_error(409).is_conflict());
        assert!(!api_error(404).is_conflict());
    }
}
