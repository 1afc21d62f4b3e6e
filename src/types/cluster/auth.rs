// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Authentication state mirrored into a downstream cluster so it can
//! validate tokens without calling back to the management plane.

use crate::constants::groups;
use crate::types::management::Principal;
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};

/// Hashed copy of a management `Token`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAuthToken {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub enabled: bool,
}

flat_resource!(ClusterAuthToken, groups::CLUSTER, "clusterauthtokens", namespaced);
cattle_object!(ClusterAuthToken, namespaced);

impl ClusterAuthToken {
    /// A token is usable when it is enabled and carries a hash to compare against
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.hash.is_empty()
    }
}

/// Group membership of a user, refreshed from the auth provider
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterUserAttribute {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub groups: Vec<Principal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<String>,
    #[serde(default)]
    pub needs_refresh: bool,
    #[serde(default)]
    pub enabled: bool,
}

flat_resource!(ClusterUserAttribute, groups::CLUSTER, "clusteruserattributes", namespaced);
cattle_object!(ClusterUserAttribute, namespaced);
