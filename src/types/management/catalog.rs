// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::condition::{Cond, Condition};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CATALOG_CONDITION_REFRESHED: Cond = Cond("Refreshed");
pub const CATALOG_CONDITION_UPGRADED: Cond = Cond("Upgraded");
pub const CATALOG_CONDITION_DISK_CACHED: Cond = Cond("DiskCached");
pub const CATALOG_CONDITION_PROCESSED: Cond = Cond("Processed");

pub const CATALOG_ACTION_REFRESH: &str = "refresh";

pub const HELM_V2: &str = "helm_v2";
pub const HELM_V3: &str = "helm_v3";

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "Catalog",
    status = "CatalogStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSpec {
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub branch: String,
    /// Repository kind, e.g. helm or git
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// One of helm_v2, helm_v3; empty means helm_v2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helm_version: Option<String>,
}

cattle_object!(Catalog, cluster);
conditions_via_status!(Catalog);

impl Catalog {
    pub fn is_helm3(&self) -> bool {
        self.spec.helm_version.as_deref() == Some(HELM_V3)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_refresh_timestamp: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub commit: String,
    /// Chart name to the commit of each helm version it was processed with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helm_version_commits: Option<BTreeMap<String, VersionCommits>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VersionCommits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<BTreeMap<String, String>>,
}
