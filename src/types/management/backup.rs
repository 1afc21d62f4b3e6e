// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::condition::{Cond, Condition};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

pub const BACKUP_CONDITION_CREATED: Cond = Cond("Created");
pub const BACKUP_CONDITION_COMPLETED: Cond = Cond("Completed");

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "EtcdBackup",
    namespaced,
    status = "EtcdBackupStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct EtcdBackupSpec {
    /// Cluster this backup belongs to
    pub cluster_id: String,
    /// Backup file name, without the path
    #[serde(default)]
    pub filename: String,
    /// Backup configuration at the time the backup was taken
    #[serde(default)]
    pub backup_config: BackupConfig,
    /// Whether the backup was started by hand
    #[serde(default)]
    pub manual: bool,
}

cattle_object!(EtcdBackup, namespaced, |b| Some(b.spec.cluster_id.clone()));
conditions_via_status!(EtcdBackup);

impl EtcdBackup {
    pub fn is_s3(&self) -> bool {
        self.spec.backup_config.s3_backup_config.is_some()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdBackupStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Cluster object as it was when the backup was taken
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_object: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kubernetes_version: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupConfig {
    /// Defaults to true when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Hours between snapshots, default 12
    #[serde(default)]
    pub interval_hours: i64,
    /// Number of snapshots kept, default 6
    #[serde(default)]
    pub retention: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_backup_config: Option<S3BackupConfig>,
    #[serde(default)]
    pub safe_timestamp: bool,
    /// Snapshot timeout in seconds, default 300
    #[serde(default)]
    pub timeout: i64,
}

impl BackupConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct S3BackupConfig {
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub bucket_name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub custom_ca: String,
    #[serde(default)]
    pub folder: String,
}
