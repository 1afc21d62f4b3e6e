// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kinds of the `management.cattle.io/v3` API group.

pub mod alerting;
pub mod authn;
pub mod authz;
pub mod backup;
pub mod catalog;
pub mod cluster;
pub mod node;
pub mod rke;
pub mod settings;

pub use alerting::*;
pub use authn::{Group, GroupMember, Principal, Token, User};
pub use authz::PodSecurityPolicyTemplateProjectBinding;
pub use backup::{BackupConfig, EtcdBackup, EtcdBackupSpec, EtcdBackupStatus, S3BackupConfig};
pub use catalog::{Catalog, CatalogSpec, CatalogStatus};
pub use cluster::{Cluster, ClusterRandomizer, ClusterSpec, ClusterStatus};
pub use node::{Node, NodePool, NodePoolSpec, NodeSpec, NodeTemplate, NodeTemplateSpec};
pub use rke::{
    RancherKubernetesEngineConfig, RkeAddon, RkeK8sServiceOption, RkeK8sSystemImage,
    RkeK8sWindowsSystemImage,
};
pub use settings::{ListenConfig, Setting};
