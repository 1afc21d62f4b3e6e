// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Machine-provisioned nodes, the pools that scale them and the templates
//! they are created from.

use crate::types::condition::{Cond, Condition};
use crate::types::management::cluster::ResourceList;
use crate::types::management::rke::{
    NodeDrainInput, RkeConfigNode, RKE_ROLE_CONTROLPLANE, RKE_ROLE_ETCD, RKE_ROLE_WORKER,
};
use k8s_openapi::api::core::v1::{NodeSpec as CoreNodeSpec, NodeStatus as CoreNodeStatus, Taint};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NODE_CONDITION_INITIALIZED: Cond = Cond("Initialized");
pub const NODE_CONDITION_PROVISIONED: Cond = Cond("Provisioned");
pub const NODE_CONDITION_UPDATED: Cond = Cond("Updated");
pub const NODE_CONDITION_REGISTERED: Cond = Cond("Registered");
pub const NODE_CONDITION_REMOVED: Cond = Cond("Removed");
pub const NODE_CONDITION_CONFIG_SAVED: Cond = Cond("Saved");
pub const NODE_CONDITION_READY: Cond = Cond("Ready");
pub const NODE_CONDITION_DRAINED: Cond = Cond("Drained");
pub const NODE_CONDITION_UPGRADED: Cond = Cond("Upgraded");

pub const NODE_POOL_CONDITION_UPDATED: Cond = Cond("Updated");
pub const NODE_TEMPLATE_CONDITION_CREATED: Cond = Cond("Created");

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "NodeTemplate",
    namespaced,
    status = "NodeTemplateStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplateSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_credential_name: Option<String>,
    #[serde(flatten)]
    pub common: NodeCommonParams,
}

cattle_object!(NodeTemplate, namespaced);
conditions_via_status!(NodeTemplate);

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplateStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// Docker engine settings applied to machines created from a template
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeCommonParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_certificate_authority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_key: Option<String>,
    #[serde(rename = "engineInstallURL", skip_serializing_if = "Option::is_none")]
    pub engine_install_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_opt: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub engine_insecure_registry: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub engine_registry_mirror: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_label: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_storage_driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_env: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_internal_ip_address: Option<bool>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "Node",
    namespaced,
    status = "NodeStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    #[serde(default)]
    pub etcd: bool,
    #[serde(default)]
    pub control_plane: bool,
    #[serde(default)]
    pub worker: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_pool_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_config: Option<CustomConfig>,
    #[serde(default)]
    pub imported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_hostname: Option<String>,
    #[serde(default)]
    pub internal_node_spec: CoreNodeSpec,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub desired_node_taints: Vec<Taint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_taints_from_api: Option<bool>,
    #[serde(default)]
    pub desired_node_unschedulable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_drain_input: Option<NodeDrainInput>,
}

cattle_object!(Node, namespaced);
conditions_via_status!(Node);

impl Node {
    /// RKE roles requested for this node
    pub fn roles(&self) -> Vec<&'static str> {
        let mut roles = Vec::new();
        if self.spec.etcd {
            roles.push(RKE_ROLE_ETCD);
        }
        if self.spec.control_plane {
            roles.push(RKE_ROLE_CONTROLPLANE);
        }
        if self.spec.worker {
            roles.push(RKE_ROLE_WORKER);
        }
        roles
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomConfig {
    /// IP or FQDN that is fully resolvable and used for SSH
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub internal_address: String,
    /// Defaults to root
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub docker_socket: String,
    #[serde(default)]
    pub ssh_key: String,
    #[serde(default)]
    pub ssh_cert: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub internal_node_status: CoreNodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<ResourceList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_template_spec: Option<NodeTemplateSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_config: Option<RkeConfigNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_annotations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_taints: Vec<Taint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_info: Option<DockerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_node_version: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DockerInfo {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub logging_driver: String,
    #[serde(default)]
    pub cgroup_driver: String,
    #[serde(default)]
    pub kernel_version: String,
    #[serde(default)]
    pub operating_system: String,
    #[serde(rename = "OSType", default)]
    pub os_type: String,
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub index_server_address: String,
    #[serde(default)]
    pub docker_root_dir: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub server_version: String,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "NodePool",
    namespaced,
    status = "NodePoolStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolSpec {
    #[serde(default)]
    pub etcd: bool,
    #[serde(default)]
    pub control_plane: bool,
    #[serde(default)]
    pub worker: bool,
    pub node_template_name: String,
    #[serde(default)]
    pub hostname_prefix: String,
    /// Defaults to 1
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub drain_before_delete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_annotations: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_taints: Vec<Taint>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub delete_not_ready_after_secs: i64,
}

cattle_object!(NodePool, namespaced, |p| {
    Some(p.spec.cluster_name.clone()).filter(|c| !c.is_empty())
});
conditions_via_status!(NodePool);

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}
