// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! RKE cluster configuration plus the system image, service option and
//! addon template kinds that ship with each Kubernetes version.

use crate::constants::groups;
use crate::types::management::backup::BackupConfig;
use k8s_openapi::api::apps::v1::{DaemonSetUpdateStrategy, DeploymentStrategy};
use k8s_openapi::api::core::v1::{EnvVar, Volume, VolumeMount};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RKE_ROLE_ETCD: &str = "etcd";
pub const RKE_ROLE_CONTROLPLANE: &str = "controlplane";
pub const RKE_ROLE_WORKER: &str = "worker";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RancherKubernetesEngineConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<RkeConfigNode>,
    #[serde(default)]
    pub services: RkeConfigServices,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub authentication: AuthnConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addons: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons_include: Vec<String>,
    #[serde(default)]
    pub system_images: RkeSystemImages,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_cert_path: Option<String>,
    #[serde(default)]
    pub ssh_agent_auth: bool,
    #[serde(default)]
    pub authorization: AuthzConfig,
    #[serde(default)]
    pub ignore_docker_version: bool,
    #[serde(rename = "kubernetesVersion", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private_registries: Vec<PrivateRegistry>,
    #[serde(default)]
    pub ingress: IngressConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub cloud_provider: CloudProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addon_job_timeout: Option<i64>,
    #[serde(default)]
    pub bastion_host: BastionHost,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub restore: RestoreConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_certificates: Option<RotateCertificates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_strategy: Option<NodeUpgradeStrategy>,
}

impl RancherKubernetesEngineConfig {
    pub fn obj_cluster_name(&self) -> Option<&str> {
        self.cluster_name.as_deref().filter(|n| !n.is_empty())
    }

    /// Nodes carrying `role`
    pub fn nodes_with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a RkeConfigNode> {
        self.nodes.iter().filter(move |n| n.role.iter().any(|r| r == role))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpgradeStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_unavailable_worker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_unavailable_controlplane: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub drain: bool,
    #[serde(rename = "nodeDrainInput", skip_serializing_if = "Option::is_none")]
    pub drain_input: Option<NodeDrainInput>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDrainInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_daemon_sets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_local_data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BastionHost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ssh_agent_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_cert_path: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrivateRegistry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

/// Image per RKE component; every field is optional on the wire
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeSystemImages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etcd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nginx_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_downloader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_services_sidecar: Option<String>,
    #[serde(rename = "kubedns", skip_serializing_if = "Option::is_none")]
    pub kube_dns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnsmasq: Option<String>,
    #[serde(rename = "kubednsSidecar", skip_serializing_if = "Option::is_none")]
    pub kube_dns_sidecar: Option<String>,
    #[serde(rename = "kubednsAutoscaler", skip_serializing_if = "Option::is_none")]
    pub kube_dns_autoscaler: Option<String>,
    #[serde(rename = "coredns", skip_serializing_if = "Option::is_none")]
    pub core_dns: Option<String>,
    #[serde(rename = "corednsAutoscaler", skip_serializing_if = "Option::is_none")]
    pub core_dns_autoscaler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodelocal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flannel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flannel_cni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calico_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calico_cni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calico_controllers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calico_ctl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calico_flex_vol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canal_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canal_cni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canal_flannel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canal_flex_vol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weave_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weave_cni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_infra_container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_backend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_pod_infra_container: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeConfigNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_address: Option<String>,
    /// Any of etcd, worker, controlplane
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_socket: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ssh_agent_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_cert_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<RkeTaint>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeTaint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// One of NoSchedule, PreferNoSchedule, NoExecute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_added: Option<Time>,
}

/// System images for one Kubernetes version
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeK8sSystemImage {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub system_images: RkeSystemImages,
}

flat_resource!(RkeK8sSystemImage as "RKEK8sSystemImage", groups::MANAGEMENT, "rkek8ssystemimages", namespaced);
cattle_object!(RkeK8sSystemImage, namespaced);

/// Images installed on Windows workers
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WindowsSystemImages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nginx_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_binaries: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubelet_pause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cni_binaries: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canal_cni_binaries: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flannel_cni_binaries: Option<String>,
}

/// Windows system images for one Kubernetes version
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeK8sWindowsSystemImage {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(rename = "windowsSystemImages", default)]
    pub system_images: WindowsSystemImages,
}

flat_resource!(
    RkeK8sWindowsSystemImage as "RKEK8sWindowsSystemImage",
    groups::MANAGEMENT,
    "rkek8swindowssystemimages",
    namespaced
);
cattle_object!(RkeK8sWindowsSystemImage, namespaced);

/// Default service arguments for one Kubernetes version
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeK8sServiceOption {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub service_options: KubernetesServicesOptions,
}

flat_resource!(RkeK8sServiceOption as "RKEK8sServiceOption", groups::MANAGEMENT, "rkek8sserviceoptions", namespaced);
cattle_object!(RkeK8sServiceOption, namespaced);

/// Addon manifest template
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeAddon {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

flat_resource!(RkeAddon as "RKEAddon", groups::MANAGEMENT, "rkeaddons", namespaced);
cattle_object!(RkeAddon, namespaced);

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct K8sVersionInfo {
    #[serde(rename = "minRKEVersion", skip_serializing_if = "Option::is_none")]
    pub min_rke_version: Option<String>,
    #[serde(rename = "maxRKEVersion", skip_serializing_if = "Option::is_none")]
    pub max_rke_version: Option<String>,
    #[serde(rename = "deprecateRKEVersion", skip_serializing_if = "Option::is_none")]
    pub deprecate_rke_version: Option<String>,
    #[serde(rename = "minRancherVersion", skip_serializing_if = "Option::is_none")]
    pub min_rancher_version: Option<String>,
    #[serde(rename = "maxRancherVersion", skip_serializing_if = "Option::is_none")]
    pub max_rancher_version: Option<String>,
    #[serde(rename = "deprecateRancherVersion", skip_serializing_if = "Option::is_none")]
    pub deprecate_rancher_version: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeConfigServices {
    #[serde(default)]
    pub etcd: EtcdService,
    #[serde(default)]
    pub kube_api: KubeApiService,
    #[serde(default)]
    pub kube_controller: KubeControllerService,
    #[serde(default)]
    pub scheduler: SchedulerService,
    #[serde(default)]
    pub kubelet: KubeletService,
    #[serde(default)]
    pub kubeproxy: KubeproxyService,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaseService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_args: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_binds: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_env: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdService {
    #[serde(flatten)]
    pub base: BaseService,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_config: Option<BackupConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubeApiService {
    #[serde(flatten)]
    pub base: BaseService,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_cluster_ip_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_node_port_range: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pod_security_policy: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub always_pull_images: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets_encryption_config: Option<SecretsEncryptionConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<AuditLog>,
    /// apiserver `AdmissionConfiguration`, kept as raw JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_configuration: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_rate_limit: Option<EventRateLimit>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRateLimit {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<AuditLogConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_backup: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// audit/v1 `Policy`, kept as raw JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretsEncryptionConfig {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_config: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubeControllerService {
    #[serde(flatten)]
    pub base: BaseService,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_cluster_ip_range: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubeletService {
    #[serde(flatten)]
    pub base: BaseService,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infra_container_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_dns_server: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fail_swap_on: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generate_serving_certificate: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct KubeproxyService {
    #[serde(flatten)]
    pub base: BaseService,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SchedulerService {
    #[serde(flatten)]
    pub base: BaseService,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Defaults to canal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calico_network_provider: Option<CalicoNetworkProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canal_network_provider: Option<CanalNetworkProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flannel_network_provider: Option<FlannelNetworkProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weave_network_provider: Option<WeaveNetworkProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_strategy: Option<DaemonSetUpdateStrategy>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalicoNetworkProvider {
    #[serde(default)]
    pub cloud_provider: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FlannelNetworkProvider {
    #[serde(default)]
    pub iface: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CanalNetworkProvider {
    #[serde(flatten)]
    pub flannel: FlannelNetworkProvider,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct WeaveNetworkProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthWebhookConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_timeout: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthnConfig {
    /// Defaults to x509
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sans: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<AuthWebhookConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthzConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressConfig {
    /// Defaults to nginx
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_args: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_envs: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_volumes: Vec<Volume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_volume_mounts: Vec<VolumeMount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_strategy: Option<DaemonSetUpdateStrategy>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloudProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_cloud_provider: Option<AwsCloudProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_cloud_provider: Option<AzureCloudProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openstack_cloud_provider: Option<OpenstackCloudProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsphere_cloud_provider: Option<VsphereCloudProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_cloud_provider: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwsCloudProvider {
    #[serde(default)]
    pub global: GlobalAwsOpts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_override: Option<BTreeMap<String, ServiceOverride>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceOverride {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub signing_region: String,
    #[serde(default)]
    pub signing_method: String,
    #[serde(default)]
    pub signing_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalAwsOpts {
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub vpc: String,
    #[serde(default)]
    pub subnet_id: String,
    #[serde(rename = "routetable-id", default)]
    pub route_table_id: String,
    #[serde(default)]
    pub role_arn: String,
    #[serde(default)]
    pub kubernetes_cluster_tag: String,
    #[serde(default)]
    pub kubernetes_cluster_id: String,
    #[serde(default)]
    pub disable_security_group_ingress: bool,
    #[serde(default)]
    pub elb_security_group: String,
    #[serde(default)]
    pub disable_strict_zone_check: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzureCloudProvider {
    #[serde(default)]
    pub cloud: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub subscription_id: String,
    #[serde(default)]
    pub resource_group: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub vnet_name: String,
    #[serde(default)]
    pub vnet_resource_group: String,
    #[serde(default)]
    pub subnet_name: String,
    #[serde(default)]
    pub security_group_name: String,
    #[serde(default)]
    pub route_table_name: String,
    #[serde(default)]
    pub primary_availability_set_name: String,
    #[serde(default)]
    pub vm_type: String,
    #[serde(default)]
    pub primary_scale_set_name: String,
    #[serde(default)]
    pub aad_client_id: String,
    #[serde(default)]
    pub aad_client_secret: String,
    #[serde(default)]
    pub aad_client_cert_path: String,
    #[serde(default)]
    pub aad_client_cert_password: String,
    #[serde(default)]
    pub cloud_provider_backoff: bool,
    #[serde(default)]
    pub cloud_provider_backoff_retries: i64,
    #[serde(default)]
    pub cloud_provider_backoff_exponent: i64,
    #[serde(default)]
    pub cloud_provider_backoff_duration: i64,
    #[serde(default)]
    pub cloud_provider_backoff_jitter: i64,
    #[serde(default)]
    pub cloud_provider_rate_limit: bool,
    #[serde(rename = "cloudProviderRateLimitQPS", default)]
    pub cloud_provider_rate_limit_qps: i64,
    #[serde(default)]
    pub cloud_provider_rate_limit_bucket: i64,
    #[serde(default)]
    pub use_instance_metadata: bool,
    #[serde(default)]
    pub use_managed_identity_extension: bool,
    #[serde(rename = "userAssignedIdentityID", skip_serializing_if = "Option::is_none")]
    pub user_assigned_identity_id: Option<String>,
    #[serde(default)]
    pub maximum_load_balancer_rule_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_sku: Option<String>,
    #[serde(rename = "excludeMasterFromStandardLB", skip_serializing_if = "Option::is_none")]
    pub exclude_master_from_standard_lb: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenstackCloudProvider {
    #[serde(default)]
    pub global: GlobalOpenstackOpts,
    #[serde(default)]
    pub load_balancer: LoadBalancerOpenstackOpts,
    #[serde(default)]
    pub block_storage: BlockStorageOpenstackOpts,
    #[serde(default)]
    pub route: RouteOpenstackOpts,
    #[serde(default)]
    pub metadata: MetadataOpenstackOpts,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalOpenstackOpts {
    #[serde(default)]
    pub auth_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub tenant_name: String,
    #[serde(default)]
    pub trust_id: String,
    #[serde(default)]
    pub domain_id: String,
    #[serde(default)]
    pub domain_name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub ca_file: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct LoadBalancerOpenstackOpts {
    #[serde(default)]
    pub lb_version: String,
    #[serde(default)]
    pub use_octavia: bool,
    #[serde(default)]
    pub subnet_id: String,
    #[serde(default)]
    pub floating_network_id: String,
    #[serde(default)]
    pub lb_method: String,
    #[serde(default)]
    pub lb_provider: String,
    #[serde(default)]
    pub create_monitor: bool,
    #[serde(default)]
    pub monitor_delay: String,
    #[serde(default)]
    pub monitor_timeout: String,
    #[serde(default)]
    pub monitor_max_retries: i64,
    #[serde(default)]
    pub manage_security_groups: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BlockStorageOpenstackOpts {
    #[serde(default)]
    pub bs_version: String,
    #[serde(default)]
    pub trust_device_path: bool,
    #[serde(default)]
    pub ignore_volume_az: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RouteOpenstackOpts {
    #[serde(default)]
    pub router_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct MetadataOpenstackOpts {
    #[serde(default)]
    pub search_order: String,
    #[serde(default)]
    pub request_timeout: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VsphereCloudProvider {
    #[serde(default)]
    pub global: GlobalVsphereOpts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_center: Option<BTreeMap<String, VirtualCenterConfig>>,
    #[serde(default)]
    pub network: NetworkVsphereOpts,
    #[serde(default)]
    pub disk: DiskVsphereOpts,
    #[serde(default)]
    pub workspace: WorkspaceVsphereOpts,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalVsphereOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "server", skip_serializing_if = "Option::is_none")]
    pub vcenter_ip: Option<String>,
    #[serde(rename = "port", skip_serializing_if = "Option::is_none")]
    pub vcenter_port: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub insecure_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenters: Option<String>,
    #[serde(rename = "datastore", skip_serializing_if = "Option::is_none")]
    pub default_datastore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(rename = "soap-roundtrip-count", skip_serializing_if = "Option::is_none")]
    pub round_tripper_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualCenterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "port", skip_serializing_if = "Option::is_none")]
    pub vcenter_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenters: Option<String>,
    #[serde(rename = "soap-roundtrip-count", skip_serializing_if = "Option::is_none")]
    pub round_tripper_count: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkVsphereOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DiskVsphereOpts {
    #[serde(rename = "scsicontrollertype", skip_serializing_if = "Option::is_none")]
    pub scsi_controller_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceVsphereOpts {
    #[serde(rename = "server", skip_serializing_if = "Option::is_none")]
    pub vcenter_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_datastore: Option<String>,
    #[serde(rename = "resourcepool-path", skip_serializing_if = "Option::is_none")]
    pub resource_pool_path: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct KubernetesServicesOptions {
    #[serde(default)]
    pub etcd: Option<BTreeMap<String, String>>,
    #[serde(rename = "kubeapi", default)]
    pub kube_api: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub kubelet: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub kubeproxy: Option<BTreeMap<String, String>>,
    #[serde(rename = "kubeController", default)]
    pub kube_controller: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub scheduler: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringConfig {
    /// Defaults to metrics-server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_strategy: Option<DeploymentStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestoreConfig {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub restore: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RotateCertificates {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ca_certificates: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DnsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(rename = "upstreamnameservers", default, skip_serializing_if = "Vec::is_empty")]
    pub upstream_nameservers: Vec<String>,
    #[serde(rename = "reversecidrs", default, skip_serializing_if = "Vec::is_empty")]
    pub reverse_cidrs: Vec<String>,
    #[serde(rename = "stubdomains", skip_serializing_if = "Option::is_none")]
    pub stub_domains: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    /// Always serialized, even when empty
    #[serde(default)]
    pub nodelocal: Option<Nodelocal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_strategy: Option<DeploymentStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_autoscaler_params: Option<LinearAutoscalerParams>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nodelocal {
    #[serde(default)]
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_strategy: Option<DaemonSetUpdateStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinearAutoscalerParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cores_per_replica: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_per_replica: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevent_single_point_failure: Option<bool>,
}

/// Per-node process plan computed from the cluster config
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RkePlan {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<RkeConfigNodePlan>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RkeConfigNodePlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processes: Option<BTreeMap<String, Process>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub port_checks: Vec<PortCheck>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<RkeTaint>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_registry_auth_config: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes_from: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub binds: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_mode: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub privileged: bool,
    #[serde(default)]
    pub health_check: HealthCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publish: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HealthCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PortCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct File {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::meta::{group_version_resource, CattleObject};
    use kube::Resource;
    use serde_json::json;

    #[test]
    fn test_rke_config_wire_names() {
        let config: RancherKubernetesEngineConfig = serde_json::from_value(json!({
            "kubernetesVersion": "v1.17.6-rancher2-1",
            "ignoreDockerVersion": true,
            "nodes": [
                {"address": "10.0.0.1", "role": ["etcd", "controlplane"]},
                {"address": "10.0.0.2", "role": ["worker"], "taints": [{"key": "gpu", "effect": "NoSchedule"}]}
            ],
            "services": {
                "etcd": {"image": "rancher/coreos-etcd:v3.4.3", "snapshot": true, "retention": "72h"},
                "kubeApi": {"serviceClusterIpRange": "10.43.0.0/16", "podSecurityPolicy": true},
                "kubelet": {"clusterDnsServer": "10.43.0.10", "extraArgs": {"max-pods": "250"}}
            },
            "network": {"plugin": "canal", "canalNetworkProvider": {"iface": "eth1"}},
            "systemImages": {"kubedns": "rancher/k8s-dns-kube-dns:1.15.0", "coredns": "rancher/coredns-coredns:1.6.5"},
            "cloudProvider": {
                "name": "aws",
                "awsCloudProvider": {"global": {"zone": "eu-west-1a", "routetable-id": "rtb-1"}}
            },
            "dns": {"provider": "coredns", "upstreamnameservers": ["1.1.1.1"]}
        }))
        .unwrap();

        assert_eq!(config.version.as_deref(), Some("v1.17.6-rancher2-1"));
        assert_eq!(config.nodes_with_role(RKE_ROLE_ETCD).count(), 1);
        assert_eq!(config.nodes_with_role(RKE_ROLE_WORKER).count(), 1);
        assert_eq!(config.nodes[1].taints[0].effect.as_deref(), Some("NoSchedule"));
        assert_eq!(config.services.etcd.base.image.as_deref(), Some("rancher/coreos-etcd:v3.4.3"));
        assert_eq!(config.services.etcd.snapshot, Some(true));
        assert!(config.services.kube_api.pod_security_policy);
        assert_eq!(
            config.services.kubelet.base.extra_args.as_ref().and_then(|a| a.get("max-pods")).map(String::as_str),
            Some("250")
        );
        assert_eq!(
            config.network.canal_network_provider.as_ref().map(|c| c.flannel.iface.as_str()),
            Some("eth1")
        );
        assert_eq!(config.system_images.kube_dns.as_deref(), Some("rancher/k8s-dns-kube-dns:1.15.0"));
        assert_eq!(
            config.cloud_provider.aws_cloud_provider.as_ref().map(|a| a.global.route_table_id.as_str()),
            Some("rtb-1")
        );

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["services"]["kubeApi"]["serviceClusterIpRange"], "10.43.0.0/16");
        assert_eq!(value["systemImages"]["coredns"], "rancher/coredns-coredns:1.6.5");
        assert_eq!(value["dns"]["upstreamnameservers"][0], "1.1.1.1");
        assert!(value["dns"]["nodelocal"].is_null());
        assert_eq!(value["sshAgentAuth"], false);
    }

    #[test]
    fn test_obj_cluster_name() {
        let mut config = RancherKubernetesEngineConfig::default();
        assert_eq!(config.obj_cluster_name(), None);
        config.cluster_name = Some("c-abcde".to_string());
        assert_eq!(config.obj_cluster_name(), Some("c-abcde"));
    }

    #[test]
    fn test_system_image_kind_keeps_acronym() {
        let image = RkeK8sSystemImage::new("cattle-global-data", "v1.17.6-rancher2-1");
        assert_eq!(image.kind, "RKEK8sSystemImage");
        assert_eq!(image.api_version, "management.cattle.io/v3");
        assert_eq!(image.metadata.namespace.as_deref(), Some("cattle-global-data"));
        assert_eq!(group_version_resource::<RkeK8sSystemImage>().resource, "rkek8ssystemimages");
        assert_eq!(RkeAddon::kind(&()), "RKEAddon");
        assert!(<RkeK8sServiceOption as CattleObject>::NAMESPACED);
    }

    #[test]
    fn test_windows_system_image_wire_format() {
        let mut image = RkeK8sWindowsSystemImage::new("cattle-global-data", "v1.15.11-rancher1-1");
        image.system_images.kubelet_pause = Some("rancher/kubelet-pause:v0.1.3".to_string());
        image.system_images.canal_cni_binaries = Some("rancher/canal-cni:v0.0.1".to_string());

        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["kind"], "RKEK8sWindowsSystemImage");
        assert_eq!(value["windowsSystemImages"]["kubeletPause"], "rancher/kubelet-pause:v0.1.3");
        assert_eq!(value["windowsSystemImages"]["canalCniBinaries"], "rancher/canal-cni:v0.0.1");
        assert!(value["windowsSystemImages"].get("nginxProxy").is_none());
        assert_eq!(
            group_version_resource::<RkeK8sWindowsSystemImage>().resource,
            "rkek8swindowssystemimages"
        );
    }

    #[test]
    fn test_service_options_serialize_nulls() {
        let mut option = RkeK8sServiceOption::new("cattle-global-data", "v1.17");
        option.service_options.kubelet =
            Some(BTreeMap::from([("pod-infra-container-image".to_string(), "pause".to_string())]));

        let value = serde_json::to_value(&option).unwrap();
        assert_eq!(value["serviceOptions"]["kubelet"]["pod-infra-container-image"], "pause");
        assert!(value["serviceOptions"]["kubeapi"].is_null());
        assert_eq!(value["kind"], "RKEK8sServiceOption");
    }

    #[test]
    fn test_vsphere_kebab_case() {
        let provider: VsphereCloudProvider = serde_json::from_value(json!({
            "global": {"server": "vc.example.com", "insecure-flag": true, "soap-roundtrip-count": 3},
            "workspace": {"resourcepool-path": "/dc/host/pool", "default-datastore": "ds1"}
        }))
        .unwrap();

        assert_eq!(provider.global.vcenter_ip.as_deref(), Some("vc.example.com"));
        assert!(provider.global.insecure_flag);
        assert_eq!(provider.global.round_tripper_count, Some(3));
        assert_eq!(provider.workspace.resource_pool_path.as_deref(), Some("/dc/host/pool"));
        assert_eq!(provider.workspace.default_datastore.as_deref(), Some("ds1"));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = RancherKubernetesEngineConfig {
            nodes: vec![RkeConfigNode {
                role: vec![RKE_ROLE_WORKER.to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let copy = original.clone();
        original.nodes[0].role.push(RKE_ROLE_ETCD.to_string());

        assert_eq!(copy.nodes[0].role, vec![RKE_ROLE_WORKER.to_string()]);
        assert_ne!(copy, original);
    }
}
