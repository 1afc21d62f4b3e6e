// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::groups;
use crate::types::condition::{Cond, Condition};
use crate::types::management::rke::RancherKubernetesEngineConfig;
use crate::types::meta::cluster_of_project;
use k8s_openapi::api::core::v1::ComponentCondition;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::version::Info;
use kube::api::ObjectMeta;
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CLUSTER_ACTION_GENERATE_KUBECONFIG: &str = "generateKubeconfig";
pub const CLUSTER_ACTION_IMPORT_YAML: &str = "importYaml";
pub const CLUSTER_ACTION_EXPORT_YAML: &str = "exportYaml";
pub const CLUSTER_ACTION_VIEW_MONITORING: &str = "viewMonitoring";
pub const CLUSTER_ACTION_EDIT_MONITORING: &str = "editMonitoring";
pub const CLUSTER_ACTION_ENABLE_MONITORING: &str = "enableMonitoring";
pub const CLUSTER_ACTION_DISABLE_MONITORING: &str = "disableMonitoring";
pub const CLUSTER_ACTION_BACKUP_ETCD: &str = "backupEtcd";
pub const CLUSTER_ACTION_RESTORE_FROM_ETCD_BACKUP: &str = "restoreFromEtcdBackup";
pub const CLUSTER_ACTION_ROTATE_CERTIFICATES: &str = "rotateCertificates";
pub const CLUSTER_ACTION_RUN_SECURITY_SCAN: &str = "runSecurityScan";
pub const CLUSTER_ACTION_SAVE_AS_TEMPLATE: &str = "saveAsTemplate";

pub const CLUSTER_CONDITION_READY: Cond = Cond("Ready");
pub const CLUSTER_CONDITION_PENDING: Cond = Cond("Pending");
pub const CLUSTER_CONDITION_CERTS_GENERATED: Cond = Cond("CertsGenerated");
pub const CLUSTER_CONDITION_ETCD: Cond = Cond("etcd");
pub const CLUSTER_CONDITION_PROVISIONED: Cond = Cond("Provisioned");
pub const CLUSTER_CONDITION_UPDATED: Cond = Cond("Updated");
pub const CLUSTER_CONDITION_UPGRADED: Cond = Cond("Upgraded");
pub const CLUSTER_CONDITION_WAITING: Cond = Cond("Waiting");
pub const CLUSTER_CONDITION_REMOVED: Cond = Cond("Removed");
pub const CLUSTER_CONDITION_NO_DISK_PRESSURE: Cond = Cond("NoDiskPressure");
pub const CLUSTER_CONDITION_NO_MEMORY_PRESSURE: Cond = Cond("NoMemoryPressure");
pub const CLUSTER_CONDITION_DEFAULT_PROJECT_CREATED: Cond = Cond("DefaultProjectCreated");
pub const CLUSTER_CONDITION_SYSTEM_PROJECT_CREATED: Cond = Cond("SystemProjectCreated");
pub const CLUSTER_CONDITION_DEFAULT_NAMESPACE_ASSIGNED: Cond = Cond("DefaultNamespaceAssigned");
pub const CLUSTER_CONDITION_SYSTEM_NAMESPACES_ASSIGNED: Cond = Cond("SystemNamespacesAssigned");
pub const CLUSTER_CONDITION_ADDON_DEPLOY: Cond = Cond("AddonDeploy");
pub const CLUSTER_CONDITION_SYSTEM_ACCOUNT_CREATED: Cond = Cond("SystemAccountCreated");
pub const CLUSTER_CONDITION_AGENT_DEPLOYED: Cond = Cond("AgentDeployed");
pub const CLUSTER_CONDITION_GLOBAL_ADMINS_SYNCED: Cond = Cond("GlobalAdminsSynced");
pub const CLUSTER_CONDITION_INITIAL_ROLES_POPULATED: Cond = Cond("InitialRolesPopulated");
pub const CLUSTER_CONDITION_SERVICE_ACCOUNT_MIGRATED: Cond = Cond("ServiceAccountMigrated");
pub const CLUSTER_CONDITION_PROMETHEUS_OPERATOR_DEPLOYED: Cond = Cond("PrometheusOperatorDeployed");
pub const CLUSTER_CONDITION_MONITORING_ENABLED: Cond = Cond("MonitoringEnabled");
pub const CLUSTER_CONDITION_ALERTING_ENABLED: Cond = Cond("AlertingEnabled");

pub const CLUSTER_DRIVER_IMPORTED: &str = "imported";
pub const CLUSTER_DRIVER_LOCAL: &str = "local";
pub const CLUSTER_DRIVER_RKE: &str = "rancherKubernetesEngine";
pub const CLUSTER_DRIVER_K3S: &str = "k3s";

/// Free-form hosted provider configuration
pub type MapStringInterface = serde_json::Map<String, serde_json::Value>;

/// Resource name to quantity, as in core/v1 `ResourceList`
pub type ResourceList = BTreeMap<String, Quantity>;

pub type ClusterCondition = Condition;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "Cluster",
    status = "ClusterStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    #[serde(flatten)]
    pub base: ClusterSpecBase,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub internal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k3s_config: Option<K3sConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_config: Option<ImportedConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_kubernetes_engine_config: Option<MapStringInterface>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_kubernetes_service_config: Option<MapStringInterface>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amazon_elastic_container_service_config: Option<MapStringInterface>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_engine_config: Option<MapStringInterface>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_template_revision_name: Option<String>,
    #[serde(rename = "answers", skip_serializing_if = "Option::is_none")]
    pub cluster_template_answers: Option<Answer>,
    #[serde(rename = "questions", default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_template_questions: Vec<Question>,
}

cattle_object!(Cluster, cluster, |c| c.metadata.name.clone());
conditions_via_status!(Cluster);

/// Marker object; only its metadata is used
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRandomizer {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
}

flat_resource!(ClusterRandomizer, groups::MANAGEMENT, "clusterrandomizers", cluster);
cattle_object!(ClusterRandomizer, cluster);

impl Cluster {
    /// Driver recorded by the provisioner, empty until provisioning starts
    pub fn driver(&self) -> &str {
        self.status.as_ref().map(|s| s.driver.as_str()).unwrap_or_default()
    }

    pub fn is_ready(&self) -> bool {
        CLUSTER_CONDITION_READY.is_true(self)
    }

    pub fn is_local(&self) -> bool {
        self.name_any() == "local" || self.driver() == CLUSTER_DRIVER_LOCAL
    }

    pub fn is_rke(&self) -> bool {
        self.spec.base.rancher_kubernetes_engine_config.is_some()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpecBase {
    #[serde(default)]
    pub desired_agent_image: String,
    #[serde(default)]
    pub desired_auth_image: String,
    #[serde(default)]
    pub agent_image_override: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rancher_kubernetes_engine_config: Option<RancherKubernetesEngineConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pod_security_policy_template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cluster_role_for_project_members: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_root_dir: Option<String>,
    #[serde(default)]
    pub enable_network_policy: Option<bool>,
    #[serde(default)]
    pub enable_cluster_alerting: bool,
    #[serde(default)]
    pub enable_cluster_monitoring: bool,
    #[serde(default)]
    pub windows_prefered_cluster: bool,
    #[serde(default)]
    pub local_cluster_auth_endpoint: LocalClusterAuthEndpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_cluster_scan: Option<ScheduledClusterScan>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportedConfig {
    pub kube_config: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct K3sConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k3s_upgrade_strategy: Option<K3sUpgradeStrategy>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct K3sUpgradeStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_concurrency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_concurrency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drain_server_nodes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drain_worker_nodes: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledClusterScan {
    #[serde(default)]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_config: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_config: Option<ScheduledClusterScanConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledClusterScanConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledClusterScanStatus {
    #[serde(default)]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_timestamp: Option<String>,
}

/// Cluster template answers
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub variable: String,
    #[serde(default, rename = "type")]
    pub question_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ClusterCondition>,
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub agent_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_features: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub auth_image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component_statuses: Vec<ClusterComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<ResourceList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocatable: Option<ResourceList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_spec: Option<Box<ClusterSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_spec: Option<Box<ClusterSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<ResourceList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Info>,
    #[serde(rename = "appliedPodSecurityPolicyTemplateId", default)]
    pub applied_pod_security_policy_template_name: String,
    #[serde(default)]
    pub applied_enable_network_policy: bool,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_status: Option<MonitoringStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_version: Option<i64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub istio_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificates_expiration: Option<BTreeMap<String, CertExpiration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_cluster_scan_status: Option<ScheduledClusterScanStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_cis_run_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterComponentStatus {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ComponentCondition>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grafana_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(default)]
    pub load_balancer_capabilities: LoadBalancerCapabilities,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress_capabilities: Vec<IngressCapabilities>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub node_pool_scaling_supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_port_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taint_support: Option<bool>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub psp_enabled: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protocols_supported: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub health_check_supported: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_default_backend: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalClusterAuthEndpoint {
    #[serde(default)]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_certs: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertExpiration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKubeConfigOutput {
    pub config: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutput {
    pub yaml_output: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportClusterYamlInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaml: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl ImportClusterYamlInput {
    pub fn obj_cluster_name(&self) -> Option<&str> {
        self.project_name.as_deref().and_then(cluster_of_project)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<BTreeMap<String, String>>,
}

pub type MonitoringOutput = MonitoringInput;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestoreFromEtcdBackupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etcd_backup_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_rke_config: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RotateCertificateInput {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ca_certificates: bool,
    /// Any of etcd, kubelet, kube-apiserver, kube-proxy, kube-scheduler, kube-controller-manager
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
}
