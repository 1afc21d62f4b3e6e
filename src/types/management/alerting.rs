// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Alerts, alert groups, alert rules and notifiers.

use crate::types::meta::cluster_of_project;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "ClusterAlert",
    namespaced,
    status = "AlertStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAlertSpec {
    #[serde(flatten)]
    pub common: AlertCommonSpec,
    pub cluster_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_node: Option<TargetNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_system_service: Option<TargetSystemService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_event: Option<TargetEvent>,
}

cattle_object!(ClusterAlert, namespaced, |a| Some(a.spec.cluster_name.clone()));

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "ProjectAlert",
    namespaced,
    status = "AlertStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAlertSpec {
    #[serde(flatten)]
    pub common: AlertCommonSpec,
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_workload: Option<TargetWorkload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_pod: Option<TargetPod>,
}

cattle_object!(ProjectAlert, namespaced, |a| {
    cluster_of_project(&a.spec.project_name).map(String::from)
});

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertCommonSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One of info, critical, warning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_wait_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_interval_seconds: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifier_name: Option<String>,
    /// One of slack, email, pagerduty, webhook, wechat, dingtalk, msteams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifier_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_threshold: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetPod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_times: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_interval_seconds: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_kind: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetWorkload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_percentage: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetSystemService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertStatus {
    /// One of active, inactive, alerting, muted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_state: Option<String>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "ClusterAlertGroup",
    namespaced,
    status = "AlertStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterGroupSpec {
    pub cluster_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<Recipient>,
    #[serde(flatten)]
    pub common: CommonGroupField,
}

cattle_object!(ClusterAlertGroup, namespaced, |g| Some(g.spec.cluster_name.clone()));

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "ProjectAlertGroup",
    namespaced,
    status = "AlertStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroupSpec {
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<Recipient>,
    #[serde(flatten)]
    pub common: CommonGroupField,
}

cattle_object!(ProjectAlertGroup, namespaced, |g| {
    cluster_of_project(&g.spec.project_name).map(String::from)
});

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "ClusterAlertRule",
    namespaced,
    status = "AlertStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAlertRuleSpec {
    #[serde(flatten)]
    pub common: CommonRuleField,
    pub cluster_name: String,
    pub group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_rule: Option<NodeRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_rule: Option<EventRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_service_rule: Option<SystemServiceRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_rule: Option<MetricRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_scan_rule: Option<ClusterScanRule>,
}

cattle_object!(ClusterAlertRule, namespaced, |r| Some(r.spec.cluster_name.clone()));

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "ProjectAlertRule",
    namespaced,
    status = "AlertStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAlertRuleSpec {
    #[serde(flatten)]
    pub common: CommonRuleField,
    pub project_name: String,
    pub group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_rule: Option<PodRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload_rule: Option<WorkloadRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_rule: Option<MetricRule>,
}

cattle_object!(ProjectAlertRule, namespaced, |r| {
    cluster_of_project(&r.spec.project_name).map(String::from)
});

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommonGroupField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub timing: TimingField,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommonRuleField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited: Option<bool>,
    #[serde(flatten)]
    pub timing: TimingField,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimingField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_wait_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_interval_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_interval_seconds: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterScanRule {
    /// One of manual, scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_run_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failures_only: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_value: Option<f64>,
}

pub type NodeRule = TargetNode;
pub type PodRule = TargetPod;
pub type EventRule = TargetEvent;
pub type WorkloadRule = TargetWorkload;
pub type SystemServiceRule = TargetSystemService;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "Notifier",
    namespaced,
    status = "NotifierStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct NotifierSpec {
    pub cluster_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_resolved: Option<bool>,
    #[serde(flatten)]
    pub configs: NotifierConfigs,
}

cattle_object!(Notifier, namespaced, |n| Some(n.spec.cluster_name.clone()));

impl NotifierSpec {
    /// Recipient type name of the first configured backend
    pub fn notifier_type(&self) -> Option<&'static str> {
        self.configs.notifier_type()
    }
}

/// The backend configurations a notifier or a test notification may carry
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotifierConfigs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_config: Option<SmtpConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_config: Option<SlackConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagerduty_config: Option<PagerdutyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_config: Option<WebhookConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_config: Option<WechatConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dingtalk_config: Option<DingtalkConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msteams_config: Option<MsTeamsConfig>,
}

impl NotifierConfigs {
    pub fn notifier_type(&self) -> Option<&'static str> {
        if self.smtp_config.is_some() {
            Some("email")
        } else if self.slack_config.is_some() {
            Some("slack")
        } else if self.pagerduty_config.is_some() {
            Some("pagerduty")
        } else if self.webhook_config.is_some() {
            Some("webhook")
        } else if self.wechat_config.is_some() {
            Some("wechat")
        } else if self.dingtalk_config.is_some() {
            Some("dingtalk")
        } else if self.msteams_config.is_some() {
            Some("msteams")
        } else {
            None
        }
    }
}

/// Payload of the notifier `send` action
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub configs: NotifierConfigs,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SmtpConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpClientConfig {
    /// HTTP proxy server to use to connect to the targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub http_client_config: HttpClientConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagerdutyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,
    #[serde(flatten)]
    pub http_client_config: HttpClientConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub http_client_config: HttpClientConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WechatConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corp: Option<String>,
    /// One of tag, party, user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(flatten)]
    pub http_client_config: HttpClientConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DingtalkConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(flatten)]
    pub http_client_config: HttpClientConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MsTeamsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub http_client_config: HttpClientConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotifierStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_credential_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_credential_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dingtalk_credential_secret: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::meta::CattleObject;
    use serde_json::json;

    #[test]
    fn test_cluster_alert_flattens_common_spec() {
        let alert: ClusterAlert = serde_json::from_value(json!({
            "apiVersion": "management.cattle.io/v3",
            "kind": "ClusterAlert",
            "metadata": {"name": "node-down", "namespace": "c-abc"},
            "spec": {
                "clusterName": "c-abc",
                "displayName": "Node down",
                "severity": "critical",
                "recipients": [{"notifierName": "c-abc:slack", "notifierType": "slack"}],
                "initialWaitSeconds": 180,
                "targetNode": {"condition": "notready", "cpuThreshold": 70}
            },
            "status": {"alertState": "active"}
        }))
        .unwrap();

        assert_eq!(alert.spec.common.display_name.as_deref(), Some("Node down"));
        assert_eq!(alert.spec.common.initial_wait_seconds, Some(180));
        assert_eq!(alert.spec.common.recipients.len(), 1);
        assert_eq!(
            alert.spec.target_node.as_ref().and_then(|t| t.cpu_threshold),
            Some(70)
        );
        assert_eq!(
            alert.status.as_ref().and_then(|s| s.alert_state.as_deref()),
            Some("active")
        );
        assert_eq!(alert.obj_cluster_name().as_deref(), Some("c-abc"));
    }

    #[test]
    fn test_project_alert_cluster_from_project_name() {
        let alert = ProjectAlert::new(
            "pod-restarts",
            ProjectAlertSpec {
                project_name: "c-abc:p-xyz".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(alert.obj_cluster_name().as_deref(), Some("c-abc"));

        let orphan = ProjectAlert::new("orphan", ProjectAlertSpec::default());
        assert_eq!(orphan.obj_cluster_name(), None);
    }

    #[test]
    fn test_rule_timing_serializes_inline() {
        let spec = ClusterAlertRuleSpec {
            cluster_name: "c-abc".to_string(),
            group_name: "c-abc:node-alert".to_string(),
            common: CommonRuleField {
                severity: Some("warning".to_string()),
                timing: TimingField {
                    group_wait_seconds: Some(30),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["groupWaitSeconds"], 30);
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["groupName"], "c-abc:node-alert");
        assert!(value.get("nodeRule").is_none());
    }

    #[test]
    fn test_notifier_type_and_wire_names() {
        let spec = NotifierSpec {
            cluster_name: "c-abc".to_string(),
            configs: NotifierConfigs {
                smtp_config: Some(SmtpConfig {
                    host: Some("smtp.example.com".to_string()),
                    port: Some(587),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(spec.notifier_type(), Some("email"));
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["smtpConfig"]["port"], 587);

        let teams: NotifierConfigs = serde_json::from_value(json!({
            "msteamsConfig": {"url": "https://teams", "proxyUrl": "http://proxy:3128"}
        }))
        .unwrap();
        assert_eq!(teams.notifier_type(), Some("msteams"));
        assert_eq!(
            teams.msteams_config.unwrap().http_client_config.proxy_url.as_deref(),
            Some("http://proxy:3128")
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = ClusterAlertGroup::new(
            "group",
            ClusterGroupSpec {
                cluster_name: "c-abc".to_string(),
                recipients: vec![Recipient::default()],
                ..Default::default()
            },
        );
        let copy = original.clone();
        original.spec.recipients.push(Recipient::default());
        original.spec.cluster_name = "c-other".to_string();

        assert_eq!(copy.spec.recipients.len(), 1);
        assert_eq!(copy.spec.cluster_name, "c-abc");
    }
}
