// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::groups;
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Global server setting
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub customized: bool,
    /// Where the effective value came from, e.g. `env`
    #[serde(default)]
    pub source: String,
}

flat_resource!(Setting, groups::MANAGEMENT, "settings", cluster);
cattle_object!(Setting, cluster);

impl Setting {
    /// The configured value, falling back to the default
    pub fn effective_value(&self) -> &str {
        if self.value.is_empty() {
            &self.default
        } else {
            &self.value
        }
    }
}

/// TLS listener configuration of the server
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListenConfig {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One of https, http, acme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_certs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tos: Vec<String>,
    #[serde(default)]
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject_alternative_names: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_ips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_certs: Option<BTreeMap<String, String>>,
}

flat_resource!(ListenConfig, groups::MANAGEMENT, "listenconfigs", cluster);
cattle_object!(ListenConfig, cluster);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_setting_effective_value() {
        let mut setting = Setting::new("server-url");
        setting.default = "https://localhost".to_string();
        assert_eq!(setting.effective_value(), "https://localhost");

        setting.value = "https://rancher.example.com".to_string();
        assert_eq!(setting.effective_value(), "https://rancher.example.com");
    }

    #[test]
    fn test_listen_config_wire_format() {
        let config: ListenConfig = serde_json::from_value(json!({
            "apiVersion": "management.cattle.io/v3",
            "kind": "ListenConfig",
            "metadata": {"name": "cli-config"},
            "mode": "https",
            "caCerts": "-----BEGIN CERTIFICATE-----",
            "domains": ["rancher.example.com"],
            "enabled": true,
            "knownIps": ["10.0.0.1"],
            "generatedCerts": {"local/10.0.0.1": "cert"}
        }))
        .unwrap();

        assert_eq!(config.mode.as_deref(), Some("https"));
        assert!(config.enabled);
        assert_eq!(config.known_ips, vec!["10.0.0.1"]);

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["caCerts"], "-----BEGIN CERTIFICATE-----");
        assert_eq!(value["knownIps"][0], "10.0.0.1");
        assert!(value.get("tos").is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = ListenConfig::new("cli-config");
        original.generated_certs = Some(BTreeMap::from([("a".to_string(), "1".to_string())]));
        let copy = original.clone();

        if let Some(certs) = original.generated_certs.as_mut() {
            certs.insert("b".to_string(), "2".to_string());
        }
        assert_eq!(copy.generated_certs.map(|c| c.len()), Some(1));
    }
}
