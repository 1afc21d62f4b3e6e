// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::groups;
use crate::types::meta::{cluster_from_meta, cluster_of_project};
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};

/// Applies a pod security policy template to every namespace of a project
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityPolicyTemplateProjectBinding {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(rename = "podSecurityPolicyTemplateId", default)]
    pub pod_security_policy_template_name: String,
    /// `cluster:project` id
    #[serde(rename = "targetProjectId", default)]
    pub target_project_name: String,
}

flat_resource!(
    PodSecurityPolicyTemplateProjectBinding,
    groups::MANAGEMENT,
    "podsecuritypolicytemplateprojectbindings",
    namespaced
);
cattle_object!(PodSecurityPolicyTemplateProjectBinding, namespaced, |b| {
    cluster_of_project(&b.target_project_name)
        .map(String::from)
        .or_else(|| cluster_from_meta(&b.metadata))
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::meta::CattleObject;
    use serde_json::json;

    #[test]
    fn test_binding_wire_names_and_cluster() {
        let binding: PodSecurityPolicyTemplateProjectBinding = serde_json::from_value(json!({
            "apiVersion": "management.cattle.io/v3",
            "kind": "PodSecurityPolicyTemplateProjectBinding",
            "metadata": {"name": "pspbinding-1", "namespace": "p-xyz"},
            "podSecurityPolicyTemplateId": "restricted",
            "targetProjectId": "c-abcde:p-xyz"
        }))
        .unwrap();

        assert_eq!(binding.pod_security_policy_template_name, "restricted");
        assert_eq!(binding.obj_cluster_name().as_deref(), Some("c-abcde"));

        let value = serde_json::to_value(&binding).unwrap();
        assert_eq!(value["targetProjectId"], "c-abcde:p-xyz");
    }

    #[test]
    fn test_binding_without_project_falls_back_to_namespace() {
        let binding = PodSecurityPolicyTemplateProjectBinding::new("c-abcde", "pspbinding-2");
        assert_eq!(binding.obj_cluster_name().as_deref(), Some("c-abcde"));
    }
}
