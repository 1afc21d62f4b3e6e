// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD manifests for the cattle kinds and API group availability checks.

use crate::constants::discovery::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::constants::groups::VERSION;
use crate::error::Result;
use crate::types::meta::CattleObject;
use crate::types::{cluster, management, project};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, CustomResourceDefinitionNames, CustomResourceDefinitionSpec,
    CustomResourceDefinitionVersion, CustomResourceValidation, JSONSchemaProps,
};
use kube::api::ObjectMeta;
use kube::{discovery::Discovery, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// CRD for `K` with an open schema; fields are not validated server side
pub fn crd_for<K: CattleObject>() -> CustomResourceDefinition {
    let group = K::group(&()).into_owned();
    let plural = K::plural(&()).into_owned();
    let kind = K::kind(&()).into_owned();

    CustomResourceDefinition {
        metadata: ObjectMeta {
            name: Some(format!("{}.{}", plural, group)),
            ..Default::default()
        },
        spec: CustomResourceDefinitionSpec {
            group,
            names: CustomResourceDefinitionNames {
                singular: Some(kind.to_lowercase()),
                list_kind: Some(format!("{}List", kind)),
                kind,
                plural,
                ..Default::default()
            },
            scope: if K::NAMESPACED { "Namespaced" } else { "Cluster" }.to_string(),
            versions: vec![CustomResourceDefinitionVersion {
                name: K::version(&()).into_owned(),
                served: true,
                storage: true,
                schema: Some(CustomResourceValidation {
                    open_api_v3_schema: Some(JSONSchemaProps {
                        type_: Some("object".to_string()),
                        x_kubernetes_preserve_unknown_fields: Some(true),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            }],
            ..Default::default()
        },
        status: None,
    }
}

/// CRDs of every kind in the three cattle groups
pub fn all_crds() -> Vec<CustomResourceDefinition> {
    vec![
        crd_for::<management::ClusterAlert>(),
        crd_for::<management::ProjectAlert>(),
        crd_for::<management::ClusterAlertGroup>(),
        crd_for::<management::ProjectAlertGroup>(),
        crd_for::<management::ClusterAlertRule>(),
        crd_for::<management::ProjectAlertRule>(),
        crd_for::<management::Notifier>(),
        crd_for::<management::Cluster>(),
        crd_for::<management::ClusterRandomizer>(),
        crd_for::<management::RkeK8sSystemImage>(),
        crd_for::<management::RkeK8sWindowsSystemImage>(),
        crd_for::<management::RkeK8sServiceOption>(),
        crd_for::<management::RkeAddon>(),
        crd_for::<management::EtcdBackup>(),
        crd_for::<management::NodeTemplate>(),
        crd_for::<management::Node>(),
        crd_for::<management::NodePool>(),
        crd_for::<management::Catalog>(),
        crd_for::<management::Token>(),
        crd_for::<management::User>(),
        crd_for::<management::Group>(),
        crd_for::<management::GroupMember>(),
        crd_for::<management::PodSecurityPolicyTemplateProjectBinding>(),
        crd_for::<management::Setting>(),
        crd_for::<management::ListenConfig>(),
        crd_for::<project::Pipeline>(),
        crd_for::<project::PipelineExecution>(),
        crd_for::<project::PipelineSetting>(),
        crd_for::<project::SourceCodeCredential>(),
        crd_for::<project::SourceCodeRepository>(),
        crd_for::<cluster::ClusterAuthToken>(),
        crd_for::<cluster::ClusterUserAttribute>(),
    ]
}

/// Wait until `group` is served by the API server.
/// Polls with exponential backoff starting at POLL_INTERVAL_SECS seconds.
pub async fn wait_for_api_group(client: &Client, group: &str) {
    let mut interval = POLL_INTERVAL_SECS;

    loop {
        match api_group_served(client, group).await {
            Ok(true) => {
                info!("API group {}/{} is available", group, VERSION);
                return;
            }
            Ok(false) => {
                info!(
                    "API group {}/{} not yet available, waiting {} seconds...",
                    group, VERSION, interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for API group {}: {}, retrying in {} seconds...",
                    group, e, interval
                );
            }
        }

        sleep(Duration::from_secs(interval)).await;
        interval = (interval * 2).min(POLL_MAX_INTERVAL_SECS);
    }
}

async fn api_group_served(client: &Client, group: &str) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[group])
        .run()
        .await?;

    let served = discovery
        .groups()
        .filter(|g| g.name() == group)
        .any(|g| g.versions().any(|v| v == VERSION));
    Ok(served)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_crd_for_namespaced_kind() {
        let crd = crd_for::<management::EtcdBackup>();
        assert_eq!(crd.metadata.name.as_deref(), Some("etcdbackups.management.cattle.io"));
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.names.kind, "EtcdBackup");
        assert_eq!(crd.spec.names.list_kind.as_deref(), Some("EtcdBackupList"));
        assert_eq!(crd.spec.versions[0].name, "v3");
    }

    #[test]
    fn test_crd_for_cluster_scoped_flat_kind() {
        let crd = crd_for::<management::RkeK8sSystemImage>();
        assert_eq!(crd.spec.names.kind, "RKEK8sSystemImage");
        assert_eq!(crd.spec.names.plural, "rkek8ssystemimages");

        let crd = crd_for::<management::Setting>();
        assert_eq!(crd.spec.scope, "Cluster");
    }

    #[test]
    fn test_schema_preserves_unknown_fields() {
        let crd = crd_for::<project::Pipeline>();
        let value = serde_json::to_value(&crd).unwrap();
        assert_eq!(
            value["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["x-kubernetes-preserve-unknown-fields"],
            true
        );
    }

    #[test]
    fn test_all_crds_are_unique() {
        let crds = all_crds();
        let names: HashSet<_> = crds.iter().filter_map(|c| c.metadata.name.clone()).collect();
        assert_eq!(names.len(), crds.len());
        assert!(names.contains("clusterauthtokens.cluster.cattle.io"));
        assert!(names.contains("pipelineexecutions.project.cattle.io"));
        assert!(names.contains("rkek8swindowssystemimages.management.cattle.io"));
        assert!(names.contains("podsecuritypolicytemplateprojectbindings.management.cattle.io"));
    }
}
