// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cattle_types::client::{ManagementClient, ProjectClient, ResourceClient};
use cattle_types::config::Config;
use cattle_types::constants::groups;
use cattle_types::kubernetes::{default_client, wait_for_api_group};
use cattle_types::types::condition::HasConditions;
use cattle_types::types::CattleObject;

/// Log every change and deletion seen for one kind
fn watch<K: CattleObject>(resources: ResourceClient<K>) {
    let kind = K::kind(&()).into_owned();
    resources.add_handler(
        "cattle-watch",
        move |key: String, obj: Option<Arc<K>>| {
            let kind = kind.clone();
            async move {
                match obj {
                    Some(obj) => info!(
                        "{} {} changed, cluster={:?}",
                        kind,
                        key,
                        obj.obj_cluster_name()
                    ),
                    None => info!("{} {} deleted", kind, key),
                }
                Ok(())
            }
        },
    );
}

/// Like `watch`, but also reports the conditions
fn watch_with_conditions<K: CattleObject + HasConditions>(resources: ResourceClient<K>) {
    let kind = K::kind(&()).into_owned();
    resources.add_handler(
        "cattle-watch",
        move |key: String, obj: Option<Arc<K>>| {
            let kind = kind.clone();
            async move {
                match obj {
                    Some(obj) => {
                        let conditions: Vec<String> = obj
                            .conditions()
                            .iter()
                            .map(|c| format!("{}={}", c.condition_type, c.status))
                            .collect();
                        info!("{} {} changed, conditions=[{}]", kind, key, conditions.join(","));
                    }
                    None => info!("{} {} deleted", kind, key),
                }
                Ok(())
            }
        },
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting cattle-watch");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={:?}, threadiness={}, kinds={:?}",
        config.watch_namespace, config.threadiness, config.watch_kinds
    );

    let client = default_client().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for the management API group to become available...");
    wait_for_api_group(&client, groups::MANAGEMENT).await;
    if config.watches_project_kinds() {
        info!("Waiting for the project API group to become available...");
        wait_for_api_group(&client, groups::PROJECT).await;
    }

    let management = ManagementClient::new(client.clone(), config.requeue_after);
    let project = ProjectClient::new(client, config.requeue_after);
    let ns = config.watch_namespace.as_str();

    for kind in &config.watch_kinds {
        match kind.as_str() {
            "clusters" => watch_with_conditions(management.clusters(ns)),
            "etcdbackups" => watch_with_conditions(management.etcd_backups(ns)),
            "notifiers" => watch(management.notifiers(ns)),
            "clusteralerts" => watch(management.cluster_alerts(ns)),
            "projectalerts" => watch(management.project_alerts(ns)),
            "nodes" => watch_with_conditions(management.nodes(ns)),
            "nodepools" => watch_with_conditions(management.node_pools(ns)),
            "nodetemplates" => watch_with_conditions(management.node_templates(ns)),
            "catalogs" => watch_with_conditions(management.catalogs(ns)),
            "tokens" => watch(management.tokens(ns)),
            "users" => watch_with_conditions(management.users(ns)),
            "settings" => watch(management.settings(ns)),
            "pipelines" => watch(project.pipelines(ns)),
            "pipelineexecutions" => watch_with_conditions(project.pipeline_executions(ns)),
            other => warn!("Unknown kind {}, ignoring", other),
        }
    }

    management.start(config.threadiness).await?;
    project.start(config.threadiness).await?;
    info!("Controllers started, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    Ok(())
}
