// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Clients for the three cattle API groups.
//!
//! Each group client owns the controllers created through its resource
//! clients, so `sync` and `start` cover everything registered so far.

use crate::client::ResourceClient;
use crate::controllers::{GenericController, Starter};
use crate::error::{CattleError, Result};
use crate::kubernetes::client::client_from_kubeconfig;
use crate::types::meta::CattleObject;
use crate::types::{cluster, management, project};
use futures::future::try_join_all;
use kube::Client;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::info;

/// group, kind, namespace
type ControllerKey = (String, String, String);

pub struct GroupClient {
    client: Client,
    requeue_after: Duration,
    controllers: Mutex<HashMap<ControllerKey, Box<dyn Any + Send + Sync>>>,
    starters: Mutex<Vec<Arc<dyn Starter>>>,
}

impl GroupClient {
    pub fn new(client: Client, requeue_after: Duration) -> Self {
        Self {
            client,
            requeue_after,
            controllers: Mutex::new(HashMap::new()),
            starters: Mutex::new(Vec::new()),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn controller<K: CattleObject>(&self, namespace: &str) -> GenericController<K> {
        let mut controllers = self
            .controllers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (
            K::group(&()).into_owned(),
            K::kind(&()).into_owned(),
            namespace.to_string(),
        );
        if let Some(existing) = controllers
            .get(&key)
            .and_then(|c| c.downcast_ref::<GenericController<K>>())
        {
            return existing.clone();
        }

        let controller = GenericController::new(
            &format!("{}Controller", K::kind(&())),
            K::api(self.client.clone(), namespace),
            self.requeue_after,
        );
        controllers.insert(key, Box::new(controller.clone()));
        self.starters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(controller.clone()));
        controller
    }

    fn starters(&self) -> Vec<Arc<dyn Starter>> {
        self.starters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn starter_count(&self) -> usize {
        self.starters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Wait for the caches of every registered controller
    pub async fn sync(&self) -> Result<()> {
        let starters = self.starters();
        try_join_all(starters.iter().map(|s| s.sync())).await?;
        Ok(())
    }

    /// Sync all caches, then start the workers
    pub async fn start(&self, threadiness: usize) -> Result<()> {
        self.sync().await?;
        for starter in self.starters() {
            info!("Starting controller {}", starter.name());
            starter.start(threadiness);
        }
        Ok(())
    }
}

macro_rules! group_client {
    ($(#[$doc:meta])* $name:ident { $($method:ident => $kind:ty),* $(,)? }) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            group: Arc<GroupClient>,
        }

        impl $name {
            pub fn new(client: Client, requeue_after: Duration) -> Self {
                Self {
                    group: Arc::new(GroupClient::new(client, requeue_after)),
                }
            }

            pub fn from_config(config: kube::Config, requeue_after: Duration) -> Result<Self> {
                let client = Client::try_from(config)
                    .map_err(|e| CattleError::KubeconfigError(format!("Failed to create client: {}", e)))?;
                Ok(Self::new(client, requeue_after))
            }

            pub fn group(&self) -> &Arc<GroupClient> {
                &self.group
            }

            pub async fn sync(&self) -> Result<()> {
                self.group.sync().await
            }

            pub async fn start(&self, threadiness: usize) -> Result<()> {
                self.group.start(threadiness).await
            }

            $(
                pub fn $method(&self, namespace: &str) -> ResourceClient<$kind> {
                    ResourceClient::new(Arc::clone(&self.group), namespace)
                }
            )*
        }
    };
}

group_client!(
    /// `management.cattle.io/v3`
    ManagementClient {
        cluster_alerts => management::ClusterAlert,
        project_alerts => management::ProjectAlert,
        cluster_alert_groups => management::ClusterAlertGroup,
        project_alert_groups => management::ProjectAlertGroup,
        cluster_alert_rules => management::ClusterAlertRule,
        project_alert_rules => management::ProjectAlertRule,
        notifiers => management::Notifier,
        clusters => management::Cluster,
        cluster_randomizers => management::ClusterRandomizer,
        rke_k8s_system_images => management::RkeK8sSystemImage,
        rke_k8s_windows_system_images => management::RkeK8sWindowsSystemImage,
        rke_k8s_service_options => management::RkeK8sServiceOption,
        rke_addons => management::RkeAddon,
        etcd_backups => management::EtcdBackup,
        node_templates => management::NodeTemplate,
        nodes => management::Node,
        node_pools => management::NodePool,
        catalogs => management::Catalog,
        tokens => management::Token,
        users => management::User,
        groups => management::Group,
        group_members => management::GroupMember,
        pod_security_policy_template_project_bindings => management::PodSecurityPolicyTemplateProjectBinding,
        settings => management::Setting,
        listen_configs => management::ListenConfig,
    }
);

group_client!(
    /// `project.cattle.io/v3`
    ProjectClient {
        pipelines => project::Pipeline,
        pipeline_executions => project::PipelineExecution,
        pipeline_settings => project::PipelineSetting,
        source_code_credentials => project::SourceCodeCredential,
        source_code_repositories => project::SourceCodeRepository,
    }
);

group_client!(
    /// `cluster.cattle.io/v3`, served by downstream clusters
    ClusterClient {
        cluster_auth_tokens => cluster::ClusterAuthToken,
        cluster_user_attributes => cluster::ClusterUserAttribute,
    }
);

impl ClusterClient {
    /// Connect to a downstream cluster with the kubeconfig the management plane stores for it
    pub async fn from_kubeconfig(kubeconfig: &str, requeue_after: Duration) -> Result<Self> {
        let client = client_from_kubeconfig(kubeconfig).await?;
        Ok(Self::new(client, requeue_after))
    }
}
