// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed CRUD for one resource kind, bound to a namespace.

use crate::error::Result;
use crate::types::meta::CattleObject;
use futures::Stream;
use kube::api::{DeleteParams, ListParams, ObjectList, Patch, PatchParams, PostParams};
use kube_runtime::watcher::{self, watcher};
use kube::{Api, Client, ResourceExt};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ObjectClient<K: CattleObject> {
    client: Client,
    namespace: String,
    api: Api<K>,
}

impl<K: CattleObject> ObjectClient<K> {
    /// An empty namespace addresses all namespaces
    pub fn new(client: Client, namespace: &str) -> Self {
        let api = K::api(client.clone(), namespace);
        Self {
            client,
            namespace: namespace.to_string(),
            api,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn api(&self) -> &Api<K> {
        &self.api
    }

    /// The namespace-bound api for `obj` when this client spans all namespaces
    fn api_for(&self, obj: &K) -> Api<K> {
        match obj.namespace() {
            Some(ns) if K::NAMESPACED && self.namespace.is_empty() => {
                K::api(self.client.clone(), &ns)
            }
            _ => self.api.clone(),
        }
    }

    fn namespaced_api(&self, namespace: &str) -> Api<K> {
        if namespace == self.namespace {
            self.api.clone()
        } else {
            K::api(self.client.clone(), namespace)
        }
    }

    #[instrument(skip(self, obj), fields(kind = %K::kind(&()), name = %obj.name_any()))]
    pub async fn create(&self, obj: &K) -> Result<K> {
        debug!("Creating object");
        Ok(self.api_for(obj).create(&PostParams::default(), obj).await?)
    }

    #[instrument(skip(self), fields(kind = %K::kind(&())))]
    pub async fn get(&self, name: &str) -> Result<K> {
        Ok(self.api.get(name).await?)
    }

    #[instrument(skip(self), fields(kind = %K::kind(&())))]
    pub async fn get_namespaced(&self, namespace: &str, name: &str) -> Result<K> {
        Ok(self.namespaced_api(namespace).get(name).await?)
    }

    #[instrument(skip(self, obj), fields(kind = %K::kind(&()), name = %obj.name_any()))]
    pub async fn update(&self, obj: &K) -> Result<K> {
        debug!("Updating object");
        Ok(self
            .api_for(obj)
            .replace(&obj.name_any(), &PostParams::default(), obj)
            .await?)
    }

    #[instrument(skip(self), fields(kind = %K::kind(&())))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.api.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(kind = %K::kind(&())))]
    pub async fn delete_namespaced(&self, namespace: &str, name: &str) -> Result<()> {
        self.namespaced_api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    #[instrument(skip(self, params), fields(kind = %K::kind(&())))]
    pub async fn list(&self, params: &ListParams) -> Result<ObjectList<K>> {
        Ok(self.api.list(params).await?)
    }

    /// Watch events for this client's namespace, relisting with backoff handled by the caller
    pub fn watch(
        &self,
        config: watcher::Config,
    ) -> impl Stream<Item = std::result::Result<watcher::Event<K>, watcher::Error>> + Send {
        watcher(self.api.clone(), config)
    }

    #[instrument(skip(self, delete, list), fields(kind = %K::kind(&())))]
    pub async fn delete_collection(&self, delete: &DeleteParams, list: &ListParams) -> Result<()> {
        self.api.delete_collection(delete, list).await?;
        Ok(())
    }

    #[instrument(skip(self, patch), fields(kind = %K::kind(&())))]
    pub async fn patch<P: Serialize + Debug>(&self, name: &str, patch: &Patch<P>) -> Result<K> {
        Ok(self.api.patch(name, &PatchParams::default(), patch).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{list_json, object_json, MockService};
    use crate::types::management::{EtcdBackup, EtcdBackupSpec, Setting};

    const BACKUPS: &str = "/apis/management.cattle.io/v3/namespaces/c-1/etcdbackups";

    fn backup(name: &str) -> EtcdBackup {
        let mut backup = EtcdBackup::new(
            name,
            EtcdBackupSpec {
                cluster_id: "c-1".to_string(),
                filename: "b1.zip".to_string(),
                ..Default::default()
            },
        );
        backup.metadata.namespace = Some("c-1".to_string());
        backup
    }

    #[tokio::test]
    async fn test_get_namespaced() {
        let mock = MockService::new().on_get(&format!("{}/b1", BACKUPS), 200, &object_json(&backup("b1")));
        let client: ObjectClient<EtcdBackup> = ObjectClient::new(mock.into_client(), "");

        let found = client.get_namespaced("c-1", "b1").await.unwrap();
        assert_eq!(found.spec.filename, "b1.zip");
    }

    #[tokio::test]
    async fn test_create_uses_object_namespace_for_all_namespaces_client() {
        let mock = MockService::new().on_post(BACKUPS, 201, &object_json(&backup("b1")));
        let requests = mock.requests();
        let client: ObjectClient<EtcdBackup> = ObjectClient::new(mock.into_client(), "");

        let created = client.create(&backup("b1")).await.unwrap();
        assert_eq!(created.spec.cluster_id, "c-1");
        assert_eq!(
            requests.lock().unwrap().as_slice(),
            &[("POST".to_string(), BACKUPS.to_string())]
        );
    }

    #[tokio::test]
    async fn test_update_puts_to_object_path() {
        let mock = MockService::new().on_put(&format!("{}/b1", BACKUPS), 200, &object_json(&backup("b1")));
        let requests = mock.requests();
        let client: ObjectClient<EtcdBackup> = ObjectClient::new(mock.into_client(), "c-1");

        client.update(&backup("b1")).await.unwrap();
        assert_eq!(requests.lock().unwrap()[0].0, "PUT");
    }

    #[tokio::test]
    async fn test_list() {
        let mock = MockService::new().on_get(
            BACKUPS,
            200,
            &list_json("management.cattle.io/v3", "EtcdBackupList", &[backup("b1"), backup("b2")]),
        );
        let client: ObjectClient<EtcdBackup> = ObjectClient::new(mock.into_client(), "c-1");

        let list = client.list(&ListParams::default()).await.unwrap();
        assert_eq!(list.items.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let client: ObjectClient<Setting> = ObjectClient::new(MockService::new().into_client(), "");

        let err = client.get("server-url").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_cluster_scoped() {
        let path = "/apis/management.cattle.io/v3/settings/server-url";
        let mock = MockService::new().on_delete(path, 200, &object_json(&Setting::new("server-url")));
        let requests = mock.requests();
        let client: ObjectClient<Setting> = ObjectClient::new(mock.into_client(), "");

        client.delete("server-url").await.unwrap();
        assert_eq!(
            requests.lock().unwrap().as_slice(),
            &[("DELETE".to_string(), path.to_string())]
        );
    }
}
