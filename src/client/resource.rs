// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-kind client combining CRUD with controller registration.

use crate::client::group::GroupClient;
use crate::client::ObjectClient;
use crate::controllers::lifecycle::{LifecycleAdapter, LifecycleDelegate, ObjectLifecycle};
use crate::controllers::{ClientCache, EnabledFn, GenericController, Handler};
use crate::error::Result;
use crate::types::meta::CattleObject;
use futures::Stream;
use kube::api::{DeleteParams, ListParams, ObjectList, Patch};
use kube_runtime::watcher;
use serde::Serialize;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

pub struct ResourceClient<K: CattleObject> {
    group: Arc<GroupClient>,
    namespace: String,
    object_client: ObjectClient<K>,
}

impl<K: CattleObject> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self {
            group: Arc::clone(&self.group),
            namespace: self.namespace.clone(),
            object_client: self.object_client.clone(),
        }
    }
}

impl<K: CattleObject> ResourceClient<K> {
    pub fn new(group: Arc<GroupClient>, namespace: &str) -> Self {
        let object_client = ObjectClient::new(group.client().clone(), namespace);
        Self {
            group,
            namespace: namespace.to_string(),
            object_client,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The shared controller for this kind and namespace, created on first use
    pub fn controller(&self) -> GenericController<K> {
        self.group.controller::<K>(&self.namespace)
    }

    pub fn object_client(&self) -> &ObjectClient<K> {
        &self.object_client
    }

    pub async fn create(&self, obj: &K) -> Result<K> {
        self.object_client.create(obj).await
    }

    pub async fn get(&self, name: &str) -> Result<K> {
        self.object_client.get(name).await
    }

    pub async fn get_namespaced(&self, namespace: &str, name: &str) -> Result<K> {
        self.object_client.get_namespaced(namespace, name).await
    }

    pub async fn update(&self, obj: &K) -> Result<K> {
        self.object_client.update(obj).await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.object_client.delete(name).await
    }

    pub async fn delete_namespaced(&self, namespace: &str, name: &str) -> Result<()> {
        self.object_client.delete_namespaced(namespace, name).await
    }

    pub async fn list(&self, params: &ListParams) -> Result<ObjectList<K>> {
        self.object_client.list(params).await
    }

    pub fn watch(
        &self,
        config: watcher::Config,
    ) -> impl Stream<Item = std::result::Result<watcher::Event<K>, watcher::Error>> + Send {
        self.object_client.watch(config)
    }

    pub async fn delete_collection(&self, delete: &DeleteParams, list: &ListParams) -> Result<()> {
        self.object_client.delete_collection(delete, list).await
    }

    pub async fn patch<P: Serialize + Debug>(&self, name: &str, patch: &Patch<P>) -> Result<K> {
        self.object_client.patch(name, patch).await
    }

    pub fn add_handler<H: Handler<K> + 'static>(&self, name: &str, handler: H) {
        self.controller().add_handler(name, handler);
    }

    pub fn add_feature_handler<H: Handler<K> + 'static>(
        &self,
        enabled: EnabledFn,
        name: &str,
        handler: H,
    ) {
        self.controller().add_feature_handler(enabled, name, handler);
    }

    pub fn add_cluster_scoped_handler<H: Handler<K> + 'static>(
        &self,
        name: &str,
        cluster: &str,
        handler: H,
    ) {
        self.controller()
            .add_cluster_scoped_handler(name, cluster, handler);
    }

    pub fn add_cluster_scoped_feature_handler<H: Handler<K> + 'static>(
        &self,
        enabled: EnabledFn,
        name: &str,
        cluster: &str,
        handler: H,
    ) {
        self.controller()
            .add_cluster_scoped_feature_handler(enabled, name, cluster, handler);
    }

    fn adapter<L: ObjectLifecycle<K> + 'static>(
        &self,
        name: &str,
        cluster_scoped: bool,
        lifecycle: L,
    ) -> LifecycleAdapter<K> {
        LifecycleAdapter::new(
            name,
            cluster_scoped,
            self.object_client.clone(),
            Arc::new(lifecycle),
        )
    }

    pub fn add_lifecycle<L: ObjectLifecycle<K> + 'static>(&self, name: &str, lifecycle: L) {
        let adapter = self.adapter(name, false, lifecycle);
        self.add_handler(name, adapter);
    }

    pub fn add_feature_lifecycle<L: ObjectLifecycle<K> + 'static>(
        &self,
        enabled: EnabledFn,
        name: &str,
        lifecycle: L,
    ) {
        let adapter = self.adapter(name, false, lifecycle);
        self.add_feature_handler(enabled, name, adapter);
    }

    /// The finalizer and annotation carry `<name>_<cluster>` so each cluster's lifecycle is tracked apart
    pub fn add_cluster_scoped_lifecycle<L: ObjectLifecycle<K> + 'static>(
        &self,
        name: &str,
        cluster: &str,
        lifecycle: L,
    ) {
        let adapter = self.adapter(&format!("{}_{}", name, cluster), true, lifecycle);
        self.add_cluster_scoped_handler(name, cluster, adapter);
    }

    pub fn add_cluster_scoped_feature_lifecycle<L: ObjectLifecycle<K> + 'static>(
        &self,
        enabled: EnabledFn,
        name: &str,
        cluster: &str,
        lifecycle: L,
    ) {
        let adapter = self.adapter(&format!("{}_{}", name, cluster), true, lifecycle);
        self.add_cluster_scoped_feature_handler(enabled, name, cluster, adapter);
    }

    pub fn on_create<F, Fut>(&self, name: &str, f: F)
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<K>> + Send + 'static,
    {
        self.add_lifecycle(&format!("{}-create", name), LifecycleDelegate::on_create(f));
    }

    pub fn on_change<F, Fut>(&self, name: &str, f: F)
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<K>> + Send + 'static,
    {
        self.add_lifecycle(&format!("{}-change", name), LifecycleDelegate::on_change(f));
    }

    pub fn on_remove<F, Fut>(&self, name: &str, f: F)
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<K>> + Send + 'static,
    {
        self.add_lifecycle(name, LifecycleDelegate::on_remove(f));
    }

    pub fn enqueue(&self, namespace: &str, name: &str) {
        self.controller().enqueue(namespace, name);
    }

    pub fn cache(&self) -> ClientCache<K> {
        self.controller().cache()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{object_json, MockService};
    use crate::types::management::{Notifier, NotifierSpec, Setting};
    use async_trait::async_trait;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
    use kube_runtime::watcher::Event;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn group() -> Arc<GroupClient> {
        group_with(MockService::new())
    }

    fn group_with(mock: MockService) -> Arc<GroupClient> {
        Arc::new(GroupClient::new(mock.into_client(), Duration::from_secs(1)))
    }

    #[derive(Default)]
    struct Counts {
        created: AtomicUsize,
        removed: AtomicUsize,
        updated: AtomicUsize,
    }

    struct CountingLifecycle(Arc<Counts>);

    #[async_trait]
    impl ObjectLifecycle<Notifier> for CountingLifecycle {
        async fn create(&self, obj: Notifier) -> Result<Notifier> {
            self.0.created.fetch_add(1, Ordering::SeqCst);
            Ok(obj)
        }

        async fn remove(&self, obj: Notifier) -> Result<Notifier> {
            self.0.removed.fetch_add(1, Ordering::SeqCst);
            Ok(obj)
        }

        async fn updated(&self, obj: Notifier) -> Result<Notifier> {
            self.0.updated.fetch_add(1, Ordering::SeqCst);
            Ok(obj)
        }
    }

    fn notifier(cluster: &str, name: &str) -> Notifier {
        let mut notifier = Notifier::new(
            name,
            NotifierSpec {
                cluster_name: cluster.to_string(),
                ..Default::default()
            },
        );
        notifier.metadata.namespace = Some(cluster.to_string());
        notifier
    }

    #[tokio::test]
    async fn test_controller_is_shared_per_namespace() {
        let group = group();
        let a: ResourceClient<Notifier> = ResourceClient::new(group.clone(), "c-1");
        let b: ResourceClient<Notifier> = ResourceClient::new(group.clone(), "c-1");
        let other: ResourceClient<Notifier> = ResourceClient::new(group.clone(), "c-2");

        a.enqueue("c-1", "slack");
        assert!(a.controller().lister().get("c-1", "slack").is_err());
        assert_eq!(b.controller().name(), "NotifierController");

        a.controller();
        other.controller();
        assert_eq!(group.starter_count(), 2);
    }

    #[tokio::test]
    async fn test_kinds_get_their_own_controllers() {
        let group = group();
        let notifiers: ResourceClient<Notifier> = ResourceClient::new(group.clone(), "");
        let settings: ResourceClient<Setting> = ResourceClient::new(group.clone(), "");

        notifiers.add_handler("noop", |_key: String, _obj: Option<Arc<Notifier>>| async { Ok(()) });
        settings.on_change("watch", |obj: Setting| async move { Ok(obj) });

        assert_eq!(group.starter_count(), 2);
        assert_eq!(settings.controller().name(), "SettingController");
    }

    #[tokio::test]
    async fn test_cluster_scoped_lifecycle_names_carry_the_cluster() {
        let teams_path = "/apis/management.cattle.io/v3/namespaces/c-1/notifiers/teams";
        let mock = MockService::new().on_put(teams_path, 200, &object_json(&notifier("c-1", "teams")));
        let requests = mock.requests();
        let counts = Arc::new(Counts::default());
        let notifiers: ResourceClient<Notifier> = ResourceClient::new(group_with(mock), "");
        notifiers.add_cluster_scoped_lifecycle("notifier-sync", "c-1", CountingLifecycle(counts.clone()));
        let controller = notifiers.controller();

        // Initialised by this lifecycle for c-1: only `updated` runs, nothing is written
        let mut slack = notifier("c-1", "slack");
        slack.metadata.finalizers =
            Some(vec!["clusterscoped.controller.cattle.io/notifier-sync_c-1".to_string()]);
        slack.metadata.annotations = Some(BTreeMap::from([(
            "lifecycle.cattle.io/create.notifier-sync_c-1".to_string(),
            "true".to_string(),
        )]));
        controller.apply(Event::Apply(slack));
        controller.sync_handlers("c-1/slack").await.unwrap();
        assert_eq!(counts.created.load(Ordering::SeqCst), 0);
        assert_eq!(counts.updated.load(Ordering::SeqCst), 1);
        assert!(requests.lock().unwrap().is_empty());

        // Deleting with the scoped finalizer: `remove` runs and the finalizer is dropped
        let mut teams = notifier("c-1", "teams");
        teams.metadata.finalizers =
            Some(vec!["clusterscoped.controller.cattle.io/notifier-sync_c-1".to_string()]);
        teams.metadata.deletion_timestamp = Some(Time(chrono::Utc::now()));
        controller.apply(Event::Apply(teams));
        controller.sync_handlers("c-1/teams").await.unwrap();
        assert_eq!(counts.removed.load(Ordering::SeqCst), 1);
        assert_eq!(
            *requests.lock().unwrap(),
            vec![("PUT".to_string(), teams_path.to_string())]
        );

        // Deleting with the unscoped finalizer of the same name is not ours
        let mut email = notifier("c-1", "email");
        email.metadata.finalizers = Some(vec!["controller.cattle.io/notifier-sync_c-1".to_string()]);
        email.metadata.deletion_timestamp = Some(Time(chrono::Utc::now()));
        controller.apply(Event::Apply(email));
        controller.sync_handlers("c-1/email").await.unwrap();
        assert_eq!(counts.removed.load(Ordering::SeqCst), 1);

        // Objects of other clusters never reach the lifecycle
        controller.apply(Event::Apply(notifier("c-2", "slack")));
        controller.sync_handlers("c-2/slack").await.unwrap();
        assert_eq!(counts.created.load(Ordering::SeqCst), 0);
        assert_eq!(counts.updated.load(Ordering::SeqCst), 1);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cache_indexes_are_shared_with_the_controller() {
        let group = group();
        let settings: ResourceClient<Setting> = ResourceClient::new(group, "");
        settings
            .cache()
            .index("byValue", |s: &Setting| vec![s.value.clone()]);

        assert!(settings.cache().get_indexed("byValue", "x").unwrap().is_empty());
    }
}
