// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Shared-informer controller: one watch per kind and namespace feeds a
//! reflector store and a work queue, and a pool of workers runs every
//! registered handler for each queued key.

use crate::controllers::handler::{
    ClusterScopedHandler, EnabledFn, FeatureHandler, Handler, NamedHandler,
};
use crate::controllers::lister::{object_ref, ClientCache, Indexers, Lister};
use crate::controllers::queue::WorkQueue;
use crate::error::{CattleError, Result};
use crate::types::meta::{key_of, split_key, CattleObject};
use async_trait::async_trait;
use futures::StreamExt;
use kube_runtime::reflector::{self, store::Writer, Store};
use kube_runtime::watcher::{self, watcher, Event};
use kube_runtime::WatchStreamExt;
use kube::Api;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

/// Something a group client can sync and start
#[async_trait]
pub trait Starter: Send + Sync {
    fn name(&self) -> &str;

    /// Start watching if needed and wait until the cache is populated
    async fn sync(&self) -> Result<()>;

    /// Start watching and spawn `threadiness` workers. Calling it again is a no-op.
    fn start(&self, threadiness: usize);
}

struct Inner<K: CattleObject> {
    name: String,
    api: Api<K>,
    store: Store<K>,
    writer: Mutex<Option<Writer<K>>>,
    handlers: RwLock<Vec<NamedHandler<K>>>,
    indexers: Indexers<K>,
    queue: Arc<WorkQueue>,
    requeue_after: Duration,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    workers_started: Mutex<bool>,
    /// Keys cached before the running relist that it has not returned yet
    relist_pending: Mutex<Option<HashSet<String>>>,
}

impl<K: CattleObject> Inner<K> {
    /// Queue the keys a watch event touches. Must run after the event
    /// reached the store writer.
    fn observe(&self, event: &Event<K>) {
        let mut pending = self
            .relist_pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match event {
            Event::Apply(obj) | Event::Delete(obj) => self.queue.add(key_of(obj)),
            Event::Init => {
                let cached = self.store.state().iter().map(|obj| key_of(obj.as_ref())).collect();
                *pending = Some(cached);
            }
            Event::InitApply(obj) => {
                let key = key_of(obj);
                if let Some(pending) = pending.as_mut() {
                    pending.remove(&key);
                }
                self.queue.add(key);
            }
            // The store was just replaced; whatever the relist did not return is gone
            Event::InitDone => {
                for key in pending.take().unwrap_or_default() {
                    debug!("{} disappeared from {} during a relist", key, self.name);
                    self.queue.add(key);
                }
            }
        }
    }
}

pub struct GenericController<K: CattleObject> {
    inner: Arc<Inner<K>>,
}

impl<K: CattleObject> Clone for GenericController<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: CattleObject> GenericController<K> {
    pub fn new(name: &str, api: Api<K>, requeue_after: Duration) -> Self {
        let writer: Writer<K> = Writer::default();
        let store = writer.as_reader();
        Self {
            inner: Arc::new(Inner {
                name: name.to_string(),
                api,
                store,
                writer: Mutex::new(Some(writer)),
                handlers: RwLock::new(Vec::new()),
                indexers: Default::default(),
                queue: WorkQueue::new(),
                requeue_after,
                tasks: Mutex::new(Vec::new()),
                workers_started: Mutex::new(false),
                relist_pending: Mutex::new(None),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn add_handler<H>(&self, name: &str, handler: H)
    where
        H: Handler<K> + 'static,
    {
        self.push_handler(name, Arc::new(handler));
    }

    pub fn add_feature_handler<H>(&self, enabled: EnabledFn, name: &str, handler: H)
    where
        H: Handler<K> + 'static,
    {
        self.push_handler(
            name,
            Arc::new(FeatureHandler {
                enabled,
                inner: Arc::new(handler),
            }),
        );
    }

    pub fn add_cluster_scoped_handler<H>(&self, name: &str, cluster: &str, handler: H)
    where
        H: Handler<K> + 'static,
    {
        self.push_handler(
            name,
            Arc::new(ClusterScopedHandler {
                cluster: cluster.to_string(),
                inner: Arc::new(handler),
            }),
        );
    }

    pub fn add_cluster_scoped_feature_handler<H>(
        &self,
        enabled: EnabledFn,
        name: &str,
        cluster: &str,
        handler: H,
    ) where
        H: Handler<K> + 'static,
    {
        self.push_handler(
            name,
            Arc::new(FeatureHandler {
                enabled,
                inner: Arc::new(ClusterScopedHandler {
                    cluster: cluster.to_string(),
                    inner: Arc::new(handler),
                }),
            }),
        );
    }

    fn push_handler(&self, name: &str, handler: Arc<dyn Handler<K>>) {
        debug!("Adding handler {} to {}", name, self.inner.name);
        self.inner
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(NamedHandler {
                name: name.to_string(),
                handler,
            });
    }

    /// Queue `namespace/name` for processing by all handlers
    pub fn enqueue(&self, namespace: &str, name: &str) {
        self.inner
            .queue
            .add(crate::types::meta::object_key(namespace, name));
    }

    pub fn lister(&self) -> Lister<K> {
        Lister::new(self.inner.store.clone())
    }

    pub fn cache(&self) -> ClientCache<K> {
        ClientCache::new(self.inner.store.clone(), Arc::clone(&self.inner.indexers))
    }

    /// Direct access to the informer store
    pub fn store(&self) -> Store<K> {
        self.inner.store.clone()
    }

    fn start_informer(&self) {
        let Some(writer) = self
            .inner
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return;
        };

        info!("Starting informer for {}", self.inner.name);
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let stream = watcher(inner.api.clone(), watcher::Config::default()).default_backoff();
            let mut events = std::pin::pin!(reflector::reflector(writer, stream));
            while let Some(event) = events.next().await {
                match event {
                    Ok(event) => inner.observe(&event),
                    Err(e) => warn!("Watch error in {}: {}", inner.name, e),
                }
            }
            warn!("Informer for {} stopped", inner.name);
        });
        self.track(handle);
    }

    fn start_workers(&self, threadiness: usize) {
        let mut started = self
            .inner
            .workers_started
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *started {
            debug!("Workers for {} already running", self.inner.name);
            return;
        }
        *started = true;
        drop(started);

        info!("Starting {} workers for {}", threadiness, self.inner.name);
        for _ in 0..threadiness.max(1) {
            let controller = self.clone();
            let handle = tokio::spawn(async move {
                while controller.process_next().await {}
            });
            self.track(handle);
        }
    }

    fn track(&self, handle: JoinHandle<()>) {
        self.inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }

    /// Abort the informer and all workers
    pub fn stop(&self) {
        for handle in self
            .inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
        {
            handle.abort();
        }
    }

    async fn process_next(&self) -> bool {
        let Some(key) = self.inner.queue.get().await else {
            return false;
        };

        if let Err(e) = self.sync_handlers(&key).await {
            error!("{} failed to sync {}: {}", self.inner.name, key, e);
            self.inner
                .queue
                .add_after(key.clone(), self.inner.requeue_after);
        }
        self.inner.queue.done(&key);
        true
    }

    /// Run every handler for `key`; the first failure is reported after all handlers ran.
    pub(crate) async fn sync_handlers(&self, key: &str) -> Result<()> {
        let (namespace, name) = split_key(key);
        let obj = self.inner.store.get(&object_ref::<K>(namespace, name));
        let handlers = self
            .inner
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut first_error = None;
        for named in handlers {
            trace!("Running handler {} for {}", named.name, key);
            if let Err(e) = named.handler.sync(key, obj.clone()).await {
                warn!("Handler {} failed for {}: {}", named.name, key, e);
                if first_error.is_none() {
                    first_error = Some(CattleError::handler(&named.name, e));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn apply(&self, event: Event<K>) {
        if let Some(writer) = self
            .inner
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
        {
            writer.apply_watcher_event(&event);
        }
        self.inner.observe(&event);
    }

    #[cfg(test)]
    pub(crate) fn queue(&self) -> &Arc<WorkQueue> {
        &self.inner.queue
    }

    #[cfg(test)]
    fn task_count(&self) -> usize {
        self.inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl<K: CattleObject> Starter for GenericController<K> {
    fn name(&self) -> &str {
        &self.inner.name
    }

    async fn sync(&self) -> Result<()> {
        self.start_informer();
        self.inner
            .store
            .wait_until_ready()
            .await
            .map_err(|_| CattleError::CacheNotSynced(self.inner.name.clone()))
    }

    fn start(&self, threadiness: usize) {
        self.start_informer();
        self.start_workers(threadiness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockService;
    use crate::types::management::{EtcdBackup, EtcdBackupSpec};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn controller() -> GenericController<EtcdBackup> {
        let client = MockService::new().into_client();
        GenericController::new(
            "EtcdBackupController",
            EtcdBackup::api(client, ""),
            Duration::from_millis(10),
        )
    }

    fn backup(namespace: &str, name: &str) -> EtcdBackup {
        let mut backup = EtcdBackup::new(
            name,
            EtcdBackupSpec {
                cluster_id: namespace.to_string(),
                ..Default::default()
            },
        );
        backup.metadata.namespace = Some(namespace.to_string());
        backup
    }

    #[tokio::test]
    async fn test_handlers_see_object_then_deletion() {
        let controller = controller();
        let seen: Arc<Mutex<Vec<(String, bool)>>> = Arc::default();
        {
            let seen = seen.clone();
            controller.add_handler("record", move |key: String, obj: Option<Arc<EtcdBackup>>| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push((key, obj.is_some()));
                    Ok(())
                }
            });
        }

        controller.apply(Event::Apply(backup("c-1", "b1")));
        assert!(controller.process_next().await);
        controller.apply(Event::Delete(backup("c-1", "b1")));
        assert!(controller.process_next().await);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("c-1/b1".to_string(), true), ("c-1/b1".to_string(), false)]
        );
    }

    #[tokio::test]
    async fn test_relist_queues_objects_deleted_while_not_watching() {
        let controller = controller();
        let seen: Arc<Mutex<Vec<(String, bool)>>> = Arc::default();
        {
            let seen = seen.clone();
            controller.add_handler("record", move |key: String, obj: Option<Arc<EtcdBackup>>| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push((key, obj.is_some()));
                    Ok(())
                }
            });
        }

        controller.apply(Event::Apply(backup("c-1", "b1")));
        controller.apply(Event::Apply(backup("c-1", "b2")));
        assert!(controller.process_next().await);
        assert!(controller.process_next().await);
        seen.lock().unwrap().clear();

        // b1 was deleted while the watch was down
        controller.apply(Event::Init);
        controller.apply(Event::InitApply(backup("c-1", "b2")));
        controller.apply(Event::InitDone);

        assert_eq!(controller.queue().len(), 2);
        assert!(controller.lister().get("c-1", "b1").unwrap_err().is_not_found());

        assert!(controller.process_next().await);
        assert!(controller.process_next().await);
        let mut seen = seen.lock().unwrap().clone();
        seen.sort();
        assert_eq!(
            seen,
            vec![("c-1/b1".to_string(), false), ("c-1/b2".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn test_first_list_queues_every_object_once() {
        let controller = controller();
        controller.apply(Event::Init);
        controller.apply(Event::InitApply(backup("c-1", "b1")));
        controller.apply(Event::InitApply(backup("c-2", "b1")));
        controller.apply(Event::InitDone);

        assert_eq!(controller.queue().len(), 2);
        assert_eq!(controller.lister().list("", &Default::default()).len(), 2);
    }

    #[tokio::test]
    async fn test_start_twice_spawns_workers_once() {
        let controller = controller();
        controller.start(3);
        controller.start(3);

        // one informer plus three workers
        assert_eq!(controller.task_count(), 4);
        controller.stop();
        assert_eq!(controller.task_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_handler_requeues_and_others_still_run() {
        let controller = controller();
        let calls = Arc::new(AtomicUsize::new(0));
        controller.add_handler("broken", |_key: String, _obj: Option<Arc<EtcdBackup>>| async {
            Err(CattleError::handler("broken", "boom"))
        });
        {
            let calls = calls.clone();
            controller.add_handler("counter", move |_key: String, _obj: Option<Arc<EtcdBackup>>| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            });
        }

        controller.apply(Event::Apply(backup("c-1", "b1")));
        assert!(controller.process_next().await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let requeued = tokio::time::timeout(Duration::from_secs(1), controller.queue().get()).await;
        assert_eq!(requeued.ok().flatten().as_deref(), Some("c-1/b1"));
    }

    #[tokio::test]
    async fn test_enqueue_and_lister_share_the_store() {
        let controller = controller();
        controller.apply(Event::Apply(backup("c-1", "b1")));
        controller.enqueue("c-2", "b2");

        assert_eq!(controller.queue().len(), 2);
        assert!(controller.lister().get("c-1", "b1").is_ok());
        assert!(controller.lister().get("c-2", "b2").unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_cluster_scoped_handler_registration() {
        let controller = controller();
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            controller.add_cluster_scoped_handler(
                "scoped",
                "c-1",
                move |_key: String, _obj: Option<Arc<EtcdBackup>>| {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                },
            );
        }

        controller.apply(Event::Apply(backup("c-1", "b1")));
        controller.apply(Event::Apply(backup("c-2", "b1")));
        controller.sync_handlers("c-1/b1").await.unwrap();
        controller.sync_handlers("c-2/b1").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
