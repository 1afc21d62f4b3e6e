// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Handlers run by a controller for every queued key.

use crate::error::Result;
use crate::types::meta::{object_in_cluster, CattleObject};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Called with the cache key and the cached object; `None` means the object is gone.
#[async_trait]
pub trait Handler<K>: Send + Sync {
    async fn sync(&self, key: &str, obj: Option<Arc<K>>) -> Result<()>;
}

#[async_trait]
impl<K, F, Fut> Handler<K> for F
where
    K: Send + Sync + 'static,
    F: Fn(String, Option<Arc<K>>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    async fn sync(&self, key: &str, obj: Option<Arc<K>>) -> Result<()> {
        (self)(key.to_string(), obj).await
    }
}

/// Feature toggle consulted on every call
pub type EnabledFn = Arc<dyn Fn() -> bool + Send + Sync>;

pub(crate) struct NamedHandler<K> {
    pub name: String,
    pub handler: Arc<dyn Handler<K>>,
}

impl<K> Clone for NamedHandler<K> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Skips every key while the feature is disabled
pub(crate) struct FeatureHandler<K> {
    pub enabled: EnabledFn,
    pub inner: Arc<dyn Handler<K>>,
}

#[async_trait]
impl<K: Send + Sync + 'static> Handler<K> for FeatureHandler<K> {
    async fn sync(&self, key: &str, obj: Option<Arc<K>>) -> Result<()> {
        if !(self.enabled)() {
            return Ok(());
        }
        self.inner.sync(key, obj).await
    }
}

/// Only passes objects attributed to one cluster. Deletions always pass.
pub(crate) struct ClusterScopedHandler<K> {
    pub cluster: String,
    pub inner: Arc<dyn Handler<K>>,
}

#[async_trait]
impl<K: CattleObject> Handler<K> for ClusterScopedHandler<K> {
    async fn sync(&self, key: &str, obj: Option<Arc<K>>) -> Result<()> {
        match obj {
            None => self.inner.sync(key, None).await,
            Some(obj) if object_in_cluster(&self.cluster, obj.as_ref()) => {
                self.inner.sync(key, Some(obj)).await
            }
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::management::{Notifier, NotifierSpec};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn counting(counter: Arc<AtomicUsize>) -> Arc<dyn Handler<Notifier>> {
        Arc::new(move |_key: String, _obj: Option<Arc<Notifier>>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    fn notifier(cluster: &str) -> Arc<Notifier> {
        Arc::new(Notifier::new(
            "slack",
            NotifierSpec {
                cluster_name: cluster.to_string(),
                ..Default::default()
            },
        ))
    }

    #[tokio::test]
    async fn test_feature_handler_respects_toggle() {
        let counter = Arc::new(AtomicUsize::new(0));
        let flag = Arc::new(AtomicBool::new(false));
        let enabled = {
            let flag = flag.clone();
            Arc::new(move || flag.load(Ordering::SeqCst)) as EnabledFn
        };
        let handler = FeatureHandler {
            enabled,
            inner: counting(counter.clone()),
        };

        handler.sync("c-1/slack", Some(notifier("c-1"))).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        flag.store(true, Ordering::SeqCst);
        handler.sync("c-1/slack", Some(notifier("c-1"))).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cluster_scoped_handler_filters_objects() {
        let counter = Arc::new(AtomicUsize::new(0));
        let handler = ClusterScopedHandler {
            cluster: "c-1".to_string(),
            inner: counting(counter.clone()),
        };

        handler.sync("c-2/slack", Some(notifier("c-2"))).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        handler.sync("c-1/slack", Some(notifier("c-1"))).await.unwrap();
        handler.sync("c-2/slack", None).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
