// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create/update/remove callbacks on top of the plain handler model.
//!
//! The adapter marks an object as initialised with an annotation and holds
//! a finalizer on it, so `create` runs once per object and `remove` runs
//! before the object disappears.

use crate::client::ObjectClient;
use crate::constants::lifecycle::{CREATED_ANNOTATION, FINALIZER_PREFIX, SCOPED_FINALIZER_PREFIX};
use crate::controllers::handler::Handler;
use crate::error::Result;
use crate::types::meta::CattleObject;
use async_trait::async_trait;
use futures::future::BoxFuture;
use kube::ResourceExt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[async_trait]
pub trait ObjectLifecycle<K: Send + 'static>: Send + Sync {
    /// Called once, after the finalizer is in place
    async fn create(&self, obj: K) -> Result<K> {
        Ok(obj)
    }

    /// Called while the object is being deleted and our finalizer is still on it
    async fn remove(&self, obj: K) -> Result<K> {
        Ok(obj)
    }

    /// Called on every other change; a changed result is written back
    async fn updated(&self, obj: K) -> Result<K> {
        Ok(obj)
    }

    fn has_create(&self) -> bool {
        true
    }

    fn has_finalize(&self) -> bool {
        true
    }
}

pub fn finalizer_name(name: &str, cluster_scoped: bool) -> String {
    let prefix = if cluster_scoped {
        SCOPED_FINALIZER_PREFIX
    } else {
        FINALIZER_PREFIX
    };
    format!("{}{}", prefix, name)
}

pub fn created_annotation(name: &str) -> String {
    format!("{}.{}", CREATED_ANNOTATION, name)
}

/// Runs an `ObjectLifecycle` as a controller handler
pub struct LifecycleAdapter<K: CattleObject> {
    name: String,
    cluster_scoped: bool,
    client: ObjectClient<K>,
    lifecycle: Arc<dyn ObjectLifecycle<K>>,
}

impl<K: CattleObject> LifecycleAdapter<K> {
    pub fn new(
        name: &str,
        cluster_scoped: bool,
        client: ObjectClient<K>,
        lifecycle: Arc<dyn ObjectLifecycle<K>>,
    ) -> Self {
        Self {
            name: name.to_string(),
            cluster_scoped,
            client,
            lifecycle,
        }
    }

    fn finalizer(&self) -> String {
        finalizer_name(&self.name, self.cluster_scoped)
    }

    fn is_initialized(&self, obj: &K) -> bool {
        obj.annotations()
            .get(&created_annotation(&self.name))
            .is_some_and(|v| v == "true")
    }

    /// Write `obj` back when it differs from `orig`
    async fn update_if_changed(&self, orig: &K, obj: K) -> Result<K> {
        if serde_json::to_value(orig)? == serde_json::to_value(&obj)? {
            return Ok(obj);
        }
        self.client.update(&obj).await
    }

    async fn finalize(&self, obj: K) -> Result<()> {
        let finalizer = self.finalizer();
        if !obj.finalizers().contains(&finalizer) {
            debug!("Object is deleting without finalizer {}, skipping", finalizer);
            return Ok(());
        }

        info!("Running remove for lifecycle {}", self.name);
        let mut removed = self.lifecycle.remove(obj).await?;
        if remove_finalizer(&mut removed, &finalizer) {
            self.client.update(&removed).await?;
        }
        Ok(())
    }

    async fn create(&self, obj: K) -> Result<K> {
        let mut current = obj;
        if self.lifecycle.has_finalize() {
            let mut with_finalizer = current.clone();
            if add_finalizer(&mut with_finalizer, &self.finalizer()) {
                current = self.client.update(&with_finalizer).await?;
            }
        }

        if self.lifecycle.has_create() {
            info!("Running create for lifecycle {}", self.name);
            current = self.lifecycle.create(current).await?;
        }

        mark_initialized(&mut current, &self.name);
        self.client.update(&current).await
    }

    async fn record(&self, obj: K) -> Result<()> {
        let updated = self.lifecycle.updated(obj.clone()).await?;
        self.update_if_changed(&obj, updated).await?;
        Ok(())
    }
}

#[async_trait]
impl<K: CattleObject> Handler<K> for LifecycleAdapter<K> {
    #[instrument(skip(self, obj), fields(lifecycle = %self.name))]
    async fn sync(&self, key: &str, obj: Option<Arc<K>>) -> Result<()> {
        let Some(obj) = obj else {
            return Ok(());
        };
        let obj = obj.as_ref().clone();

        if obj.meta().deletion_timestamp.is_some() {
            return self.finalize(obj).await;
        }

        let obj = if self.is_initialized(&obj) {
            obj
        } else {
            self.create(obj).await?
        };

        self.record(obj).await
    }
}

/// Returns true when the finalizer was added
pub fn add_finalizer<K: kube::Resource>(obj: &mut K, finalizer: &str) -> bool {
    let finalizers = obj.meta_mut().finalizers.get_or_insert_with(Vec::new);
    if finalizers.iter().any(|f| f == finalizer) {
        return false;
    }
    finalizers.push(finalizer.to_string());
    true
}

/// Returns true when the finalizer was present
pub fn remove_finalizer<K: kube::Resource>(obj: &mut K, finalizer: &str) -> bool {
    let Some(finalizers) = obj.meta_mut().finalizers.as_mut() else {
        return false;
    };
    let before = finalizers.len();
    finalizers.retain(|f| f != finalizer);
    before != finalizers.len()
}

fn mark_initialized<K: kube::Resource>(obj: &mut K, name: &str) {
    obj.meta_mut()
        .annotations
        .get_or_insert_with(Default::default)
        .insert(created_annotation(name), "true".to_string());
}

/// Callback taking ownership of the object and returning the possibly modified one
pub type ChangeHandler<K> = Arc<dyn Fn(K) -> BoxFuture<'static, Result<K>> + Send + Sync>;

fn boxed<K: 'static, F, Fut>(f: F) -> ChangeHandler<K>
where
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<K>> + Send + 'static,
{
    Arc::new(move |obj: K| -> BoxFuture<'static, Result<K>> { Box::pin(f(obj)) })
}

/// A lifecycle assembled from optional closures; a missing closure passes the object through
pub struct LifecycleDelegate<K> {
    create: Option<ChangeHandler<K>>,
    update: Option<ChangeHandler<K>>,
    remove: Option<ChangeHandler<K>>,
}

impl<K: Send + 'static> LifecycleDelegate<K> {
    pub fn on_create<F, Fut>(f: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<K>> + Send + 'static,
    {
        Self {
            create: Some(boxed(f)),
            update: None,
            remove: None,
        }
    }

    pub fn on_change<F, Fut>(f: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<K>> + Send + 'static,
    {
        Self {
            create: None,
            update: Some(boxed(f)),
            remove: None,
        }
    }

    pub fn on_remove<F, Fut>(f: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<K>> + Send + 'static,
    {
        Self {
            create: None,
            update: None,
            remove: Some(boxed(f)),
        }
    }
}

#[async_trait]
impl<K: Send + 'static> ObjectLifecycle<K> for LifecycleDelegate<K> {
    async fn create(&self, obj: K) -> Result<K> {
        match &self.create {
            Some(f) => f(obj).await,
            None => Ok(obj),
        }
    }

    async fn remove(&self, obj: K) -> Result<K> {
        match &self.remove {
            Some(f) => f(obj).await,
            None => Ok(obj),
        }
    }

    async fn updated(&self, obj: K) -> Result<K> {
        match &self.update {
            Some(f) => f(obj).await,
            None => Ok(obj),
        }
    }

    fn has_create(&self) -> bool {
        self.create.is_some()
    }

    fn has_finalize(&self) -> bool {
        self.remove.is_some()
    }
}
