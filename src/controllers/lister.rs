// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read access to a controller's informer cache.

use crate::error::{CattleError, Result};
use crate::types::meta::{lister_resource_name, object_key, CattleObject};
use kube::core::{Selector, SelectorExt};
use kube_runtime::reflector::{ObjectRef, Store};
use kube::ResourceExt;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Maps an object to the index keys it should be found under
pub type Indexer<K> = Arc<dyn Fn(&K) -> Vec<String> + Send + Sync>;

pub(crate) type Indexers<K> = Arc<RwLock<HashMap<String, Indexer<K>>>>;

/// Lookup of a cache key, with or without namespace
pub fn object_ref<K: CattleObject>(namespace: &str, name: &str) -> ObjectRef<K> {
    let obj_ref = ObjectRef::new(name);
    if namespace.is_empty() {
        obj_ref
    } else {
        obj_ref.within(namespace)
    }
}

#[derive(Clone)]
pub struct Lister<K: CattleObject> {
    store: Store<K>,
}

impl<K: CattleObject> Lister<K> {
    pub fn new(store: Store<K>) -> Self {
        Self { store }
    }

    /// Objects in `namespace` (all namespaces when empty) whose labels match `selector`
    pub fn list(&self, namespace: &str, selector: &Selector) -> Vec<Arc<K>> {
        let empty = Default::default();
        self.store
            .state()
            .into_iter()
            .filter(|obj| namespace.is_empty() || obj.namespace().as_deref() == Some(namespace))
            .filter(|obj| selector.matches(obj.meta().labels.as_ref().unwrap_or(&empty)))
            .collect()
    }

    pub fn get(&self, namespace: &str, name: &str) -> Result<Arc<K>> {
        self.store
            .get(&object_ref(namespace, name))
            .ok_or_else(|| {
                CattleError::not_found(
                    &K::group(&()),
                    &lister_resource_name::<K>(),
                    &object_key(namespace, name),
                )
            })
    }
}

/// Lister plus the named secondary indexes registered on the controller
#[derive(Clone)]
pub struct ClientCache<K: CattleObject> {
    lister: Lister<K>,
    indexers: Indexers<K>,
}

impl<K: CattleObject> ClientCache<K> {
    pub(crate) fn new(store: Store<K>, indexers: Indexers<K>) -> Self {
        Self {
            lister: Lister::new(store),
            indexers,
        }
    }

    pub fn get(&self, namespace: &str, name: &str) -> Result<Arc<K>> {
        self.lister.get(namespace, name)
    }

    pub fn list(&self, namespace: &str, selector: &Selector) -> Vec<Arc<K>> {
        self.lister.list(namespace, selector)
    }

    /// Register an index. Registering the same name again replaces the indexer.
    pub fn index<F>(&self, name: &str, indexer: F)
    where
        F: Fn(&K) -> Vec<String> + Send + Sync + 'static,
    {
        self.indexers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Arc::new(indexer));
    }

    /// Every cached object the named index maps to `key`
    pub fn get_indexed(&self, name: &str, key: &str) -> Result<Vec<Arc<K>>> {
        let indexer = self
            .indexers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| CattleError::UnknownIndex(name.to_string()))?;

        Ok(self
            .lister
            .store
            .state()
            .into_iter()
            .filter(|obj| indexer(obj).iter().any(|k| k == key))
            .collect())
    }
}
