// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Addressing helpers shared by every resource kind: group/version/kind
//! descriptors, cache keys and cluster attribution.

use crate::constants::PROJECT_ID_ANNOTATION;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;
use kube::api::ObjectMeta;
use kube::core::{GroupVersionKind, GroupVersionResource};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// List wrapper returned by list calls, e.g. `ObjectList<EtcdBackup>` for `EtcdBackupList`
pub use kube::core::ObjectList;

/// Verbs served for every custom resource
pub const STANDARD_VERBS: [&str; 8] = [
    "create",
    "delete",
    "deletecollection",
    "get",
    "list",
    "patch",
    "update",
    "watch",
];

/// A resource kind of one of the cattle API groups.
pub trait CattleObject:
    Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Whether objects of this kind live in a namespace
    const NAMESPACED: bool;

    /// Build an `Api` scoped to `namespace`; an empty namespace means all namespaces.
    fn api(client: Client, namespace: &str) -> Api<Self>;

    /// The downstream cluster this object belongs to, if it can be determined
    fn obj_cluster_name(&self) -> Option<String> {
        cluster_from_meta(self.meta())
    }
}

pub fn group_version_kind<K: CattleObject>() -> GroupVersionKind {
    GroupVersionKind::gvk(&K::group(&()), &K::version(&()), &K::kind(&()))
}

pub fn group_version_resource<K: CattleObject>() -> GroupVersionResource {
    GroupVersionResource::gvr(&K::group(&()), &K::version(&()), &K::plural(&()))
}

/// REST resource description as served by API discovery
pub fn api_resource<K: CattleObject>() -> APIResource {
    APIResource {
        name: K::plural(&()).into_owned(),
        singular_name: K::kind(&()).to_lowercase(),
        namespaced: K::NAMESPACED,
        kind: K::kind(&()).into_owned(),
        group: Some(K::group(&()).into_owned()),
        version: Some(K::version(&()).into_owned()),
        verbs: STANDARD_VERBS.iter().map(|v| v.to_string()).collect(),
        ..Default::default()
    }
}

/// Resource name used in cache miss errors, e.g. `etcdBackup`
pub fn lister_resource_name<K: CattleObject>() -> String {
    let kind = K::kind(&());
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cache key for an object: `namespace/name`, or `name` without a namespace
pub fn object_key(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", namespace, name)
    }
}

/// Split a cache key back into namespace and name
pub fn split_key(key: &str) -> (&str, &str) {
    match key.split_once('/') {
        Some((namespace, name)) => (namespace, name),
        None => ("", key),
    }
}

/// Cache key of an existing object
pub fn key_of<K: Resource>(obj: &K) -> String {
    let meta = obj.meta();
    object_key(
        meta.namespace.as_deref().unwrap_or_default(),
        meta.name.as_deref().unwrap_or_default(),
    )
}

/// Cluster part of a `cluster:project` reference
pub fn cluster_of_project(project_name: &str) -> Option<&str> {
    match project_name.split_once(':') {
        Some((cluster, _)) if !cluster.is_empty() => Some(cluster),
        _ => None,
    }
}

/// Fallback attribution: the project annotation, then the namespace
pub fn cluster_from_meta(meta: &ObjectMeta) -> Option<String> {
    if let Some(project_id) = meta
        .annotations
        .as_ref()
        .and_then(|a| a.get(PROJECT_ID_ANNOTATION))
    {
        if let Some(cluster) = cluster_of_project(project_id) {
            return Some(cluster.to_string());
        }
    }

    meta.namespace.clone().filter(|ns| !ns.is_empty())
}

/// True when `obj` is attributed to `cluster`
pub fn object_in_cluster<K: CattleObject>(cluster: &str, obj: &K) -> bool {
    obj.obj_cluster_name().as_deref() == Some(cluster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::management::{EtcdBackup, ListenConfig, Notifier, NotifierSpec};
    use std::collections::BTreeMap;

    #[test]
    fn test_object_key_round_trip() {
        assert_eq!(object_key("c-1", "backup"), "c-1/backup");
        assert_eq!(object_key("", "local"), "local");
        assert_eq!(split_key("c-1/backup"), ("c-1", "backup"));
        assert_eq!(split_key("local"), ("", "local"));
    }

    #[test]
    fn test_group_version_kind() {
        let gvk = group_version_kind::<EtcdBackup>();
        assert_eq!(gvk.group, "management.cattle.io");
        assert_eq!(gvk.version, "v3");
        assert_eq!(gvk.kind, "EtcdBackup");
        assert_eq!(gvk.api_version(), "management.cattle.io/v3");

        let gvr = group_version_resource::<EtcdBackup>();
        assert_eq!(gvr.resource, "etcdbackups");
    }

    #[test]
    fn test_api_resource_for_cluster_scoped_kind() {
        let ar = api_resource::<ListenConfig>();
        assert_eq!(ar.name, "listenconfigs");
        assert_eq!(ar.singular_name, "listenconfig");
        assert!(!ar.namespaced);
        assert_eq!(ar.kind, "ListenConfig");
        assert_eq!(ar.verbs.len(), STANDARD_VERBS.len());
    }

    #[test]
    fn test_lister_resource_name() {
        assert_eq!(lister_resource_name::<ListenConfig>(), "listenConfig");
        assert_eq!(lister_resource_name::<EtcdBackup>(), "etcdBackup");
    }

    #[test]
    fn test_cluster_of_project() {
        assert_eq!(cluster_of_project("c-abc:p-xyz"), Some("c-abc"));
        assert_eq!(cluster_of_project("p-xyz"), None);
        assert_eq!(cluster_of_project(":p-xyz"), None);
    }

    #[test]
    fn test_cluster_from_meta_prefers_project_annotation() {
        let meta = ObjectMeta {
            namespace: Some("some-ns".to_string()),
            annotations: Some(BTreeMap::from([(
                PROJECT_ID_ANNOTATION.to_string(),
                "c-abc:p-xyz".to_string(),
            )])),
            ..Default::default()
        };
        assert_eq!(cluster_from_meta(&meta).as_deref(), Some("c-abc"));
    }

    #[test]
    fn test_cluster_from_meta_falls_back_to_namespace() {
        let meta = ObjectMeta {
            namespace: Some("c-abc".to_string()),
            ..Default::default()
        };
        assert_eq!(cluster_from_meta(&meta).as_deref(), Some("c-abc"));
        assert_eq!(cluster_from_meta(&ObjectMeta::default()), None);
    }

    #[test]
    fn test_object_in_cluster_uses_spec() {
        let notifier = Notifier::new(
            "slack",
            NotifierSpec {
                cluster_name: "c-abc".to_string(),
                ..Default::default()
            },
        );
        assert!(object_in_cluster("c-abc", &notifier));
        assert!(!object_in_cluster("c-def", &notifier));
    }
}
