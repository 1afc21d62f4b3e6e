// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Declarative helpers shared by the resource modules.

/// Implements `CattleObject` for a resource.
///
/// `namespaced` kinds get a namespace-scoped `Api` (or an all-namespaces
/// one for an empty namespace), `cluster` kinds always get `Api::all`.
/// An optional closure-like tail overrides the cluster attribution.
macro_rules! cattle_object {
    (@flag namespaced) => {
        const NAMESPACED: bool = true;
    };
    (@flag cluster) => {
        const NAMESPACED: bool = false;
    };
    (@api namespaced) => {
        fn api(client: ::kube::Client, namespace: &str) -> ::kube::Api<Self> {
            if namespace.is_empty() {
                ::kube::Api::all(client)
            } else {
                ::kube::Api::namespaced(client, namespace)
            }
        }
    };
    (@api cluster) => {
        fn api(client: ::kube::Client, _namespace: &str) -> ::kube::Api<Self> {
            ::kube::Api::all(client)
        }
    };
    ($kind:ty, $scope:ident) => {
        impl $crate::types::meta::CattleObject for $kind {
            cattle_object!(@flag $scope);
            cattle_object!(@api $scope);
        }
    };
    ($kind:ty, $scope:ident, |$obj:ident| $cluster:expr) => {
        impl $crate::types::meta::CattleObject for $kind {
            cattle_object!(@flag $scope);
            cattle_object!(@api $scope);

            fn obj_cluster_name(&self) -> Option<String> {
                let $obj = self;
                $cluster
            }
        }
    };
}

/// Implements `kube::Resource` and a `new` constructor for kinds whose
/// fields sit next to `metadata` instead of under `spec`/`status`.
///
/// The struct must carry `api_version`, `kind` and `metadata` fields and
/// implement `Default`. Use `Type as "Kind"` when the wire kind differs
/// from the type name.
macro_rules! flat_resource {
    (@scope namespaced) => {
        ::k8s_openapi::NamespaceResourceScope
    };
    (@scope cluster) => {
        ::k8s_openapi::ClusterResourceScope
    };
    (@new namespaced) => {
        pub fn new(namespace: &str, name: &str) -> Self {
            let mut obj = Self::new_unnamed();
            obj.metadata.namespace = Some(namespace.to_string());
            obj.metadata.name = Some(name.to_string());
            obj
        }
    };
    (@new cluster) => {
        pub fn new(name: &str) -> Self {
            let mut obj = Self::new_unnamed();
            obj.metadata.name = Some(name.to_string());
            obj
        }
    };
    ($kind:ident, $group:expr, $plural:literal, $scope:ident) => {
        flat_resource!($kind as stringify!($kind), $group, $plural, $scope);
    };
    ($kind:ident as $kind_name:expr, $group:expr, $plural:literal, $scope:ident) => {
        impl ::kube::Resource for $kind {
            type DynamicType = ();
            type Scope = flat_resource!(@scope $scope);

            fn kind(_: &()) -> ::std::borrow::Cow<'_, str> {
                $kind_name.into()
            }

            fn group(_: &()) -> ::std::borrow::Cow<'_, str> {
                $group.into()
            }

            fn version(_: &()) -> ::std::borrow::Cow<'_, str> {
                $crate::constants::groups::VERSION.into()
            }

            fn plural(_: &()) -> ::std::borrow::Cow<'_, str> {
                $plural.into()
            }

            fn meta(&self) -> &::kube::api::ObjectMeta {
                &self.metadata
            }

            fn meta_mut(&mut self) -> &mut ::kube::api::ObjectMeta {
                &mut self.metadata
            }
        }

        impl $kind {
            flat_resource!(@new $scope);

            fn new_unnamed() -> Self {
                Self {
                    api_version: <Self as ::kube::Resource>::api_version(&()).into_owned(),
                    kind: <Self as ::kube::Resource>::kind(&()).into_owned(),
                    ..Default::default()
                }
            }
        }
    };
}

/// Implements `HasConditions` on a resource by delegating to its
/// optional status, creating an empty status on first write.
macro_rules! conditions_via_status {
    ($kind:ty) => {
        impl $crate::types::condition::HasConditions for $kind {
            fn conditions(&self) -> &[$crate::types::condition::Condition] {
                self.status
                    .as_ref()
                    .map(|s| s.conditions.as_slice())
                    .unwrap_or(&[])
            }

            fn conditions_mut(&mut self) -> &mut Vec<$crate::types::condition::Condition> {
                &mut self.status.get_or_insert_with(Default::default).conditions
            }
        }
    };
}
