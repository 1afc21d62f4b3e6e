// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// API group names and the version shared by all of them
pub mod groups {
    pub const MANAGEMENT: &str = "management.cattle.io";
    pub const PROJECT: &str = "project.cattle.io";
    pub const CLUSTER: &str = "cluster.cattle.io";
    pub const VERSION: &str = "v3";
}

/// Keys written onto objects by lifecycle handlers
pub mod lifecycle {
    /// Prefix of the annotation marking an object as initialised by a named lifecycle
    pub const CREATED_ANNOTATION: &str = "lifecycle.cattle.io/create";
    /// Finalizer prefix for lifecycles running in the management plane
    pub const FINALIZER_PREFIX: &str = "controller.cattle.io/";
    /// Finalizer prefix for lifecycles scoped to a single downstream cluster
    pub const SCOPED_FINALIZER_PREFIX: &str = "clusterscoped.controller.cattle.io/";
}

/// Annotation carrying the `cluster:project` id an object belongs to
pub const PROJECT_ID_ANNOTATION: &str = "field.cattle.io/projectId";

/// API group polling configuration
pub mod discovery {
    /// Initial polling interval in seconds when waiting for an API group
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Controller defaults
pub mod controller {
    pub const DEFAULT_THREADINESS: usize = 5;
    pub const DEFAULT_REQUEUE_SECS: u64 = 30;
}
