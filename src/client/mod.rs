// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed clients: plain CRUD, per-kind resource clients and the API group aggregates.

pub mod group;
pub mod object;
pub mod resource;

pub use group::{ClusterClient, GroupClient, ManagementClient, ProjectClient};
pub use object::ObjectClient;
pub use resource::ResourceClient;
