// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kinds of the `cluster.cattle.io/v3` API group, stored in downstream clusters.

pub mod auth;

pub use auth::{ClusterAuthToken, ClusterUserAttribute};
