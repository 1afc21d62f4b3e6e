// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, CRD manifests and API discovery.

pub mod client;
pub mod crd;

pub use client::{client_from_kubeconfig, default_client};
pub use crd::{all_crds, crd_for, wait_for_api_group};
