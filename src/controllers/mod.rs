// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Informer-backed controllers, their caches and the lifecycle adapter.

pub mod generic;
pub mod handler;
pub mod lifecycle;
pub mod lister;
pub mod queue;

pub use generic::{GenericController, Starter};
pub use handler::{EnabledFn, Handler};
pub use lifecycle::{LifecycleAdapter, LifecycleDelegate, ObjectLifecycle};
pub use lister::{ClientCache, Lister};
