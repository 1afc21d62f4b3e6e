// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
#[macro_use]
mod macros;

pub mod condition;
pub mod meta;

pub mod cluster;
pub mod management;
pub mod project;

pub use condition::{Cond, Condition, HasConditions};
pub use meta::CattleObject;
