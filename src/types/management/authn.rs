// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Authentication kinds. All of them are cluster-scoped and keep their
//! fields next to `metadata`.

use crate::constants::groups;
use crate::types::condition::{Cond, Condition};
use chrono::{DateTime, Utc};
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const USER_CONDITION_INITIAL_ROLES_POPULATED: Cond = Cond("InitialRolesPopulated");

pub const TOKEN_ACTION_LOGOUT: &str = "logout";

/// Identity of a user or group as reported by an auth provider
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(rename = "profileURL", skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    /// One of user, group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub me: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub member_of: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<BTreeMap<String, String>>,
}

/// Session or API token
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user_principal: Principal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_principals: Vec<Principal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_info: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub auth_provider: String,
    /// Time to live in milliseconds, 0 means forever
    #[serde(default)]
    pub ttl: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<String>,
    #[serde(default)]
    pub is_derived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

flat_resource!(Token, groups::MANAGEMENT, "tokens", cluster);
cattle_object!(Token, cluster, |t| {
    t.cluster_name.clone().filter(|c| !c.is_empty())
});

impl Token {
    /// Expiry derived from creation time and ttl; `None` for tokens that never expire
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        if self.ttl <= 0 {
            return None;
        }
        let created = self.metadata.creation_timestamp.as_ref()?.0;
        Some(created + chrono::Duration::milliseconds(self.ttl))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry().is_some_and(|expiry| now >= expiry)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub must_change_password: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub principal_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub me: bool,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<UserSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

flat_resource!(User, groups::MANAGEMENT, "users", cluster);
cattle_object!(User, cluster);
conditions_via_status!(User);

impl User {
    /// True when one of the principal ids belongs to `provider`, e.g. `local://u-abc`
    pub fn has_principal_from(&self, provider: &str) -> bool {
        let prefix = format!("{}://", provider);
        self.principal_ids.iter().any(|id| id.starts_with(&prefix))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserSpec {}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

flat_resource!(Group, groups::MANAGEMENT, "groups", cluster);
cattle_object!(Group, cluster);

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub principal_id: String,
}

flat_resource!(GroupMember, groups::MANAGEMENT, "groupmembers", cluster);
cattle_object!(GroupMember, cluster);
