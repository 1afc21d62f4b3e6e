// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Status conditions in the standard Kubernetes shape and the named
//! condition helpers used to read and write them.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const STATUS_TRUE: &str = "True";
pub const STATUS_FALSE: &str = "False";
pub const STATUS_UNKNOWN: &str = "Unknown";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of the condition
    #[serde(rename = "type")]
    pub condition_type: String,
    /// One of True, False, Unknown
    pub status: String,
    /// The last time this condition was updated
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_update_time: String,
    /// Last time the condition transitioned from one status to another
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_transition_time: String,
    /// The reason for the condition's last transition
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// Human-readable message indicating details about last transition
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Anything carrying a list of conditions
pub trait HasConditions {
    fn conditions(&self) -> &[Condition];
    fn conditions_mut(&mut self) -> &mut Vec<Condition>;
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A named condition type, e.g. `Ready`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cond(pub &'static str);

impl Cond {
    pub fn name(&self) -> &'static str {
        self.0
    }

    fn find<'a>(&self, obj: &'a impl HasConditions) -> Option<&'a Condition> {
        obj.conditions()
            .iter()
            .find(|c| c.condition_type == self.0)
    }

    fn find_or_create<'a>(&self, obj: &'a mut impl HasConditions) -> &'a mut Condition {
        let conditions = obj.conditions_mut();
        let idx = match conditions.iter().position(|c| c.condition_type == self.0) {
            Some(idx) => idx,
            None => {
                conditions.push(Condition {
                    condition_type: self.0.to_string(),
                    ..Default::default()
                });
                conditions.len() - 1
            }
        };
        &mut conditions[idx]
    }

    /// Status of the condition, empty when the condition is absent
    pub fn get_status(&self, obj: &impl HasConditions) -> String {
        self.find(obj).map(|c| c.status.clone()).unwrap_or_default()
    }

    pub fn is_true(&self, obj: &impl HasConditions) -> bool {
        self.find(obj).is_some_and(|c| c.status == STATUS_TRUE)
    }

    pub fn is_false(&self, obj: &impl HasConditions) -> bool {
        self.find(obj).is_some_and(|c| c.status == STATUS_FALSE)
    }

    pub fn is_unknown(&self, obj: &impl HasConditions) -> bool {
        self.find(obj).is_some_and(|c| c.status == STATUS_UNKNOWN)
    }

    /// Set the status; the transition time only moves when the value changes
    pub fn set_status(&self, obj: &mut impl HasConditions, status: &str) {
        let condition = self.find_or_create(obj);
        let ts = now();
        if condition.status != status {
            condition.last_transition_time = ts.clone();
        }
        condition.status = status.to_string();
        condition.last_update_time = ts;
    }

    pub fn set_true(&self, obj: &mut impl HasConditions) {
        self.set_status(obj, STATUS_TRUE);
    }

    pub fn set_false(&self, obj: &mut impl HasConditions) {
        self.set_status(obj, STATUS_FALSE);
    }

    pub fn set_unknown(&self, obj: &mut impl HasConditions) {
        self.set_status(obj, STATUS_UNKNOWN);
    }

    /// Add the condition as Unknown unless it already exists
    pub fn create_unknown_if_not_exists(&self, obj: &mut impl HasConditions) {
        if self.find(obj).is_none() {
            self.set_unknown(obj);
        }
    }

    pub fn get_reason(&self, obj: &impl HasConditions) -> String {
        self.find(obj).map(|c| c.reason.clone()).unwrap_or_default()
    }

    pub fn get_message(&self, obj: &impl HasConditions) -> String {
        self.find(obj).map(|c| c.message.clone()).unwrap_or_default()
    }

    pub fn set_reason(&self, obj: &mut impl HasConditions, reason: &str) {
        self.find_or_create(obj).reason = reason.to_string();
    }

    pub fn set_message(&self, obj: &mut impl HasConditions, message: &str) {
        self.find_or_create(obj).message = message.to_string();
    }

    pub fn reason_and_message(&self, obj: &mut impl HasConditions, reason: &str, message: &str) {
        let condition = self.find_or_create(obj);
        condition.reason = reason.to_string();
        condition.message = message.to_string();
    }

    /// Bump the update time without touching the status
    pub fn last_updated(&self, obj: &mut impl HasConditions, ts: &str) {
        self.find_or_create(obj).last_update_time = ts.to_string();
    }

    /// `True` with the given reason on success, `False` with the error text otherwise
    pub fn set_error<E: Display>(&self, obj: &mut impl HasConditions, reason: &str, err: Option<E>) {
        match err {
            None => {
                self.set_true(obj);
                self.set_message(obj, "");
                self.set_reason(obj, reason);
            }
            Some(err) => {
                let reason = if reason.is_empty() { "Error" } else { reason };
                self.set_false(obj);
                self.set_message(obj, &err.to_string());
                self.set_reason(obj, reason);
            }
        }
    }
}

impl HasConditions for Vec<Condition> {
    fn conditions(&self) -> &[Condition] {
        self.as_slice()
    }

    fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const READY: Cond = Cond("Ready");
    const PROVISIONED: Cond = Cond("Provisioned");

    #[test]
    fn test_absent_condition() {
        let conditions: Vec<Condition> = Vec::new();
        assert!(!READY.is_true(&conditions));
        assert!(!READY.is_false(&conditions));
        assert_eq!(READY.get_status(&conditions), "");
    }

    #[test]
    fn test_set_true_creates_condition() {
        let mut conditions: Vec<Condition> = Vec::new();
        READY.set_true(&mut conditions);

        assert_eq!(conditions.len(), 1);
        assert!(READY.is_true(&conditions));
        assert!(!conditions[0].last_update_time.is_empty());
        assert_eq!(conditions[0].last_update_time, conditions[0].last_transition_time);
    }

    #[test]
    fn test_transition_time_only_moves_on_change() {
        let mut conditions = vec![Condition {
            condition_type: "Ready".to_string(),
            status: STATUS_TRUE.to_string(),
            last_update_time: "2020-01-01T00:00:00Z".to_string(),
            last_transition_time: "2020-01-01T00:00:00Z".to_string(),
            ..Default::default()
        }];

        READY.set_true(&mut conditions);
        assert_eq!(conditions[0].last_transition_time, "2020-01-01T00:00:00Z");
        assert_ne!(conditions[0].last_update_time, "2020-01-01T00:00:00Z");

        READY.set_false(&mut conditions);
        assert_ne!(conditions[0].last_transition_time, "2020-01-01T00:00:00Z");
        assert!(READY.is_false(&conditions));
    }

    #[test]
    fn test_conditions_are_independent() {
        let mut conditions: Vec<Condition> = Vec::new();
        READY.set_true(&mut conditions);
        PROVISIONED.set_unknown(&mut conditions);

        assert_eq!(conditions.len(), 2);
        assert!(READY.is_true(&conditions));
        assert!(PROVISIONED.is_unknown(&conditions));
    }

    #[test]
    fn test_create_unknown_if_not_exists_keeps_existing() {
        let mut conditions: Vec<Condition> = Vec::new();
        READY.set_true(&mut conditions);
        READY.create_unknown_if_not_exists(&mut conditions);
        PROVISIONED.create_unknown_if_not_exists(&mut conditions);

        assert!(READY.is_true(&conditions));
        assert!(PROVISIONED.is_unknown(&conditions));
    }

    #[test]
    fn test_set_error() {
        let mut conditions: Vec<Condition> = Vec::new();
        READY.set_error(&mut conditions, "", Some("connection refused"));
        assert!(READY.is_false(&conditions));
        assert_eq!(READY.get_reason(&conditions), "Error");
        assert_eq!(READY.get_message(&conditions), "connection refused");

        READY.set_error::<&str>(&mut conditions, "Provisioned", None);
        assert!(READY.is_true(&conditions));
        assert_eq!(READY.get_reason(&conditions), "Provisioned");
        assert_eq!(READY.get_message(&conditions), "");
    }

    #[test]
    fn test_reason_and_message_keep_status() {
        let mut conditions: Vec<Condition> = Vec::new();
        READY.set_unknown(&mut conditions);
        READY.reason_and_message(&mut conditions, "Waiting", "waiting for etcd");

        assert!(READY.is_unknown(&conditions));
        assert_eq!(READY.get_reason(&conditions), "Waiting");
        assert_eq!(READY.get_message(&conditions), "waiting for etcd");
    }

    #[test]
    fn test_wire_format() {
        let condition = Condition {
            condition_type: "Ready".to_string(),
            status: STATUS_TRUE.to_string(),
            last_transition_time: "2020-01-01T00:00:00Z".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Ready",
                "status": "True",
                "lastTransitionTime": "2020-01-01T00:00:00Z"
            })
        );
    }
}
