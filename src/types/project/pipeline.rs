// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pipelines, their executions and the source code credentials and
//! repositories they build from.

use crate::constants::groups;
use crate::types::condition::{Cond, Condition};
use crate::types::meta::cluster_of_project;
use kube::api::ObjectMeta;
use kube::CustomResource;
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

pub const PIPELINE_EXECUTION_CONDITION_PROVISIONED: Cond = Cond("Provisioned");
pub const PIPELINE_EXECUTION_CONDITION_INITIALIZED: Cond = Cond("Initialized");
pub const PIPELINE_EXECUTION_CONDITION_BUILT: Cond = Cond("Built");

pub const STATE_WAITING: &str = "Waiting";
pub const STATE_BUILDING: &str = "Building";
pub const STATE_SUCCESS: &str = "Success";
pub const STATE_FAILED: &str = "Failed";
pub const STATE_SKIPPED: &str = "Skipped";
pub const STATE_ABORTED: &str = "Aborted";

pub type PipelineCondition = Condition;

fn project_cluster(project_name: &str) -> Option<String> {
    cluster_of_project(project_name).map(String::from)
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "project.cattle.io",
    version = "v3",
    kind = "Pipeline",
    namespaced,
    status = "PipelineStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSpec {
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub trigger_webhook_push: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub trigger_webhook_pr: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub trigger_webhook_tag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code_credential_name: Option<String>,
}

cattle_object!(Pipeline, namespaced, |p| project_cluster(&p.spec.project_name));

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_state: Option<String>,
    #[serde(default)]
    pub next_run: i64,
    #[serde(rename = "lastExecutionId", skip_serializing_if = "Option::is_none")]
    pub last_execution_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_started: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_start: Option<String>,
    #[serde(rename = "webhookId", skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code_credential: Option<Box<SourceCodeCredential>>,
}

/// Contents of a `.rancher-pipeline.yml` file
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<Constraint>,
}

impl PipelineConfig {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn step_count(&self) -> usize {
        self.stages.iter().map(|s| s.steps.len()).sum()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<Constraints>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code_config: Option<SourceCodeConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_script_config: Option<RunScriptConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_image_config: Option<PublishImageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_yaml_config: Option<ApplyYamlConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_from: Vec<EnvFrom>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub privileged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<Constraints>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<Constraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Constraint>,
}

/// Include/exclude patterns. A bare string or list is shorthand for `include`.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Constraint {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Scalars of any type are taken as their string form, so `branch: 2020` works
fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn string_or_slice(value: Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.into_iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

impl<'de> Deserialize<'de> for Constraint {
    /// Accepts `dev`, `[dev, hotfix]` and `{include: .., exclude: ..}`; never fails on shape
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Mapping(mut map) => Constraint {
                include: map.remove("include").map(string_or_slice).unwrap_or_default(),
                exclude: map.remove("exclude").map(string_or_slice).unwrap_or_default(),
            },
            Value::Tagged(tagged) => Constraint {
                include: string_or_slice(tagged.value),
                exclude: Vec::new(),
            },
            other => Constraint {
                include: string_or_slice(other),
                exclude: Vec::new(),
            },
        })
    }
}

impl Constraint {
    /// Whether `value` passes: not excluded, and included when an include list exists.
    /// Patterns are shell globs (`*`, `?`, `[a-z]`); `*` does not cross a `/`.
    /// A malformed pattern matches nothing.
    pub fn matches(&self, value: &str) -> bool {
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };
        let hit = |pattern: &String| {
            Pattern::new(pattern).is_ok_and(|glob| glob.matches_with(value, options))
        };
        if self.exclude.iter().any(hit) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(hit)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SourceCodeConfig {}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunScriptConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_script: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishImageConfig {
    /// Always serialized, even when empty
    #[serde(default)]
    pub dockerfile_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub push_remote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ApplyYamlConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvFrom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_key: Option<String>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "project.cattle.io",
    version = "v3",
    kind = "PipelineExecution",
    namespaced,
    status = "PipelineExecutionStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecutionSpec {
    pub project_name: String,
    pub pipeline_name: String,
    #[serde(default)]
    pub pipeline_config: PipelineConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

cattle_object!(PipelineExecution, namespaced, |e| project_cluster(&e.spec.project_name));
conditions_via_status!(PipelineExecution);

impl PipelineExecution {
    pub fn execution_state(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.execution_state.as_deref())
            .unwrap_or(STATE_WAITING)
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.execution_state(),
            STATE_SUCCESS | STATE_FAILED | STATE_ABORTED
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecutionStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<PipelineCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<StageStatus>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StageStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepStatus>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StepStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended: Option<String>,
}

/// Project-level pipeline setting, e.g. executor quota
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSetting {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub customized: bool,
}

flat_resource!(PipelineSetting, groups::PROJECT, "pipelinesettings", namespaced);
cattle_object!(PipelineSetting, namespaced, |s| project_cluster(&s.project_name));

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "project.cattle.io",
    version = "v3",
    kind = "SourceCodeCredential",
    namespaced,
    status = "SourceCodeCredentialStatus",
    derive = "PartialEq",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeCredentialSpec {
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code_type: Option<String>,
    #[serde(default)]
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_login_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

cattle_object!(SourceCodeCredential, namespaced, |c| project_cluster(&c.spec.project_name));

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SourceCodeCredentialStatus {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub logout: bool,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "project.cattle.io",
    version = "v3",
    kind = "SourceCodeRepository",
    namespaced,
    status = "SourceCodeRepositoryStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeRepositorySpec {
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code_type: Option<String>,
    #[serde(default)]
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code_credential_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub permissions: RepoPerm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

cattle_object!(SourceCodeRepository, namespaced, |r| project_cluster(&r.spec.project_name));

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SourceCodeRepositoryStatus {}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RepoPerm {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pull: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub push: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub admin: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RunPipelineInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PushPipelineConfigInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configs: Option<BTreeMap<String, PipelineConfig>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSystemImages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenkins: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenkins_jnlp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpine_git: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins_docker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kube_apply: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::meta::CattleObject;
    use serde_json::json;

    const PIPELINE_YAML: &str = r#"
stages:
- name: Build
  steps:
  - runScriptConfig:
      image: golang:1.14
      shellScript: go test ./...
    when:
      branch: master
- name: Publish
  steps:
  - publishImageConfig:
      dockerfilePath: ./Dockerfile
      buildContext: .
      tag: example/app:${CICD_EXECUTION_SEQUENCE}
    env:
      PLUGIN_DEBUG: "true"
  when:
    branch:
      include: [master, release-*]
      exclude: release-old
timeout: 60
branch:
- master
- dev
"#;

    #[test]
    fn test_pipeline_config_from_yaml() {
        let config = PipelineConfig::from_yaml(PIPELINE_YAML).unwrap();

        assert_eq!(config.stages.len(), 2);
        assert_eq!(config.step_count(), 2);
        assert_eq!(config.timeout, Some(60));
        assert_eq!(
            config.branch.as_ref().map(|b| b.include.clone()),
            Some(vec!["master".to_string(), "dev".to_string()])
        );

        let build_when = config.stages[0].steps[0].when.as_ref().unwrap();
        assert_eq!(
            build_when.branch.as_ref().map(|b| b.include.clone()),
            Some(vec!["master".to_string()])
        );

        let publish_when = config.stages[1].when.as_ref().and_then(|w| w.branch.as_ref()).unwrap();
        assert_eq!(publish_when.include, vec!["master", "release-*"]);
        assert_eq!(publish_when.exclude, vec!["release-old"]);
    }

    #[test]
    fn test_pipeline_config_yaml_round_trip() {
        let config = PipelineConfig::from_yaml(PIPELINE_YAML).unwrap();
        let again = PipelineConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(config, again);
    }

    #[test]
    fn test_constraint_matching() {
        let constraint = Constraint {
            include: vec!["master".to_string(), "release-*".to_string()],
            exclude: vec!["release-old".to_string()],
        };
        assert!(constraint.matches("master"));
        assert!(constraint.matches("release-2.4"));
        assert!(!constraint.matches("release-old"));
        assert!(!constraint.matches("feature-x"));

        let exclude_only = Constraint {
            exclude: vec!["wip-*".to_string()],
            ..Default::default()
        };
        assert!(exclude_only.matches("anything"));
        assert!(!exclude_only.matches("wip-1"));
    }

    #[test]
    fn test_constraint_globs() {
        let constraint = Constraint {
            include: vec!["v?.*".to_string(), "hotfix-[0-9]*".to_string(), "feature/*".to_string()],
            ..Default::default()
        };
        assert!(constraint.matches("v2.4"));
        assert!(constraint.matches("hotfix-12"));
        assert!(constraint.matches("feature/login"));
        assert!(!constraint.matches("feature/login/form"));
        assert!(!constraint.matches("v10.1"));
        assert!(!constraint.matches("hotfix-x"));

        let broken = Constraint {
            include: vec!["[master".to_string()],
            ..Default::default()
        };
        assert!(!broken.matches("master"));
    }

    #[test]
    fn test_constraint_accepts_non_string_scalars() {
        let config = PipelineConfig::from_yaml("branch: 1.0\n").unwrap();
        assert_eq!(config.branch.unwrap().include, vec!["1.0"]);

        let config = PipelineConfig::from_yaml(
            "stages:\n- steps:\n  - runScriptConfig:\n      image: busybox\n    when:\n      branch:\n        include: [master, 2020]\n        exclude: true\n      event: 2020\n",
        )
        .unwrap();
        let when = config.stages[0].steps[0].when.as_ref().unwrap();
        let branch = when.branch.as_ref().unwrap();
        assert_eq!(branch.include, vec!["master", "2020"]);
        assert_eq!(branch.exclude, vec!["true"]);
        assert_eq!(when.event.as_ref().unwrap().include, vec!["2020"]);
    }

    #[test]
    fn test_publish_image_always_has_dockerfile_path() {
        let value = serde_json::to_value(PublishImageConfig::default()).unwrap();
        assert_eq!(value, json!({"dockerfilePath": ""}));
    }

    #[test]
    fn test_execution_state_and_cluster() {
        let mut execution = PipelineExecution::new(
            "p-xyz-1",
            PipelineExecutionSpec {
                project_name: "c-abcde:p-xyz".to_string(),
                pipeline_name: "p-xyz:pipeline-1".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(execution.execution_state(), STATE_WAITING);
        assert!(!execution.is_finished());
        assert_eq!(execution.obj_cluster_name().as_deref(), Some("c-abcde"));

        PIPELINE_EXECUTION_CONDITION_BUILT.set_true(&mut execution);
        if let Some(status) = execution.status.as_mut() {
            status.execution_state = Some(STATE_SUCCESS.to_string());
        }
        assert!(execution.is_finished());
        assert!(PIPELINE_EXECUTION_CONDITION_BUILT.is_true(&execution));
    }

    #[test]
    fn test_execution_spec_git_ref() {
        let spec: PipelineExecutionSpec = serde_json::from_value(json!({
            "projectName": "c-abcde:p-xyz",
            "pipelineName": "p-xyz:pipeline-1",
            "ref": "refs/heads/master",
            "htmlLink": "https://github.com/example/app/commit/abc"
        }))
        .unwrap();
        assert_eq!(spec.git_ref.as_deref(), Some("refs/heads/master"));
        assert_eq!(spec.html_link.as_deref(), Some("https://github.com/example/app/commit/abc"));
    }

    #[test]
    fn test_pipeline_setting_is_namespaced_flat_kind() {
        let mut setting = PipelineSetting::new("p-xyz", "executor-quota");
        setting.project_name = "c-abcde:p-xyz".to_string();
        setting.value = "2".to_string();

        assert_eq!(setting.kind, "PipelineSetting");
        assert_eq!(setting.api_version, "project.cattle.io/v3");
        assert_eq!(setting.obj_cluster_name().as_deref(), Some("c-abcde"));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = PipelineConfig::from_yaml(PIPELINE_YAML).unwrap();
        let copy = original.clone();
        original.stages[0].steps.clear();
        original.branch = None;

        assert_eq!(copy.step_count(), 2);
        assert!(copy.branch.is_some());
    }
}
