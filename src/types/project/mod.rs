// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kinds of the `project.cattle.io/v3` API group.

pub mod pipeline;

pub use pipeline::{
    Pipeline, PipelineConfig, PipelineExecution, PipelineExecutionSpec, PipelineExecutionStatus,
    PipelineSetting, PipelineSpec, PipelineStatus, SourceCodeCredential, SourceCodeCredentialSpec,
    SourceCodeRepository, SourceCodeRepositorySpec,
};
