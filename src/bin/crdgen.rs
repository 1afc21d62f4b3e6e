// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the CRD manifests of all cattle kinds as a multi-document YAML stream.

use anyhow::{Context, Result};
use cattle_types::kubernetes::all_crds;

fn main() -> Result<()> {
    for crd in all_crds() {
        let name = crd.metadata.name.clone().unwrap_or_default();
        let yaml = serde_yaml::to_string(&crd).with_context(|| format!("Failed to render CRD {}", name))?;
        println!("---");
        print!("{}", yaml);
    }
    Ok(())
}
