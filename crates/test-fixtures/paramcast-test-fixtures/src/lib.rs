use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "node-cases")]
    node_cases: BTreeMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn lookup<'a>(map: &'a BTreeMap<String, String>, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown node case fixture '{name}'"))
}

/// Recorded node invocations: `{ "node", "inputs", "expected" }` documents.
pub mod node_cases {
    use super::*;

    /// Case names in sorted order.
    pub fn keys() -> Vec<String> {
        MANIFEST.node_cases.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.node_cases, name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let text = json(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse node case fixture {name}"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.node_cases, name)?))
    }
}
