use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize;

/// A module document as stored in the index.
///
/// Only the fields the browser navigates by are typed; everything else
/// (packages, artifacts, summary, ...) is kept as raw JSON in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub name: String,
    pub version: String,
    pub release: String,
    /// Runtime dependency document ids, in stored order
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Build dependency document ids, in stored order
    #[serde(default, rename = "dependencies-build")]
    pub dependencies_build: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Module {
    pub fn dependency_ids(&self, kind: DependencyKind) -> &[String] {
        match kind {
            DependencyKind::Runtime => &self.dependencies,
            DependencyKind::Build => &self.dependencies_build,
        }
    }

    /// "name version release", as shown in listings
    pub fn nvr(&self) -> String {
        format!("{} {} {}", self.name, self.version, self.release)
    }
}

/// A single search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source")]
    pub source: Module,
}

/// One slot of a multi-get response. Misses keep their position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencySlot {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Option<Module>,
}

/// A terms aggregation bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bucket {
    /// Keys of keyword fields are strings; numeric keys are stringified on decode.
    #[serde(deserialize_with = "de_bucket_key")]
    pub key: String,
    pub doc_count: u64,
}

fn de_bucket_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    Runtime,
    Build,
}

impl DependencyKind {
    pub fn label(self) -> &'static str {
        match self {
            DependencyKind::Runtime => "runtime",
            DependencyKind::Build => "build",
        }
    }
}

/// A sanitized (name, version, release) triple built from path parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawModuleKey")]
pub struct ModuleKey {
    pub name: String,
    pub version: String,
    pub release: String,
}

#[derive(Deserialize)]
struct RawModuleKey {
    name: String,
    version: String,
    release: String,
}

impl From<RawModuleKey> for ModuleKey {
    fn from(raw: RawModuleKey) -> Self {
        Self::new(&raw.name, &raw.version, &raw.release)
    }
}

impl ModuleKey {
    pub fn new(name: &str, version: &str, release: &str) -> Self {
        Self {
            name: sanitize(name),
            version: sanitize(version),
            release: sanitize(release),
        }
    }
}

impl std::fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.name, self.version, self.release)
    }
}

/// Query string of `/search-modules/`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}
