//! Request bodies for the module index.
//!
//! Everything here is pure: callers pass already-sanitized values and get a
//! request object back. Field names of the index mapping live only in this
//! module.

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::DependencyKind;

pub const FIELD_NAME: &str = "name.raw";
pub const FIELD_VERSION: &str = "version.raw";
pub const FIELD_RELEASE: &str = "release.raw";
pub const FIELD_DEPENDENCIES: &str = "dependencies";
pub const FIELD_DEPENDENCIES_BUILD: &str = "dependencies-build";

/// Aggregation names used in request and response
pub const AGG_MODULES: &str = "modules";
pub const AGG_VERSIONS: &str = "versions";

/// Body for the `_search` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchRequest {
    pub body: Value,
}

/// Body for the `_mget` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiGetRequest {
    pub ids: Vec<String>,
}

/// Field holding the dependency ids of the given kind.
pub fn dependency_field(kind: DependencyKind) -> &'static str {
    match kind {
        DependencyKind::Runtime => FIELD_DEPENDENCIES,
        DependencyKind::Build => FIELD_DEPENDENCIES_BUILD,
    }
}

/// Distinct module names with their document counts.
pub fn module_name_aggregation() -> SearchRequest {
    SearchRequest {
        body: json!({
            "size": 0,
            "aggs": {
                AGG_MODULES: { "terms": { "field": FIELD_NAME } }
            }
        }),
    }
}

/// Distinct versions of one module name, nested under a name bucket.
pub fn version_aggregation(name: &str) -> SearchRequest {
    SearchRequest {
        body: json!({
            "size": 0,
            "query": {
                "bool": { "must": [ { "match": { FIELD_NAME: name } } ] }
            },
            "aggs": {
                AGG_MODULES: {
                    "terms": { "field": FIELD_NAME },
                    "aggs": {
                        AGG_VERSIONS: { "terms": { "field": FIELD_VERSION } }
                    }
                }
            }
        }),
    }
}

/// Conjunction of one match clause per supplied field.
pub fn exact_match(name: &str, version: Option<&str>, release: Option<&str>) -> SearchRequest {
    let mut must = vec![json!({ "match": { FIELD_NAME: name } })];
    if let Some(version) = version {
        must.push(json!({ "match": { FIELD_VERSION: version } }));
    }
    if let Some(release) = release {
        must.push(json!({ "match": { FIELD_RELEASE: release } }));
    }

    SearchRequest {
        body: json!({ "query": { "bool": { "must": must } } }),
    }
}

/// Fetch documents by id, one response slot per id in the same order.
///
/// Never send this with an empty id list; the resolver short-circuits instead.
pub fn id_batch_get(ids: &[String]) -> MultiGetRequest {
    MultiGetRequest { ids: ids.to_vec() }
}

/// Documents whose dependency list of `kind` contains `target_id`.
pub fn reverse_dependency_filter(kind: DependencyKind, target_id: &str) -> SearchRequest {
    SearchRequest {
        body: json!({
            "query": {
                "bool": {
                    "must": { "match_all": {} },
                    "filter": {
                        "terms": { dependency_field(kind): [target_id] }
                    }
                }
            }
        }),
    }
}

/// Full-text match of a term across every document field.
pub fn free_text(term: &str) -> SearchRequest {
    SearchRequest {
        body: json!({
            "query": {
                "multi_match": {
                    "query": term,
                    "fields": ["*"],
                    "lenient": true
                }
            }
        }),
    }
}
