//! In-memory stand-in for the module index.
//!
//! Interprets the request shapes produced by `search::query` against a list
//! of documents and records every call it receives.

#![allow(dead_code)]

use std::cmp::Reverse;
use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use module_browser::models::DependencySlot;
use module_browser::search::gateway::{SearchGateway, SearchResponse};
use module_browser::search::query::{MultiGetRequest, SearchRequest};

#[derive(Default)]
pub struct InMemoryIndex {
    docs: Vec<(String, Value)>,
    pub searches: Mutex<Vec<Value>>,
    pub multi_gets: Mutex<Vec<Vec<String>>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module document with id `name#version#release`.
    pub fn with_module(
        self,
        name: &str,
        version: &str,
        release: &str,
        runtime: &[&str],
        build: &[&str],
    ) -> Self {
        let id = format!("{name}#{version}#{release}");
        self.with_document(
            &id,
            json!({
                "name": name,
                "version": version,
                "release": release,
                "dependencies": runtime,
                "dependencies-build": build,
            }),
        )
    }

    pub fn with_document(mut self, id: &str, source: Value) -> Self {
        self.docs.push((id.to_string(), source));
        self
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().len()
    }

    pub fn multi_get_count(&self) -> usize {
        self.multi_gets.lock().len()
    }

    fn evaluate(&self, body: &Value) -> Value {
        let matched: Vec<&(String, Value)> = self
            .docs
            .iter()
            .filter(|(_, source)| body.get("query").map_or(true, |q| matches(q, source)))
            .collect();

        let hits: Vec<Value> = if body.get("size") == Some(&json!(0)) {
            Vec::new()
        } else {
            matched
                .iter()
                .map(|(id, source)| json!({ "_id": id, "_source": source }))
                .collect()
        };

        let sources: Vec<&Value> = matched.iter().map(|(_, source)| source).collect();
        let aggregations = body
            .get("aggs")
            .map(|aggs| aggregate(aggs, &sources))
            .unwrap_or_else(|| json!({}));

        json!({ "hits": { "hits": hits }, "aggregations": aggregations })
    }
}

fn source_field(field: &str) -> &str {
    field.strip_suffix(".raw").unwrap_or(field)
}

fn field_has(source: &Value, field: &str, wanted: &Value) -> bool {
    match source.get(source_field(field)) {
        Some(Value::Array(items)) => items.contains(wanted),
        Some(value) => value == wanted,
        None => false,
    }
}

fn clauses(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn matches(query: &Value, source: &Value) -> bool {
    if query.get("match_all").is_some() {
        return true;
    }
    if let Some(bool_query) = query.get("bool") {
        let must = bool_query.get("must").map(clauses).unwrap_or_default();
        let filter = bool_query.get("filter").map(clauses).unwrap_or_default();
        return must.into_iter().chain(filter).all(|q| matches(q, source));
    }
    if let Some(Value::Object(fields)) = query.get("match") {
        return fields.iter().all(|(field, wanted)| field_has(source, field, wanted));
    }
    if let Some(Value::Object(fields)) = query.get("terms") {
        return fields.iter().all(|(field, wanted)| {
            wanted
                .as_array()
                .is_some_and(|values| values.iter().any(|v| field_has(source, field, v)))
        });
    }
    if let Some(multi) = query.get("multi_match") {
        let term = multi["query"].as_str().unwrap_or_default().to_lowercase();
        return term
            .split_whitespace()
            .any(|token| contains_text(source, token));
    }
    panic!("unsupported query clause: {query}");
}

fn contains_text(value: &Value, token: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(token),
        Value::Array(items) => items.iter().any(|v| contains_text(v, token)),
        Value::Object(map) => map.values().any(|v| contains_text(v, token)),
        _ => false,
    }
}

/// Terms aggregations, buckets ordered by count descending then key.
fn aggregate(aggs: &Value, docs: &[&Value]) -> Value {
    let mut out = serde_json::Map::new();
    for (name, spec) in aggs.as_object().into_iter().flatten() {
        let field = source_field(spec["terms"]["field"].as_str().unwrap_or_default());

        let mut groups: BTreeMap<String, Vec<&Value>> = BTreeMap::new();
        for doc in docs {
            if let Some(Value::String(key)) = doc.get(field) {
                groups.entry(key.clone()).or_default().push(*doc);
            }
        }

        let mut groups: Vec<(String, Vec<&Value>)> = groups.into_iter().collect();
        groups.sort_by_key(|(key, members)| (Reverse(members.len()), key.clone()));

        let buckets: Vec<Value> = groups
            .into_iter()
            .map(|(key, members)| {
                let mut bucket = json!({ "key": key, "doc_count": members.len() });
                let nested = spec.get("aggs").map(|a| aggregate(a, &members));
                if let Some(Value::Object(nested)) = nested {
                    bucket.as_object_mut().unwrap().extend(nested);
                }
                bucket
            })
            .collect();

        out.insert(name.clone(), json!({ "buckets": buckets }));
    }
    Value::Object(out)
}

#[async_trait]
impl SearchGateway for InMemoryIndex {
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        self.searches.lock().push(request.body.clone());
        Ok(serde_json::from_value(self.evaluate(&request.body))?)
    }

    async fn multi_get(&self, request: &MultiGetRequest) -> anyhow::Result<Vec<DependencySlot>> {
        self.multi_gets.lock().push(request.ids.clone());
        let slots = request
            .ids
            .iter()
            .map(|id| match self.docs.iter().find(|(doc_id, _)| doc_id == id) {
                Some((_, source)) => json!({ "_id": id, "found": true, "_source": source }),
                None => json!({ "_id": id, "found": false }),
            })
            .collect::<Vec<_>>();
        Ok(serde_json::from_value(Value::Array(slots))?)
    }
}

/// A gateway whose every call fails like an unreachable cluster.
pub struct UnreachableIndex;

#[async_trait]
impl SearchGateway for UnreachableIndex {
    async fn search(&self, _request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        anyhow::bail!("Failed to reach search index at http://elasticsearch:9200")
    }

    async fn multi_get(&self, _request: &MultiGetRequest) -> anyhow::Result<Vec<DependencySlot>> {
        anyhow::bail!("Failed to reach search index at http://elasticsearch:9200")
    }
}
