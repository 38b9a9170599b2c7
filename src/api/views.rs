//! Minimal HTML pages for the lookup results.

use serde_json::Value;

use crate::models::{Bucket, DependencyKind, DependencySlot, ModuleHit, ModuleKey};

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/modules/\">Modules</a> | \
         <form action=\"/search-modules/\" method=\"get\" style=\"display:inline\">\
         <input name=\"search\"><button>Search</button></form></nav>\n\
         <h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn module_href(key: &ModuleKey) -> String {
    format!("/modules/{}/{}/{}/", key.name, key.version, key.release)
}

fn hit_item(hit: &ModuleHit) -> String {
    let key = ModuleKey::new(&hit.source.name, &hit.source.version, &hit.source.release);
    format!(
        "<li><a href=\"{}\">{}</a></li>",
        escape(&module_href(&key)),
        escape(&hit.source.nvr())
    )
}

fn hit_list(hits: &[ModuleHit], empty: &str) -> String {
    if hits.is_empty() {
        return format!("<p>{}</p>", escape(empty));
    }
    let items: Vec<String> = hits.iter().map(hit_item).collect();
    format!("<ul>\n{}\n</ul>", items.join("\n"))
}

fn bucket_list(buckets: &[Bucket], href: impl Fn(&Bucket) -> String) -> String {
    let items: Vec<String> = buckets
        .iter()
        .map(|b| {
            format!(
                "<li><a href=\"{}\">{}</a> ({})</li>",
                escape(&href(b)),
                escape(&b.key),
                b.doc_count
            )
        })
        .collect();
    format!("<ul>\n{}\n</ul>", items.join("\n"))
}

fn module_nav(key: &ModuleKey) -> String {
    let base = escape(&module_href(key));
    format!(
        "<p><a href=\"{base}\">Overview</a> | <a href=\"{base}packages/\">Packages</a> | \
         <a href=\"{base}dependencies/\">Dependencies</a> | \
         <a href=\"{base}dependencies/build/\">Build dependencies</a> | \
         <a href=\"{base}required_by/\">Required by</a> | \
         <a href=\"{base}required_by/build/\">Required by (build)</a> | \
         <a href=\"{base}artifacts/\">Artifacts</a></p>"
    )
}

/// Render an opaque payload field: arrays as lists, anything else as text.
fn payload(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "<p>None.</p>".to_string(),
        Some(Value::Array(items)) if items.is_empty() => "<p>None.</p>".to_string(),
        Some(Value::Array(items)) => {
            let items: Vec<String> = items
                .iter()
                .map(|v| format!("<li>{}</li>", escape(&value_text(v))))
                .collect();
            format!("<ul>\n{}\n</ul>", items.join("\n"))
        }
        Some(other) => format!("<pre>{}</pre>", escape(&value_text(other))),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn index() -> String {
    page(
        "Module browser",
        "<p>Browse <a href=\"/modules/\">all modules</a>, or search above.</p>",
    )
}

pub fn module_list(modules: &[Bucket]) -> String {
    let body = bucket_list(modules, |b| format!("/modules/{}/", b.key));
    page("Modules", &body)
}

pub fn module_versions(name: &str, versions: &[Bucket]) -> String {
    let body = bucket_list(versions, |b| format!("/modules/{name}/{}/", b.key));
    page(name, &body)
}

pub fn module_releases(name: &str, version: &str, releases: &[ModuleHit]) -> String {
    page(&format!("{name} {version}"), &hit_list(releases, "No releases."))
}

pub fn module_overview(key: &ModuleKey, module: &ModuleHit) -> String {
    let mut rows = vec![
        ("Name", module.source.name.clone()),
        ("Version", module.source.version.clone()),
        ("Release", module.source.release.clone()),
        ("Document", module.id.clone()),
    ];
    for field in ["summary", "description", "license"] {
        if let Some(value) = module.source.extra.get(field) {
            rows.push((field, value_text(value)));
        }
    }
    let rows: Vec<String> = rows
        .iter()
        .map(|(label, value)| {
            format!("<tr><th>{}</th><td>{}</td></tr>", escape(label), escape(value))
        })
        .collect();
    let body = format!("{}\n<table>\n{}\n</table>", module_nav(key), rows.join("\n"));
    page(&key.to_string(), &body)
}

pub fn module_packages(key: &ModuleKey, module: &ModuleHit) -> String {
    let body = format!(
        "{}\n<h2>Packages</h2>\n{}",
        module_nav(key),
        payload(module.source.extra.get("packages"))
    );
    page(&key.to_string(), &body)
}

pub fn module_artifacts(key: &ModuleKey, module: &ModuleHit) -> String {
    let body = format!(
        "{}\n<h2>Artifacts</h2>\n{}",
        module_nav(key),
        payload(module.source.extra.get("artifacts"))
    );
    page(&key.to_string(), &body)
}

pub fn module_dependencies(
    key: &ModuleKey,
    kind: DependencyKind,
    slots: &[DependencySlot],
) -> String {
    let list = if slots.is_empty() {
        "<p>No dependencies.</p>".to_string()
    } else {
        let items: Vec<String> = slots
            .iter()
            .map(|slot| match (&slot.source, slot.found) {
                (Some(module), true) => hit_item(&ModuleHit {
                    id: slot.id.clone(),
                    source: module.clone(),
                }),
                _ => format!("<li>{} (missing)</li>", escape(&slot.id)),
            })
            .collect();
        format!("<ul>\n{}\n</ul>", items.join("\n"))
    };
    let body = format!("{}\n<h2>Dependencies ({})</h2>\n{list}", module_nav(key), kind.label());
    page(&key.to_string(), &body)
}

pub fn module_required_by(key: &ModuleKey, kind: DependencyKind, hits: &[ModuleHit]) -> String {
    let body = format!(
        "{}\n<h2>Required by ({})</h2>\n{}",
        module_nav(key),
        kind.label(),
        hit_list(hits, "Not required by any module.")
    );
    page(&key.to_string(), &body)
}

pub fn search_results(term: &str, hits: &[ModuleHit]) -> String {
    page(&format!("Search: {term}"), &hit_list(hits, "No modules found."))
}

pub fn not_found(message: &str) -> String {
    page("Not found", &format!("<p>{}</p>", escape(message)))
}

pub fn server_error() -> String {
    page("Error", "<p>The module index could not be queried.</p>")
}
