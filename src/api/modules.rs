use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, Redirect};

use crate::api::views;
use crate::models::{DependencyKind, ModuleKey, SearchParams};
use crate::resolver::LookupError;
use crate::sanitize::sanitize;
use crate::state::AppState;

pub type PageResult = Result<Html<String>, (StatusCode, Html<String>)>;

/// NotFound renders as 404; anything else is logged and rendered as 500.
fn lookup_failure(err: LookupError) -> (StatusCode, Html<String>) {
    match err {
        LookupError::NotFound { .. } => {
            tracing::info!("{err}");
            (StatusCode::NOT_FOUND, Html(views::not_found(&err.to_string())))
        }
        LookupError::Backend(e) => {
            tracing::error!("Index lookup failed: {e:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(views::server_error()))
        }
    }
}

/// GET /
pub async fn index() -> Html<String> {
    Html(views::index())
}

/// GET /modules/
pub async fn module_list(State(state): State<AppState>) -> PageResult {
    let modules = state
        .resolver
        .resolve_module_list()
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::module_list(&modules)))
}

/// GET /modules/{name}/
pub async fn module_versions(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> PageResult {
    let name = sanitize(&name);
    let versions = state
        .resolver
        .resolve_version_list(&name)
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::module_versions(&name, &versions)))
}

/// GET /modules/{name}/{version}/
pub async fn module_releases(
    State(state): State<AppState>,
    Path((name, version)): Path<(String, String)>,
) -> PageResult {
    let (name, version) = (sanitize(&name), sanitize(&version));
    let releases = state
        .resolver
        .resolve_release_list(&name, &version)
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::module_releases(&name, &version, &releases)))
}

/// GET /modules/{name}/{version}/{release}/
pub async fn module_overview(
    State(state): State<AppState>,
    Path(key): Path<ModuleKey>,
) -> PageResult {
    let module = state
        .resolver
        .resolve_module(&key)
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::module_overview(&key, &module)))
}

/// GET /modules/{name}/{version}/{release}/packages/
pub async fn module_packages(
    State(state): State<AppState>,
    Path(key): Path<ModuleKey>,
) -> PageResult {
    let module = state
        .resolver
        .resolve_module(&key)
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::module_packages(&key, &module)))
}

/// GET /modules/{name}/{version}/{release}/artifacts/
pub async fn module_artifacts(
    State(state): State<AppState>,
    Path(key): Path<ModuleKey>,
) -> PageResult {
    let module = state
        .resolver
        .resolve_module(&key)
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::module_artifacts(&key, &module)))
}

async fn dependencies(state: AppState, key: ModuleKey, kind: DependencyKind) -> PageResult {
    let slots = state
        .resolver
        .resolve_dependencies(&key, kind)
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::module_dependencies(&key, kind, &slots)))
}

/// GET /modules/{name}/{version}/{release}/dependencies/
pub async fn runtime_dependencies(
    State(state): State<AppState>,
    Path(key): Path<ModuleKey>,
) -> PageResult {
    dependencies(state, key, DependencyKind::Runtime).await
}

/// GET /modules/{name}/{version}/{release}/dependencies/build/
pub async fn build_dependencies(
    State(state): State<AppState>,
    Path(key): Path<ModuleKey>,
) -> PageResult {
    dependencies(state, key, DependencyKind::Build).await
}

async fn required_by(state: AppState, key: ModuleKey, kind: DependencyKind) -> PageResult {
    let hits = state
        .resolver
        .resolve_required_by(&key, kind)
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::module_required_by(&key, kind, &hits)))
}

/// GET /modules/{name}/{version}/{release}/required_by/
pub async fn runtime_required_by(
    State(state): State<AppState>,
    Path(key): Path<ModuleKey>,
) -> PageResult {
    required_by(state, key, DependencyKind::Runtime).await
}

/// GET /modules/{name}/{version}/{release}/required_by/build/
pub async fn build_required_by(
    State(state): State<AppState>,
    Path(key): Path<ModuleKey>,
) -> PageResult {
    required_by(state, key, DependencyKind::Build).await
}

/// GET /search-modules/?search={term}
pub async fn search_modules(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> PageResult {
    let term = sanitize(&params.search);
    let hits = state
        .resolver
        .search_modules(&term)
        .await
        .map_err(lookup_failure)?;
    Ok(Html(views::search_results(&term, &hits)))
}

/// Permanent redirect of a slash-less path to its trailing-slash form,
/// keeping the query string.
pub async fn add_trailing_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{query}", uri.path()),
        None => format!("{}/", uri.path()),
    };
    Redirect::permanent(&target)
}
