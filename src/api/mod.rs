pub mod modules;
pub mod views;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Module page paths below `/modules/{name}/{version}/{release}/`.
const MODULE_PAGES: [&str; 6] = [
    "packages",
    "dependencies",
    "dependencies/build",
    "required_by",
    "required_by/build",
    "artifacts",
];

/// All GET routes of the browser.
///
/// Pages live at trailing-slash paths; the same path without the slash
/// answers with a permanent redirect.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(modules::index))
        .route("/modules/", get(modules::module_list))
        .route("/modules/{name}/", get(modules::module_versions))
        .route("/modules/{name}/{version}/", get(modules::module_releases))
        .route(
            "/modules/{name}/{version}/{release}/",
            get(modules::module_overview),
        )
        .route(
            "/modules/{name}/{version}/{release}/packages/",
            get(modules::module_packages),
        )
        .route(
            "/modules/{name}/{version}/{release}/dependencies/",
            get(modules::runtime_dependencies),
        )
        .route(
            "/modules/{name}/{version}/{release}/dependencies/build/",
            get(modules::build_dependencies),
        )
        .route(
            "/modules/{name}/{version}/{release}/required_by/",
            get(modules::runtime_required_by),
        )
        .route(
            "/modules/{name}/{version}/{release}/required_by/build/",
            get(modules::build_required_by),
        )
        .route(
            "/modules/{name}/{version}/{release}/artifacts/",
            get(modules::module_artifacts),
        )
        .route("/search-modules/", get(modules::search_modules));

    let mut slashless = vec![
        "/modules".to_string(),
        "/modules/{name}".to_string(),
        "/modules/{name}/{version}".to_string(),
        "/modules/{name}/{version}/{release}".to_string(),
        "/search-modules".to_string(),
    ];
    slashless.extend(
        MODULE_PAGES
            .iter()
            .map(|page| format!("/modules/{{name}}/{{version}}/{{release}}/{page}")),
    );
    for path in &slashless {
        router = router.route(path, get(modules::add_trailing_slash));
    }

    router.with_state(state)
}
