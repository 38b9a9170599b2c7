use std::sync::Arc;

use thiserror::Error;

use crate::models::{Bucket, DependencyKind, DependencySlot, ModuleHit, ModuleKey};
use crate::sanitize::sanitize;
use crate::search::gateway::SearchGateway;
use crate::search::query::{self, AGG_MODULES, AGG_VERSIONS};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{what} not found")]
    NotFound { what: String },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Composite lookups over the module index.
///
/// Every index call is awaited before the next one is built, and every
/// user-supplied string passes through [`sanitize`] before it reaches the
/// query builder.
#[derive(Clone)]
pub struct LookupResolver {
    gateway: Arc<dyn SearchGateway>,
}

impl LookupResolver {
    pub fn new(gateway: Arc<dyn SearchGateway>) -> Self {
        Self { gateway }
    }

    /// All module names with their document counts.
    pub async fn resolve_module_list(&self) -> LookupResult<Vec<Bucket>> {
        let resp = self.gateway.search(&query::module_name_aggregation()).await?;
        Ok(resp.buckets(AGG_MODULES)?)
    }

    /// Versions of one module name.
    pub async fn resolve_version_list(&self, name: &str) -> LookupResult<Vec<Bucket>> {
        let name = sanitize(name);
        let resp = self.gateway.search(&query::version_aggregation(&name)).await?;
        resp.first_nested_buckets(AGG_MODULES, AGG_VERSIONS)?
            .ok_or_else(|| LookupError::NotFound {
                what: format!("Module '{name}'"),
            })
    }

    /// Every release of `name` at `version`. Empty when there is none.
    pub async fn resolve_release_list(
        &self,
        name: &str,
        version: &str,
    ) -> LookupResult<Vec<ModuleHit>> {
        let (name, version) = (sanitize(name), sanitize(version));
        let resp = self
            .gateway
            .search(&query::exact_match(&name, Some(&version), None))
            .await?;
        Ok(resp.hits.hits)
    }

    /// The document for a full (name, version, release) key.
    ///
    /// When several documents share the key, the first one wins.
    pub async fn resolve_module(&self, key: &ModuleKey) -> LookupResult<ModuleHit> {
        let key = ModuleKey::new(&key.name, &key.version, &key.release);
        let req = query::exact_match(&key.name, Some(&key.version), Some(&key.release));
        let resp = self.gateway.search(&req).await?;

        let mut hits = resp.hits.hits.into_iter();
        let first = hits.next().ok_or_else(|| LookupError::NotFound {
            what: format!("Module '{key}'"),
        })?;

        let extra = hits.count();
        if extra > 0 {
            tracing::warn!(
                "{} documents match module '{key}', using {}",
                extra + 1,
                first.id
            );
        }

        Ok(first)
    }

    /// Dependencies of a module, one slot per stored id.
    ///
    /// A module without dependencies of `kind` yields an empty list and no
    /// multi-get is issued.
    pub async fn resolve_dependencies(
        &self,
        key: &ModuleKey,
        kind: DependencyKind,
    ) -> LookupResult<Vec<DependencySlot>> {
        let module = self.resolve_module(key).await?;

        let ids = module.source.dependency_ids(kind);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("Fetching {} {} dependencies of {}", ids.len(), kind.label(), module.id);
        Ok(self.gateway.multi_get(&query::id_batch_get(ids)).await?)
    }

    /// Modules that list this module among their dependencies of `kind`.
    pub async fn resolve_required_by(
        &self,
        key: &ModuleKey,
        kind: DependencyKind,
    ) -> LookupResult<Vec<ModuleHit>> {
        let module = self.resolve_module(key).await?;
        let req = query::reverse_dependency_filter(kind, &module.id);
        let resp = self.gateway.search(&req).await?;
        Ok(resp.hits.hits)
    }

    /// Free-text search across all document fields.
    pub async fn search_modules(&self, term: &str) -> LookupResult<Vec<ModuleHit>> {
        let term = sanitize(term);
        let resp = self.gateway.search(&query::free_text(&term)).await?;
        Ok(resp.hits.hits)
    }
}
