use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{Error, ModuleCode, ModuleDetail, ModuleSummary, Result};

/// Default NUSMods v2 API root for the current academic year
pub const DEFAULT_API_ROOT: &str = "https://api.nusmods.com/v2/2024-2025";

const UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Upstream source of module catalog data
///
/// `NusmodsSource` is the production implementation; tests inject counting
/// mocks through this seam.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full module list
    async fn fetch_module_list(&self) -> Result<Vec<ModuleSummary>>;

    /// Fetch one module's detail record. `code` is already normalized.
    async fn fetch_module_detail(&self, code: &ModuleCode) -> Result<ModuleDetail>;
}

/// NUSMods v2 REST API client
pub struct NusmodsSource {
    client: Client,
    api_root: String,
}

impl NusmodsSource {
    /// Create a client against the given API root (no trailing slash)
    pub fn new(api_root: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .user_agent("nus-timetable/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_root: api_root.into(),
        }
    }
}

impl Default for NusmodsSource {
    fn default() -> Self {
        Self::new(DEFAULT_API_ROOT)
    }
}

#[async_trait]
impl CatalogSource for NusmodsSource {
    async fn fetch_module_list(&self) -> Result<Vec<ModuleSummary>> {
        let url = format!("{}/moduleList.json", self.api_root);
        tracing::debug!("fetching module list from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "HTTP {} from module list endpoint",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("failed to parse module list: {}", e)))
    }

    async fn fetch_module_detail(&self, code: &ModuleCode) -> Result<ModuleDetail> {
        let url = format!("{}/modules/{}.json", self.api_root, code);
        tracing::debug!("fetching module detail from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| Error::ModuleNotFound(code.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::ModuleNotFound(code.to_string()));
        }

        response
            .json()
            .await
            .map_err(|_| Error::ModuleNotFound(code.to_string()))
    }
}

#[derive(Default)]
struct CatalogState {
    module_list: Option<Arc<Vec<ModuleSummary>>>,
    details: HashMap<String, Arc<ModuleDetail>>,
}

/// Process-lifetime cache over a [`CatalogSource`]
///
/// Entries are write-once: the first successful fetch populates a key and
/// it is never mutated or evicted afterwards. Failures cache nothing, so a
/// later call retries the upstream.
///
/// A single lock guards both the list blob and the detail map, and is held
/// across the upstream fetch; concurrent callers for the same module code
/// trigger exactly one upstream request and all observe the same entry.
pub struct ModuleCatalog {
    source: Arc<dyn CatalogSource>,
    state: Mutex<CatalogState>,
}

impl ModuleCatalog {
    /// Create an empty catalog over the given source
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CatalogState::default()),
        }
    }

    /// Get the full module list, fetching it on first use
    pub async fn get_module_list(&self) -> Result<Arc<Vec<ModuleSummary>>> {
        let mut state = self.state.lock().await;

        if let Some(list) = &state.module_list {
            return Ok(Arc::clone(list));
        }

        let list = Arc::new(self.source.fetch_module_list().await?);
        state.module_list = Some(Arc::clone(&list));
        tracing::info!("cached module list with {} entries", list.len());

        Ok(list)
    }

    /// Get one module's detail record, fetching it on first use
    ///
    /// The code is normalized before lookup, so `cs2103` and `CS2103` share
    /// one cache entry.
    pub async fn get_module_detail(&self, code: &str) -> Result<Arc<ModuleDetail>> {
        let code = ModuleCode::new(code);
        let mut state = self.state.lock().await;

        if let Some(detail) = state.details.get(code.as_str()) {
            return Ok(Arc::clone(detail));
        }

        let detail = Arc::new(self.source.fetch_module_detail(&code).await?);
        state.details.insert(code.into_string(), Arc::clone(&detail));

        Ok(detail)
    }
}

#[cfg(test)]
mod tests;
