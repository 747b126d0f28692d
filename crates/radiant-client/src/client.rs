//! Platform client: credentials, request plumbing and listing endpoints.

use crate::http::HttpTransport;
use crate::ports::{ApiRequest, ApiResponse, Method, Transport};
use radiant_core::config::{LayeredConfig, Scheme};
use radiant_core::error::{RadiantError, Result};
use radiant_core::metadata;
use radiant_core::models::{
    Analysis, Datasource, Export, Geometry, ItemField, MapToken, OwnershipType, Page, ProjectRecord, Scene,
    SceneQuery,
};
use radiant_core::pagination;
use radiant_geo::Coverage;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Blocking client for the platform's REST API
pub struct Client {
    transport: Arc<dyn Transport>,
    scheme: Scheme,
    host: String,
    base_url: String,
    tile_host: String,
    api_token: String,
    temp_dir: PathBuf,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("tile_host", &self.tile_host)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Connect using an HTTP transport configured from `config`
    pub fn new(config: &LayeredConfig) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs.value))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Connect over an arbitrary transport.
    ///
    /// Requires a non-empty `host`. Uses `api_token` when set, otherwise exchanges `refresh_token` for
    /// one. With neither configured this fails with `MissingCredentials`.
    pub fn with_transport(config: &LayeredConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        if config.host.value.trim().is_empty() {
            return Err(RadiantError::ConfigMissing { key: "host".to_string() });
        }

        let mut client = Self {
            transport,
            scheme: config.scheme.value,
            host: config.host.value.clone(),
            base_url: config.base_url(),
            tile_host: config.tile_host(),
            api_token: String::new(),
            temp_dir: config.temp_dir.value.clone(),
        };

        client.api_token = match (&config.api_token.value, &config.refresh_token.value) {
            (Some(token), _) => token.clone(),
            (None, Some(refresh)) => client.exchange_refresh_token(refresh)?,
            (None, None) => return Err(RadiantError::MissingCredentials),
        };

        Ok(client)
    }

    /// Trade a refresh token for an API token via `POST /tokens/`
    pub fn exchange_refresh_token(&self, refresh_token: &str) -> Result<String> {
        let request = ApiRequest::new(Method::Post, self.url("/tokens/"))
            .json(json!({ "refresh_token": refresh_token }));
        let response = self.execute(&request)?;

        let body: Value = serde_json::from_slice(&response.body).map_err(|e| RadiantError::RefreshToken {
            reason: format!("token response is not JSON ({})", e),
        })?;

        let token = body
            .get("id_token")
            .and_then(Value::as_str)
            .ok_or_else(|| RadiantError::RefreshToken {
                reason: "token response has no 'id_token'".to_string(),
            })?;

        tracing::info!(host = %self.host, "Exchanged refresh token for API token");
        Ok(token.to_string())
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn tile_host(&self) -> &str {
        &self.tile_host
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Absolute API URL for `path`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute tile-server URL for `path`
    pub fn tile_url(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme.as_str(), self.tile_host, path)
    }

    // -- request plumbing ---------------------------------------------------

    /// Send with credentials attached, without interpreting the status
    pub(crate) fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = if self.api_token.is_empty() { request } else { request.bearer(&self.api_token) };
        self.transport.send(&request)
    }

    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let response = self.transport.send(request)?;
        ensure_success(response, &request.url)
    }

    fn request_json(&self, request: ApiRequest) -> Result<Value> {
        let url = request.url.clone();
        let response = ensure_success(self.send(request)?, &url)?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub(crate) fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.request_json(ApiRequest::new(Method::Get, self.url(path)).query(query))
    }

    pub(crate) fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        self.request_json(ApiRequest::new(Method::Post, self.url(path)).json(body))
    }

    pub(crate) fn put_json(&self, path: &str, body: Value) -> Result<Value> {
        self.request_json(ApiRequest::new(Method::Put, self.url(path)).json(body))
    }

    /// Drive a paged-list endpoint to its last page
    pub(crate) fn collect<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        field: &ItemField,
    ) -> Result<Vec<T>> {
        pagination::collect_field(|page| self.get_json(path, &with_page(query, page)), field)
    }

    // -- listing endpoints --------------------------------------------------

    /// Map tokens the user has access to
    pub fn map_tokens(&self) -> Result<Vec<MapToken>> {
        self.collect("/map-tokens/", &[], &ItemField::Results)
    }

    /// Map tokens scoped to one project, first page only
    pub(crate) fn project_map_tokens(&self, project_id: &str) -> Result<Vec<MapToken>> {
        let query = [("project".to_string(), project_id.to_string())];
        let page: Page<MapToken> = Page::from_value(self.get_json("/map-tokens/", &query)?, &ItemField::Results)?;
        Ok(page.items)
    }

    /// Projects visible under `ownership`
    pub fn projects(&self, ownership: OwnershipType) -> Result<Vec<ProjectRecord>> {
        let query = [("ownershipType".to_string(), ownership.as_str().to_string())];
        self.collect("/projects/", &query, &ItemField::Results)
    }

    /// Projects visible under `ownership`, keyed by id
    pub fn projects_by_id(&self, ownership: OwnershipType) -> Result<BTreeMap<String, ProjectRecord>> {
        Ok(self.projects(ownership)?.into_iter().map(|p| (p.id.clone(), p)).collect())
    }

    pub fn project_record(&self, project_id: &str) -> Result<ProjectRecord> {
        decode(self.get_json(&format!("/projects/{}", project_id), &[])?)
    }

    /// Lab analyses (tool runs) the user has access to
    pub fn analyses(&self) -> Result<Vec<Analysis>> {
        self.collect("/tool-runs/", &[], &ItemField::Results)
    }

    /// Exports the user has access to
    pub fn exports(&self) -> Result<Vec<Export>> {
        self.collect("/exports/", &[], &ItemField::Results)
    }

    pub fn export(&self, export_id: &str) -> Result<Export> {
        decode(self.get_json(&format!("/exports/{}", export_id), &[])?)
    }

    /// Datasources keyed by name
    pub fn datasources(&self) -> Result<BTreeMap<String, Datasource>> {
        let datasources: Vec<Datasource> = self.collect("/datasources/", &[], &ItemField::Results)?;
        Ok(datasources.into_iter().map(|d| (d.name.clone(), d)).collect())
    }

    pub fn datasource(&self, datasource_id: &str) -> Result<Datasource> {
        decode(self.get_json(&format!("/datasources/{}", datasource_id), &[])?)
    }

    /// All scenes matching `query`, in server order
    pub fn scenes(&self, query: &SceneQuery) -> Result<Vec<Scene>> {
        let params = query.to_params()?;
        self.collect("/scenes/", &params, &ItemField::Results)
    }

    /// A single page of scenes matching `query`
    pub fn scenes_page(&self, query: &SceneQuery, page: u32) -> Result<Page<Scene>> {
        let params = query.to_params()?;
        Page::from_value(self.get_json("/scenes/", &with_page(&params, page))?, &ItemField::Results)
    }

    // -- scene helpers ------------------------------------------------------

    /// Cloud cover percentage for scenes from a known datasource
    pub fn cloud_cover(&self, scene: &Scene) -> Option<f64> {
        metadata::cloud_cover(scene)
    }

    /// Acquisition timestamp for scenes from a known datasource
    pub fn timestamp(&self, scene: &Scene) -> Result<Option<String>> {
        metadata::timestamp(scene)
    }

    /// Scene ids, in input order, whose footprints together cover `aoi`
    pub fn fill_aoi(&self, scenes: &[Scene], aoi: &Geometry, datasource_id: &str) -> Result<Coverage> {
        radiant_geo::fill_aoi(scenes, aoi, datasource_id)
    }
}

/// Map non-2xx statuses to `RadiantError::Http`
pub(crate) fn ensure_success(response: ApiResponse, url: &str) -> Result<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }

    Err(RadiantError::Http {
        status: response.status,
        url: url.to_string(),
        body: response.text(),
    })
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

fn with_page(query: &[(String, String)], page: u32) -> Vec<(String, String)> {
    let mut params = query.to_vec();
    params.push(("page".to_string(), page.to_string()));
    params
}
