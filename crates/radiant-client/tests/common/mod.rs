#![allow(dead_code)]

use radiant_client::{ApiRequest, ApiResponse, Client, Method, Transport};
use radiant_core::config::{ConfigSource, LayeredConfig};
use radiant_core::error::Result;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const BASE: &str = "https://api.test.local";
pub const TILES: &str = "https://tiles.test.local";

struct Route {
    method: Method,
    url: String,
    page: Option<u32>,
    response: ApiResponse,
}

/// In-memory transport that replays canned responses and records requests
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.push(method, path, None, ApiResponse::new(status, body));
    }

    pub fn json(&self, method: Method, path: &str, body: Value) {
        self.respond(method, path, 200, body.to_string());
    }

    /// Serve `items` as page `page` of a `results` listing
    pub fn page(&self, path: &str, page: u32, has_next: bool, items: Value) {
        let body = json!({"page": page, "hasNext": has_next, "results": items});
        self.push(Method::Get, path, Some(page), ApiResponse::new(200, body.to_string()));
    }

    /// Serve `features` as page `page` of a GeoJSON listing
    pub fn feature_page(&self, path: &str, page: u32, has_next: bool, features: Value) {
        let body = json!({"page": page, "hasNext": has_next, "features": features});
        self.push(Method::Get, path, Some(page), ApiResponse::new(200, body.to_string()));
    }

    fn push(&self, method: Method, path: &str, page: Option<u32>, response: ApiResponse) {
        let url = if path.starts_with("http") { path.to_string() } else { format!("{}{}", BASE, path) };
        self.routes.lock().unwrap().push(Route { method, url, page, response });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        let url = format!("{}{}", BASE, path);
        self.requests().into_iter().filter(|r| r.method == method && r.url == url).collect()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let page = request.param("page").and_then(|p| p.parse::<u32>().ok());
        let routes = self.routes.lock().unwrap();
        let route = routes.iter().find(|route| {
            route.method == request.method
                && route.url == request.url
                && (route.page.is_none() || route.page == page)
        });

        Ok(match route {
            Some(route) => route.response.clone(),
            None => ApiResponse::new(404, format!("no route for {} {}", request.method.as_str(), request.url)),
        })
    }
}

pub fn config() -> LayeredConfig {
    let mut config = LayeredConfig::with_defaults();
    config.host.update("api.test.local".to_string(), ConfigSource::Cli);
    config.api_token.update(Some("test-token".to_string()), ConfigSource::Cli);
    config
}

pub fn client(fake: &Arc<FakeTransport>) -> Client {
    client_with(config(), fake)
}

pub fn client_in(temp_dir: &Path, fake: &Arc<FakeTransport>) -> Client {
    let mut config = config();
    config.temp_dir.update(temp_dir.to_path_buf(), ConfigSource::Cli);
    client_with(config, fake)
}

pub fn client_with(config: LayeredConfig, fake: &Arc<FakeTransport>) -> Client {
    let transport: Arc<dyn Transport> = fake.clone();
    Client::with_transport(&config, transport).unwrap()
}

pub fn square(x: f64, y: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]]
    })
}

pub fn scene(id: &str, order: Option<i64>, uris: &[&str]) -> Value {
    json!({
        "id": id,
        "name": format!("scene {}", id),
        "datasource": {"id": "4a50cb75-815d-4fe5-8bc1-144729ce5b42", "name": "Sentinel-2"},
        "dataFootprint": square(0.0, 0.0),
        "sceneOrder": order,
        "statusFields": {"ingestStatus": "INGESTED"},
        "images": uris.iter().map(|uri| json!({"sourceUri": uri})).collect::<Vec<_>>()
    })
}

pub fn project(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("project {}", id),
        "extent": {
            "type": "Polygon",
            "coordinates": [[[10.0, 20.0], [12.0, 20.0], [12.0, 24.0], [10.0, 24.0], [10.0, 20.0]]]
        }
    })
}
