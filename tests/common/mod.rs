#![allow(dead_code)]

use std::io::Write;
use std::time::Duration;

use stocksim::domain::simulation::SimulationConfig;
use stocksim::domain::universe::Listing;

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Default universe with a one second timer.
pub fn fast_config() -> SimulationConfig {
    SimulationConfig {
        interval: Duration::from_secs(1),
        ..SimulationConfig::default()
    }
}

pub fn two_stock_config() -> SimulationConfig {
    SimulationConfig {
        listings: vec![Listing::new("AAPL", 150.0), Listing::new("GOOGL", 2800.0)],
        ..fast_config()
    }
}

#[cfg(feature = "web")]
pub mod web {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use stocksim::adapters::web::{AppState, build_router};
    use stocksim::domain::simulation::{Simulation, SimulationConfig};

    pub fn test_app(config: &SimulationConfig) -> (Router, Arc<AppState>) {
        let state = AppState::new(Simulation::new(config));
        (build_router(Arc::clone(&state)), state)
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_str(&body).unwrap())
    }
}
