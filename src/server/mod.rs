//! HTTP API for product search.
//!
//! One query endpoint returning the normalized result list; per-retailer
//! failures only ever reduce the result count, so the caller sees either
//! a 200 with whatever was gathered or a 4xx for bad input.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::acquire::build_fetcher;
use crate::config::Settings;
use crate::retailers::RetailerRegistry;
use crate::search::SearchService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let fetcher = build_fetcher(settings)?;
        let service = SearchService::new(RetailerRegistry::with_known_retailers(), fetcher)
            .with_retailer_budget(settings.request_timeout);
        Ok(Self {
            service: Arc::new(service),
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::acquire::PageFetcher;
    use crate::error::AcquireError;

    struct CannedFetcher(String);

    #[async_trait]
    impl PageFetcher for CannedFetcher {
        async fn fetch_page(&self, _url: &str, _wait: &str) -> Result<String, AcquireError> {
            Ok(self.0.clone())
        }
    }

    fn test_app(page: &str) -> axum::Router {
        let service = SearchService::new(
            RetailerRegistry::with_known_retailers(),
            Arc::new(CannedFetcher(page.to_string())),
        );
        create_router(AppState {
            service: Arc::new(service),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = test_app("<html></html>");
        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let app = test_app("<html></html>");
        let response = app
            .oneshot(
                Request::get("/api/search?sources=Walmart")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn test_missing_sources_is_bad_request() {
        let app = test_app("<html></html>");
        let response = app
            .oneshot(
                Request::get("/api/search?query=kettle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_returns_normalized_records() {
        let page = r#"<html><body>
            <div data-item-id="42">
                <a href="/ip/kettle/42">
                    <span data-automation-id="product-title">Electric Kettle</span>
                </a>
                <div data-automation-id="product-price"><span class="f2">$29.99</span></div>
            </div>
        </body></html>"#;
        let app = test_app(page);
        let response = app
            .oneshot(
                Request::get("/api/search?query=kettle&sources=Walmart")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json[0]["id"], "42");
        assert_eq!(json[0]["name"], "Electric Kettle");
        assert_eq!(json[0]["price"], 29.99);
        assert_eq!(json[0]["source"], "Walmart");
        assert_eq!(json[0]["productUrl"], "https://www.walmart.com/ip/kettle/42");
    }

    #[tokio::test]
    async fn test_failed_retailers_still_return_ok() {
        // Page matches no retailer's cards, so every source structurally
        // mismatches; the response is still a 200 with an empty list.
        let app = test_app("<html><body>nothing here</body></html>");
        let response = app
            .oneshot(
                Request::get("/api/search?query=kettle&sources=Walmart,Amazon")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!([]));
    }
}
