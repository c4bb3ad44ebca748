//! HTTP routes for catalog endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_stage_scenarios, CatalogHandlers};

/// Creates the catalog router. Mounted under `/api/stages`.
pub fn catalog_routes(handlers: CatalogHandlers) -> Router {
    Router::new()
        .route("/:stage_number/scenarios", get(list_stage_scenarios))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryUserDirectory;
    use crate::application::handlers::catalog::ListStageScenariosHandler;
    use crate::config::ContentConfig;
    use crate::domain::catalog::ContentCatalog;
    use crate::domain::entitlement::EntitlementResolver;

    fn test_router() -> Router {
        let handler = ListStageScenariosHandler::new(
            Arc::new(ContentCatalog::seed()),
            Arc::new(InMemoryUserDirectory::new()),
            EntitlementResolver::new(ContentConfig::default().entitlement_policy()),
        );
        catalog_routes(CatalogHandlers::new(Arc::new(handler)))
    }

    async fn get_response(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn stage_listing_returns_visible_prefix_for_anonymous() {
        let response = get_response(test_router(), "/1/scenarios").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["stage_number"], 1);
        assert_eq!(body["scenarios"].as_array().unwrap().len(), 5);
        assert_eq!(body["locked"], 1);
    }

    #[tokio::test]
    async fn unknown_stage_returns_404() {
        let response = get_response(test_router(), "/42/scenarios").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
