//! Empathy Coach server entrypoint.
//!
//! Wires configuration, adapters, and handlers together and serves the
//! REST API.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use empathy_coach::adapters::ai::{AnthropicConfig, AnthropicProvider};
use empathy_coach::adapters::http::{api_router, CatalogHandlers, TrainingHandlers};
use empathy_coach::adapters::memory::{
    InMemoryEvaluationLog, InMemorySessionStore, InMemoryUserDirectory,
};
use empathy_coach::application::handlers::catalog::ListStageScenariosHandler;
use empathy_coach::application::handlers::evaluation::EvaluateResponseHandler;
use empathy_coach::application::handlers::training::{
    EndScenarioHandler, GetSessionHandler, RespondHandler, StartScenarioHandler,
};
use empathy_coach::config::AppConfig;
use empathy_coach::domain::catalog::ContentCatalog;
use empathy_coach::domain::entitlement::EntitlementResolver;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.server.log_level)?)
        .init();

    let catalog = Arc::new(ContentCatalog::seed());
    let sessions = Arc::new(InMemorySessionStore::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let evaluation_log = Arc::new(InMemoryEvaluationLog::new());

    let api_key = config.ai.anthropic_api_key.clone().unwrap_or_default();
    let ai_provider = Arc::new(AnthropicProvider::new(
        AnthropicConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_timeout(config.ai.timeout())
            .with_defaults(config.ai.max_tokens, config.ai.temperature),
    ));

    let catalog_handlers = CatalogHandlers::new(Arc::new(ListStageScenariosHandler::new(
        Arc::clone(&catalog),
        users,
        EntitlementResolver::new(config.content.entitlement_policy()),
    )));

    let training_handlers = TrainingHandlers::new(
        Arc::new(StartScenarioHandler::new(
            Arc::clone(&catalog),
            sessions.clone(),
            ai_provider.clone(),
            config.content.persona_prompt_template(),
            config.content.fallback_line.clone(),
        )),
        Arc::new(RespondHandler::new(
            sessions.clone(),
            ai_provider.clone(),
            config.content.fallback_line.clone(),
        )),
        Arc::new(EndScenarioHandler::new(
            Arc::clone(&catalog),
            sessions.clone(),
        )),
        Arc::new(GetSessionHandler::new(sessions)),
        Arc::new(EvaluateResponseHandler::new(
            catalog,
            ai_provider,
            evaluation_log,
        )),
    );

    let cors = match config.server.cors_origins_list().as_slice() {
        [] => CorsLayer::permissive(),
        origins => {
            let origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router(catalog_handlers, training_handlers)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    info!(%addr, model = %config.ai.model, "starting empathy coach server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
