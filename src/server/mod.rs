//! HTTP server
//!
//! Routes every path onto a [`ZammadService`] call and a formatter. All
//! application routes live under `/api/v1`; `/` and `/health` sit outside it.

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use log::{info, warn};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Settings;
use crate::error::Result;
use crate::service::ZammadService;

pub mod error;
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{HttpError, PromError};

use handlers::{directory, grafana, grafana_native, prometheus, statistics, system, tickets};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: ZammadService,
}

impl AppState {
    pub fn new(service: ZammadService) -> Self {
        Self { service }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/tickets", get(tickets::list_tickets))
        .route("/tickets/{ticket_id}", get(tickets::get_ticket))
        .route("/organizations", get(directory::list_organizations))
        .route("/users", get(directory::list_users))
        .route("/statistics/tickets", get(statistics::ticket_statistics))
        .route("/statistics/top-customers", get(statistics::top_customers))
        .route("/grafana/tickets/timeseries", get(grafana::tickets_timeseries))
        .route("/grafana/tickets/by-state", get(grafana::tickets_by_state))
        .route("/grafana/tickets/by-priority", get(grafana::tickets_by_priority))
        .route("/grafana/query", get(grafana::query))
        .route("/grafana/search", get(grafana::search))
        .route("/grafana/annotations", get(grafana::annotations))
        .route("/grafana-native", get(grafana_native::info))
        .route("/grafana-native/", get(grafana_native::info))
        .route("/grafana-native/query", post(grafana_native::query))
        .route("/grafana-native/search", get(grafana::search))
        .route("/prometheus", get(prometheus::info))
        .route("/prometheus/", get(prometheus::info))
        .route("/prometheus/metrics", get(prometheus::metrics))
        .route(
            "/prometheus/api/v1/query",
            get(prometheus::instant_query).post(prometheus::instant_query),
        )
        .route(
            "/prometheus/api/v1/query_range",
            get(prometheus::range_query).post(prometheus::range_query),
        )
        .route(
            "/prometheus/api/v1/labels",
            get(prometheus::label_names).post(prometheus::label_names),
        )
        .route(
            "/prometheus/api/v1/label/{label_name}/values",
            get(prometheus::label_values),
        );

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .nest("/api/v1", api)
        .layer(middleware::from_fn(log_requests))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// CORS with credentials for the configured origins. `*` mirrors any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} {} {}ms",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

/// Bind and serve until Ctrl-C.
pub async fn serve(settings: &Settings, service: ZammadService) -> Result<()> {
    let app = build_router(AppState::new(service), &settings.cors_origins);
    let addr = settings.bind_address();

    let listener = TcpListener::bind(&addr).await?;
    info!("zammad-bridge listening on http://{}", addr);
    info!("Upstream Zammad API: {}", settings.api_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
