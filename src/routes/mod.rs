pub mod health;
pub mod measures;
pub mod overview;
pub mod sensors;
pub mod token;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::entity;
use crate::services::{daily, latest};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        overview::overview,
        sensors::sensor_list,
        measures::sensor_min_max,
        measures::measure_filter,
        token::issue_token,
    ),
    components(
        schemas(
            entity::units::Model,
            entity::sensors::Model,
            entity::metrics::Model,
            entity::measures::Model,
            overview::OverviewResponse,
            latest::SensorWithLatest,
            latest::LatestMeasure,
            daily::SensorDailyMinMax,
            daily::MetricMinMax,
            token::TokenRequest,
            token::TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "overview", description = "Row samples across all tables"),
        (name = "sensors", description = "Sensors with their latest measure"),
        (name = "measures", description = "Measure filtering and daily aggregates"),
        (name = "auth", description = "Bearer token issuance"),
    ),
    info(
        title = "Enviro DB API",
        description = "Read-oriented HTTP API for environmental sensor readings",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(overview::overview))
        .route("/sensorList", get(sensors::sensor_list))
        .route("/sensorMinMax", get(measures::sensor_min_max))
        .route("/measureFilter", get(measures::measure_filter))
        .route("/token", post(token::issue_token))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check route (no auth, no layers beyond the outer stack)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
