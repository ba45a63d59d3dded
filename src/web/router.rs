//! Router configuration for the web API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    authorized, index, login, logout, upload, upload_form, upload_temporary, AppState,
};
use super::middleware::{auth_context, create_cors_layer, AuthState};

/// Create the main router: JSON API under `/api`, browser pages at the
/// root. The auth middleware only injects state; enforcement happens
/// in the `AuthUser` extractor on the handlers that need it.
pub fn create_router(
    app_state: Arc<AppState>,
    auth_state: Arc<AuthState>,
    cors_origins: &[String],
) -> Router {
    let api_routes = Router::new()
        .route("/upload", put(upload))
        .route("/upload_temporary", put(upload_temporary));

    let page_routes = Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/login/authorized", get(authorized))
        .route("/logout", get(logout))
        .route("/upload", post(upload_form));

    // Clone auth_state for the middleware closure
    let auth_state_for_middleware = auth_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = auth_state_for_middleware.clone();
                    auth_context(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// OpenAPI documentation for the upload API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::handlers::upload::upload,
        crate::web::handlers::upload::upload_temporary,
    ),
    components(schemas(
        crate::upload::RawUpload,
        crate::web::dto::UploadResponse,
        crate::web::dto::TemporaryUploadResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "uploads", description = "Authenticated file uploads")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi
            .components
            .get_or_insert(utoipa::openapi::Components::new());
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Create the Swagger UI router.
pub fn create_swagger_router() -> Router {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
