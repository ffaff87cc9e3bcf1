//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthService, CatalogService, ReviewService};
use crate::infrastructure::blob::BlobStore;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    ProductRepository, ReviewRepository, UserRepository,
};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::auth::AuthHandlerState;
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::metrics::MetricsState;
use crate::interfaces::http::modules::products::ProductHandlerState;
use crate::interfaces::http::modules::reviews::ReviewHandlerState;
use crate::interfaces::http::modules::{auth, health, metrics, products, reviews};

/// Unified state for the whole API. Each handler keeps its own
/// `State<T>` extractor via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub auth: AuthHandlerState,
    pub products: ProductHandlerState,
    pub reviews: ReviewHandlerState,
    pub health: HealthState,
    pub metrics: MetricsState,
}

impl FromRef<ApiState> for AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<ApiState> for ProductHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.products.clone()
    }
}

impl FromRef<ApiState> for ReviewHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.reviews.clone()
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        s.metrics.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::signup,
        auth::handlers::login,
        auth::handlers::me,
        // Products
        products::handlers::list_products,
        products::handlers::get_product,
        products::handlers::create_product,
        // Reviews
        reviews::handlers::create_review,
        reviews::handlers::update_review,
        reviews::handlers::delete_review,
    ),
    components(
        schemas(
            // Common
            crate::interfaces::http::common::ApiResponse<String>,
            // Auth
            auth::dto::SignupRequest,
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::UserDto,
            // Products
            products::dto::ProductDto,
            products::dto::ProductWithRatingDto,
            products::dto::ProductDetailDto,
            products::dto::CreateProductForm,
            // Reviews
            reviews::dto::ReviewDto,
            reviews::dto::CreateReviewRequest,
            reviews::dto::UpdateReviewRequest,
            reviews::dto::MessageResponse,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Signup, login (JWT) and current-user lookup"),
        (name = "Products", description = "Product catalog: listing, publishing, detail with reviews"),
        (name = "Reviews", description = "One rating/comment per product per user; author-gated edits"),
    ),
    info(
        title = "Product Rating Service API",
        version = "1.0.0",
        description = "REST API for publishing products and rating them",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
#[allow(clippy::too_many_arguments)]
pub fn create_api_router(
    auth_service: Arc<AuthService<UserRepository>>,
    catalog_service: Arc<CatalogService<ProductRepository, ReviewRepository>>,
    review_service: Arc<ReviewService<ReviewRepository, ProductRepository>>,
    blob_store: Arc<dyn BlobStore>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let auth_state = AuthState { jwt_config };

    let state = ApiState {
        auth: AuthHandlerState { auth_service },
        products: ProductHandlerState {
            catalog_service,
            blob_store,
        },
        reviews: ReviewHandlerState { review_service },
        health: HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        },
        metrics: MetricsState {
            handle: prometheus_handle,
        },
    };

    // Public surface: signup/login and the read-only catalog
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::handlers::signup))
        .route("/auth/login", post(auth::handlers::login))
        .route("/products", get(products::handlers::list_products))
        .route("/products/{product_id}", get(products::handlers::get_product))
        .route("/health", get(health::handlers::health_check))
        .route("/metrics", get(metrics::handlers::prometheus_metrics));

    // Every mutating route sits behind the auth middleware; handler
    // identity comes from the verified token.
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::handlers::me))
        .route("/products", post(products::handlers::create_product))
        .route(
            "/products/{product_id}/reviews",
            post(reviews::handlers::create_review),
        )
        .route(
            "/products/{product_id}/reviews/{review_id}",
            put(reviews::handlers::update_review).delete(reviews::handlers::delete_review),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public_routes
        .merge(protected_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
