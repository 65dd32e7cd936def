//! API Router with Swagger UI

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{BookingService, LayoutService, PlotService};
use crate::auth::{admin_middleware, auth_middleware, AuthState, JwtConfig};
use crate::domain::RepositoryProvider;

use super::common::{ApiResponse, EmptyData};
use super::modules::{auth, bookings, health, layouts, map, plots};

/// Unified state for all routes. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub layout_service: Arc<LayoutService>,
    pub plot_service: Arc<PlotService>,
    pub booking_service: Arc<BookingService>,
    pub auth: AuthState,
    pub started_at: Arc<Instant>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for layouts::LayoutsState {
    fn from_ref(s: &AppState) -> Self {
        layouts::LayoutsState {
            service: Arc::clone(&s.layout_service),
        }
    }
}

impl FromRef<AppState> for plots::PlotsState {
    fn from_ref(s: &AppState) -> Self {
        plots::PlotsState {
            service: Arc::clone(&s.plot_service),
        }
    }
}

impl FromRef<AppState> for bookings::BookingsState {
    fn from_ref(s: &AppState) -> Self {
        bookings::BookingsState {
            service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<AppState> for map::MapState {
    fn from_ref(s: &AppState) -> Self {
        map::MapState {
            layouts: Arc::clone(&s.layout_service),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            repos: Arc::clone(&s.repos),
            jwt_config: s.auth.jwt_config.clone(),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            repos: Arc::clone(&s.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
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
        auth::handlers::login,
        auth::handlers::me,
        // Layouts
        layouts::handlers::list_layouts,
        layouts::handlers::get_layout,
        layouts::handlers::create_layout,
        layouts::handlers::update_layout,
        layouts::handlers::deactivate_layout,
        // Plots
        plots::handlers::search_plots,
        plots::handlers::get_plot,
        plots::handlers::create_plot,
        plots::handlers::create_plots_batch,
        plots::handlers::update_plot,
        plots::handlers::update_plot_status,
        plots::handlers::delete_plot,
        // Bookings
        bookings::handlers::create_booking,
        bookings::handlers::list_bookings,
        bookings::handlers::get_booking,
        bookings::handlers::update_booking,
        bookings::handlers::cancel_booking,
        // Map
        map::handlers::render_svg,
        map::handlers::render_html,
        map::handlers::map_data,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::UserInfo,
            // Layouts
            layouts::dto::LayoutResponse,
            layouts::dto::LayoutListItem,
            layouts::dto::LayoutDetailResponse,
            // Plots
            plots::dto::PlotResponse,
            plots::dto::PlotDetailResponse,
            plots::dto::CreatePlotRequest,
            plots::dto::BatchCreatePlotsRequest,
            plots::dto::UpdatePlotRequest,
            plots::dto::UpdatePlotStatusRequest,
            crate::domain::plot::PlotStatus,
            crate::domain::plot::PlotStatusCounts,
            crate::domain::geometry::Point,
            crate::domain::geometry::Rect,
            // Bookings
            bookings::dto::BookingResponse,
            bookings::dto::CreateBookingRequest,
            bookings::dto::UpdateBookingRequest,
            crate::domain::booking::BookingStatus,
            crate::domain::booking::PaymentStatus,
            // Map
            crate::rendering::map_data::MapData,
            crate::rendering::map_data::MapLayout,
            crate::rendering::map_data::MapPlot,
            crate::rendering::map_data::MapCoordinates,
            crate::rendering::map_data::MapPercentages,
            crate::rendering::map_data::MapStats,
            crate::rendering::map_data::MapStatusColors,
            crate::rendering::scene::StatusColor,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Auth", description = "Admin authentication (JWT)"),
        (name = "Layouts", description = "Layout catalog: site plans and their canvas dimensions"),
        (name = "Plots", description = "Plot registry: geometry, pricing and status"),
        (name = "Bookings", description = "Booking ledger: book, update and cancel plots"),
        (name = "Map", description = "Public map rendering: SVG, HTML and raw map data"),
    ),
    info(
        title = "PlotMap Service API",
        version = "1.0.0",
        description = "REST API for real-estate layout maps and plot booking",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    layout_service: Arc<LayoutService>,
    plot_service: Arc<PlotService>,
    booking_service: Arc<BookingService>,
    jwt_config: JwtConfig,
    uploads_dir: PathBuf,
    uploads_prefix: &str,
) -> Router {
    let auth_state = AuthState { jwt_config };

    let state = AppState {
        repos,
        layout_service,
        plot_service,
        booking_service,
        auth: auth_state.clone(),
        started_at: Arc::new(Instant::now()),
    };

    // Per-method admin guard. Public GETs and the admin mutations share
    // paths, so the auth layers go on the method routers, not the router.
    macro_rules! admin {
        ($routes:expr) => {
            $routes
                .route_layer(middleware::from_fn(admin_middleware))
                .route_layer(middleware::from_fn_with_state(
                    auth_state.clone(),
                    auth_middleware,
                ))
        };
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Health
        .route("/health", get(health::handlers::health_check))
        // Auth
        .route("/api/v1/auth/login", post(auth::handlers::login))
        .route(
            "/api/v1/auth/me",
            get(auth::handlers::me).route_layer(middleware::from_fn_with_state(
                auth_state.clone(),
                auth_middleware,
            )),
        )
        // Layouts
        .route(
            "/api/v1/layouts",
            get(layouts::handlers::list_layouts)
                .merge(admin!(post(layouts::handlers::create_layout))),
        )
        .route(
            "/api/v1/layouts/{id}",
            get(layouts::handlers::get_layout).merge(admin!(put_delete_layout())),
        )
        // Plot creation under a layout
        .route(
            "/api/v1/layouts/{id}/plots",
            admin!(post(plots::handlers::create_plot)),
        )
        .route(
            "/api/v1/layouts/{id}/plots/batch",
            admin!(post(plots::handlers::create_plots_batch)),
        )
        // Plots
        .route("/api/v1/plots/search", get(plots::handlers::search_plots))
        .route(
            "/api/v1/plots/{id}",
            get(plots::handlers::get_plot).merge(admin!(put_delete_plot())),
        )
        .route(
            "/api/v1/plots/{id}/status",
            admin!(patch(plots::handlers::update_plot_status)),
        )
        // Bookings
        .route(
            "/api/v1/bookings",
            admin!(get(bookings::handlers::list_bookings).post(bookings::handlers::create_booking)),
        )
        .route(
            "/api/v1/bookings/{id}",
            admin!(get(bookings::handlers::get_booking).put(bookings::handlers::update_booking)),
        )
        .route(
            "/api/v1/bookings/{id}/cancel",
            admin!(patch(bookings::handlers::cancel_booking)),
        )
        // Map (public)
        .route("/api/v1/map/{layout_id}/svg", get(map::handlers::render_svg))
        .route("/api/v1/map/{layout_id}/html", get(map::handlers::render_html))
        .route("/api/v1/map/{layout_id}/data", get(map::handlers::map_data))
        .with_state(state)
        // Swagger UI
        .merge(swagger_routes)
        // Uploaded plan images
        .nest_service(uploads_prefix, ServeDir::new(uploads_dir))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn put_delete_layout() -> axum::routing::MethodRouter<AppState> {
    axum::routing::put(layouts::handlers::update_layout)
        .delete(layouts::handlers::deactivate_layout)
}

fn put_delete_plot() -> axum::routing::MethodRouter<AppState> {
    axum::routing::put(plots::handlers::update_plot).delete(plots::handlers::delete_plot)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::Service;

    use crate::application::services::test_support::{layout_service, seed_layout, spec};
    use crate::auth::{create_token, hash_password};
    use crate::domain::{User, UserRole};
    use crate::infrastructure::storage::InMemoryRepositories;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "plotmap".to_string(),
        }
    }

    fn test_app() -> (Router, Arc<InMemoryRepositories>) {
        let (layout_svc, repos) = layout_service();
        let repos_dyn: Arc<dyn RepositoryProvider> = repos.clone();
        let plot_svc = Arc::new(PlotService::new(repos_dyn.clone()));
        let booking_svc = Arc::new(BookingService::new(repos_dyn.clone()));
        let router = create_api_router(
            repos_dyn,
            Arc::new(layout_svc),
            plot_svc,
            booking_svc,
            test_jwt_config(),
            std::env::temp_dir(),
            "/uploads",
        );
        (router, repos)
    }

    async fn send(router: Router, req: Request<Body>) -> axum::http::Response<Body> {
        let mut svc = router.into_service::<Body>();
        svc.call(req).await.unwrap()
    }

    async fn body_json(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let (router, _repos) = test_app();
        let resp = send(router, get_req("/health")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn admin_routes_reject_missing_and_non_admin_tokens() {
        let (router, _repos) = test_app();

        let resp = send(
            router.clone(),
            post_json("/api/v1/bookings", serde_json::json!({}), None),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let viewer = create_token("u-1", "viewer", "viewer", &test_jwt_config()).unwrap();
        let resp = send(
            router,
            post_json("/api/v1/bookings", serde_json::json!({}), Some(&viewer)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn login_then_book_a_plot_end_to_end() {
        let (router, repos) = test_app();

        let hash = hash_password("s3cret-pass").unwrap();
        let admin = User::new("admin", "admin@example.com", hash, UserRole::Admin);
        repos.users().save(admin).await.unwrap();

        let layout = seed_layout(&repos).await;
        let plot = crate::domain::Plot::new(
            &layout.id,
            "101",
            crate::domain::geometry::Rect::new(100.0, 100.0, 50.0, 50.0),
            None,
            crate::domain::PlotStatus::Available,
            None,
            None,
            None,
            None,
        );
        let plot_id = plot.id.clone();
        repos.plots().save(plot).await.unwrap();

        // Login
        let resp = send(
            router.clone(),
            post_json(
                "/api/v1/auth/login",
                serde_json::json!({"username": "admin", "password": "s3cret-pass"}),
                None,
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let token = json["data"]["token"].as_str().unwrap().to_string();
        assert_eq!(json["data"]["token_type"], "Bearer");

        // Book the plot
        let resp = send(
            router,
            post_json(
                "/api/v1/bookings",
                serde_json::json!({
                    "plotId": plot_id,
                    "clientName": "Asha Rao",
                    "clientPhone": "+91-98450-00000"
                }),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["status"], "confirmed");

        let booked = repos.plots().find_by_id(&plot_id).await.unwrap().unwrap();
        assert!(booked.is_booked());
    }

    #[tokio::test]
    async fn map_data_is_public_and_reports_stats() {
        let (router, repos) = test_app();
        let layout = seed_layout(&repos).await;
        let mut s = spec("A-1");
        s.status = Some(crate::domain::PlotStatus::Hold);
        let plot = crate::domain::Plot::new(
            &layout.id,
            s.plot_number.clone(),
            crate::domain::geometry::Rect::new(s.x, s.y, s.width, s.height),
            None,
            crate::domain::PlotStatus::Hold,
            None,
            None,
            None,
            None,
        );
        repos.plots().save(plot).await.unwrap();

        let resp = send(
            router.clone(),
            get_req(&format!("/api/v1/map/{}/data", layout.id)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["stats"]["total"], 1);
        assert_eq!(json["data"]["stats"]["hold"], 1);
        assert_eq!(json["data"]["statusColors"]["hold"]["fill"], "#eab308");

        let resp = send(router, get_req("/api/v1/map/missing/data")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn svg_endpoint_sets_content_type() {
        let (router, repos) = test_app();
        let layout = seed_layout(&repos).await;

        let resp = send(
            router,
            get_req(&format!("/api/v1/map/{}/svg", layout.id)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
    }
}
