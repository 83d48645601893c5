use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the axum router with all Quartermaster endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::meta::health))
        .route("/api/info", get(handlers::meta::info))
        .route("/api/auth/me", get(handlers::users::me))
        .route(
            "/api/admin/items",
            get(handlers::items::list).post(handlers::items::create),
        )
        .route(
            "/api/admin/items/:id",
            put(handlers::items::update).delete(handlers::items::remove),
        )
        .route(
            "/api/admin/purchases",
            get(handlers::purchases::listing).post(handlers::purchases::record),
        )
        .route(
            "/api/admin/recent-purchases",
            get(handlers::purchases::recent),
        )
        .route(
            "/api/admin/recent-purchases/:id",
            patch(handlers::purchases::amend),
        )
        .route("/api/admin/vendors", get(handlers::purchases::vendors))
        .route("/api/admin/issue", post(handlers::issues::record))
        .route("/api/admin/issue-history", get(handlers::issues::history))
        .route(
            "/api/admin/reports/stock-summary",
            get(handlers::reports::stock_summary),
        )
        .route(
            "/api/admin/dashboard/stats",
            get(handlers::reports::dashboard_stats),
        )
        .route("/api/admin/users", get(handlers::users::list))
        .route("/api/admin/users/:id/approve", put(handlers::users::approve))
        .route(
            "/api/dashboard/monthly-purchases",
            get(handlers::reports::monthly_purchases),
        )
        .route("/api/user/issued-items", get(handlers::issues::issued_items))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
