//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health check (for load balancers/probes)
        .route("/api/health", get(handlers::health_check))
        // Task list endpoints
        .route(
            "/api/tasklists",
            get(handlers::list_task_lists).post(handlers::create_task_list),
        )
        .route(
            "/api/tasklists/{task_list_id}",
            get(handlers::get_task_list)
                .put(handlers::update_task_list)
                .delete(handlers::delete_task_list),
        )
        // Task endpoints. The counts route must be registered alongside the
        // id route; axum matches the literal segment before the parameter.
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/api/tasks/counts", get(handlers::get_task_counts))
        .route(
            "/api/tasks/{task_id}",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route(
            "/api/tasks/{task_id}/status",
            patch(handlers::update_task_status),
        )
        // Profile image endpoints
        .route(
            "/api/profile/image",
            post(handlers::upload_profile_image)
                .get(handlers::get_profile_image)
                .delete(handlers::delete_profile_image),
        );

    Router::new()
        .merge(api_routes)
        // The multipart body carries the image plus field framing; allow
        // slack beyond the image size cap and enforce the cap per-file.
        .layer(DefaultBodyLimit::max(
            tasklist_core::limits::MAX_IMAGE_SIZE + 64 * 1024,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
