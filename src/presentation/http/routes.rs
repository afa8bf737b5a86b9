//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public routes
        .nest("/auth", auth_routes())
        // Protected routes (require authentication)
        .nest("/students", student_routes(state.clone()))
        .nest("/centers", center_routes(state.clone()))
        .nest("/workers", worker_routes(state.clone()))
        .nest("/tutors", tutor_routes(state.clone()))
        .nest("/collaborators", collaborator_routes(state.clone()))
        .nest("/practices", practice_routes(state.clone()))
        .nest("/observations", observation_routes(state.clone()))
        .nest("/activities", activity_routes(state.clone()))
        .nest("/surveys", survey_routes(state.clone()))
        .nest("/letters", letter_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/forgot-password", post(handlers::auth::forgot_password))
        .route("/reset-password", post(handlers::auth::reset_password))
}

/// Student routes (protected), addressed by rut
fn student_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::student::list_students).post(handlers::student::create_student),
        )
        .route(
            "/{rut}",
            get(handlers::student::get_student)
                .patch(handlers::student::update_student)
                .delete(handlers::student::delete_student),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Center routes (protected)
fn center_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::center::list_centers).post(handlers::center::create_center),
        )
        .route(
            "/{id}",
            get(handlers::center::get_center)
                .patch(handlers::center::update_center)
                .delete(handlers::center::delete_center),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Worker routes (protected)
fn worker_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::worker::list_workers).post(handlers::worker::create_worker),
        )
        .route(
            "/{id}",
            get(handlers::worker::get_worker)
                .patch(handlers::worker::update_worker)
                .delete(handlers::worker::delete_worker),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Tutor routes (protected)
fn tutor_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::tutor::list_tutors).post(handlers::tutor::create_tutor),
        )
        .route(
            "/{id}",
            get(handlers::tutor::get_tutor)
                .patch(handlers::tutor::update_tutor)
                .delete(handlers::tutor::delete_tutor),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Collaborator routes (protected)
fn collaborator_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::collaborator::list_collaborators)
                .post(handlers::collaborator::create_collaborator),
        )
        .route(
            "/{id}",
            get(handlers::collaborator::get_collaborator)
                .patch(handlers::collaborator::update_collaborator)
                .delete(handlers::collaborator::delete_collaborator),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Practice routes (protected), including per-practice observations
fn practice_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::practice::list_practices).post(handlers::practice::create_practice),
        )
        .route(
            "/{id}",
            get(handlers::practice::get_practice)
                .patch(handlers::practice::update_practice)
                .delete(handlers::practice::delete_practice),
        )
        .route(
            "/{id}/observations",
            get(handlers::practice::list_observations).post(handlers::practice::add_observation),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Observation routes (protected), addressed directly by id
fn observation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            patch(handlers::practice::update_observation)
                .delete(handlers::practice::delete_observation),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Activity routes (protected)
fn activity_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::activity::list_activities).post(handlers::activity::create_activity),
        )
        .route(
            "/{id}",
            get(handlers::activity::get_activity)
                .patch(handlers::activity::update_activity)
                .delete(handlers::activity::delete_activity),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Survey routes (protected), with the export and form catalogs
fn survey_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::survey::list_surveys).post(handlers::survey::create_survey),
        )
        .route("/export/excel", get(handlers::survey::export_excel))
        .route("/catalog/students", get(handlers::survey::student_catalog))
        .route("/catalog/centers", get(handlers::survey::center_catalog))
        .route(
            "/catalog/collaborators",
            get(handlers::survey::collaborator_catalog),
        )
        .route("/catalog/tutors", get(handlers::survey::tutor_catalog))
        .route("/{id}", get(handlers::survey::get_survey))
        .route("/{id}/answers", patch(handlers::survey::update_answers))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Letter routes (protected)
fn letter_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::letter::generate_letter))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
