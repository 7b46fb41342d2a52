use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/sleep", post(handlers::submit_sleep))
        .route("/journal", post(handlers::submit_journal))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/sleep", get(handlers::get_sleep).post(handlers::post_sleep))
        .route("/api/fitness", get(handlers::get_fitness))
        .route("/api/fitness/routines", post(handlers::create_routine))
        .route(
            "/api/fitness/routines/:routine_id",
            delete(handlers::delete_routine),
        )
        .route(
            "/api/fitness/routines/:routine_id/reset",
            post(handlers::reset_routine),
        )
        .route(
            "/api/fitness/routines/:routine_id/exercises",
            post(handlers::add_exercise),
        )
        .route(
            "/api/fitness/routines/:routine_id/exercises/:exercise_id",
            post(handlers::toggle_exercise).delete(handlers::delete_exercise),
        )
        .route("/api/fitness/timer", get(handlers::get_timer))
        .route("/api/fitness/timer/start", post(handlers::start_timer))
        .route("/api/fitness/timer/toggle", post(handlers::toggle_timer))
        .route("/api/fitness/timer/reset", post(handlers::reset_timer))
        .route("/api/journal", get(handlers::get_journal).post(handlers::post_journal))
        .route("/api/journal/tags", get(handlers::get_journal_tags))
        .route("/api/journal/moods", get(handlers::get_mood_stats))
        .with_state(state)
}
