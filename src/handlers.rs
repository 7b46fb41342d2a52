use crate::errors::AppError;
use crate::models::{
    ExerciseRequest, JournalEntry, JournalForm, JournalQuery, JournalRequest, MoodCount,
    NameRequest, Routine, SleepEntry, SleepOverview, SleepRequest, SummaryResponse,
    TimerStartRequest, ToggleRequest,
};
use crate::state::AppState;
use crate::timer::TimerSnapshot;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Serialize)]
pub struct FitnessOverview {
    pub routines: Vec<Routine>,
    pub timer: TimerSnapshot,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let trackers = state.trackers.lock().await;
    Html(render_index(&trackers))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let trackers = state.trackers.lock().await;
    Json(trackers.summary())
}

pub async fn get_sleep(State(state): State<AppState>) -> Json<SleepOverview> {
    let trackers = state.trackers.lock().await;
    Json(trackers.sleep.overview())
}

pub async fn post_sleep(
    State(state): State<AppState>,
    Json(payload): Json<SleepRequest>,
) -> Result<Json<SleepEntry>, AppError> {
    let mut trackers = state.trackers.lock().await;
    let entry = trackers.sleep.upsert(payload.date, payload.hours)?.clone();
    Ok(Json(entry))
}

pub async fn submit_sleep(
    State(state): State<AppState>,
    Form(payload): Form<SleepRequest>,
) -> Result<Redirect, AppError> {
    let mut trackers = state.trackers.lock().await;
    trackers.sleep.upsert(payload.date, payload.hours)?;
    Ok(Redirect::to("/"))
}

pub async fn get_fitness(State(state): State<AppState>) -> Json<FitnessOverview> {
    let trackers = state.trackers.lock().await;
    Json(FitnessOverview {
        routines: trackers.fitness.routines().to_vec(),
        timer: trackers.fitness.timer(),
    })
}

pub async fn create_routine(
    State(state): State<AppState>,
    Json(payload): Json<NameRequest>,
) -> Result<(StatusCode, Json<Routine>), AppError> {
    let mut trackers = state.trackers.lock().await;
    let routine = trackers.fitness.create_routine(&payload.name)?.clone();
    Ok((StatusCode::CREATED, Json(routine)))
}

pub async fn delete_routine(
    State(state): State<AppState>,
    Path(routine_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut trackers = state.trackers.lock().await;
    trackers.fitness.delete_routine(&routine_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_routine(
    State(state): State<AppState>,
    Path(routine_id): Path<String>,
) -> Result<Json<Routine>, AppError> {
    let mut trackers = state.trackers.lock().await;
    let routine = trackers.fitness.reset_routine(&routine_id)?.clone();
    Ok(Json(routine))
}

pub async fn add_exercise(
    State(state): State<AppState>,
    Path(routine_id): Path<String>,
    Json(payload): Json<ExerciseRequest>,
) -> Result<(StatusCode, Json<Routine>), AppError> {
    let mut trackers = state.trackers.lock().await;
    trackers
        .fitness
        .add_exercise(&routine_id, &payload.name, payload.duration)?;
    let routine = trackers
        .fitness
        .routine(&routine_id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("routine not found: {routine_id}")))?;
    Ok((StatusCode::CREATED, Json(routine)))
}

pub async fn toggle_exercise(
    State(state): State<AppState>,
    Path((routine_id, exercise_id)): Path<(String, String)>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<Routine>, AppError> {
    let mut trackers = state.trackers.lock().await;
    trackers
        .fitness
        .toggle_exercise(&routine_id, &exercise_id, payload.completed)?;
    let routine = trackers
        .fitness
        .routine(&routine_id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("routine not found: {routine_id}")))?;
    Ok(Json(routine))
}

pub async fn delete_exercise(
    State(state): State<AppState>,
    Path((routine_id, exercise_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let mut trackers = state.trackers.lock().await;
    trackers.fitness.delete_exercise(&routine_id, &exercise_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_timer(State(state): State<AppState>) -> Json<TimerSnapshot> {
    let trackers = state.trackers.lock().await;
    Json(trackers.fitness.timer())
}

pub async fn start_timer(
    State(state): State<AppState>,
    Json(payload): Json<TimerStartRequest>,
) -> Result<Json<TimerSnapshot>, AppError> {
    let snapshot = state
        .start_timer(&payload.routine_id, &payload.exercise_id)
        .await?;
    Ok(Json(snapshot))
}

pub async fn toggle_timer(State(state): State<AppState>) -> Result<Json<TimerSnapshot>, AppError> {
    Ok(Json(state.toggle_timer().await?))
}

pub async fn reset_timer(State(state): State<AppState>) -> Result<Json<TimerSnapshot>, AppError> {
    Ok(Json(state.reset_timer().await?))
}

pub async fn get_journal(
    State(state): State<AppState>,
    Query(query): Query<JournalQuery>,
) -> Json<Vec<JournalEntry>> {
    let trackers = state.trackers.lock().await;
    let tag = query.tag.as_deref().filter(|tag| !tag.is_empty());
    Json(trackers.journal.search(&query.q, tag))
}

pub async fn post_journal(
    State(state): State<AppState>,
    Json(payload): Json<JournalRequest>,
) -> Result<Json<JournalEntry>, AppError> {
    let mut trackers = state.trackers.lock().await;
    let entry = trackers
        .journal
        .upsert_entry(payload.date, payload.mood, &payload.content, payload.tags)?
        .clone();
    Ok(Json(entry))
}

pub async fn submit_journal(
    State(state): State<AppState>,
    Form(payload): Form<JournalForm>,
) -> Result<Redirect, AppError> {
    let tags = payload.tags.split(',').map(str::to_string).collect();
    let mut trackers = state.trackers.lock().await;
    trackers
        .journal
        .upsert_entry(payload.date, payload.mood, &payload.content, tags)?;
    Ok(Redirect::to("/"))
}

pub async fn get_journal_tags(State(state): State<AppState>) -> Json<BTreeSet<String>> {
    let trackers = state.trackers.lock().await;
    Json(trackers.journal.distinct_tags())
}

pub async fn get_mood_stats(State(state): State<AppState>) -> Json<Vec<MoodCount>> {
    let trackers = state.trackers.lock().await;
    Json(trackers.journal.mood_stats())
}
