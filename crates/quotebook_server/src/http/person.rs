//! Person count endpoints.

use super::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use quotebook_core::{PersonService, StubPersonRepository};

fn person_count(state: &AppState) -> Result<u64, ApiError> {
    let service = PersonService::new(StubPersonRepository::new(state.app_version));
    Ok(service.count()?)
}

pub(crate) async fn home_handler(State(state): State<AppState>) -> Result<String, ApiError> {
    let count = person_count(&state)?;
    Ok(format!("main // people count : {count}"))
}

pub(crate) async fn people_handler(State(state): State<AppState>) -> Result<String, ApiError> {
    let count = person_count(&state)?;
    Ok(format!("people // people count : {count}"))
}
