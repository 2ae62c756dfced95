//! Routing and request logging.

pub mod error;
mod person;
mod wise_saying;

use crate::state::AppState;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use log::info;
use std::time::Instant;

pub use wise_saying::{render_detail, render_list};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(person::home_handler))
        .route("/people", get(person::people_handler))
        .route("/wiseSayings", get(wise_saying::list_handler))
        .route("/wiseSayings/write", get(wise_saying::write_handler))
        .route("/wiseSayings/:id", get(wise_saying::detail_handler))
        .route("/wiseSayings/:id/delete", get(wise_saying::delete_handler))
        .route("/wiseSayings/:id/modify", get(wise_saying::modify_handler))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http status={} method={} path={} duration_ms={}",
        response.status().as_u16(),
        method,
        path,
        started.elapsed().as_millis()
    );
    response
}
