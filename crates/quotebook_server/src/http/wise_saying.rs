//! Quote endpoints: write, list, detail, delete, modify.
//!
//! Every handler validates its input first, then runs exactly one unit of
//! work, then formats the response outside the database lock.

use super::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use quotebook_core::model::wise_saying::validate_fields;
use quotebook_core::{EntityId, SqliteWiseSayingRepository, WiseSaying, WiseSayingService};
use rusqlite::Connection;
use serde::Deserialize;

const DEFAULT_WRITE_CONTENT: &str = "내용";
const DEFAULT_WRITE_AUTHOR: &str = "작가";

#[derive(Debug, Deserialize)]
pub(crate) struct WriteParams {
    #[serde(default = "default_write_content")]
    content: String,
    #[serde(default = "default_write_author")]
    author: String,
}

fn default_write_content() -> String {
    DEFAULT_WRITE_CONTENT.to_string()
}

fn default_write_author() -> String {
    DEFAULT_WRITE_AUTHOR.to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModifyParams {
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: String,
}

fn service(conn: &Connection) -> WiseSayingService<SqliteWiseSayingRepository<'_>> {
    WiseSayingService::new(SqliteWiseSayingRepository::new(conn))
}

fn not_found(id: EntityId) -> ApiError {
    ApiError::NotFound(format!("quote {id} does not exist"))
}

fn find_existing(conn: &Connection, id: EntityId) -> Result<WiseSaying, ApiError> {
    service(conn).find_by_id(id)?.ok_or_else(|| not_found(id))
}

/// `<ul>` with one `<li>id / author / content</li>` per quote, in id order.
pub fn render_list(sayings: &[WiseSaying]) -> String {
    let items: String = sayings
        .iter()
        .map(|saying| {
            format!(
                "<li>{} / {} / {}</li>",
                saying.id(),
                saying.author,
                saying.content
            )
        })
        .collect();
    format!("<ul>{items}</ul>")
}

/// Three-line detail block; `content_html` is already rendered.
pub fn render_detail(saying: &WiseSaying, content_html: &str) -> String {
    format!(
        "<div>No : {}</div>\n<div>Author : {}</div>\n<div>{}</div>\n",
        saying.id(),
        saying.author,
        content_html
    )
}

pub(crate) async fn write_handler(
    State(state): State<AppState>,
    Query(params): Query<WriteParams>,
) -> Result<String, ApiError> {
    validate_fields(&params.content, &params.author)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let saying = state
        .unit_of_work(move |tx| Ok(service(tx).write(params.content, params.author)?))
        .await?;

    Ok(format!("quote {} has been created", saying.id()))
}

pub(crate) async fn list_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let sayings = state
        .unit_of_work(|tx| Ok(service(tx).find_all()?))
        .await?;

    Ok(Html(render_list(&sayings)))
}

pub(crate) async fn detail_handler(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Html<String>, ApiError> {
    let saying = state.unit_of_work(move |tx| find_existing(tx, id)).await?;

    let content_html = state.markdown.to_html(&saying.content);
    Ok(Html(render_detail(&saying, &content_html)))
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<String, ApiError> {
    state
        .unit_of_work(move |tx| {
            let saying = find_existing(tx, id)?;
            Ok(service(tx).delete(&saying)?)
        })
        .await?;

    Ok(format!("quote {id} has been deleted"))
}

pub(crate) async fn modify_handler(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<ModifyParams>,
) -> Result<String, ApiError> {
    validate_fields(&params.content, &params.author)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    state
        .unit_of_work(move |tx| {
            let mut saying = find_existing(tx, id)?;
            Ok(service(tx).modify(&mut saying, params.content, params.author)?)
        })
        .await?;

    Ok(format!("quote {id} has been modified"))
}
