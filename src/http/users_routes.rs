//! # User Routes
//!
//! CRUD endpoints under `/api/users`. Listing runs the generic query
//! pipeline (search over name/email, equality filters, sort, pagination,
//! field selection); mutations on other users require a verified token, and
//! deletes and role changes require the admin role.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::{AppJson, AppResult};
use crate::query::{QueryBuilder, QueryParams};
use crate::users::{CreateUser, UpdateUser, User, UserRepository};

use super::response::{DeleteResponse, ListResponse, SingleResponse};
use super::server::AppState;

/// Fields covered by free-text search
const SEARCHABLE_FIELDS: [&str; 2] = ["name", "email"];

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<Json<ListResponse<Value>>> {
    let params = QueryParams::from_map(&raw);
    let page = params.page();
    let limit = params.limit();

    let query = QueryBuilder::new(state.users.query(), params)
        .search(&SEARCHABLE_FIELDS)
        .filter()
        .sort()
        .paginate()
        .fields()
        .into_query();

    // Total matches across all pages, taken before execution consumes the query
    let total = query.count()?;

    let data: Vec<Value> = query
        .execute()?
        .into_iter()
        .map(UserRepository::redact)
        .collect();

    Ok(Json(ListResponse::new(data, total, page, limit)))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateUser>,
) -> AppResult<(StatusCode, Json<SingleResponse<User>>)> {
    let user = state.users.create(&req)?;
    tracing::info!(user_id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(SingleResponse::new(user))))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<SingleResponse<User>>> {
    let user = state.users.find_by_id(&id)?;
    Ok(Json(SingleResponse::new(user)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateUser>,
) -> AppResult<Json<SingleResponse<User>>> {
    // Users may edit themselves; editing others or changing roles is admin-only
    if claims.sub != id || req.role.is_some() {
        claims.require_admin()?;
    }

    let user = state.users.update(&id, &req)?;
    Ok(Json(SingleResponse::new(user)))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    claims.require_admin()?;
    state.users.delete(&id)?;
    tracing::info!(user_id = %id, "user deleted");
    Ok(Json(DeleteResponse::success()))
}
