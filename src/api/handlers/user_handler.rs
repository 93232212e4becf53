//! User handlers.
//!
//! Every response, success or failure, is an [`Envelope`].

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::extractors::{JsonBody, UserId};
use crate::api::AppState;
use crate::config::{
    MSG_CREATE_FAILED, MSG_DELETE_FAILED, MSG_UPDATE_FAILED, MSG_USER_CREATED, MSG_USER_DELETED,
    MSG_USER_UPDATED,
};
use crate::domain::{NewUser, UserChanges, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{Envelope, PaginationParams};

/// Create user request: `{"user": {...}}`
///
/// An absent `user` is an empty signup and fails validation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub user: NewUser,
}

/// Update user request: `{"user": {...}}` with only the fields to change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub user: UserChanges,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(show_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .route("/:id/edit", get(edit_user))
}

/// List users, newest first, 20 per page
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of users with the total count", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Envelope>> {
    let page = state
        .user_service
        .list_users(&params)
        .await?
        .map(UserResponse::from);

    Ok(Json(Envelope::users(page.items, page.total)))
}

/// Sign up a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = Envelope),
        (status = 400, description = "Malformed JSON", body = Envelope),
        (status = 422, description = "Validation errors by field", body = Envelope)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<CreateUserRequest>,
) -> AppResult<Json<Envelope>> {
    let user = state
        .user_service
        .create_user(params.user)
        .await
        .map_err(|e| e.with_message(MSG_CREATE_FAILED))?;

    Ok(Json(Envelope::user(user).with_message(MSG_USER_CREATED)))
}

/// Show a user
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = Envelope),
        (status = 422, description = "User not found", body = Envelope)
    )
)]
pub async fn show_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<Envelope>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(Envelope::user(user)))
}

/// Fetch a user for editing (same payload as show)
#[utoipa::path(
    get,
    path = "/api/users/{id}/edit",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = Envelope),
        (status = 422, description = "User not found", body = Envelope)
    )
)]
pub async fn edit_user(state: State<AppState>, id: UserId) -> AppResult<Json<Envelope>> {
    show_user(state, id).await
}

/// Update only the supplied fields of a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = Envelope),
        (status = 400, description = "Malformed JSON", body = Envelope),
        (status = 422, description = "User not found or validation errors", body = Envelope)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(params): JsonBody<UpdateUserRequest>,
) -> AppResult<Json<Envelope>> {
    let user = state
        .user_service
        .update_user(id, params.user)
        .await
        .map_err(|e| e.with_message(MSG_UPDATE_FAILED))?;

    Ok(Json(Envelope::user(user).with_message(MSG_USER_UPDATED)))
}

/// Delete a user permanently
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = Envelope),
        (status = 422, description = "User not found or not deleted", body = Envelope)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<Envelope>> {
    state
        .user_service
        .delete_user(id)
        .await
        .map_err(|e| match e {
            AppError::NotFound => AppError::unprocessable(MSG_DELETE_FAILED),
            other => other,
        })?;

    Ok(Json(Envelope::message(MSG_USER_DELETED)))
}
