//! HTTP handlers for the users resource.
//!
//! Every handler returns one value; the router turns it into one response.

use serde_json::Value;
use tracing::error;

use super::error::RegistryError;
use super::markup;
use super::model::{User, UserId};
use super::validation::{decode_payload, validate};
use crate::app::AppState;
use crate::request::Request;
use crate::response::{Html, Json, Response};
use crate::status::Status;

/// Strict decimal parse of a path id. Anything else (`abc`, `-1`, `3.5`)
/// yields `None`, which no record matches.
pub fn parse_id(raw: &str) -> Option<UserId> {
    raw.parse().ok()
}

fn id_param(req: &Request) -> Result<UserId, RegistryError> {
    req.param("id").and_then(parse_id).ok_or(RegistryError::NotFound)
}

fn payload(req: &Request) -> Result<Value, RegistryError> {
    decode_payload(req.content_type().as_deref(), req.body())
}

/// `GET /users`
pub async fn list_users(state: AppState, _req: Request) -> Html {
    let users = state.users.read().await;
    Html(markup::list(users.list()))
}

/// `GET /users/{id}`
pub async fn get_user(state: AppState, req: Request) -> Result<Html, RegistryError> {
    let id = id_param(&req)?;
    let users = state.users.read().await;
    Ok(Html(markup::detail(users.get(id)?)))
}

/// `POST /users` → `201` with the new record and its `location`.
pub async fn create_user(state: AppState, req: Request) -> Result<Response, RegistryError> {
    let new = validate(&payload(&req)?)?;
    let user = state.users.write().await.create(new);
    Ok(created(&state, &user))
}

/// `PUT /users/{id}`. An unknown id is reported before the body is looked at.
pub async fn update_user(state: AppState, req: Request) -> Result<Json<User>, RegistryError> {
    let id = id_param(&req)?;
    let mut users = state.users.write().await;
    if !users.contains(id) {
        return Err(RegistryError::NotFound);
    }
    let new = validate(&payload(&req)?)?;
    Ok(Json(users.update(id, new)?))
}

/// `DELETE /users/{id}` → the removed record.
pub async fn delete_user(state: AppState, req: Request) -> Result<Json<User>, RegistryError> {
    let id = id_param(&req)?;
    let removed = state.users.write().await.delete(id)?;
    Ok(Json(removed))
}

fn created(state: &AppState, user: &User) -> Response {
    match serde_json::to_vec(user) {
        Ok(body) => Response::builder()
            .status(Status::Created)
            .header("location", &format!("{}/{}", state.users_path, user.id))
            .json(body),
        Err(e) => {
            error!("failed to serialise user {}: {e}", user.id);
            Response::status(Status::InternalServerError)
        }
    }
}
