use http::{Response, StatusCode};
use serde::Serialize;
use skillshare_hub_database::models::User;
use skillshare_hub_database::UserStore;
use tracing::info;

use crate::either::Body;
use crate::error::AppError;
use crate::registration::RegisterPayload;
use crate::routes::json_response;

#[derive(Serialize)]
struct Registered<'a> {
    message: &'static str,
    user: &'a User,
}

pub async fn register<S: UserStore>(users: &S, body: &[u8]) -> Result<Response<Body>, AppError> {
    let payload: RegisterPayload = serde_json::from_slice(body).map_err(AppError::InvalidJson)?;
    let registration = payload.validate()?;
    if users.find_by_email(&registration.email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }
    let new_user = tokio::task::spawn_blocking(move || registration.into_new_user()).await??;
    // a concurrent request may still win, the store reports that as a duplicate too
    let user = users.insert(new_user).await?;
    info!(id = user.id, role = %user.role, "registered user");
    json_response(
        StatusCode::CREATED,
        &Registered {
            message: "User registered successfully",
            user: &user,
        },
    )
}
