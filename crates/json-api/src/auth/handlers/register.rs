//! Register Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use coupons_app::auth::Registration;

use crate::{
    auth::{
        errors::into_status_error,
        models::{RegisterRequest, SessionResponse},
    },
    extensions::*,
    state::State,
};

/// Register Handler
///
/// Creates an account and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let registration = Registration::try_from(json.into_inner())?;

    let issued = state
        .app
        .auth
        .register(registration)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %issued.user.uuid, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(issued.into()))
}
