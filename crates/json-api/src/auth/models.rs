//! Auth Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use validator::Validate;

use coupons_app::auth::{Credentials, IssuedSession, Registration, SocialLogin};

use crate::{extensions::*, users::models::UserResponse};

#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub name: String,

    /// At least 8 characters
    #[validate(length(min = 8))]
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = StatusError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        request.validate_or_400()?;

        Ok(Registration {
            email: request.email,
            name: request.name,
            password: request.password,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SocialLoginRequest {
    /// Social provider, e.g. `google`, `facebook` or `apple`
    pub provider: String,

    /// Token issued by the provider
    pub token: String,
}

impl From<SocialLoginRequest> for SocialLogin {
    fn from(request: SocialLoginRequest) -> Self {
        SocialLogin {
            provider: request.provider,
            token: request.token,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    pub user: UserResponse,

    /// Bearer token; shown once
    pub token: String,

    pub expires_at: String,
}

impl From<IssuedSession> for SessionResponse {
    fn from(issued: IssuedSession) -> Self {
        SessionResponse {
            user: issued.user.into(),
            token: issued.token,
            expires_at: issued.session.expires_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}
