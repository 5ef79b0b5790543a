use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::routes::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Role of the signed-in user, resolved once per request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UserRole {
    Employee,
    Manager,
}

impl UserRole {
    pub fn is_manager(self) -> bool {
        self == Self::Manager
    }
}

/// Explicit user context handed to every ticket operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| AppError::Unauthorized(format!("missing or invalid {USER_ID_HEADER}")))?;

        let role = header(parts, USER_ROLE_HEADER)
            .and_then(|v| v.parse::<UserRole>().ok())
            .ok_or_else(|| AppError::Unauthorized(format!("missing or invalid {USER_ROLE_HEADER}")))?;

        Ok(Session { user_id, role })
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
