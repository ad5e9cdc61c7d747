//! Identity extraction for user-scoped routes.
//!
//! Session authentication lives in the gateway upstream of this service. By the time a request
//! arrives here, the gateway has resolved the session and injected the acting user's id in the
//! `mns_user_id` header. Routes that act on a user's own notifications take a [`RequireUser`]
//! argument, which rejects the request with 401 when the header is absent or unreadable.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use log::debug;
use market_notify_engine::db_types::UserId;

use crate::errors::ServerError;

pub const USER_ID_HEADER: &str = "mns_user_id";

#[derive(Debug, Clone, Copy)]
pub struct RequireUser(UserId);

impl RequireUser {
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl FromRequest for RequireUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user_id(req))
    }
}

fn extract_user_id(req: &HttpRequest) -> Result<RequireUser, ServerError> {
    let header = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| ServerError::UnidentifiedUser(format!("No {USER_ID_HEADER} header present")))?;
    let raw = header.to_str().map_err(|e| {
        debug!("💻️ Could not read the {USER_ID_HEADER} header. {e}");
        ServerError::UnidentifiedUser(e.to_string())
    })?;
    let id = raw.trim().parse::<i64>().map_err(|e| {
        debug!("💻️ '{raw}' is not a valid user id. {e}");
        ServerError::UnidentifiedUser(format!("'{raw}' is not a valid user id"))
    })?;
    Ok(RequireUser(UserId(id)))
}
