//! Resolve the authenticated platform user behind a request.
//!
//! Handlers take a [`Requester`] argument. Credentials come from an
//! `Authorization: Bearer <token>` header (the `JWT` scheme is accepted too)
//! or, failing that, from the username in the platform session cookie.

use actix_session::SessionExt;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use zeroize::Zeroizing;

use crate::domain::ports::{AuthenticatorError, Credential};
use crate::domain::{Error, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
const INVALID_TOKEN: &str = "Invalid token.";
const TOKEN_SCHEMES: [&str; 2] = ["bearer", "jwt"];

/// The authenticated user making the request.
#[derive(Debug, Clone)]
pub struct Requester(pub User);

impl Requester {
    pub fn into_inner(self) -> User {
        self.0
    }
}

fn authorization_token(headers: &HeaderMap) -> Option<Zeroizing<String>> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if token.is_empty() || !TOKEN_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
        return None;
    }
    Some(Zeroizing::new(token.to_owned()))
}

fn map_authenticator_error(error: AuthenticatorError) -> Error {
    match error {
        AuthenticatorError::Connection { message } => {
            Error::service_unavailable(format!("authenticator unavailable: {message}"))
        }
        AuthenticatorError::Query { message } => {
            Error::internal(format!("authenticator error: {message}"))
        }
    }
}

impl FromRequest for Requester {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let credential = match authorization_token(req.headers()) {
            Some(token) => Ok(Some(Credential::Bearer(token))),
            None => SessionContext::new(req.get_session())
                .username()
                .map(|username| username.map(|name| Credential::Session(name.to_string()))),
        };

        Box::pin(async move {
            let state = state
                .ok_or_else(|| Error::internal("HTTP state is not configured for this route"))?;
            let Some(credential) = credential? else {
                return Err(Error::unauthorized(NOT_AUTHENTICATED).into());
            };
            let user = state
                .authenticator
                .authenticate(&credential)
                .await
                .map_err(map_authenticator_error)?;
            match (user, &credential) {
                (Some(user), _) => Ok(Self(user)),
                (None, Credential::Bearer(_)) => Err(Error::unauthorized(INVALID_TOKEN).into()),
                (None, Credential::Session(_)) => Err(Error::unauthorized(NOT_AUTHENTICATED).into()),
            }
        })
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
