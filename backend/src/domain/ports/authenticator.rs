//! Port resolving request credentials to a platform user.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised by authenticator adapters.
    pub enum AuthenticatorError {
        Connection { message: String } =>
            "authenticator connection failed: {message}",
        Query { message: String } =>
            "authenticator query failed: {message}",
    }
}

/// Credential presented with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Token from an `Authorization: Bearer` or `JWT` header.
    Bearer(Zeroizing<String>),
    /// Username stored in the platform session.
    Session(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve `credential`. Returns `None` for unknown tokens or users.
    async fn authenticate(&self, credential: &Credential) -> Result<Option<User>, AuthenticatorError>;
}
