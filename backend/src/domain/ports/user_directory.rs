//! Port resolving platform accounts.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        Connection { message: String } =>
            "user directory connection failed: {message}",
        Query { message: String } =>
            "user directory query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve an exact username, or an email address compared without
    /// regard to case.
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserDirectoryError>;
}
