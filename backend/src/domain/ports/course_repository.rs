//! Port for reading courses and persisting their teams configuration.

use async_trait::async_trait;

use crate::domain::{Course, CourseKey, TeamsConfiguration, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// The course store could not be reached.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// A lookup or update failed while executing.
        Query { message: String } =>
            "course repository query failed: {message}",
        /// The platform rejected the submitted settings.
        InvalidConfiguration { message: String } =>
            "teams configuration rejected: {message}",
    }
}

/// Access to courses and their advanced settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Load a course by key. Returns `None` when it does not exist.
    async fn find_course(&self, key: &CourseKey) -> Result<Option<Course>, CourseRepositoryError>;

    /// Replace the teams configuration of `course` on behalf of `editor`.
    ///
    /// Returns the configuration as stored, which becomes the topic list
    /// reported back to authors.
    async fn update_teams_configuration(
        &self,
        course: &Course,
        configuration: TeamsConfiguration,
        editor: &User,
    ) -> Result<TeamsConfiguration, CourseRepositoryError>;
}
