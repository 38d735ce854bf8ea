//! Translation of driven-port failures into domain errors.
//!
//! Unreachable collaborators surface as `service_unavailable`; every other
//! adapter failure is an internal error.

use super::Error;
use super::ports::{
    AccessPolicyError, CourseRepositoryError, MembershipRepositoryError, TeamRepositoryError,
    UserDirectoryError,
};

pub(crate) fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::InvalidConfiguration { message } => Error::invalid_request(message),
    }
}

pub(crate) fn map_team_error(error: TeamRepositoryError) -> Error {
    match error {
        TeamRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("team repository unavailable: {message}"))
        }
        TeamRepositoryError::Query { message } => {
            Error::internal(format!("team repository error: {message}"))
        }
    }
}

pub(crate) fn map_membership_error(error: MembershipRepositoryError) -> Error {
    match error {
        MembershipRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("membership repository unavailable: {message}"))
        }
        MembershipRepositoryError::Query { message } => {
            Error::internal(format!("membership repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

pub(crate) fn map_access_error(error: AccessPolicyError) -> Error {
    match error {
        AccessPolicyError::Connection { message } => {
            Error::service_unavailable(format!("access policy unavailable: {message}"))
        }
        AccessPolicyError::Query { message } => {
            Error::internal(format!("access policy error: {message}"))
        }
    }
}
