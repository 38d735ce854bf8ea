//! Resolution of a course id taken from a request path.

use super::ports::CourseRepository;
use super::port_error_mapping::map_course_error;
use super::{Course, CourseKey, Error, ErrorCode};

/// Parse `raw` and load the course.
///
/// Both a malformed key and an unknown course are reported as `not_found`
/// with a field error on `course_id`.
pub(crate) async fn resolve_course<C>(courses: &C, raw: &str) -> Result<Course, Error>
where
    C: CourseRepository,
{
    let key = CourseKey::parse(raw).map_err(|_| {
        Error::field(
            ErrorCode::NotFound,
            "course_id",
            format!("The supplied course_id={raw} does not exist."),
        )
    })?;
    courses
        .find_course(&key)
        .await
        .map_err(map_course_error)?
        .ok_or_else(|| {
            Error::field(
                ErrorCode::NotFound,
                "course_id",
                format!("The supplied course_id={raw} is not found."),
            )
        })
}
