//! Driving port for authoring-side topic management.

use async_trait::async_trait;

use crate::domain::{Error, Topic, TopicId, User};

/// Topic fields as submitted by an author, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Raw teamset type; validated before anything else.
    pub teamset_type: Option<String>,
    pub max_team_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTopicRequest {
    pub requester: User,
    /// Course key exactly as it appeared in the path.
    pub course_id: String,
    pub draft: TopicDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTopicRequest {
    pub requester: User,
    pub course_id: String,
    pub topic_id: TopicId,
}

/// Create and delete topics on a course.
///
/// Both operations return the course's topic list as persisted after the
/// change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicAdministration: Send + Sync {
    /// Append a topic with a fresh id.
    ///
    /// # Errors
    ///
    /// - `invalid_request` with a `type` field error for an unknown type.
    /// - `invalid_request` with a `name` field error for a blank or
    ///   duplicate name.
    /// - `not_found` with a `course_id` field error for a malformed or
    ///   unknown course.
    /// - `forbidden` without studio write access.
    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Vec<Topic>, Error>;

    /// Remove a topic, then delete every team under it together with their
    /// memberships.
    ///
    /// Team deletion happens after the configuration update and is not
    /// rolled back when it fails part way.
    async fn delete_topic(&self, request: DeleteTopicRequest) -> Result<Vec<Topic>, Error>;
}
