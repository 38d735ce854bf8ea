//! Driving port for learner-side topic listing.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Team, Topic, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTopicsRequest {
    pub requester: User,
    pub course_id: String,
    pub page: PageRequest,
}

/// A topic with the teams the requester may see under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub topic: Topic,
    pub team_count: usize,
    pub teams: Vec<Team>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicsQuery: Send + Sync {
    /// One page of the course's visible topics in alphabetical order.
    ///
    /// # Errors
    ///
    /// - `not_found` for a malformed or unknown course, or a page outside
    ///   the available range.
    /// - `forbidden` without team API access.
    async fn list_topics(&self, request: ListTopicsRequest) -> Result<Page<TopicSummary>, Error>;
}
