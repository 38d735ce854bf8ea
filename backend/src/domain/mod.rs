//! Domain primitives, ports and services.
//!
//! Purpose: model courses, topics, teams and memberships as strongly typed
//! values and implement the three request workflows (topic administration,
//! topic listing, membership mutation) against abstract ports. Nothing here
//! knows about HTTP or about how the host platform stores its data.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with optional field errors.
//! - CourseKey, Course, TeamsConfiguration: course identity and teamsets.
//! - Topic, TopicId, TeamsetType: teamset definitions.
//! - Team, TeamId, Membership: team records as reported by the platform.
//! - User, Username, OrganizationProtectionStatus: requester identity.
//! - `ports`: driven and driving port traits.
//! - The three services implementing the driving ports.

mod course_lookup;
mod port_error_mapping;

pub mod course;
pub mod error;
pub mod ports;
pub mod team;
pub mod team_membership_service;
pub mod topic;
pub mod topic_administration_service;
pub mod topic_rollup;
pub mod topics_query_service;
pub mod trace_id;
pub mod user;

pub use self::course::{Course, CourseKey, CourseKeyError, TeamsConfiguration};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::team::{Membership, Team, TeamId};
pub use self::team_membership_service::TeamMembershipService;
pub use self::topic::{TeamsetType, Topic, TopicId, UnknownTeamsetType};
pub use self::topic_administration_service::TopicAdministrationService;
pub use self::topic_rollup::{TeamRollupContext, summarise_topic};
pub use self::topics_query_service::TopicsQueryService;
pub use self::trace_id::TraceId;
pub use self::user::{OrganizationProtectionStatus, User, Username, UsernameError};
