//! In-memory stand-in for the host platform.
//!
//! [`InMemoryPlatform`] implements every driven port over one
//! `RwLock`-guarded state: courses and their teams configuration, teams,
//! memberships, users, enrollments, roles and bearer tokens. The binary wires
//! it in when no other platform adapter is configured; tests use it to drive
//! the HTTP surface end to end.

mod fixture;
mod ports;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use mockable::Clock;
use tokio::sync::RwLock;

use crate::domain::{
    Course, CourseKey, Membership, OrganizationProtectionStatus, Team, TeamId, User, Username,
};

pub use fixture::{CourseFixture, FixtureError, PlatformFixture, TeamFixture};

/// Roles and enrollment attached to one course.
#[derive(Debug, Clone, Default)]
struct CourseRoles {
    staff: HashSet<Username>,
    studio_writers: HashSet<Username>,
    enrollments: HashSet<Username>,
    organization_protection: HashMap<Username, OrganizationProtectionStatus>,
}

#[derive(Debug, Clone)]
struct CourseRecord {
    course: Course,
    roles: CourseRoles,
}

#[derive(Debug, Default)]
struct PlatformState {
    users: BTreeMap<Username, User>,
    tokens: HashMap<String, Username>,
    courses: BTreeMap<CourseKey, CourseRecord>,
    /// Teams without membership; membership is attached on read.
    teams: BTreeMap<TeamId, Team>,
    memberships: Vec<Membership>,
}

impl PlatformState {
    fn hydrate(&self, team: &Team) -> Team {
        let mut team = team.clone();
        team.membership = self
            .memberships
            .iter()
            .filter(|membership| membership.team_id == team.team_id)
            .cloned()
            .collect();
        team
    }

    fn roles(&self, course_id: &CourseKey) -> Option<&CourseRoles> {
        self.courses.get(course_id).map(|record| &record.roles)
    }

    fn is_staff(&self, username: &Username, course_id: &CourseKey) -> bool {
        self.roles(course_id)
            .is_some_and(|roles| roles.staff.contains(username))
    }

    fn is_enrolled(&self, username: &Username, course_id: &CourseKey) -> bool {
        self.roles(course_id)
            .is_some_and(|roles| roles.enrollments.contains(username))
    }

    fn is_private_team(&self, team: &Team) -> bool {
        self.courses
            .get(&team.course_id)
            .and_then(|record| record.course.teams_configuration.topic(&team.topic_id))
            .is_some_and(|topic| topic.teamset_type.is_private_managed())
    }

    fn is_instructor_managed_team(&self, team: &Team) -> bool {
        self.courses
            .get(&team.course_id)
            .and_then(|record| record.course.teams_configuration.topic(&team.topic_id))
            .is_some_and(|topic| topic.teamset_type.is_instructor_managed())
    }

    fn is_member(&self, username: &Username, team_id: &TeamId) -> bool {
        self.memberships
            .iter()
            .any(|membership| &membership.team_id == team_id && &membership.username == username)
    }
}

/// Host platform held entirely in memory.
#[derive(Clone)]
pub struct InMemoryPlatform {
    state: Arc<RwLock<PlatformState>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPlatform {
    /// Empty platform.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(PlatformState::default())),
            clock,
        }
    }

    /// Platform seeded from `fixture`.
    ///
    /// Teams without a creation date are stamped with the current time.
    /// Fixture members are enrolled implicitly.
    pub fn from_fixture(fixture: PlatformFixture, clock: Arc<dyn Clock>) -> Result<Self, FixtureError> {
        let now = clock.utc();
        let mut state = PlatformState::default();

        for user in fixture.users {
            state.users.insert(user.username.clone(), user);
        }
        for (token, username) in fixture.tokens {
            if !state.users.contains_key(&username) {
                return Err(FixtureError::UnknownReference {
                    kind: "user",
                    id: username.to_string(),
                });
            }
            state.tokens.insert(token, username);
        }
        for course in fixture.courses {
            let roles = CourseRoles {
                staff: course.staff.into_iter().collect(),
                studio_writers: course.studio_writers.into_iter().collect(),
                enrollments: course.enrollments.into_iter().collect(),
                organization_protection: course.organization_protection.into_iter().collect(),
            };
            let record = CourseRecord {
                course: Course {
                    key: course.id.clone(),
                    display_name: course.display_name,
                    teams_configuration: course.teams_configuration,
                },
                roles,
            };
            state.courses.insert(course.id, record);
        }
        for team in fixture.teams {
            let Some(record) = state.courses.get_mut(&team.course_id) else {
                return Err(FixtureError::UnknownReference {
                    kind: "course",
                    id: team.course_id.to_string(),
                });
            };
            let created = team.date_created.unwrap_or(now);
            for username in team.members {
                record.roles.enrollments.insert(username.clone());
                state.memberships.push(Membership {
                    username,
                    team_id: team.team_id.clone(),
                    date_joined: created,
                    last_activity_at: created,
                });
            }
            state.teams.insert(
                team.team_id.clone(),
                Team {
                    team_id: team.team_id,
                    name: team.name,
                    description: team.description,
                    course_id: team.course_id,
                    topic_id: team.topic_id,
                    organization_protected: team.organization_protected,
                    date_created: created,
                    last_activity_at: created,
                    membership: Vec::new(),
                },
            );
        }

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            clock,
        })
    }

    /// Number of memberships across all teams.
    pub async fn membership_count(&self) -> usize {
        self.state.read().await.memberships.len()
    }
}
