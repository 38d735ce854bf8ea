//! Per-topic team rollups for topic listings.

use std::collections::HashSet;

use super::ports::TopicSummary;
use super::{Team, TeamId, Topic};

/// Teams prefetched for one page of topics together with the ids the
/// requester must not see.
///
/// The teams are expected to be filtered by organization protection already.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRollupContext {
    teams: Vec<Team>,
    excluded_team_ids: HashSet<TeamId>,
}

impl TeamRollupContext {
    pub fn new(teams: Vec<Team>, excluded_team_ids: HashSet<TeamId>) -> Self {
        Self {
            teams,
            excluded_team_ids,
        }
    }
}

/// Attach the visible teams of `topic` and their count.
pub fn summarise_topic(topic: Topic, context: &TeamRollupContext) -> TopicSummary {
    let teams: Vec<Team> = context
        .teams
        .iter()
        .filter(|team| team.topic_id == topic.id)
        .filter(|team| !context.excluded_team_ids.contains(&team.team_id))
        .cloned()
        .collect();
    TopicSummary {
        topic,
        team_count: teams.len(),
        teams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseKey, TeamsetType, TopicId};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn team(id: &str, topic: &str) -> Team {
        Team {
            team_id: TeamId::new(id),
            name: id.to_owned(),
            description: String::new(),
            course_id: CourseKey::parse("course-v1:OrgX+CS101+2024").expect("valid key"),
            topic_id: TopicId::new(topic),
            organization_protected: false,
            date_created: Utc::now(),
            last_activity_at: Utc::now(),
            membership: Vec::new(),
        }
    }

    #[fixture]
    fn topic() -> Topic {
        Topic {
            id: TopicId::new("robotics"),
            name: "Robotics".to_owned(),
            description: String::new(),
            teamset_type: TeamsetType::PrivateManaged,
            max_team_size: None,
        }
    }

    #[rstest]
    fn counts_only_teams_of_the_topic(topic: Topic) {
        let context = TeamRollupContext::new(
            vec![team("a", "robotics"), team("b", "chemistry"), team("c", "robotics")],
            HashSet::new(),
        );
        let summary = summarise_topic(topic, &context);
        assert_eq!(summary.team_count, 2);
        let ids: Vec<_> = summary.teams.iter().map(|t| t.team_id.as_ref()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[rstest]
    fn excluded_teams_leave_list_and_count(topic: Topic) {
        let context = TeamRollupContext::new(
            vec![team("a", "robotics"), team("c", "robotics")],
            HashSet::from([TeamId::new("a")]),
        );
        let summary = summarise_topic(topic, &context);
        assert_eq!(summary.team_count, 1);
        assert_eq!(summary.teams[0].team_id, TeamId::new("c"));
    }

    #[rstest]
    fn topic_without_teams_has_zero_count(topic: Topic) {
        let summary = summarise_topic(topic.clone(), &TeamRollupContext::default());
        assert_eq!(summary.team_count, 0);
        assert!(summary.teams.is_empty());
        assert_eq!(summary.topic, topic);
    }
}
