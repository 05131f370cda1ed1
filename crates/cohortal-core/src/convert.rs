// ── API-to-domain type conversions ──
//
// Bridges raw `cohortal_api` wire types into canonical `model` domain
// types and back (for write endpoints). Each impl normalizes field
// names, parses strings into strong types, and fills sensible defaults
// for missing optional data.

use chrono::{DateTime, Utc};
use tracing::warn;

use cohortal_api::models::{
    AqlDto, AqlValidationDto, CohortDto, CohortNodeDto, DashboardCardDto, DashboardMetricsDto,
    DashboardProjectDto, NavigationLinkDto, OrganizationDto, ProjectDto, UserDto, UserInfoDto,
    UserProfileDto,
};

use crate::model::{
    Aql, Cohort, CohortNode, DashboardCard, DashboardMetrics, DashboardProject, GroupOperator,
    NavigationLink, Organization, Project, ProjectStatus, Role, User, UserId, UserInfo,
    UserProfile, ValidationOutcome,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// Parse an ISO-8601 datetime string, silently dropping unparseable values.
fn parse_datetime(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Convert an optional epoch-milliseconds timestamp to `DateTime<Utc>`.
fn millis_to_datetime(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}

/// Parse wire role names, dropping unknown entries (realm-management
/// roles and other identity-provider noise leak through here).
fn parse_roles(raw: &[String]) -> Vec<Role> {
    raw.iter()
        .filter_map(|name| {
            let role = Role::from_wire(name);
            if role.is_none() {
                warn!(role = %name, "ignoring unknown role");
            }
            role
        })
        .collect()
}

/// Parse a validator position that arrives as a string; anything
/// unparseable lands on line/column 1.
fn parse_position(raw: Option<&String>) -> u32 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(1)
}

// ── Content ─────────────────────────────────────────────────────────

impl From<NavigationLinkDto> for NavigationLink {
    fn from(dto: NavigationLinkDto) -> Self {
        Self {
            title: dto.title,
            target_url: dto.target_url,
        }
    }
}

impl From<&NavigationLink> for NavigationLinkDto {
    fn from(link: &NavigationLink) -> Self {
        Self {
            title: link.title.clone(),
            target_url: link.target_url.clone(),
        }
    }
}

impl From<DashboardCardDto> for DashboardCard {
    fn from(dto: DashboardCardDto) -> Self {
        Self {
            title: dto.title,
            text: dto.text,
            image_id: dto.image_id,
            url: dto.url,
        }
    }
}

impl From<&DashboardCard> for DashboardCardDto {
    fn from(card: &DashboardCard) -> Self {
        Self {
            title: card.title.clone(),
            text: card.text.clone(),
            image_id: card.image_id.clone(),
            url: card.url.clone(),
        }
    }
}

impl From<DashboardMetricsDto> for DashboardMetrics {
    fn from(dto: DashboardMetricsDto) -> Self {
        Self {
            aqls: dto.aqls,
            projects: dto.projects,
            organizations: dto.organizations,
        }
    }
}

impl From<DashboardProjectDto> for DashboardProject {
    fn from(dto: DashboardProjectDto) -> Self {
        Self {
            created_at: parse_datetime(dto.create_date.as_ref()),
            name: dto.name,
            organization: dto.organization,
        }
    }
}

// ── Users ───────────────────────────────────────────────────────────

impl From<OrganizationDto> for Organization {
    fn from(dto: OrganizationDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: UserId::from(dto.id),
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            created_at: millis_to_datetime(dto.created_timestamp),
            organization: dto.organization.map(Organization::from),
            roles: parse_roles(&dto.roles),
            approved: dto.approved,
        }
    }
}

impl From<UserProfileDto> for UserProfile {
    fn from(dto: UserProfileDto) -> Self {
        Self {
            id: UserId::from(dto.id),
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            organization: dto.organization.map(Organization::from),
            roles: parse_roles(&dto.roles),
        }
    }
}

impl From<UserInfoDto> for UserInfo {
    fn from(dto: UserInfoDto) -> Self {
        Self {
            sub: UserId::from(dto.sub),
            name: dto.name.or(dto.preferred_username),
            email: dto.email,
        }
    }
}

// ── AQL ─────────────────────────────────────────────────────────────

impl From<AqlDto> for Aql {
    fn from(dto: AqlDto) -> Self {
        Self {
            id: dto.id,
            created_at: parse_datetime(dto.create_date.as_ref()),
            modified_at: parse_datetime(dto.modified_date.as_ref()),
            name: dto.name,
            query: dto.query,
            purpose: dto.purpose,
            usage: dto.usage,
            public: dto.public_aql,
            owner: dto.owner.map(User::from),
            category_id: dto.category_id,
        }
    }
}

impl From<&Aql> for AqlDto {
    fn from(aql: &Aql) -> Self {
        Self {
            id: aql.id,
            name: aql.name.clone(),
            query: aql.query.clone(),
            purpose: aql.purpose.clone(),
            usage: aql.usage.clone(),
            public_aql: aql.public,
            // Timestamps and owner are backend-assigned; never sent.
            create_date: None,
            modified_date: None,
            owner: None,
            category_id: aql.category_id,
        }
    }
}

impl From<AqlValidationDto> for ValidationOutcome {
    fn from(dto: AqlValidationDto) -> Self {
        Self {
            valid: dto.valid,
            message: dto.message,
            start_line: parse_position(dto.start_line.as_ref()),
            start_column: parse_position(dto.start_column.as_ref()),
        }
    }
}

// ── Projects ────────────────────────────────────────────────────────

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        let status = dto
            .status
            .as_deref()
            .and_then(ProjectStatus::from_wire)
            .unwrap_or_else(|| {
                warn!(status = ?dto.status, "unknown project status, treating as DRAFT");
                ProjectStatus::Draft
            });

        Self {
            id: dto.id,
            created_at: parse_datetime(dto.create_date.as_ref()),
            name: dto.name,
            description: dto.description,
            first_hypotheses: dto.first_hypotheses,
            status,
            cohort_id: dto.cohort_id,
            coordinator: dto.coordinator.map(User::from),
            researchers: dto.researchers.into_iter().map(User::from).collect(),
        }
    }
}

impl From<&Project> for ProjectDto {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            first_hypotheses: project.first_hypotheses.clone(),
            status: Some(project.status.as_wire().to_owned()),
            create_date: None,
            cohort_id: project.cohort_id,
            coordinator: None,
            researchers: Vec::new(),
        }
    }
}

// ── Cohorts ─────────────────────────────────────────────────────────

impl From<CohortNodeDto> for CohortNode {
    fn from(dto: CohortNodeDto) -> Self {
        match dto.node_type.as_str() {
            "AQL" => {
                let parameters = dto
                    .parameters
                    .map(|map| map.into_iter().collect())
                    .unwrap_or_default();
                match dto.query_id {
                    Some(aql_id) => Self::Query { aql_id, parameters },
                    None => {
                        warn!("AQL cohort node without queryId, treating as empty group");
                        empty_group()
                    }
                }
            }
            "GROUP" => {
                let operator = dto
                    .operator
                    .as_deref()
                    .and_then(GroupOperator::from_wire)
                    .unwrap_or(GroupOperator::And);
                Self::Group {
                    operator,
                    children: dto.children.into_iter().map(CohortNode::from).collect(),
                }
            }
            other => {
                warn!(node_type = %other, "unknown cohort node type, treating as empty group");
                empty_group()
            }
        }
    }
}

fn empty_group() -> CohortNode {
    CohortNode::Group {
        operator: GroupOperator::And,
        children: Vec::new(),
    }
}

impl From<&CohortNode> for CohortNodeDto {
    fn from(node: &CohortNode) -> Self {
        match node {
            CohortNode::Group { operator, children } => Self {
                node_type: "GROUP".to_owned(),
                operator: Some(operator.as_wire().to_owned()),
                children: children.iter().map(CohortNodeDto::from).collect(),
                query_id: None,
                parameters: None,
            },
            CohortNode::Query { aql_id, parameters } => Self {
                node_type: "AQL".to_owned(),
                operator: None,
                children: Vec::new(),
                query_id: Some(*aql_id),
                parameters: if parameters.is_empty() {
                    None
                } else {
                    Some(
                        parameters
                            .iter()
                            .map(|(k, v)| (k.clone(), v.clone()))
                            .collect(),
                    )
                },
            },
        }
    }
}

impl From<CohortDto> for Cohort {
    fn from(dto: CohortDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            project_id: dto.project_id,
            root: CohortNode::from(dto.cohort_group),
        }
    }
}

impl From<&Cohort> for CohortDto {
    fn from(cohort: &Cohort) -> Self {
        Self {
            id: cohort.id,
            name: cohort.name.clone(),
            project_id: cohort.project_id,
            cohort_group: CohortNodeDto::from(&cohort.root),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_are_dropped() {
        let dto = UserDto {
            id: "u-1".into(),
            first_name: None,
            last_name: None,
            email: None,
            created_timestamp: Some(1_718_445_000_000),
            organization: None,
            roles: vec!["RESEARCHER".into(), "uma_authorization".into()],
            approved: true,
        };
        let user = User::from(dto);
        assert_eq!(user.roles, vec![Role::Researcher]);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn validator_positions_parse_with_fallback() {
        let dto = AqlValidationDto {
            valid: false,
            message: Some("boom".into()),
            start_line: Some("3".into()),
            start_column: Some("not-a-number".into()),
        };
        let outcome = ValidationOutcome::from(dto);
        assert_eq!(outcome.start_line, 3);
        assert_eq!(outcome.start_column, 1);
    }

    #[test]
    fn cohort_tree_round_trips_through_wire_shape() {
        let root = CohortNode::Group {
            operator: GroupOperator::Or,
            children: vec![CohortNode::Query {
                aql_id: 5,
                parameters: std::collections::BTreeMap::new(),
            }],
        };
        let dto = CohortNodeDto::from(&root);
        assert_eq!(dto.node_type, "GROUP");
        assert_eq!(dto.children.len(), 1);
        assert_eq!(dto.children[0].query_id, Some(5));

        let back = CohortNode::from(dto);
        assert_eq!(back, root);
    }

    #[test]
    fn unknown_status_collapses_to_draft() {
        let dto = ProjectDto {
            id: Some(1),
            name: "p".into(),
            description: None,
            first_hypotheses: None,
            status: Some("ARCHIVED".into()),
            create_date: None,
            cohort_id: None,
            coordinator: None,
            researchers: vec![],
        };
        assert_eq!(Project::from(dto).status, ProjectStatus::Draft);
    }
}
