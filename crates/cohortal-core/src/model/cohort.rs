// ── Cohort domain types ──
//
// A cohort is a tree of criteria groups whose leaves reference stored
// AQL queries, optionally with parameter bindings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Boolean operator combining the children of a criteria group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupOperator {
    And,
    Or,
    Not,
}

impl GroupOperator {
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }
}

/// One node of the cohort criteria tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CohortNode {
    /// An inner node combining child criteria.
    Group {
        operator: GroupOperator,
        children: Vec<CohortNode>,
    },
    /// A leaf referencing a stored AQL query.
    Query {
        aql_id: i64,
        parameters: BTreeMap<String, Value>,
    },
}

impl CohortNode {
    /// Number of query leaves in this subtree.
    pub fn query_count(&self) -> usize {
        match self {
            Self::Query { .. } => 1,
            Self::Group { children, .. } => children.iter().map(CohortNode::query_count).sum(),
        }
    }

    /// All AQL ids referenced by this subtree, in tree order.
    pub fn referenced_aql_ids(&self) -> Vec<i64> {
        match self {
            Self::Query { aql_id, .. } => vec![*aql_id],
            Self::Group { children, .. } => children
                .iter()
                .flat_map(CohortNode::referenced_aql_ids)
                .collect(),
        }
    }
}

/// A stored cohort definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cohort {
    /// `None` while the cohort only exists in an editor buffer.
    pub id: Option<i64>,
    pub name: Option<String>,
    pub project_id: Option<i64>,
    pub root: CohortNode,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CohortNode {
        CohortNode::Group {
            operator: GroupOperator::And,
            children: vec![
                CohortNode::Query {
                    aql_id: 1,
                    parameters: BTreeMap::new(),
                },
                CohortNode::Group {
                    operator: GroupOperator::Not,
                    children: vec![CohortNode::Query {
                        aql_id: 2,
                        parameters: BTreeMap::new(),
                    }],
                },
            ],
        }
    }

    #[test]
    fn query_count_walks_nested_groups() {
        assert_eq!(sample_tree().query_count(), 2);
    }

    #[test]
    fn referenced_ids_in_tree_order() {
        assert_eq!(sample_tree().referenced_aql_ids(), vec![1, 2]);
    }
}
