use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RelationCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    #[default]
    Normal,
    Campaign,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::Normal, SourceKind::Campaign];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Normal => "Normal",
            SourceKind::Campaign => "Campaign",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationType {
    #[default]
    RoundRobin,
    Random,
    Manual,
}

impl RotationType {
    pub const ALL: [RotationType; 3] = [
        RotationType::RoundRobin,
        RotationType::Random,
        RotationType::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationType::RoundRobin => "round_robin",
            RotationType::Random => "random",
            RotationType::Manual => "manual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RotationType::RoundRobin => "Round Robin (Fair Distribution)",
            RotationType::Random => "Random Assignment",
            RotationType::Manual => "Manual Assignment Only",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_international: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignRef>,
    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub run_all_time: bool,
    #[serde(default)]
    pub is_croned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<RelationCounts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default)]
    pub is_excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAgent {
    pub user_id: i64,
    pub source_id: i64,
    #[serde(default)]
    pub next_lead_assign: bool,
    pub user: AgentRef,
}

/// Agent who receives the next lead: the flagged one, else the first.
pub fn next_agent(agents: &[SourceAgent]) -> Option<&SourceAgent> {
    agents
        .iter()
        .find(|a| a.next_lead_assign)
        .or_else(|| agents.first())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSource {
    pub id: i64,
    pub name: String,
    pub source_id: i64,
    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(user_id: i64, next: bool) -> SourceAgent {
        SourceAgent {
            user_id,
            source_id: 1,
            next_lead_assign: next,
            user: AgentRef {
                id: user_id,
                name: format!("Agent {user_id}"),
                email: String::new(),
                availability: None,
                is_excluded: false,
            },
        }
    }

    #[test]
    fn test_next_agent_prefers_flagged_row() {
        let agents = vec![agent(1, false), agent(2, true)];
        assert_eq!(next_agent(&agents).map(|a| a.user_id), Some(2));
        let agents = vec![agent(1, false), agent(2, false)];
        assert_eq!(next_agent(&agents).map(|a| a.user_id), Some(1));
        assert!(next_agent(&[]).is_none());
    }

    #[test]
    fn test_counts_decode_from_underscore_key() {
        let source: Source = serde_json::from_str(
            r#"{"id":3,"name":"Website","type":"Normal","_count":{"leads":4,"sourceUsers":2,"subSources":1}}"#,
        )
        .unwrap();
        let counts = source.counts.unwrap();
        assert_eq!(counts.leads, 4);
        assert_eq!(counts.source_users, 2);
        assert!(source.is_active);
    }
}
