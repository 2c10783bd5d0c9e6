use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Campaign lifecycle as the numeric code the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignStatus {
    Inactive,
    Active,
    Paused,
    Completed,
    Unknown(i32),
}

impl CampaignStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => CampaignStatus::Inactive,
            1 => CampaignStatus::Active,
            2 => CampaignStatus::Paused,
            3 => CampaignStatus::Completed,
            other => CampaignStatus::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            CampaignStatus::Inactive => 0,
            CampaignStatus::Active => 1,
            CampaignStatus::Paused => 2,
            CampaignStatus::Completed => 3,
            CampaignStatus::Unknown(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Inactive => "Inactive",
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Completed => "Completed",
            CampaignStatus::Unknown(_) => "Unknown",
        }
    }
}

/// Relation counters some list endpoints attach as `_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationCounts {
    pub leads: u32,
    pub sources: u32,
    pub managers: u32,
    pub source_users: u32,
    pub sub_sources: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub is_international: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<RelationCounts>,
}

impl Campaign {
    pub fn status(&self) -> CampaignStatus {
        CampaignStatus::from_code(self.status)
    }

    pub fn is_active(&self) -> bool {
        self.status() == CampaignStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignPerformance {
    pub total_leads: u64,
    pub converted_leads: u64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub roi: f64,
    pub conversion_rate: f64,
    pub cost_per_lead: f64,
    pub cost_per_conversion: f64,
    pub leads_by_status: BTreeMap<String, u64>,
    pub leads_by_source: BTreeMap<String, u64>,
}

/// `{id, name, email}` stub embedded in membership rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignManager {
    #[serde(default)]
    pub id: i64,
    pub user_id: i64,
    pub campaign_id: i64,
    pub user: UserRef,
}
