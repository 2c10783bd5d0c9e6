use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_leads: u64,
    pub total_deals: u64,
    pub total_revenue: f64,
    pub conversion_rate: f64,
    pub average_deal_value: f64,
    pub pending_follow_ups: u64,
    pub leads_this_month: u64,
    pub deals_this_month: u64,
    pub revenue_this_month: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadBreakdown {
    #[serde(alias = "source", alias = "status")]
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentLeadCount {
    pub agent: String,
    pub count: u64,
    pub converted: u64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadAnalytics {
    pub total_leads: u64,
    pub new_leads: u64,
    pub converted_leads: u64,
    pub conversion_rate: f64,
    pub leads_by_source: Vec<LeadBreakdown>,
    pub leads_by_status: Vec<LeadBreakdown>,
    pub leads_by_agent: Vec<AgentLeadCount>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentPerformance {
    pub agent_id: i64,
    pub agent_name: String,
    pub total_leads: u64,
    pub converted_leads: u64,
    pub total_deals: u64,
    pub total_revenue: f64,
    pub conversion_rate: f64,
    pub average_deal_value: f64,
    pub total_calls: u64,
    pub total_emails: u64,
    #[serde(rename = "totalSMS")]
    pub total_sms: u64,
    pub performance_score: f64,
}

// Analytics page overview blocks.

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenueSummary {
    pub total: f64,
    pub this_month: f64,
    pub last_month: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadSummary {
    pub total: u64,
    pub this_month: u64,
    pub conversion: f64,
    pub sources: Vec<LeadBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StageSummary {
    pub name: String,
    pub count: u64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealSummary {
    pub total: u64,
    pub won: u64,
    pub pipeline: f64,
    pub avg_size: f64,
    pub stages: Vec<StageSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopPerformer {
    pub name: String,
    pub deals: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSummary {
    pub total: u64,
    pub active: u64,
    pub top_performers: Vec<TopPerformer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommunicationSummary {
    pub calls: u64,
    pub emails: u64,
    pub meetings: u64,
    pub follow_ups: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsOverview {
    pub revenue: RevenueSummary,
    pub leads: LeadSummary,
    pub deals: DealSummary,
    pub agents: AgentSummary,
    pub communication: CommunicationSummary,
}

/// Reporting window offered by the analytics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
            TimeRange::Year => "1y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "Last 7 days",
            TimeRange::Month => "Last 30 days",
            TimeRange::Quarter => "Last 90 days",
            TimeRange::Year => "Last year",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == raw)
    }
}
