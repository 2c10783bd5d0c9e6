use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Lead, Project, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl DealStatus {
    pub const ALL: [DealStatus; 6] = [
        DealStatus::Draft,
        DealStatus::Pending,
        DealStatus::Approved,
        DealStatus::Rejected,
        DealStatus::Cancelled,
        DealStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Draft => "draft",
            DealStatus::Pending => "pending",
            DealStatus::Approved => "approved",
            DealStatus::Rejected => "rejected",
            DealStatus::Cancelled => "cancelled",
            DealStatus::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    pub id: i64,
    pub deal_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub lead_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead: Option<Lead>,
    #[serde(default)]
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default)]
    pub agent_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<User>,
    #[serde(default)]
    pub deal_value: f64,
    #[serde(default)]
    pub commission_rate: f64,
    #[serde(default)]
    pub commission_amount: f64,
    #[serde(default)]
    pub status: DealStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<String>,
    #[serde(default)]
    pub payment_schedule: Vec<PaymentSchedule>,
    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Card heading: explicit title, then notes, then `Deal #id`.
    pub fn heading(&self) -> String {
        self.title
            .as_deref()
            .or(self.notes.as_deref())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Deal #{}", self.id))
    }
}

/// Column of the deals pipeline board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::Lead,
        PipelineStage::Qualified,
        PipelineStage::Proposal,
        PipelineStage::Negotiation,
        PipelineStage::ClosedWon,
        PipelineStage::ClosedLost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Lead => "Lead",
            PipelineStage::Qualified => "Qualified",
            PipelineStage::Proposal => "Proposal",
            PipelineStage::Negotiation => "Negotiation",
            PipelineStage::ClosedWon => "Closed Won",
            PipelineStage::ClosedLost => "Closed Lost",
        }
    }

    /// Deal statuses shown in this column. `pending` appears under both
    /// Qualified and Negotiation.
    pub fn statuses(&self) -> &'static [DealStatus] {
        match self {
            PipelineStage::Lead => &[DealStatus::Draft],
            PipelineStage::Qualified => &[DealStatus::Pending],
            PipelineStage::Proposal => &[DealStatus::Approved],
            PipelineStage::Negotiation => &[DealStatus::Pending],
            PipelineStage::ClosedWon => &[DealStatus::Completed],
            PipelineStage::ClosedLost => &[DealStatus::Cancelled, DealStatus::Rejected],
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            PipelineStage::Lead => "bg-gray-100 text-gray-800",
            PipelineStage::Qualified => "bg-blue-100 text-blue-800",
            PipelineStage::Proposal => "bg-yellow-100 text-yellow-800",
            PipelineStage::Negotiation => "bg-orange-100 text-orange-800",
            PipelineStage::ClosedWon => "bg-green-100 text-green-800",
            PipelineStage::ClosedLost => "bg-red-100 text-red-800",
        }
    }

    pub fn deals<'a>(&self, deals: &'a [Deal]) -> Vec<&'a Deal> {
        let statuses = self.statuses();
        deals.iter().filter(|d| statuses.contains(&d.status)).collect()
    }

    pub fn value(&self, deals: &[Deal]) -> f64 {
        self.deals(deals).iter().map(|d| d.deal_value).sum()
    }
}

/// Summary figures computed from the deals currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DealStats {
    pub total_value: f64,
    pub won_deals: usize,
    pub avg_deal_size: f64,
    pub conversion_rate: f64,
}

impl DealStats {
    pub fn from_deals(deals: &[Deal]) -> Self {
        if deals.is_empty() {
            return Self::default();
        }
        let total_value: f64 = deals.iter().map(|d| d.deal_value).sum();
        let won_deals = deals
            .iter()
            .filter(|d| d.status == DealStatus::Completed)
            .count();
        let count = deals.len() as f64;
        Self {
            total_value,
            won_deals,
            avg_deal_size: total_value / count,
            conversion_rate: won_deals as f64 / count * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(id: i64, status: DealStatus, value: f64) -> Deal {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "status": status.as_str(),
            "dealValue": value,
        }))
        .unwrap()
    }

    #[test]
    fn test_pipeline_groups_by_status() {
        let deals = vec![
            deal(1, DealStatus::Draft, 100.0),
            deal(2, DealStatus::Pending, 200.0),
            deal(3, DealStatus::Rejected, 50.0),
            deal(4, DealStatus::Cancelled, 25.0),
        ];
        assert_eq!(PipelineStage::Lead.deals(&deals).len(), 1);
        assert_eq!(PipelineStage::Qualified.value(&deals), 200.0);
        assert_eq!(PipelineStage::Negotiation.value(&deals), 200.0);
        assert_eq!(PipelineStage::ClosedLost.value(&deals), 75.0);
        assert!(PipelineStage::Proposal.deals(&deals).is_empty());
    }

    #[test]
    fn test_stats_count_completed_as_won() {
        let deals = vec![
            deal(1, DealStatus::Completed, 300.0),
            deal(2, DealStatus::Pending, 100.0),
        ];
        let stats = DealStats::from_deals(&deals);
        assert_eq!(stats.total_value, 400.0);
        assert_eq!(stats.won_deals, 1);
        assert_eq!(stats.avg_deal_size, 200.0);
        assert_eq!(stats.conversion_rate, 50.0);
        assert_eq!(DealStats::from_deals(&[]), DealStats::default());
    }

    #[test]
    fn test_heading_falls_back_to_id() {
        let mut d = deal(7, DealStatus::Draft, 1.0);
        assert_eq!(d.heading(), "Deal #7");
        d.notes = Some("Villa Purchase".into());
        assert_eq!(d.heading(), "Villa Purchase");
    }
}
