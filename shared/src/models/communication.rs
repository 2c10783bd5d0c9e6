use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Lead, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Completed,
    Missed,
    Busy,
    NoAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLog {
    pub id: i64,
    pub lead_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead: Option<Lead>,
    pub agent_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<User>,
    pub phone_number: String,
    pub call_type: CallType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub status: CallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(default)]
    pub call_start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_end_time: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Sent,
    Received,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Failed,
    Pending,
}

/// Text message record; WhatsApp messages share the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsLog {
    pub id: i64,
    pub lead_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead: Option<Lead>,
    pub agent_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<User>,
    pub phone_number: String,
    pub message: String,
    pub direction: MessageDirection,
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

pub type WhatsAppLog = SmsLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Welcome,
    FollowUp,
    Promotion,
    Notification,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub html_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub category: TemplateCategory,
    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Call,
    Email,
    Sms,
    Meeting,
    Whatsapp,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Call,
        Channel::Email,
        Channel::Sms,
        Channel::Meeting,
        Channel::Whatsapp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Call => "call",
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Meeting => "meeting",
            Channel::Whatsapp => "whatsapp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Call => "Call",
            Channel::Email => "Email",
            Channel::Sms => "SMS",
            Channel::Meeting => "Meeting",
            Channel::Whatsapp => "WhatsApp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Scheduled,
    Completed,
    Cancelled,
    Missed,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Scheduled => "scheduled",
            EntryStatus::Completed => "completed",
            EntryStatus::Cancelled => "cancelled",
            EntryStatus::Missed => "missed",
        }
    }
}

/// Row of the unified communication history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub channel: Channel,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub status: EntryStatus,
    pub lead_id: i64,
    pub lead_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_email: Option<String>,
    pub agent_id: i64,
    pub agent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

fn lead_label(lead: Option<&Lead>, lead_id: i64) -> String {
    lead.map(|l| l.name.clone())
        .unwrap_or_else(|| format!("Lead #{lead_id}"))
}

fn agent_label(agent: Option<&User>, agent_id: i64) -> String {
    agent
        .map(|a| a.name.clone())
        .unwrap_or_else(|| format!("Agent #{agent_id}"))
}

impl From<&CallLog> for CommunicationEntry {
    fn from(call: &CallLog) -> Self {
        let direction = match call.call_type {
            CallType::Outgoing => Direction::Outbound,
            CallType::Incoming | CallType::Missed => Direction::Inbound,
        };
        let status = match call.status {
            CallStatus::Completed => EntryStatus::Completed,
            CallStatus::Missed | CallStatus::Busy | CallStatus::NoAnswer => EntryStatus::Missed,
        };
        Self {
            id: call.id,
            channel: Channel::Call,
            direction,
            subject: None,
            content: call.notes.clone(),
            duration: call.duration,
            status,
            lead_id: call.lead_id,
            lead_name: lead_label(call.lead.as_ref(), call.lead_id),
            lead_phone: Some(call.phone_number.clone()),
            lead_email: call.lead.as_ref().map(|l| l.email.clone()),
            agent_id: call.agent_id,
            agent_name: agent_label(call.agent.as_ref(), call.agent_id),
            scheduled_at: None,
            completed_at: call.call_end_time.clone(),
            created_at: call.created_at,
            notes: call.notes.clone(),
            follow_up_required: false,
            follow_up_date: None,
        }
    }
}

impl CommunicationEntry {
    /// SMS 与 WhatsApp 记录共用同一结构，由调用方指定渠道
    pub fn from_message(message: &SmsLog, channel: Channel) -> Self {
        let direction = match message.direction {
            MessageDirection::Sent => Direction::Outbound,
            MessageDirection::Received => Direction::Inbound,
        };
        let status = match message.status {
            MessageStatus::Sent | MessageStatus::Delivered => EntryStatus::Completed,
            MessageStatus::Pending => EntryStatus::Scheduled,
            MessageStatus::Failed => EntryStatus::Cancelled,
        };
        Self {
            id: message.id,
            channel,
            direction,
            subject: None,
            content: Some(message.message.clone()),
            duration: None,
            status,
            lead_id: message.lead_id,
            lead_name: lead_label(message.lead.as_ref(), message.lead_id),
            lead_phone: Some(message.phone_number.clone()),
            lead_email: message.lead.as_ref().map(|l| l.email.clone()),
            agent_id: message.agent_id,
            agent_name: agent_label(message.agent.as_ref(), message.agent_id),
            scheduled_at: None,
            completed_at: None,
            created_at: message.created_at,
            notes: None,
            follow_up_required: false,
            follow_up_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missed_call_becomes_inbound_missed_entry() {
        let call: CallLog = serde_json::from_value(json!({
            "id": 4, "leadId": 9, "agentId": 2, "phoneNumber": "+919876543210",
            "callType": "missed", "status": "no_answer"
        }))
        .unwrap();
        let entry = CommunicationEntry::from(&call);
        assert_eq!(entry.channel, Channel::Call);
        assert_eq!(entry.direction, Direction::Inbound);
        assert_eq!(entry.status, EntryStatus::Missed);
        assert_eq!(entry.lead_name, "Lead #9");
    }

    #[test]
    fn test_whatsapp_keeps_channel() {
        let msg: SmsLog = serde_json::from_value(json!({
            "id": 1, "leadId": 3, "agentId": 2, "phoneNumber": "+91",
            "message": "Brochure attached", "direction": "sent", "status": "pending"
        }))
        .unwrap();
        let entry = CommunicationEntry::from_message(&msg, Channel::Whatsapp);
        assert_eq!(entry.channel, Channel::Whatsapp);
        assert_eq!(entry.status, EntryStatus::Scheduled);
        assert_eq!(entry.content.as_deref(), Some("Brochure attached"));
    }
}
