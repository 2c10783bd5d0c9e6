//! 表单模型
//!
//! 输入框绑定的都是字符串；`validate` 负责校验并转换成发送给后端的
//! 请求体。校验失败时返回 [`FieldErrors`]，不会发出任何请求。

use serde::{Deserialize, Serialize};

use crate::date;
use crate::models::{
    CallStatus, CallType, Campaign, Deal, DealStatus, Lead, PaymentStatus, ProjectStatus, Role,
    Source, SourceKind, TemplateCategory, User,
};
use crate::validation::{self, FieldErrors, require};

fn opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn parse_opt<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

fn show<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// =========================================================
// 登录 / 注册 (Auth)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<crate::LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "email", &self.email, "Email is required");
        require(&mut errors, "password", &self.password, "Password is required");
        errors.into_result(crate::LoginRequest {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<crate::RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        if require(&mut errors, "email", &self.email, "Email is required")
            && !validation::is_valid_email(self.email.trim())
        {
            errors.insert("email", "Invalid email format");
        }
        check_new_password(&mut errors, &self.password, &self.confirm_password);
        errors.into_result(crate::RegisterRequest {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            role: None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        if require(&mut errors, "email", &self.email, "Email is required")
            && !validation::is_valid_email(self.email.trim())
        {
            errors.insert("email", "Invalid email format");
        }
        errors.into_result(self.email.trim().to_owned())
    }
}

fn check_new_password(errors: &mut FieldErrors, password: &str, confirm: &str) {
    if password != confirm {
        errors.insert("confirmPassword", "New passwords do not match.");
    } else if password.chars().count() < 6 {
        errors.insert("newPassword", "Password must be at least 6 characters long.");
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChangeForm {
    pub fn validate(&self) -> Result<PasswordChange, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_new_password(&mut errors, &self.new_password, &self.confirm_password);
        errors.into_result(PasswordChange {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ProfileUpdate, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        if require(&mut errors, "email", &self.email, "Email is required")
            && !validation::is_valid_email(self.email.trim())
        {
            errors.insert("email", "Invalid email format");
        }
        errors.into_result(ProfileUpdate {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: opt(&self.phone),
        })
    }
}

// =========================================================
// 线索 (Lead)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub alternate_phone: String,
    pub source: String,
    pub status_id: String,
    pub assigned_to_id: String,
    pub budget: String,
    pub requirements: String,
    pub notes: String,
    pub next_follow_up: String,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            alternate_phone: String::new(),
            source: String::new(),
            status_id: "1".to_owned(),
            assigned_to_id: String::new(),
            budget: String::new(),
            requirements: String::new(),
            notes: String::new(),
            next_follow_up: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<String>,
    pub source: String,
    pub status_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<String>,
}

impl LeadForm {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            alternate_phone: lead.alternate_phone.clone().unwrap_or_default(),
            source: lead.source.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
            status_id: lead.status_id.to_string(),
            assigned_to_id: show(lead.assigned_to_id),
            budget: show(lead.budget),
            requirements: lead.requirements.clone().unwrap_or_default(),
            notes: lead.notes.clone().unwrap_or_default(),
            next_follow_up: lead.next_follow_up.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<LeadPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        if require(&mut errors, "email", &self.email, "Email is required")
            && !validation::is_valid_email(&self.email)
        {
            errors.insert("email", "Invalid email format");
        }
        if require(&mut errors, "phone", &self.phone, "Phone is required")
            && !validation::is_valid_phone_format(&self.phone)
        {
            errors.insert("phone", "Invalid phone format");
        }
        require(&mut errors, "source", &self.source, "Source is required");
        errors.into_result(LeadPayload {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            alternate_phone: opt(&self.alternate_phone),
            source: self.source.trim().to_owned(),
            status_id: parse_opt(&self.status_id).unwrap_or(1),
            assigned_to_id: parse_opt(&self.assigned_to_id),
            budget: parse_opt(&self.budget),
            requirements: opt(&self.requirements),
            notes: opt(&self.notes),
            next_follow_up: opt(&self.next_follow_up),
        })
    }
}

// =========================================================
// 交易 (Deal)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DealForm {
    pub title: String,
    pub project_id: String,
    pub lead_id: String,
    pub agent_id: String,
    pub status: DealStatus,
    pub deal_value: String,
    pub commission_rate: String,
    pub unit_number: String,
    pub floor_number: String,
    pub carpet_area: String,
    pub closing_date: String,
    pub expected_closing_date: String,
    pub notes: String,
}

impl Default for DealForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            project_id: String::new(),
            lead_id: String::new(),
            agent_id: String::new(),
            status: DealStatus::Pending,
            deal_value: String::new(),
            commission_rate: String::new(),
            unit_number: String::new(),
            floor_number: String::new(),
            carpet_area: String::new(),
            closing_date: String::new(),
            expected_closing_date: String::new(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPayload {
    pub title: String,
    pub project_id: i64,
    pub lead_id: i64,
    pub agent_id: i64,
    pub status: DealStatus,
    pub deal_value: f64,
    pub commission_rate: f64,
    pub commission_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carpet_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_closing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DealForm {
    pub fn from_deal(deal: &Deal) -> Self {
        Self {
            title: deal.title.clone().unwrap_or_default(),
            project_id: deal.project_id.to_string(),
            lead_id: deal.lead_id.to_string(),
            agent_id: deal.agent_id.to_string(),
            status: deal.status,
            deal_value: deal.deal_value.to_string(),
            commission_rate: deal.commission_rate.to_string(),
            closing_date: deal.closing_date.clone().unwrap_or_default(),
            notes: deal.notes.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// `value * rate / 100` once both inputs parse.
    pub fn commission_amount(&self) -> Option<f64> {
        let value: f64 = parse_opt(&self.deal_value)?;
        let rate: f64 = parse_opt(&self.commission_rate)?;
        Some(value * rate / 100.0)
    }

    pub fn validate(&self) -> Result<DealPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title, "Title is required");
        let project_id = parse_opt::<i64>(&self.project_id);
        if project_id.is_none() {
            errors.insert("projectId", "Project is required");
        }
        let lead_id = parse_opt::<i64>(&self.lead_id);
        if lead_id.is_none() {
            errors.insert("leadId", "Lead is required");
        }
        let agent_id = parse_opt::<i64>(&self.agent_id);
        if agent_id.is_none() {
            errors.insert("assignedAgentId", "Agent is required");
        }
        let deal_value = parse_opt::<f64>(&self.deal_value).filter(|v| *v > 0.0);
        if deal_value.is_none() {
            errors.insert("dealValue", "Valid deal value is required");
        }
        let rate = parse_opt::<f64>(&self.commission_rate).filter(|r| (0.0..=100.0).contains(r));
        if rate.is_none() {
            errors.insert("commissionRate", "Commission rate must be between 0 and 100");
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        let deal_value = deal_value.unwrap_or_default();
        let commission_rate = rate.unwrap_or_default();
        Ok(DealPayload {
            title: self.title.trim().to_owned(),
            project_id: project_id.unwrap_or_default(),
            lead_id: lead_id.unwrap_or_default(),
            agent_id: agent_id.unwrap_or_default(),
            status: self.status,
            deal_value,
            commission_rate,
            commission_amount: deal_value * commission_rate / 100.0,
            unit_number: opt(&self.unit_number),
            floor_number: parse_opt(&self.floor_number),
            carpet_area: parse_opt(&self.carpet_area),
            closing_date: opt(&self.closing_date),
            expected_closing_date: opt(&self.expected_closing_date),
            notes: opt(&self.notes),
        })
    }
}

// =========================================================
// 营销活动 (Campaign)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignForm {
    pub name: String,
    pub secondary_name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub status: String,
    pub is_international: bool,
}

impl Default for CampaignForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            secondary_name: String::new(),
            description: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            budget: String::new(),
            status: "1".to_owned(),
            is_international: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub status: i32,
    pub is_international: bool,
}

impl CampaignForm {
    pub fn from_campaign(campaign: &Campaign) -> Self {
        let day = |raw: &Option<String>| {
            raw.as_deref()
                .and_then(date::parse)
                .map(|d| date::iso_day(&d))
                .unwrap_or_default()
        };
        Self {
            name: campaign.name.clone(),
            secondary_name: campaign.secondary_name.clone().unwrap_or_default(),
            description: campaign.description.clone().unwrap_or_default(),
            start_date: day(&campaign.start_date),
            end_date: day(&campaign.end_date),
            budget: show(campaign.budget),
            status: campaign.status.to_string(),
            is_international: campaign.is_international,
        }
    }

    pub fn validate(&self) -> Result<CampaignPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Campaign name is required");
        let budget = opt(&self.budget);
        if budget.as_deref().is_some_and(|b| b.parse::<f64>().is_err()) {
            errors.insert("budget", "Budget must be a valid number");
        }
        if let (Some(start), Some(end)) = (date::parse(&self.start_date), date::parse(&self.end_date))
            && end < start
        {
            errors.insert("endDate", "End date must be after start date");
        }
        errors.into_result(CampaignPayload {
            name: self.name.trim().to_owned(),
            secondary_name: opt(&self.secondary_name),
            description: opt(&self.description),
            start_date: date::to_rfc3339(&self.start_date),
            end_date: date::to_rfc3339(&self.end_date),
            budget: budget.and_then(|b| b.parse().ok()),
            status: parse_opt(&self.status).unwrap_or(1),
            is_international: self.is_international,
        })
    }
}

// =========================================================
// 来源 (Source)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SourceForm {
    pub name: String,
    pub kind: SourceKind,
    pub campaign_id: String,
    pub is_active: bool,
    pub run_all_time: bool,
    pub is_croned: bool,
    pub rotation_type: String,
    pub priority: String,
}

impl Default for SourceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: SourceKind::Normal,
            campaign_id: String::new(),
            is_active: true,
            run_all_time: false,
            is_croned: false,
            rotation_type: "round_robin".to_owned(),
            priority: "1".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,
    pub is_active: bool,
    pub run_all_time: bool,
    pub is_croned: bool,
    pub rotation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl SourceForm {
    pub fn from_source(source: &Source) -> Self {
        Self {
            name: source.name.clone(),
            kind: source
                .kind
                .as_deref()
                .and_then(SourceKind::parse)
                .unwrap_or_default(),
            campaign_id: show(source.campaign_id),
            is_active: source.is_active,
            run_all_time: source.run_all_time,
            is_croned: source.is_croned,
            rotation_type: source
                .rotation_type
                .clone()
                .unwrap_or_else(|| "round_robin".to_owned()),
            priority: show(source.priority),
        }
    }

    pub fn validate(&self) -> Result<SourcePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Source name is required");
        let campaign_id = parse_opt::<i64>(&self.campaign_id);
        if self.kind == SourceKind::Campaign && campaign_id.is_none() {
            errors.insert("campaignId", "Campaign is required for Campaign type sources");
        }
        let priority = opt(&self.priority);
        if priority.as_deref().is_some_and(|p| p.parse::<i32>().is_err()) {
            errors.insert("priority", "Priority must be a valid number");
        }
        errors.into_result(SourcePayload {
            name: self.name.trim().to_owned(),
            kind: self.kind.as_str().to_owned(),
            campaign_id,
            is_active: self.is_active,
            run_all_time: self.run_all_time,
            is_croned: self.is_croned,
            rotation_type: self.rotation_type.clone(),
            priority: priority.and_then(|p| p.parse().ok()),
        })
    }
}

/// Body for creating or renaming a sub-source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSourcePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// =========================================================
// 沟通 (Communication)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub lead_id: i64,
    pub phone_number: String,
    pub message: String,
}

// =========================================================
// 其他请求体 (Other payloads)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub developer_id: i64,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_units: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    pub status: ProjectStatus,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub amount: f64,
    pub due_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLogPayload {
    pub lead_id: i64,
    pub phone_number: String,
    pub call_type: CallType,
    pub status: CallStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplatePayload {
    pub name: String,
    pub subject: String,
    pub html_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    pub category: TemplateCategory,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub lead_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_lead() -> LeadForm {
        LeadForm {
            name: "John Smith".into(),
            email: "john.smith@email.com".into(),
            phone: "+91 98765 43210".into(),
            source: "Website".into(),
            budget: "5000000".into(),
            ..LeadForm::default()
        }
    }

    #[test]
    fn test_lead_requires_name() {
        let form = LeadForm {
            name: "  ".into(),
            ..valid_lead()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_lead_payload_parses_numbers() {
        let payload = valid_lead().validate().unwrap();
        assert_eq!(payload.status_id, 1);
        assert_eq!(payload.budget, Some(5_000_000.0));
        assert_eq!(payload.notes, None);
    }

    #[test]
    fn test_edited_lead_keeps_source_name() {
        let lead: Lead = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Priya Nair",
            "email": "priya@example.com",
            "phone": "+971 50 123 4567",
            "source": { "id": 7, "name": "Referral" },
            "statusId": 3,
            "assignedToId": 9,
        }))
        .unwrap();

        let form = LeadForm::from_lead(&lead);
        assert_eq!(form.source, "Referral");

        let payload = form.validate().unwrap();
        assert_eq!(payload.source, "Referral");
        assert_eq!(payload.status_id, 3);
        assert_eq!(payload.assigned_to_id, Some(9));
    }

    #[test]
    fn test_lead_format_errors() {
        let form = LeadForm {
            email: "nope".into(),
            phone: "call me".into(),
            source: String::new(),
            ..valid_lead()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert_eq!(errors.get("phone"), Some("Invalid phone format"));
        assert_eq!(errors.get("source"), Some("Source is required"));
    }

    #[test]
    fn test_deal_commission_is_derived() {
        let form = DealForm {
            title: "3BHK Purchase".into(),
            project_id: "1".into(),
            lead_id: "1".into(),
            agent_id: "1".into(),
            deal_value: "12500000".into(),
            commission_rate: "2.5".into(),
            ..DealForm::default()
        };
        assert_eq!(form.commission_amount(), Some(312_500.0));
        let payload = form.validate().unwrap();
        assert_eq!(payload.commission_amount, 312_500.0);

        let bad = DealForm {
            commission_rate: "120".into(),
            deal_value: "0".into(),
            ..form
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.get("dealValue"), Some("Valid deal value is required"));
        assert_eq!(
            errors.get("commissionRate"),
            Some("Commission rate must be between 0 and 100")
        );
    }

    #[test]
    fn test_campaign_dates_and_budget() {
        let form = CampaignForm {
            name: "Summer Launch".into(),
            budget: "abc".into(),
            start_date: "2024-06-10".into(),
            end_date: "2024-06-01".into(),
            ..CampaignForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("budget"), Some("Budget must be a valid number"));
        assert_eq!(errors.get("endDate"), Some("End date must be after start date"));

        let ok = CampaignForm {
            budget: "250000".into(),
            end_date: "2024-07-01".into(),
            ..form
        }
        .validate()
        .unwrap();
        assert_eq!(ok.start_date.as_deref(), Some("2024-06-10T00:00:00.000Z"));
        assert_eq!(ok.status, 1);
    }

    #[test]
    fn test_campaign_source_needs_campaign() {
        let form = SourceForm {
            name: "Facebook Ads".into(),
            kind: SourceKind::Campaign,
            priority: "high".into(),
            ..SourceForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("campaignId"),
            Some("Campaign is required for Campaign type sources")
        );
        assert_eq!(errors.get("priority"), Some("Priority must be a valid number"));
    }

    #[test]
    fn test_password_rules() {
        let mismatch = PasswordChangeForm {
            current_password: "old".into(),
            new_password: "secret1".into(),
            confirm_password: "secret2".into(),
        };
        assert_eq!(
            mismatch.validate().unwrap_err().get("confirmPassword"),
            Some("New passwords do not match.")
        );
        let short = PasswordChangeForm {
            new_password: "abc".into(),
            confirm_password: "abc".into(),
            ..mismatch
        };
        assert_eq!(
            short.validate().unwrap_err().get("newPassword"),
            Some("Password must be at least 6 characters long.")
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
