use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One job as reported by `/automation/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHealth {
    pub name: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub last_run: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthReport {
    pub is_running: bool,
    pub jobs: Vec<JobHealth>,
}

impl HealthReport {
    pub fn registered_jobs(&self) -> Vec<String> {
        self.jobs.iter().map(|j| j.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

/// Read-only mirror of a scheduled job from `/automation/jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    pub name: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub last_execution: Option<String>,
    #[serde(default)]
    pub next_execution: Option<String>,
    #[serde(default)]
    pub status: JobState,
}

impl From<&JobHealth> for JobDescriptor {
    fn from(job: &JobHealth) -> Self {
        Self {
            name: job.name.clone(),
            schedule: job.schedule.clone(),
            last_execution: job.last_run.clone(),
            next_execution: None,
            status: JobState::Idle,
        }
    }
}

/// Human label for a scheduler job key.
pub fn job_display_name(name: &str) -> &str {
    match name {
        "autoLeadDistribution" => "Auto Lead Distribution",
        "noActivityLeadRotation" => "No Activity Lead Rotation",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityStats {
    pub total_events: u64,
    pub by_type: BTreeMap<String, u64>,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: i64,
    pub event_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject_type: Option<String>,
    #[serde(default)]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub causer_id: Option<i64>,
    #[serde(default)]
    pub properties: Value,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// Event types the job runner records.
pub const EVENT_TYPES: [&str; 5] = [
    "auto_distribution",
    "no_activity_rotation",
    "cron_started",
    "cron_completed",
    "cron_failed",
];

pub fn event_type_label(event_type: &str) -> String {
    crate::format::snake_to_title(event_type)
}

pub fn event_type_class(event_type: &str) -> &'static str {
    match event_type {
        "auto_distribution" => "text-blue-700 bg-blue-100",
        "no_activity_rotation" => "text-purple-700 bg-purple-100",
        "cron_started" => "text-green-700 bg-green-100",
        "cron_failed" => "text-red-700 bg-red-100",
        _ => "text-gray-700 bg-gray-100",
    }
}

// =========================================================
// Settings
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingCategory {
    Automation,
    OfficeHours,
    LeadAssignment,
}

impl SettingCategory {
    pub const ALL: [SettingCategory; 3] = [
        SettingCategory::Automation,
        SettingCategory::OfficeHours,
        SettingCategory::LeadAssignment,
    ];
}

/// Grouped key/value settings as served by `/automation/settings`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutomationSettings {
    pub automation: Map<String, Value>,
    pub office_hours: Map<String, Value>,
    pub lead_assignment: Map<String, Value>,
}

impl AutomationSettings {
    pub fn group(&self, category: SettingCategory) -> &Map<String, Value> {
        match category {
            SettingCategory::Automation => &self.automation,
            SettingCategory::OfficeHours => &self.office_hours,
            SettingCategory::LeadAssignment => &self.lead_assignment,
        }
    }

    pub fn group_mut(&mut self, category: SettingCategory) -> &mut Map<String, Value> {
        match category {
            SettingCategory::Automation => &mut self.automation,
            SettingCategory::OfficeHours => &mut self.office_hours,
            SettingCategory::LeadAssignment => &mut self.lead_assignment,
        }
    }

    pub fn get(&self, category: SettingCategory, key: &str) -> Option<&Value> {
        self.group(category).get(key)
    }

    pub fn set(&mut self, category: SettingCategory, key: &str, value: Value) {
        self.group_mut(category).insert(key.to_owned(), value);
    }

    /// Entries of `self` whose value differs from `original`, in category order.
    pub fn changes_from(&self, original: &AutomationSettings) -> Vec<SettingUpdate> {
        let mut updates = Vec::new();
        for category in SettingCategory::ALL {
            let before = original.group(category);
            for (key, value) in self.group(category) {
                if before.get(key) != Some(value) {
                    updates.push(SettingUpdate {
                        key: key.clone(),
                        value: value.clone(),
                        value_type: SettingValueType::of(value),
                    });
                }
            }
        }
        updates
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingValueType {
    Boolean,
    Integer,
    String,
}

impl SettingValueType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => SettingValueType::Boolean,
            Value::Number(_) => SettingValueType::Integer,
            _ => SettingValueType::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingUpdate {
    pub key: String,
    pub value: Value,
    pub value_type: SettingValueType,
}

/// Body of `PUT /automation/settings/:key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingValue {
    pub value: Value,
    #[serde(rename = "type")]
    pub value_type: SettingValueType,
}

impl From<&SettingUpdate> for SettingValue {
    fn from(update: &SettingUpdate) -> Self {
        Self {
            value: update.value.clone(),
            value_type: update.value_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingInput {
    Toggle(bool),
    Number(i64),
    Time(&'static str),
    Days,
}

/// One editable control on the automation settings page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingField {
    pub category: SettingCategory,
    pub key: &'static str,
    pub label: &'static str,
    pub input: SettingInput,
}

impl SettingField {
    const fn new(
        category: SettingCategory,
        key: &'static str,
        label: &'static str,
        input: SettingInput,
    ) -> Self {
        Self {
            category,
            key,
            label,
            input,
        }
    }

    /// Value shown when the server has no entry for this key.
    pub fn default_value(&self) -> Value {
        match self.input {
            SettingInput::Toggle(b) => Value::Bool(b),
            SettingInput::Number(n) => Value::from(n),
            SettingInput::Time(t) => Value::from(t),
            SettingInput::Days => Value::from(DEFAULT_WORKING_DAYS),
        }
    }

    pub fn current(&self, settings: &AutomationSettings) -> Value {
        settings
            .get(self.category, self.key)
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| self.default_value())
    }
}

pub const DEFAULT_WORKING_DAYS: &str = "1,2,3,4,5";
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Toggle `day` (0 = Sunday) in a comma separated working-days list.
pub fn toggle_working_day(days: &str, day: u8) -> String {
    let mut parsed: Vec<u8> = days
        .split(',')
        .filter_map(|d| d.trim().parse().ok())
        .collect();
    if let Some(pos) = parsed.iter().position(|d| *d == day) {
        parsed.remove(pos);
    } else {
        parsed.push(day);
        parsed.sort_unstable();
    }
    parsed
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsTab {
    General,
    Hours,
    Assignment,
    Rotation,
    Reminders,
    Reports,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 6] = [
        SettingsTab::General,
        SettingsTab::Hours,
        SettingsTab::Assignment,
        SettingsTab::Rotation,
        SettingsTab::Reminders,
        SettingsTab::Reports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::Hours => "Office Hours",
            SettingsTab::Assignment => "Lead Assignment",
            SettingsTab::Rotation => "Rotation Rules",
            SettingsTab::Reminders => "Reminders",
            SettingsTab::Reports => "Reports",
        }
    }

    pub fn fields(&self) -> &'static [SettingField] {
        use SettingCategory::*;
        use SettingInput::*;
        const GENERAL: &[SettingField] = &[
            SettingField::new(Automation, "autoLeaddistribution", "Enable Auto Lead Distribution", Toggle(true)),
            SettingField::new(Automation, "noActivityOnLeadRotation", "Enable No Activity Lead Rotation", Toggle(true)),
            SettingField::new(Automation, "enableCallReminders", "Enable Call Reminders", Toggle(true)),
            SettingField::new(Automation, "enableMeetingReminders", "Enable Meeting Reminders", Toggle(true)),
            SettingField::new(Automation, "queue_user_id", "Queue User ID", Number(821)),
            SettingField::new(Automation, "fallback_admin_id", "Fallback Admin ID", Number(1)),
        ];
        const HOURS: &[SettingField] = &[
            SettingField::new(OfficeHours, "standard_working_from_time", "Working Hours Start", Time("09:00")),
            SettingField::new(OfficeHours, "standard_working_to_time", "Working Hours End", Time("18:00")),
            SettingField::new(OfficeHours, "working_days", "Working Days", Days),
        ];
        const ASSIGNMENT: &[SettingField] = &[
            SettingField::new(LeadAssignment, "max_leads_per_agent", "Max Leads Per Agent", Number(50)),
            SettingField::new(LeadAssignment, "fresh_lead_priority", "Fresh Lead Priority", Number(10)),
            SettingField::new(LeadAssignment, "max_assignment_attempts", "Max Assignment Attempts", Number(5)),
            SettingField::new(LeadAssignment, "fresh_lead_threshold", "Fresh Lead Threshold", Number(2)),
        ];
        const ROTATION: &[SettingField] = &[
            SettingField::new(Automation, "noActivityOnLeadRotation", "Enable No Activity Rotation", Toggle(true)),
            SettingField::new(Automation, "noActivityTimeDuration", "No Activity Timeout (minutes)", Number(30)),
            SettingField::new(Automation, "enableNoAnswerRotation", "Enable No Answer Rotation", Toggle(true)),
            SettingField::new(Automation, "enableNotInterestedRotation", "Enable Not Interested Rotation", Toggle(true)),
            SettingField::new(Automation, "maxNotInterestedAttempts", "Max Not Interested Attempts", Number(3)),
        ];
        const REMINDERS: &[SettingField] = &[
            SettingField::new(Automation, "enableCallReminders", "Enable Call Reminders", Toggle(true)),
            SettingField::new(Automation, "callReminderMinutes", "Call Reminder Time (minutes)", Number(5)),
            SettingField::new(Automation, "enableMeetingReminders", "Enable Meeting Reminders", Toggle(true)),
            SettingField::new(Automation, "meetingReminderMinutes", "Meeting Reminder Time (minutes)", Number(30)),
        ];
        const REPORTS: &[SettingField] = &[
            SettingField::new(Automation, "enableDailyReports", "Enable Daily Reports", Toggle(true)),
            SettingField::new(Automation, "dailyReportTime", "Report Send Time", Time("08:00")),
            SettingField::new(Automation, "includeTeamMetrics", "Include Team Metrics", Toggle(true)),
        ];
        match self {
            SettingsTab::General => GENERAL,
            SettingsTab::Hours => HOURS,
            SettingsTab::Assignment => ASSIGNMENT,
            SettingsTab::Rotation => ROTATION,
            SettingsTab::Reminders => REMINDERS,
            SettingsTab::Reports => REPORTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changes_carry_value_type() {
        let original: AutomationSettings = serde_json::from_value(json!({
            "automation": {"autoLeaddistribution": true, "queue_user_id": 821},
            "officeHours": {"standard_working_from_time": "09:00"},
            "leadAssignment": {}
        }))
        .unwrap();
        let mut edited = original.clone();
        edited.set(SettingCategory::Automation, "autoLeaddistribution", json!(false));
        edited.set(SettingCategory::OfficeHours, "standard_working_from_time", json!("10:00"));
        edited.set(SettingCategory::LeadAssignment, "max_leads_per_agent", json!(40));

        let updates = edited.changes_from(&original);
        let summary: Vec<_> = updates
            .iter()
            .map(|u| (u.key.as_str(), u.value_type))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("autoLeaddistribution", SettingValueType::Boolean),
                ("standard_working_from_time", SettingValueType::String),
                ("max_leads_per_agent", SettingValueType::Integer),
            ]
        );
        assert!(original.changes_from(&original).is_empty());
    }

    #[test]
    fn test_working_days_toggle_keeps_order() {
        assert_eq!(toggle_working_day("1,2,3,4,5", 3), "1,2,4,5");
        assert_eq!(toggle_working_day("1,5", 0), "0,1,5");
        assert_eq!(toggle_working_day("", 6), "6");
    }

    #[test]
    fn test_field_falls_back_to_default() {
        let field = SettingsTab::General.fields()[4];
        assert_eq!(field.key, "queue_user_id");
        assert_eq!(field.current(&AutomationSettings::default()), json!(821));
    }

    #[test]
    fn test_health_lists_registered_jobs() {
        let report: HealthReport = serde_json::from_value(json!({
            "isRunning": true,
            "jobs": [
                {"name": "autoLeadDistribution", "schedule": "*/15 * * * *", "lastRun": null},
                {"name": "noActivityLeadRotation", "schedule": "*/5 * * * *"}
            ]
        }))
        .unwrap();
        assert_eq!(
            report.registered_jobs(),
            vec!["autoLeadDistribution", "noActivityLeadRotation"]
        );
        assert_eq!(job_display_name(&report.jobs[1].name), "No Activity Lead Rotation");
        assert_eq!(job_display_name("custom"), "custom");
    }
}
