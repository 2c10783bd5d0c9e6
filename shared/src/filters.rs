//! Typed query filters.
//!
//! Every field is optional; `None` never reaches the query string. Paging
//! is not part of these structs, the list query that wraps them adds it.

use serde::{Deserialize, Serialize};

use crate::date;
use crate::models::CommunicationEntry;
use crate::DEFAULT_PAGE_SIZE;

/// 列表页的查询：分页参数加上该页的筛选条件
///
/// 修改筛选条件会把页码重置为 1。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery<F> {
    pub page: u32,
    pub limit: u32,
    #[serde(flatten)]
    pub filters: F,
}

impl<F: Default> Default for ListQuery<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F> ListQuery<F> {
    pub fn new(filters: F) -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            filters,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn set_filters(&mut self, filters: F) {
        self.filters = filters;
        self.page = 1;
    }

    /// 在原地修改筛选条件，并回到第一页
    pub fn update_filters(&mut self, f: impl FnOnce(&mut F)) {
        f(&mut self.filters);
        self.page = 1;
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_international: Option<bool>,
}

impl CampaignFilters {
    pub fn active() -> Self {
        Self {
            status: Some(1),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl CommunicationFilters {
    /// 在客户端对合并后的沟通记录做筛选
    pub fn matches(&self, entry: &CommunicationEntry) -> bool {
        let wanted = |filter: &Option<String>, actual: &str| {
            filter.as_deref().is_none_or(|f| f.eq_ignore_ascii_case(actual))
        };
        if !wanted(&self.channel, entry.channel.as_str())
            || !wanted(&self.status, entry.status.as_str())
            || !wanted(&self.direction, entry.direction.as_str())
        {
            return false;
        }
        let day = entry.created_at.date_naive();
        if let Some(from) = self.date_from.as_deref().and_then(date::parse_day)
            && day < from
        {
            return false;
        }
        if let Some(to) = self.date_to.as_deref().and_then(date::parse_day)
            && day > to
        {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(term) if !term.is_empty() => [
                Some(entry.lead_name.as_str()),
                Some(entry.agent_name.as_str()),
                entry.subject.as_deref(),
                entry.content.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term)),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Activity logs page by `limit`/`offset` rather than page number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogQuery {
    #[serde(flatten)]
    pub filters: ActivityLogFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ActivityLogQuery {
    pub fn recent(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// One-based `page` of `limit` rows.
    pub fn page(filters: ActivityLogFilters, page: u32, limit: u32) -> Self {
        Self {
            filters,
            limit: Some(limit),
            offset: Some(page.saturating_sub(1) * limit),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserFilters {
    pub fn role(role: crate::models::Role) -> Self {
        Self {
            role: Some(role.as_str().to_owned()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Time window for analytics and report endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl From<crate::models::TimeRange> for DateRange {
    fn from(range: crate::models::TimeRange) -> Self {
        Self {
            range: Some(range.as_str().to_owned()),
            ..Self::default()
        }
    }
}

/// Empty select value means "no filter".
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty() && trimmed != "all").then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_fields_are_omitted() {
        let filters = LeadFilters {
            status_id: Some(2),
            ..LeadFilters::default()
        };
        assert_eq!(serde_json::to_string(&filters).unwrap(), r#"{"statusId":2}"#);
    }

    #[test]
    fn test_activity_page_offsets() {
        let q = ActivityLogQuery::page(ActivityLogFilters::default(), 3, 50);
        assert_eq!(q.offset, Some(100));
        let q = ActivityLogQuery::page(ActivityLogFilters::default(), 0, 50);
        assert_eq!(q.offset, Some(0));
    }

    #[test]
    fn test_select_sentinels() {
        assert_eq!(non_empty(" all "), None);
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("Website").as_deref(), Some("Website"));
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut q = ListQuery::new(LeadFilters::default());
        q.go_to(4);
        q.update_filters(|f| f.search = Some("Asha".into()));
        assert_eq!(q.page, 1);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json, serde_json::json!({ "page": 1, "limit": 10, "search": "Asha" }));
    }
}
