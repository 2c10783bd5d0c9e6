use serde::{Deserialize, Serialize};

use crate::models::User;

/// HTTP methods used by the dashboard API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// Response envelope
// =========================================================

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Page count derived from `total`, never less than one.
    pub fn page_count(&self) -> u32 {
        if self.total_pages > 0 {
            return self.total_pages;
        }
        if self.limit == 0 {
            return 1;
        }
        (self.total.div_ceil(self.limit as u64) as u32).max(1)
    }
}

/// The body shape every backend endpoint answers with.
///
/// `data` is optional on the wire; unit-like endpoints (delete, trigger)
/// usually omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
            pagination: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: None,
            pagination: None,
        }
    }

    /// Best human-readable reason for a failed envelope.
    pub fn reason(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

// =========================================================
// Auth payloads
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// `data` of a successful login or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_data_decodes() {
        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!env.success);
        assert_eq!(env.data, None);
        assert_eq!(env.reason(), Some("nope"));
    }

    #[test]
    fn test_reason_falls_back_to_error_field() {
        let env: Envelope<()> =
            serde_json::from_str(r#"{"success":false,"error":"boom"}"#).unwrap();
        assert_eq!(env.reason(), Some("boom"));
    }

    #[test]
    fn test_page_count_prefers_server_value() {
        let p = Pagination {
            page: 1,
            limit: 10,
            total: 95,
            total_pages: 0,
        };
        assert_eq!(p.page_count(), 10);
        let p = Pagination {
            total_pages: 3,
            ..p
        };
        assert_eq!(p.page_count(), 3);
        assert_eq!(Pagination::default().page_count(), 1);
    }
}
