//! 表单校验
//!
//! 所有校验在发请求之前完成；失败时返回按字段名索引的错误表，
//! 页面把错误显示在对应输入框下方。

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static PHONE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[\d\s+()-]+$").ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

/// Characters allowed in a phone input: digits, spaces, `+ ( ) -`.
pub fn is_valid_phone_format(phone: &str) -> bool {
    PHONE.as_ref().is_some_and(|re| re.is_match(phone))
}

/// Ten digits, or twelve starting with the `91` country code.
pub fn is_valid_indian_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    digits.len() == 10 || (digits.len() == 12 && digits.starts_with("91"))
}

/// Field name to message, keyed by the camelCase wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_owned(), message.into());
    }

    /// 用户修改字段后清掉该字段的错误
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    pub fn summary(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join(" ")
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join(", "))
    }
}

pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, message);
        false
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_phone_patterns() {
        assert!(is_valid_email("john.smith@email.com"));
        assert!(!is_valid_email("john smith@email.com"));
        assert!(!is_valid_email("john@localhost"));
        assert!(is_valid_phone_format("+91 (98765) 43210"));
        assert!(!is_valid_phone_format("98765x43210"));
        assert!(is_valid_indian_phone("+91 98765 43210"));
        assert!(!is_valid_indian_phone("12345"));
    }

    #[test]
    fn test_into_result_reports_errors() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.clone().into_result(1), Ok(1));
        errors.insert("name", "Name is required");
        assert_eq!(errors.get("name"), Some("Name is required"));
        errors.clear("name");
        assert!(errors.is_empty());
    }
}
