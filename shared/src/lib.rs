//! Types shared between the dashboard core and the browser frontend.

pub mod date;
pub mod filters;
pub mod format;
pub mod forms;
pub mod models;
pub mod protocol;
pub mod validation;

pub use protocol::{AuthPayload, Envelope, HttpMethod, LoginRequest, Pagination, RegisterRequest};
pub use validation::FieldErrors;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// LocalStorage keys holding the cached session.
pub const STORAGE_KEY_TOKEN: &str = "token";
pub const STORAGE_KEY_USER: &str = "user";

/// Default page size of list screens.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
