//! LocalStorage 与整页跳转封装
//!
//! 使用 `web_sys::Storage` / `Location` 实现核心库的 `SessionStore` 与 `Navigator`。

use estatecrm::session::{Navigator, SessionStore};
use tracing::warn;

/// 本地存储操作封装
///
/// 每次调用都重新获取 `window.localStorage`，本身不持有 JS 对象。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let stored = Self::storage().and_then(|s| s.set_item(key, value).ok());
        if stored.is_none() {
            warn!(key, "localStorage write failed");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(s) = Self::storage() {
            let _ = s.remove_item(key);
        }
    }
}

/// 通过 `location.href` 整页跳转
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn hard_navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            warn!(path, error = ?e, "hard navigation failed");
        }
    }
}
