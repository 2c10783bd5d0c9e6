//! 认证模块
//!
//! 会话本身由核心库的 `SessionContext` 管理（LocalStorage 持久化、401 整页跳转）。
//! 这里只把它镜像到一个信号里，供路由守卫与侧边栏使用。

use estatecrm::{ApiClient, ClientConfig, Session, SessionContext};
use leptos::prelude::*;
use tracing::{error, warn};

use crate::web::{FetchHttpClient, LocalStorage, LocationNavigator};

/// 浏览器中使用的 API 客户端
pub type Api = ApiClient<FetchHttpClient>;

/// 认证上下文
///
/// 通过 Context 在组件间共享，克隆开销很小。
#[derive(Clone)]
pub struct AuthContext {
    pub api: Api,
    /// 会话镜像（只读使用）
    pub session: RwSignal<Session>,
}

impl AuthContext {
    /// 创建上下文并从 LocalStorage 恢复会话
    pub fn new() -> Self {
        let config = ClientConfig::compiled().unwrap_or_else(|e| {
            error!(error = %e, "invalid build configuration, using defaults");
            ClientConfig::default()
        });
        let context = SessionContext::new(LocalStorage, LocationNavigator);
        let session = RwSignal::new(context.snapshot());

        context.subscribe(move |next| {
            if session.try_set(next.clone()).is_some() {
                warn!("session changed after the app was unmounted");
            }
        });

        Self {
            api: ApiClient::new(config, FetchHttpClient, context),
            session,
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Session::is_authenticated))
    }

    /// 当前用户名，未登录时为空
    pub fn user_name(&self) -> Signal<String> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.user().map(|u| u.name.clone()).unwrap_or_default()))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        warn!("AuthContext missing from context");
        let auth = AuthContext::new();
        provide_context(auth.clone());
        auth
    })
}
