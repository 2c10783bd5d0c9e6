//! EstateCRM 管理后台前端
//!
//! 业务逻辑全部在 `estatecrm` 核心库中，这里只负责：
//! - `web`: 浏览器能力（fetch、LocalStorage、定时器、History 路由、下载）
//! - `auth`: 会话镜像与 API 客户端上下文
//! - `hooks`: 把控制器状态接到 Leptos 信号
//! - `components` / `pages`: 视图

pub mod logging;

mod auth;
mod hooks;
mod components {
    pub mod fields;
    pub mod layout;
    pub mod list;
    pub mod ui;
}
mod pages {
    pub mod analytics;
    pub mod auth;
    pub mod automation;
    pub mod campaigns;
    pub mod communication;
    pub mod dashboard;
    pub mod deals;
    pub mod leads;
    pub mod projects;
    pub mod settings;
    pub mod sources;
}

use estatecrm::route::AppRoute;
use leptos::prelude::*;

use crate::auth::AuthContext;
use crate::pages::analytics::AnalyticsPage;
use crate::pages::auth::{ForgotPasswordPage, LoginPage, RegisterPage};
use crate::pages::automation::{AutomationLogsPage, AutomationPage, AutomationSettingsPage};
use crate::pages::campaigns::{CampaignDetailPage, CampaignFormPage, CampaignsPage};
use crate::pages::communication::CommunicationPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::deals::{DealDetailPage, DealFormPage, DealsPage};
use crate::pages::leads::{LeadDetailPage, LeadFormPage, LeadsPage};
use crate::pages::projects::ProjectsPage;
use crate::pages::settings::SettingsPage;
use crate::pages::sources::{SourceDetailPage, SourceFormPage, SourcesPage};

// 浏览器 Web API 的薄封装
pub(crate) mod web {
    mod cell;
    mod download;
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use cell::SignalCell;
    pub use download::save_text;
    pub use http::FetchHttpClient;
    pub use storage::{LocalStorage, LocationNavigator};
    pub use timer::BrowserTimer;
}

use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的页面。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Leads => view! { <LeadsPage /> }.into_any(),
        AppRoute::LeadNew => view! { <LeadFormPage /> }.into_any(),
        AppRoute::LeadDetail(id) => view! { <LeadDetailPage id=id /> }.into_any(),
        AppRoute::LeadEdit(id) => view! { <LeadFormPage id=id /> }.into_any(),
        AppRoute::Deals => view! { <DealsPage /> }.into_any(),
        AppRoute::DealNew => view! { <DealFormPage /> }.into_any(),
        AppRoute::DealDetail(id) => view! { <DealDetailPage id=id /> }.into_any(),
        AppRoute::DealEdit(id) => view! { <DealFormPage id=id /> }.into_any(),
        AppRoute::Projects => view! { <ProjectsPage /> }.into_any(),
        AppRoute::Campaigns => view! { <CampaignsPage /> }.into_any(),
        AppRoute::CampaignNew => view! { <CampaignFormPage /> }.into_any(),
        AppRoute::CampaignDetail(id) => view! { <CampaignDetailPage id=id /> }.into_any(),
        AppRoute::Sources => view! { <SourcesPage /> }.into_any(),
        AppRoute::SourceNew => view! { <SourceFormPage /> }.into_any(),
        AppRoute::SourceDetail(id) => view! { <SourceDetailPage id=id /> }.into_any(),
        AppRoute::Communication => view! { <CommunicationPage /> }.into_any(),
        AppRoute::Analytics => view! { <AnalyticsPage /> }.into_any(),
        AppRoute::Automation => view! { <AutomationPage /> }.into_any(),
        AppRoute::AutomationLogs => view! { <AutomationLogsPage /> }.into_any(),
        AppRoute::AutomationSettings => view! { <AutomationSettingsPage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Dashboard.to_path() class="btn btn-primary mt-6">"Back to Dashboard"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（从 LocalStorage 恢复会话）
    let auth = AuthContext::new();
    provide_context(auth.clone());

    // 2. 认证信号注入路由服务，守卫只依赖它
    let is_authenticated = auth.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
