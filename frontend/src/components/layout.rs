//! 已登录页面的外壳：侧边栏 + 顶栏 + 内容区

use estatecrm::route::visible_nav;
use estatecrm_shared::format;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::web::router::{Link, use_router};

/// 按角色过滤的侧边导航
#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let session = auth.session;

    view! {
        <aside class="w-64 min-h-screen bg-base-100 shadow-xl">
            <div class="p-6 text-2xl font-bold text-primary">"EstateCRM"</div>
            <ul class="menu p-4 gap-1">
                {move || {
                    let current = router.current_route().get();
                    session.with(visible_nav)
                        .into_iter()
                        .map(|item| {
                            let class = if item.is_active(current) { "active" } else { "" };
                            view! {
                                <li>
                                    <Link to=item.route.to_path() class=class>{item.label}</Link>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </aside>
    }
}

#[component]
pub fn DashboardLayout(#[prop(into)] title: String, children: Children) -> impl IntoView {
    let auth = use_auth();
    let user_name = auth.user_name();
    let role = {
        let session = auth.session;
        move || session.with(|s| s.role().map(|r| r.label()).unwrap_or_default())
    };
    let api = auth.api.clone();
    let on_logout = move |_| {
        let api = api.clone();
        spawn_local(async move {
            api.auth().sign_out().await;
        });
    };

    view! {
        <div class="flex min-h-screen bg-base-200 font-sans">
            <Sidebar />
            <div class="flex-1 flex flex-col">
                <div class="navbar bg-base-100 shadow px-6">
                    <div class="flex-1">
                        <h1 class="text-xl font-semibold">{title}</h1>
                    </div>
                    <div class="flex-none gap-3">
                        <div class="avatar placeholder">
                            <div class="bg-neutral text-neutral-content w-10 rounded-full">
                                <span>{move || format::initials(&user_name.get())}</span>
                            </div>
                        </div>
                        <div class="hidden md:flex flex-col text-sm">
                            <span class="font-medium">{move || user_name.get()}</span>
                            <span class="text-base-content/60">{role}</span>
                        </div>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm">"Logout"</button>
                    </div>
                </div>
                <main class="p-4 md:p-8 space-y-6">{children()}</main>
            </div>
        </div>
    }
}
