//! 通用展示组件
//!
//! 全部无状态：数据与回调由页面传入。样式使用 DaisyUI。

use estatecrm::config::NOTICE_LIFETIME;
use estatecrm::controller::{Indicator, Notice, Notices, PageError, PageState};
use estatecrm_shared::format;
use leptos::prelude::*;
use uuid::Uuid;

use crate::web::SignalCell;

// ============================================================================
// 容器
// ============================================================================

#[component]
pub fn Card(
    #[prop(optional, into)] title: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let has_title = !title.is_empty();
    view! {
        <div class=format!("card bg-base-100 shadow-xl {class}")>
            <div class="card-body">
                <Show when=move || has_title>
                    <h3 class="card-title">{title.clone()}</h3>
                </Show>
                {children()}
            </div>
        </div>
    }
}

/// 仪表盘上的单个统计值
#[component]
pub fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] desc: Option<Signal<String>>,
    #[prop(default = "text-primary")] tone: &'static str,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value {tone}")>{move || value.get()}</div>
            {desc.map(|d| view! { <div class="stat-desc">{move || d.get()}</div> })}
        </div>
    }
}

/// 表头
#[component]
pub fn TableHead(headers: &'static [&'static str]) -> impl IntoView {
    view! {
        <thead>
            <tr>
                {headers.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
            </tr>
        </thead>
    }
}

/// 详情页中的一项 "标签: 值"
#[component]
pub fn Info(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div>
            <div class="opacity-60">{label}</div>
            <div class="font-medium">{value}</div>
        </div>
    }
}

/// 状态徽章，颜色由状态名决定
#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let class = format!("badge {}", format::status_class(&status));
    let label = format::snake_to_title(&status);
    view! { <span class=class>{label}</span> }
}

// ============================================================================
// 加载与错误
// ============================================================================

#[component]
pub fn Spinner(#[prop(optional, into)] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12 gap-2 text-base-content/60">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            {label}
        </div>
    }
}

/// 旧数据仍在显示时的刷新进度条
#[component]
pub fn RefreshBar() -> impl IntoView {
    view! { <progress class="progress progress-primary w-full h-1" aria-label="Refreshing"></progress> }
}

/// 页面级错误，带手动重试
#[component]
pub fn ErrorBanner(error: PageError, #[prop(optional)] on_retry: Option<Callback<()>>) -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error">
            <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
            <span>{error.message}</span>
            {on_retry.map(|cb| view! {
                <button class="btn btn-sm" on:click=move |_| cb.run(())>"Retry"</button>
            })}
        </div>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] title: String, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    view! {
        <div class="text-center py-12 text-base-content/50">
            <p class="text-lg">{title}</p>
            <div class="mt-4">{children.map(|c| c())}</div>
        </div>
    }
}

/// 图表占位
#[component]
pub fn ChartPlaceholder(#[prop(into)] title: String) -> impl IntoView {
    view! {
        <div class="h-64 rounded-box border-2 border-dashed border-base-300 flex items-center justify-center text-base-content/40">
            {title} " chart"
        </div>
    }
}

// ============================================================================
// 交互
// ============================================================================

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] pages: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    view! {
        <Show when=move || { pages.get() > 1 }>
            <div class="join flex justify-center mt-4">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || page.get() <= 1
                    on:click=move |_| on_change.run(page.get_untracked().saturating_sub(1))
                >
                    "«"
                </button>
                <button class="join-item btn btn-sm btn-disabled">
                    {move || format!("Page {} of {}", page.get(), pages.get())}
                </button>
                <button
                    class="join-item btn btn-sm"
                    disabled=move || page.get() >= pages.get()
                    on:click=move |_| on_change.run(page.get_untracked() + 1)
                >
                    "»"
                </button>
            </div>
        </Show>
    }
}

/// 删除确认对话框；`pending` 为 true 时显示
#[component]
pub fn ConfirmButton(
    #[prop(into)] noun: String,
    #[prop(into)] pending: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || pending.get()>
            <div class="modal modal-open">
                <div class="modal-box">
                    <h3 class="font-bold text-lg">{format!("Delete {noun}")}</h3>
                    <p class="py-4">{format!("Are you sure you want to delete this {}?", noun.to_lowercase())}</p>
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                        <button class="btn btn-error" on:click=move |_| on_confirm.run(())>"Delete"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// 提示队列，每条在 `NOTICE_LIFETIME` 后自动移除
#[component]
pub fn NoticeStack(#[prop(into)] notices: Signal<Notices>, on_dismiss: Callback<Uuid>) -> impl IntoView {
    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || notices.with(|n| n.iter().cloned().collect::<Vec<Notice>>())
                key=|n| n.id
                children=move |notice| {
                    let id = notice.id;
                    set_timeout(move || on_dismiss.run(id), NOTICE_LIFETIME);
                    view! {
                        <div class=format!("alert {} shadow-lg", notice.level.alert_class())>
                            <span>{notice.text}</span>
                            <button class="btn btn-ghost btn-xs" on:click=move |_| on_dismiss.run(id)>"✕"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

// ============================================================================
// 页面状态
// ============================================================================

/// 按加载阶段渲染：无数据时转圈，失败时错误条（带重试），否则交给 `render`
///
/// 重新加载期间旧数据上方显示 `RefreshBar`。
pub fn phased<T, V>(
    state: SignalCell<PageState<T>>,
    retry: Callback<()>,
    render: impl Fn(&T) -> V + Send + Sync + 'static,
) -> impl IntoView
where
    T: Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || {
        state.signal().with(|s| {
            if let Some(error) = s.error() {
                return view! { <ErrorBanner error=error.clone() on_retry=retry /> }.into_any();
            }
            match s.data() {
                Some(data) => view! {
                    {(s.indicator() == Indicator::Refreshing).then(|| view! { <RefreshBar /> })}
                    {render(data)}
                }
                .into_any(),
                None => view! { <Spinner /> }.into_any(),
            }
        })
    }
}
