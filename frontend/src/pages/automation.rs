//! 自动化：调度器仪表盘、活动日志、设置

use estatecrm::config::POLL_INTERVAL;
use estatecrm::controller::{
    AutomationDashboard, AutomationOverview, AutomationState, Indicator, Notices, PageState, SchedulerAction,
    SettingsDraft, StateCell, activity_logs_csv, export_filename, save_settings,
};
use estatecrm::poller;
use estatecrm::route::AppRoute;
use estatecrm_shared::date;
use estatecrm_shared::filters::{ActivityLogFilters, non_empty};
use estatecrm_shared::format;
use estatecrm_shared::models::{
    ActivityLog, EVENT_TYPES, JobState, SettingField, SettingInput, SettingsTab, WEEKDAYS, event_type_class,
    event_type_label, job_display_name, toggle_working_day,
};
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use tracing::warn;

use crate::auth::use_auth;
use crate::components::fields::{SelectField, TextField};
use crate::components::layout::DashboardLayout;
use crate::components::list::{pagination, search_box, table_body};
use crate::components::ui::{Card, EmptyState, ErrorBanner, NoticeStack, RefreshBar, Spinner, StatCard, TableHead};
use crate::hooks::{Lister, spawn_list, use_list, use_loader};
use crate::web::router::Link;
use crate::web::{BrowserTimer, SignalCell, save_text};

fn job_state_label(state: JobState) -> &'static str {
    match state {
        JobState::Idle => "idle",
        JobState::Running => "running",
        JobState::Success => "success",
        JobState::Error => "error",
    }
}

fn event_badge(event_type: &str) -> impl IntoView + use<> {
    let class = format!("px-2 py-1 rounded text-xs font-medium {}", event_type_class(event_type));
    view! { <span class=class>{event_type_label(event_type)}</span> }
}

// ============================================================================
// 仪表盘
// ============================================================================

#[component]
pub fn AutomationPage() -> impl IntoView {
    let cell = SignalCell::new(AutomationState::default());
    let dashboard = AutomationDashboard::new(use_auth().api, cell);

    {
        let dashboard = dashboard.clone();
        spawn_local(async move {
            dashboard.load().await;
        });
    }

    // 每个周期静默刷新一次，离开页面时停止
    let (task, handle) = poller::every(BrowserTimer, POLL_INTERVAL, {
        let dashboard = dashboard.clone();
        move || {
            let dashboard = dashboard.clone();
            async move {
                dashboard.load().await;
            }
        }
    });
    spawn_local(task);
    on_cleanup(move || handle.cancel());

    let running = Signal::derive(move || cell.read(|s| s.page.data().is_some_and(|d| d.health.is_running)));
    let busy = Signal::derive(move || cell.read(|s| s.busy.is_some()));
    let busy_with = move |what: &'static str| Signal::derive(move || cell.read(|s| s.busy.as_deref() == Some(what)));

    let act = {
        let dashboard = dashboard.clone();
        move |action: SchedulerAction| {
            let dashboard = dashboard.clone();
            spawn_local(async move {
                dashboard.scheduler_action(action).await;
            });
        }
    };
    let start = {
        let act = act.clone();
        move |_| act(SchedulerAction::Start)
    };
    let stop = move |_| act(SchedulerAction::Stop);

    let trigger = {
        let dashboard = dashboard.clone();
        Callback::new(move |name: String| {
            let dashboard = dashboard.clone();
            spawn_local(async move {
                dashboard.trigger_job(&name).await;
            });
        })
    };
    let retry = {
        let dashboard = dashboard.clone();
        Callback::new(move |_: ()| {
            let dashboard = dashboard.clone();
            spawn_local(async move {
                dashboard.load().await;
            });
        })
    };
    let dismiss = Callback::new(move |id| cell.signal().update(|s| s.notices.dismiss(id)));
    let notices = Signal::derive(move || cell.read(|s| s.notices.clone()));
    let starting = busy_with("start");
    let stopping = busy_with("stop");

    view! {
        <DashboardLayout title="Automation">
            <NoticeStack notices=notices on_dismiss=dismiss />
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div class="flex items-center gap-3">
                    <span class=move || if running.get() { "badge badge-success" } else { "badge badge-error" }>
                        {move || if running.get() { "Running" } else { "Stopped" }}
                    </span>
                    <span class="text-sm opacity-60">"Scheduler status"</span>
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-success btn-sm" disabled=move || busy.get() || running.get() on:click=start>
                        {move || if starting.get() { "Starting..." } else { "Start Scheduler" }}
                    </button>
                    <button class="btn btn-error btn-sm" disabled=move || busy.get() || !running.get() on:click=stop>
                        {move || if stopping.get() { "Stopping..." } else { "Stop Scheduler" }}
                    </button>
                    <Link to=AppRoute::AutomationLogs.to_path() class="btn btn-ghost btn-sm">"Activity Logs"</Link>
                    <Link to=AppRoute::AutomationSettings.to_path() class="btn btn-ghost btn-sm">"Settings"</Link>
                </div>
            </div>
            {move || cell.signal().with(|s| {
                if let Some(error) = s.page.error() {
                    return view! { <ErrorBanner error=error.clone() on_retry=retry /> }.into_any();
                }
                match s.page.data() {
                    Some(data) => view! {
                        {(s.page.indicator() == Indicator::Refreshing).then(|| view! { <RefreshBar /> })}
                        {overview(data, s.busy.clone(), trigger)}
                    }
                    .into_any(),
                    None => view! { <Spinner /> }.into_any(),
                }
            })}
        </DashboardLayout>
    }
}

fn overview(data: &AutomationOverview, busy: Option<String>, trigger: Callback<String>) -> impl IntoView + use<> {
    let stat = |v: String| Signal::derive(move || v.clone());
    let stats = &data.stats;
    let count = |key: &str| stats.by_type.get(key).copied().unwrap_or_default().to_string();
    let locked = busy.is_some();

    let jobs = data
        .jobs()
        .into_iter()
        .map(|job| {
            let running = busy.as_deref() == Some(job.name.as_str());
            let name = job.name.clone();
            view! {
                <tr>
                    <td>
                        <div class="font-medium">{job_display_name(&job.name).to_owned()}</div>
                        <div class="text-xs opacity-60">{job.name.clone()}</div>
                    </td>
                    <td class="font-mono text-sm">{job.schedule.clone()}</td>
                    <td class="text-sm">{job.last_execution.as_deref().map(format::short_date_str).unwrap_or_else(|| "Never".into())}</td>
                    <td><span class="badge badge-ghost">{job_state_label(job.status)}</span></td>
                    <td>
                        <button class="btn btn-primary btn-xs" disabled=locked on:click=move |_| trigger.run(name.clone())>
                            {if running { "Running..." } else { "Run Now" }}
                        </button>
                    </td>
                </tr>
            }
        })
        .collect_view();
    let jobs = view! {
        <table class="table w-full">
            <TableHead headers=&["Job", "Schedule", "Last Run", "Status", ""] />
            <tbody>{jobs}</tbody>
        </table>
    };

    let recent = if data.recent.is_empty() {
        view! { <EmptyState title="No recent activity" /> }.into_any()
    } else {
        view! {
            <ul class="divide-y divide-base-200">
                {data.recent.iter().map(|log| view! {
                    <li class="py-2 flex items-start justify-between gap-4">
                        <div>
                            {event_badge(&log.event_type)}
                            <p class="text-sm mt-1">{log.description.clone()}</p>
                        </div>
                        <span class="text-xs opacity-60 whitespace-nowrap">{format::relative_time(&log.created_at)}</span>
                    </li>
                }).collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <StatCard title="Total Events" value=stat(stats.total_events.to_string())
                desc=stat(format!("{} → {}", stats.start_date, stats.end_date)) />
            <StatCard title="Auto Distributions" tone="text-info" value=stat(count("auto_distribution")) />
            <StatCard title="Rotations" tone="text-secondary" value=stat(count("no_activity_rotation")) />
            <StatCard title="Failures" tone="text-error" value=stat(count("cron_failed")) />
        </div>
        <div class="grid gap-6 lg:grid-cols-3">
            <Card title="Scheduled Jobs" class="lg:col-span-2">{jobs}</Card>
            <Card title="Recent Activity">{recent}</Card>
        </div>
    }
}

// ============================================================================
// 活动日志
// ============================================================================

const LOG_HEADERS: &[&str] = &["Time", "Event", "Description", "Subject"];

fn set_log_filter(
    logs: &Lister<ActivityLog>,
    apply: fn(&mut ActivityLogFilters, Option<String>),
) -> Callback<String> {
    let logs = logs.clone();
    Callback::new(move |raw: String| {
        let value = non_empty(&raw);
        spawn_list(&logs, move |l| async move {
            l.update_filters(|f| apply(f, value)).await;
        });
    })
}

#[component]
pub fn AutomationLogsPage() -> impl IntoView {
    let logs = use_list::<ActivityLog>();
    let cell = *logs.cell();

    let event_options = Signal::derive(|| {
        EVENT_TYPES
            .iter()
            .map(|t| ((*t).to_owned(), event_type_label(t)))
            .collect::<Vec<_>>()
    });
    let filter_text = move |get: fn(&ActivityLogFilters) -> Option<String>| {
        Signal::derive(move || cell.read(|s| get(&s.query.filters).unwrap_or_default()))
    };
    let has_rows = Signal::derive(move || cell.read(|s| !s.rows().is_empty()));

    // 只导出当前页已加载的记录
    let export = move |_| {
        let csv = cell.with(|s| activity_logs_csv(s.rows())).unwrap_or_default();
        let filename = export_filename(date::now().date_naive());
        if let Err(e) = save_text(&filename, "text/csv;charset=utf-8;", &csv) {
            warn!(error = ?e, "activity log export failed");
        }
    };

    let row = |log: &ActivityLog| {
        let subject = match (&log.subject_type, log.subject_id) {
            (Some(kind), Some(id)) => format!("{kind} #{id}"),
            (Some(kind), None) => kind.clone(),
            _ => "-".into(),
        };
        view! {
            <tr>
                <td class="text-sm whitespace-nowrap">{format::short_date(&log.created_at)}</td>
                <td>{event_badge(&log.event_type)}</td>
                <td class="text-sm">{log.description.clone()}</td>
                <td class="text-sm">{subject}</td>
            </tr>
        }
    };

    view! {
        <DashboardLayout title="Activity Logs">
            <Link to=AppRoute::Automation.to_path() class="btn btn-ghost">"← Back to Automation"</Link>
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="flex flex-wrap items-end gap-4">
                    {search_box(&logs, "Search logs...", |f, term| f.search = term)}
                    <SelectField label="Event" value=filter_text(|f| f.event_type.clone()) options=event_options
                        placeholder="All events" on_change=set_log_filter(&logs, |f, v| f.event_type = v) />
                    <TextField label="From" input_type="date" value=filter_text(|f| f.start_date.clone())
                        on_input=set_log_filter(&logs, |f, v| f.start_date = v) />
                    <TextField label="To" input_type="date" value=filter_text(|f| f.end_date.clone())
                        on_input=set_log_filter(&logs, |f, v| f.end_date = v) />
                </div>
                <button class="btn btn-outline" disabled=move || !has_rows.get() on:click=export>"Export CSV"</button>
            </div>
            <div class="card bg-base-100 shadow-xl overflow-x-auto">
                <table class="table table-zebra w-full">
                    <TableHead headers=LOG_HEADERS />
                    {table_body(&logs, LOG_HEADERS.len() as u32, || view! { <EmptyState title="No activity logs found" /> }.into_any(), row)}
                </table>
            </div>
            {pagination(&logs)}
        </DashboardLayout>
    }
}

// ============================================================================
// 设置
// ============================================================================

type DraftCell = SignalCell<PageState<SettingsDraft>>;

fn draft_value(cell: DraftCell, field: SettingField) -> Value {
    cell.read(|s| s.data().map(|d| d.value(&field))).unwrap_or_default()
}

fn edit(cell: DraftCell, field: SettingField, value: Value) {
    cell.signal().update(|s| {
        if let Some(draft) = s.data_mut() {
            draft.set_field(&field, value);
        }
    });
}

fn setting_control(cell: DraftCell, field: SettingField) -> AnyView {
    match field.input {
        SettingInput::Toggle(default) => view! {
            <label class="label cursor-pointer justify-between">
                <span class="label-text">{field.label}</span>
                <input
                    type="checkbox"
                    class="toggle toggle-primary"
                    prop:checked=move || draft_value(cell, field).as_bool().unwrap_or(default)
                    on:change=move |ev| edit(cell, field, Value::Bool(event_target_checked(&ev)))
                />
            </label>
        }
        .into_any(),
        SettingInput::Number(default) => view! {
            <label class="form-control">
                <span class="label-text mb-1">{field.label}</span>
                <input
                    type="number"
                    class="input input-bordered w-full max-w-xs"
                    prop:value=move || draft_value(cell, field).as_i64().unwrap_or(default).to_string()
                    on:change=move |ev| {
                        if let Ok(n) = event_target_value(&ev).trim().parse::<i64>() {
                            edit(cell, field, Value::from(n));
                        }
                    }
                />
            </label>
        }
        .into_any(),
        SettingInput::Time(default) => view! {
            <label class="form-control">
                <span class="label-text mb-1">{field.label}</span>
                <input
                    type="time"
                    class="input input-bordered w-full max-w-xs"
                    prop:value=move || draft_value(cell, field).as_str().unwrap_or(default).to_owned()
                    on:change=move |ev| edit(cell, field, Value::String(event_target_value(&ev)))
                />
            </label>
        }
        .into_any(),
        SettingInput::Days => {
            let days = WEEKDAYS
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let day = i as u8;
                    let current = move || draft_value(cell, field).as_str().unwrap_or_default().to_owned();
                    let checked = move || current().split(',').any(|d| d.trim() == day.to_string());
                    view! {
                        <label class="label cursor-pointer gap-2">
                            <input
                                type="checkbox"
                                class="checkbox checkbox-sm"
                                prop:checked=checked
                                on:change=move |_| {
                                    let next = toggle_working_day(&current(), day);
                                    edit(cell, field, Value::String(next));
                                }
                            />
                            <span class="label-text">{*name}</span>
                        </label>
                    }
                })
                .collect_view();
            view! {
                <div class="form-control">
                    <span class="label-text mb-1">{field.label}</span>
                    <div class="flex flex-wrap gap-2">{days}</div>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
pub fn AutomationSettingsPage() -> impl IntoView {
    let api = use_auth().api;
    let loader = use_loader("automation_settings", |api| {
        async move { api.automation().settings().await.map(|reply| SettingsDraft::new(reply.data)) }.boxed_local()
    });
    let cell = loader.cell();
    let tab = RwSignal::new(SettingsTab::General);
    let saving = RwSignal::new(false);
    let notices = SignalCell::new(Notices::default());

    // 控件各自读取草稿；编辑时不重建整组控件
    let ready = Memo::new(move |_| cell.read(|s| s.data().is_some()));
    let failed = Memo::new(move |_| cell.read(|s| s.error().cloned()));
    let refreshing = Memo::new(move |_| cell.read(|s| s.indicator() == Indicator::Refreshing));
    let dirty = Signal::derive(move || cell.read(|s| s.data().is_some_and(SettingsDraft::is_dirty)));

    let save = move |_| {
        let Some(draft) = cell.with(|s| s.data().cloned()).flatten() else {
            return;
        };
        let api = api.clone();
        saving.set(true);
        spawn_local(async move {
            match save_settings(&api, &draft).await {
                Ok(count) => {
                    cell.signal().update(|s| {
                        if let Some(d) = s.data_mut() {
                            d.commit();
                        }
                    });
                    notices.with_mut(|n| n.success(format!("{count} setting(s) saved")));
                }
                Err(e) => {
                    notices.with_mut(|n| n.error(e.message().to_owned()));
                }
            }
            let _ = saving.try_set(false);
        });
    };
    let reset = move |_| {
        cell.signal().update(|s| {
            if let Some(d) = s.data_mut() {
                d.reset();
            }
        })
    };

    let retry = {
        let loader = loader.clone();
        Callback::new(move |_: ()| loader.reload())
    };
    let dismiss = Callback::new(move |id| notices.signal().update(|n| n.dismiss(id)));
    let tabs = SettingsTab::ALL
        .into_iter()
        .map(|t| view! {
            <a role="tab" class=move || if tab.get() == t { "tab tab-active" } else { "tab" } on:click=move |_| tab.set(t)>
                {t.label()}
            </a>
        })
        .collect_view();

    view! {
        <DashboardLayout title="Automation Settings">
            <NoticeStack notices=notices.signal() on_dismiss=dismiss />
            <div class="flex flex-wrap items-center justify-between gap-4">
                <Link to=AppRoute::Automation.to_path() class="btn btn-ghost">"← Back to Automation"</Link>
                <div class="flex gap-2">
                    <button class="btn btn-ghost" disabled=move || !dirty.get() || saving.get() on:click=reset>"Reset"</button>
                    <button class="btn btn-primary" disabled=move || !dirty.get() || saving.get() on:click=save>
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </button>
                </div>
            </div>
            <div role="tablist" class="tabs tabs-boxed">{tabs}</div>
            <Show when=move || refreshing.get()>
                <RefreshBar />
            </Show>
            {move || {
                if let Some(error) = failed.get() {
                    return view! { <ErrorBanner error=error on_retry=retry /> }.into_any();
                }
                if !ready.get() {
                    return view! { <Spinner /> }.into_any();
                }
                let controls = move || {
                    tab.get()
                        .fields()
                        .iter()
                        .map(|field| setting_control(cell, *field))
                        .collect_view()
                };
                view! { <Card><div class="grid gap-4 md:grid-cols-2">{controls}</div></Card> }.into_any()
            }}
        </DashboardLayout>
    }
}
