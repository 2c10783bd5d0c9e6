//! 分析报表

use estatecrm::controller::analytics_overview;
use estatecrm::fixtures;
use estatecrm_shared::format;
use estatecrm_shared::models::{AnalyticsOverview, LeadBreakdown, TimeRange};
use futures::FutureExt;
use leptos::prelude::*;

use crate::components::layout::DashboardLayout;
use crate::components::ui::{Card, ChartPlaceholder, StatCard, TableHead, phased};
use crate::hooks::{Loader, use_loader_with_fixture};

/// 时间范围选择；切换后重新加载 `loader`
#[component]
pub fn RangeSelect<T: Send + Sync + 'static>(range: RwSignal<TimeRange>, loader: Loader<T>) -> impl IntoView {
    view! {
        <select
            class="select select-bordered select-sm"
            prop:value=move || range.get().as_str()
            on:change=move |ev| {
                if let Some(picked) = TimeRange::parse(&event_target_value(&ev)) {
                    range.set(picked);
                    loader.reload();
                }
            }
        >
            {TimeRange::ALL
                .into_iter()
                .map(|r| view! { <option value=r.as_str() selected=move || range.get() == r>{r.label()}</option> })
                .collect_view()}
        </select>
    }
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let range = RwSignal::new(TimeRange::default());
    let overview = use_loader_with_fixture(
        "analytics",
        || Some(fixtures::analytics_overview()),
        move |api| {
            let range = range.get_untracked();
            async move { analytics_overview(&api, range).await }.boxed_local()
        },
    );
    let retry = {
        let overview = overview.clone();
        Callback::new(move |_: ()| overview.reload())
    };

    view! {
        <DashboardLayout title="Analytics">
            <div class="flex justify-end">
                <RangeSelect range=range loader=overview.clone() />
            </div>
            {phased(overview.cell(), retry, report)}
        </DashboardLayout>
    }
}

fn breakdown(rows: &[LeadBreakdown]) -> impl IntoView + use<> {
    let items = rows
        .iter()
        .map(|b| {
            let width = format!("width: {:.0}%", b.percentage.clamp(0.0, 100.0));
            view! {
                <li>
                    <div class="flex justify-between text-sm">
                        <span>{b.name.clone()}</span>
                        <span>{format!("{} ({:.1}%)", b.count, b.percentage)}</span>
                    </div>
                    <div class="w-full bg-base-200 rounded h-2">
                        <div class="bg-primary h-2 rounded" style=width></div>
                    </div>
                </li>
            }
        })
        .collect_view();
    view! { <ul class="space-y-3">{items}</ul> }
}

fn report(data: &AnalyticsOverview) -> impl IntoView + use<> {
    let stat = |v: String| Signal::derive(move || v.clone());
    let revenue = &data.revenue;
    // 后端不提供上月数据时增长率为 0，不显示
    let growth = (revenue.growth != 0.0).then(|| stat(format!("{:+.1}% vs last month", revenue.growth)));

    let sources = breakdown(&data.leads.sources);
    let stages = data
        .deals
        .stages
        .iter()
        .map(|s| view! {
            <tr>
                <td>{s.name.clone()}</td>
                <td>{s.count}</td>
                <td>{format::currency(s.value)}</td>
            </tr>
        })
        .collect_view();
    let performers = data
        .agents
        .top_performers
        .iter()
        .enumerate()
        .map(|(i, p)| view! {
            <tr>
                <td>{i + 1}</td>
                <td>{p.name.clone()}</td>
                <td>{p.deals}</td>
                <td>{format::currency(p.revenue)}</td>
            </tr>
        })
        .collect_view();
    let comm = &data.communication;
    let activity = view! {
        <div class="grid grid-cols-2 gap-4 text-center">
            <div><div class="text-2xl font-bold">{comm.calls}</div><div class="text-xs opacity-60">"Calls"</div></div>
            <div><div class="text-2xl font-bold">{comm.emails}</div><div class="text-xs opacity-60">"Emails"</div></div>
            <div><div class="text-2xl font-bold">{comm.meetings}</div><div class="text-xs opacity-60">"Meetings"</div></div>
            <div><div class="text-2xl font-bold">{comm.follow_ups}</div><div class="text-xs opacity-60">"Follow-ups"</div></div>
        </div>
    };

    let revenue_card = match growth {
        Some(growth) => view! {
            <StatCard title="Total Revenue" value=stat(format::currency(revenue.total)) desc=growth />
        }
        .into_any(),
        None => view! { <StatCard title="Total Revenue" value=stat(format::currency(revenue.total)) /> }.into_any(),
    };

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            {revenue_card}
            <StatCard title="Leads" tone="text-secondary" value=stat(data.leads.total.to_string())
                desc=stat(format!("{} this month", data.leads.this_month)) />
            <StatCard title="Conversion" tone="text-accent" value=stat(format!("{:.1}%", data.leads.conversion)) />
            <StatCard title="Pipeline" tone="text-info" value=stat(format::compact_number(data.deals.pipeline))
                desc=stat(format!("{} won of {}", data.deals.won, data.deals.total)) />
            <StatCard title="Agents" value=stat(format!("{}/{}", data.agents.active, data.agents.total))
                desc=stat("active".to_owned()) />
        </div>
        <div class="grid gap-6 md:grid-cols-2">
            <Card title="Revenue Trend"><ChartPlaceholder title="Revenue" /></Card>
            <Card title="Lead Sources">{sources}</Card>
            <Card title="Deal Stages">
                <table class="table w-full">
                    <TableHead headers=&["Stage", "Deals", "Value"] />
                    <tbody>{stages}</tbody>
                </table>
            </Card>
            <Card title="Top Performers">
                <table class="table w-full">
                    <TableHead headers=&["#", "Agent", "Deals", "Revenue"] />
                    <tbody>{performers}</tbody>
                </table>
            </Card>
            <Card title="Communication">{activity}</Card>
        </div>
    }
}
