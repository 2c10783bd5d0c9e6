use estatecrm::controller::dashboard_stats;
use estatecrm::fixtures;
use estatecrm::route::AppRoute;
use estatecrm_shared::format;
use estatecrm_shared::models::{DashboardStats, TimeRange};
use futures::FutureExt;
use leptos::prelude::*;

use super::analytics::RangeSelect;
use crate::auth::use_auth;
use crate::components::layout::DashboardLayout;
use crate::components::ui::{Card, ChartPlaceholder, StatCard, phased};
use crate::hooks::use_loader_with_fixture;
use crate::web::router::Link;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let name = use_auth().user_name();
    let range = RwSignal::new(TimeRange::default());
    let stats = use_loader_with_fixture(
        "dashboard",
        || Some(fixtures::dashboard_stats()),
        move |api| {
            let range = range.get_untracked();
            async move { dashboard_stats(&api, range).await }.boxed_local()
        },
    );
    let retry = {
        let stats = stats.clone();
        Callback::new(move |_: ()| stats.reload())
    };

    view! {
        <DashboardLayout title="Dashboard">
            <div class="flex flex-wrap justify-between items-center gap-4">
                <div>
                    <h2 class="text-2xl font-bold">{move || format!("Welcome back, {}", name.get())}</h2>
                    <p class="opacity-60">"Here is how your pipeline is doing."</p>
                </div>
                <RangeSelect range=range loader=stats.clone() />
            </div>
            {phased(stats.cell(), retry, overview)}
        </DashboardLayout>
    }
}

fn overview(stats: &DashboardStats) -> impl IntoView + use<> {
    let stat = |v: String| Signal::derive(move || v.clone());
    let follow_ups = stats.pending_follow_ups;
    view! {
        <div class="stats shadow w-full stats-vertical lg:stats-horizontal bg-base-100">
            <StatCard title="Total Leads" value=stat(stats.total_leads.to_string())
                desc=stat(format!("+{} this month", stats.leads_this_month)) />
            <StatCard title="Total Deals" tone="text-secondary" value=stat(stats.total_deals.to_string())
                desc=stat(format!("+{} this month", stats.deals_this_month)) />
            <StatCard title="Revenue" tone="text-accent" value=stat(format::compact_number(stats.total_revenue))
                desc=stat(format!("{} this month", format::currency(stats.revenue_this_month))) />
            <StatCard title="Conversion Rate" tone="text-info" value=stat(format!("{:.1}%", stats.conversion_rate))
                desc=stat(format!("Avg deal {}", format::currency(stats.average_deal_value))) />
        </div>
        <div class="grid gap-6 lg:grid-cols-3">
            <Card title="Lead Trend" class="lg:col-span-2"><ChartPlaceholder title="Leads" /></Card>
            <Card title="Follow-ups">
                <p class="text-4xl font-bold text-warning">{follow_ups}</p>
                <p class="text-sm opacity-60">"pending follow-ups"</p>
                <Link to=AppRoute::Leads.to_path() class="btn btn-sm btn-outline mt-4">"View Leads"</Link>
            </Card>
            <Card title="Quick Actions" class="lg:col-span-3">
                <div class="flex flex-wrap gap-2">
                    <Link to=AppRoute::LeadNew.to_path() class="btn btn-primary btn-sm">"Add Lead"</Link>
                    <Link to=AppRoute::DealNew.to_path() class="btn btn-secondary btn-sm">"New Deal"</Link>
                    <Link to=AppRoute::Communication.to_path() class="btn btn-accent btn-sm">"Log Communication"</Link>
                    <Link to=AppRoute::Analytics.to_path() class="btn btn-ghost btn-sm">"View Reports"</Link>
                </div>
            </Card>
        </div>
    }
}
