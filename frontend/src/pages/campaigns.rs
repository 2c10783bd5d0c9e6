//! 营销活动：列表、详情（绩效 + 负责人）、新建

use estatecrm::controller::{CampaignDetail, campaign_detail, submit_form};
use estatecrm::route::AppRoute;
use estatecrm_shared::format;
use estatecrm_shared::forms::CampaignForm;
use estatecrm_shared::models::{Campaign, CampaignStatus};
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::SubmitEvent;

use crate::auth::use_auth;
use crate::components::fields::{Checkbox, SelectField, TextAreaField, TextField};
use crate::components::layout::DashboardLayout;
use crate::components::list::{overlays, pagination, search_box, table_body};
use crate::components::ui::{Card, EmptyState, Info, StatCard, StatusBadge, TableHead, phased};
use crate::hooks::{FormBinding, spawn_list, use_list, use_loader};
use crate::web::router::{Link, use_router};

const HEADERS: &[&str] = &["Campaign", "Status", "Period", "Budget", "Leads", "Sources", ""];

const STATUSES: [CampaignStatus; 4] = [
    CampaignStatus::Inactive,
    CampaignStatus::Active,
    CampaignStatus::Paused,
    CampaignStatus::Completed,
];

fn status_options() -> Vec<(String, String)> {
    STATUSES
        .iter()
        .map(|s| (s.code().to_string(), s.label().to_owned()))
        .collect()
}

fn period(campaign: &Campaign) -> String {
    let day = |raw: &Option<String>| raw.as_deref().map(format::short_date_str).unwrap_or_else(|| "-".into());
    format!("{} → {}", day(&campaign.start_date), day(&campaign.end_date))
}

#[component]
pub fn CampaignsPage() -> impl IntoView {
    let campaigns = use_list::<Campaign>();

    let status_filter = {
        let campaigns = campaigns.clone();
        Callback::new(move |raw: String| {
            let status = raw.parse::<i32>().ok();
            spawn_list(&campaigns, move |l| async move {
                l.update_filters(|f| f.status = status).await;
            });
        })
    };

    let row = {
        let campaigns = campaigns.clone();
        move |campaign: &Campaign| {
            let id = campaign.id;
            let campaigns = campaigns.clone();
            let counts = campaign.counts.unwrap_or_default();
            view! {
                <tr>
                    <td>
                        <div class="font-bold">{campaign.name.clone()}</div>
                        <div class="text-sm opacity-60">{campaign.secondary_name.clone().unwrap_or_default()}</div>
                        {campaign.is_international.then(|| view! { <span class="badge badge-info badge-sm">"International"</span> })}
                    </td>
                    <td><StatusBadge status=campaign.status().label().to_lowercase() /></td>
                    <td class="text-sm">{period(campaign)}</td>
                    <td>{format::currency_or_na(campaign.budget)}</td>
                    <td>{counts.leads}</td>
                    <td>{counts.sources}</td>
                    <td class="flex gap-1">
                        <Link to=AppRoute::CampaignDetail(id).to_path() class="btn btn-ghost btn-xs">"View"</Link>
                        <button class="btn btn-ghost btn-xs text-error" on:click=move |_| campaigns.request_delete(id)>
                            "Delete"
                        </button>
                    </td>
                </tr>
            }
        }
    };

    view! {
        <DashboardLayout title="Campaigns">
            {overlays(&campaigns)}
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="flex flex-wrap items-end gap-4">
                    {search_box(&campaigns, "Search campaigns...", |f, term| f.search = term)}
                    <SelectField
                        label="Status"
                        value=Signal::derive(String::new)
                        options=Signal::derive(status_options)
                        placeholder="All statuses"
                        on_change=status_filter
                    />
                </div>
                <Link to=AppRoute::CampaignNew.to_path() class="btn btn-primary">"New Campaign"</Link>
            </div>
            <div class="card bg-base-100 shadow-xl overflow-x-auto">
                <table class="table table-zebra w-full">
                    <TableHead headers=HEADERS />
                    {table_body(&campaigns, HEADERS.len() as u32, || view! {
                        <EmptyState title="No campaigns found">
                            <Link to=AppRoute::CampaignNew.to_path() class="btn btn-primary btn-sm">"New Campaign"</Link>
                        </EmptyState>
                    }.into_any(), row)}
                </table>
            </div>
            {pagination(&campaigns)}
        </DashboardLayout>
    }
}

#[component]
pub fn CampaignDetailPage(id: i64) -> impl IntoView {
    let loader = use_loader("campaign_detail", move |api| async move { campaign_detail(&api, id).await }.boxed_local());
    let retry = {
        let loader = loader.clone();
        Callback::new(move |_: ()| loader.reload())
    };

    view! {
        <DashboardLayout title="Campaign Details">
            <Link to=AppRoute::Campaigns.to_path() class="btn btn-ghost">"← Back to Campaigns"</Link>
            {phased(loader.cell(), retry, campaign_overview)}
        </DashboardLayout>
    }
}

fn campaign_overview(detail: &CampaignDetail) -> impl IntoView + use<> {
    let campaign = &detail.campaign;
    let perf = &detail.performance;
    let stat = |v: String| Signal::derive(move || v.clone());

    let about = view! {
        <p class="text-sm opacity-70">{campaign.description.clone().unwrap_or_default()}</p>
        <div class="grid grid-cols-2 gap-4 text-sm mt-4">
            <Info label="Status" value=campaign.status().label() />
            <Info label="Period" value=period(campaign) />
            <Info label="Budget" value=format::currency_or_na(campaign.budget) />
            <Info label="International" value=if campaign.is_international { "Yes" } else { "No" } />
        </div>
    };
    let managers = if detail.managers.is_empty() {
        view! { <p class="text-sm opacity-60">"No managers assigned"</p> }.into_any()
    } else {
        view! {
            <ul class="space-y-2">
                {detail.managers.iter().map(|m| view! {
                    <li class="flex items-center gap-2">
                        <div class="avatar placeholder">
                            <div class="bg-neutral text-neutral-content rounded-full w-8">
                                <span class="text-xs">{format::initials(&m.user.name)}</span>
                            </div>
                        </div>
                        <div>
                            <div class="text-sm font-medium">{m.user.name.clone()}</div>
                            <div class="text-xs opacity-60">{m.user.email.clone()}</div>
                        </div>
                    </li>
                }).collect_view()}
            </ul>
        }
        .into_any()
    };
    let breakdown = |counts: &std::collections::BTreeMap<String, u64>| {
        let rows = counts
            .iter()
            .map(|(key, n)| view! {
                <li class="flex justify-between"><span>{format::snake_to_title(key)}</span><span>{*n}</span></li>
            })
            .collect_view();
        view! { <ul class="text-sm space-y-1">{rows}</ul> }
    };
    let by_status = breakdown(&perf.leads_by_status);
    let by_source = breakdown(&perf.leads_by_source);

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <StatCard title="Total Leads" value=stat(perf.total_leads.to_string()) />
            <StatCard title="Converted" tone="text-success" value=stat(perf.converted_leads.to_string())
                desc=stat(format!("{:.1}% conversion", perf.conversion_rate)) />
            <StatCard title="Revenue" tone="text-secondary" value=stat(format::currency(perf.total_revenue))
                desc=stat(format!("ROI {:.1}%", perf.roi)) />
            <StatCard title="Cost per Lead" tone="text-accent" value=stat(format::currency(perf.cost_per_lead))
                desc=stat(format!("Total cost {}", format::currency(perf.total_cost))) />
        </div>
        <div class="grid gap-6 md:grid-cols-3">
            <Card title=campaign.name.clone() class="md:col-span-2">{about}</Card>
            <Card title="Managers">{managers}</Card>
            <Card title="Leads by Status">{by_status}</Card>
            <Card title="Leads by Source">{by_source}</Card>
        </div>
    }
}

#[component]
pub fn CampaignFormPage() -> impl IntoView {
    let api = use_auth().api;
    let router = use_router();
    let form = FormBinding::new(CampaignForm::default());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            let cell = form.cell();
            let sent = submit_form(&cell, CampaignForm::validate, |payload| async move {
                api.campaigns().create(&payload).await
            })
            .await;
            if let Some(Ok(reply)) = sent {
                router.go(AppRoute::CampaignDetail(reply.data.id));
            }
        });
    };

    let failure = form.failure();
    let submitting = form.submitting();

    view! {
        <DashboardLayout title="New Campaign">
            <Card>
                <form on:submit=on_submit class="space-y-2">
                    {move || failure.get().map(|msg| view! {
                        <div role="alert" class="alert alert-error text-sm py-2"><span>{msg}</span></div>
                    })}
                    <div class="grid gap-4 md:grid-cols-2">
                        <TextField label="Name *" value=form.text(|f| f.name.clone())
                            on_input=form.input("name", |f, v| f.name = v) error=form.error("name") />
                        <TextField label="Secondary Name" value=form.text(|f| f.secondary_name.clone())
                            on_input=form.input("secondaryName", |f, v| f.secondary_name = v) />
                        <TextField label="Start Date" input_type="date" value=form.text(|f| f.start_date.clone())
                            on_input=form.input("startDate", |f, v| f.start_date = v) />
                        <TextField label="End Date" input_type="date" value=form.text(|f| f.end_date.clone())
                            on_input=form.input("endDate", |f, v| f.end_date = v) error=form.error("endDate") />
                        <TextField label="Budget (AED)" input_type="number" value=form.text(|f| f.budget.clone())
                            on_input=form.input("budget", |f, v| f.budget = v) error=form.error("budget") />
                        <SelectField label="Status" value=form.text(|f| f.status.clone())
                            options=Signal::derive(status_options)
                            on_change=form.input("status", |f, v| f.status = v) />
                    </div>
                    <TextAreaField label="Description" value=form.text(|f| f.description.clone())
                        on_input=form.input("description", |f, v| f.description = v) />
                    <Checkbox label="International campaign" checked=form.flag(|f| f.is_international)
                        on_toggle=form.toggle("isInternational", |f, v| f.is_international = v) />
                    <div class="flex justify-end gap-2 pt-4">
                        <Link to=AppRoute::Campaigns.to_path() class="btn btn-ghost">"Cancel"</Link>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Creating..." } else { "Create Campaign" }}
                        </button>
                    </div>
                </form>
            </Card>
        </DashboardLayout>
    }
}
