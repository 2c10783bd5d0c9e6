//! 线索来源：列表、详情（轮转代理 + 子来源）、新建

use estatecrm::ApiResult;
use estatecrm::controller::{SourceDetail, source_detail, submit_form};
use estatecrm::route::AppRoute;
use estatecrm_shared::filters::{CampaignFilters, ListQuery};
use estatecrm_shared::format;
use estatecrm_shared::forms::SourceForm;
use estatecrm_shared::models::{OptionItem, RotationType, Source, SourceKind};
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::SubmitEvent;

use crate::auth::{Api, use_auth};
use crate::components::fields::{Checkbox, SelectField, TextField, id_options};
use crate::components::layout::DashboardLayout;
use crate::components::list::{overlays, pagination, search_box, table_body};
use crate::components::ui::{Card, EmptyState, Info, StatusBadge, TableHead, phased};
use crate::hooks::{FormBinding, spawn_list, use_list, use_loader};
use crate::web::router::{Link, use_router};

const HEADERS: &[&str] = &["Source", "Type", "Campaign", "Rotation", "Priority", "Agents", "Status", ""];

fn rotation_label(raw: Option<&str>) -> String {
    raw.and_then(RotationType::parse)
        .map(|r| r.label().to_owned())
        .unwrap_or_else(|| "-".into())
}

fn active_badge(active: bool) -> &'static str {
    if active { "active" } else { "inactive" }
}

#[component]
pub fn SourcesPage() -> impl IntoView {
    let sources = use_list::<Source>();

    let kind_filter = {
        let sources = sources.clone();
        Callback::new(move |raw: String| {
            let kind = estatecrm_shared::filters::non_empty(&raw);
            spawn_list(&sources, move |l| async move {
                l.update_filters(|f| f.kind = kind).await;
            });
        })
    };
    let kind_options = Signal::derive(|| {
        SourceKind::ALL
            .iter()
            .map(|k| (k.as_str().to_owned(), k.as_str().to_owned()))
            .collect::<Vec<_>>()
    });

    let row = {
        let sources = sources.clone();
        move |source: &Source| {
            let id = source.id;
            let sources = sources.clone();
            view! {
                <tr>
                    <td class="font-bold">{source.name.clone()}</td>
                    <td>{source.kind.clone().unwrap_or_else(|| "Normal".into())}</td>
                    <td>{source.campaign.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| "-".into())}</td>
                    <td class="text-sm">{rotation_label(source.rotation_type.as_deref())}</td>
                    <td>{source.priority.map(|p| p.to_string()).unwrap_or_else(|| "-".into())}</td>
                    <td>{source.counts.map(|c| c.source_users).unwrap_or_default()}</td>
                    <td><StatusBadge status=active_badge(source.is_active) /></td>
                    <td class="flex gap-1">
                        <Link to=AppRoute::SourceDetail(id).to_path() class="btn btn-ghost btn-xs">"View"</Link>
                        <button class="btn btn-ghost btn-xs text-error" on:click=move |_| sources.request_delete(id)>
                            "Delete"
                        </button>
                    </td>
                </tr>
            }
        }
    };

    view! {
        <DashboardLayout title="Lead Sources">
            {overlays(&sources)}
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="flex flex-wrap items-end gap-4">
                    {search_box(&sources, "Search sources...", |f, term| f.search = term)}
                    <SelectField
                        label="Type"
                        value=Signal::derive(String::new)
                        options=kind_options
                        placeholder="All types"
                        on_change=kind_filter
                    />
                </div>
                <Link to=AppRoute::SourceNew.to_path() class="btn btn-primary">"New Source"</Link>
            </div>
            <div class="card bg-base-100 shadow-xl overflow-x-auto">
                <table class="table table-zebra w-full">
                    <TableHead headers=HEADERS />
                    {table_body(&sources, HEADERS.len() as u32, || view! { <EmptyState title="No sources found" /> }.into_any(), row)}
                </table>
            </div>
            {pagination(&sources)}
        </DashboardLayout>
    }
}

#[component]
pub fn SourceDetailPage(id: i64) -> impl IntoView {
    let loader = use_loader("source_detail", move |api| async move { source_detail(&api, id).await }.boxed_local());
    let retry = {
        let loader = loader.clone();
        Callback::new(move |_: ()| loader.reload())
    };

    view! {
        <DashboardLayout title="Source Details">
            <Link to=AppRoute::Sources.to_path() class="btn btn-ghost">"← Back to Sources"</Link>
            {phased(loader.cell(), retry, source_overview)}
        </DashboardLayout>
    }
}

fn source_overview(detail: &SourceDetail) -> impl IntoView + use<> {
    let source = &detail.source;
    let next = detail.next_agent().map(|a| a.user_id);

    let settings = view! {
        <div class="grid grid-cols-2 gap-4 text-sm">
            <Info label="Type" value=source.kind.clone().unwrap_or_else(|| "Normal".into()) />
            <Info label="Campaign" value=source.campaign.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| "None".into()) />
            <Info label="Rotation" value=rotation_label(source.rotation_type.as_deref()) />
            <Info label="Priority" value=source.priority.map(|p| p.to_string()).unwrap_or_else(|| "-".into()) />
            <Info label="Runs All Time" value=if source.run_all_time { "Yes" } else { "No" } />
            <Info label="Scheduled" value=if source.is_croned { "Yes" } else { "No" } />
        </div>
    };
    let next_up = view! {
        <p class="text-lg font-semibold">
            {detail.next_agent().map(|a| a.user.name.clone()).unwrap_or_else(|| "No eligible agent".into())}
        </p>
        <StatusBadge status=active_badge(source.is_active) />
    };
    let agents = if detail.agents.is_empty() {
        view! { <EmptyState title="No agents in rotation" /> }.into_any()
    } else {
        view! {
            <table class="table w-full">
                <TableHead headers=&["Agent", "Email", "Availability", ""] />
                <tbody>
                    {detail.agents.iter().map(|a| view! {
                        <tr class=if a.user.is_excluded { "opacity-50" } else { "" }>
                            <td>{a.user.name.clone()}</td>
                            <td>{a.user.email.clone()}</td>
                            <td>{a.user.availability.clone().map(|s| format::snake_to_title(&s)).unwrap_or_else(|| "-".into())}</td>
                            <td>
                                {(next == Some(a.user_id)).then(|| view! { <span class="badge badge-primary badge-sm">"Next"</span> })}
                            </td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        }
        .into_any()
    };
    let sub_sources = if detail.sub_sources.is_empty() {
        view! { <p class="text-sm opacity-60">"No sub-sources"</p> }.into_any()
    } else {
        view! {
            <ul class="space-y-1 text-sm">
                {detail.sub_sources.iter().map(|s| view! {
                    <li class="flex justify-between">
                        <span>{s.name.clone()}</span>
                        <StatusBadge status=active_badge(s.is_active) />
                    </li>
                }).collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="grid gap-6 md:grid-cols-3">
            <Card title=source.name.clone() class="md:col-span-2">{settings}</Card>
            <Card title="Next Assignment">{next_up}</Card>
            <Card title="Agents" class="md:col-span-2">{agents}</Card>
            <Card title="Sub-sources">{sub_sources}</Card>
        </div>
    }
}

/// 表单下拉中列出的活动数量
const CAMPAIGN_CHOICES: u32 = 100;

async fn campaign_choices(api: Api) -> ApiResult<Vec<OptionItem>> {
    let query = ListQuery::new(CampaignFilters::active()).with_limit(CAMPAIGN_CHOICES);
    let reply = api.campaigns().list(&query).await?;
    Ok(reply.data.iter().map(|c| OptionItem::new(c.id, c.name.clone())).collect())
}

#[component]
pub fn SourceFormPage() -> impl IntoView {
    let api = use_auth().api;
    let router = use_router();
    let form = FormBinding::new(SourceForm::default());

    let campaigns = use_loader("source_form_campaigns", |api| campaign_choices(api).boxed_local());
    let campaign_cell = campaigns.cell();
    let campaign_options = Signal::derive(move || {
        campaign_cell.read(|s| s.data().map(|c| id_options(c.clone())).unwrap_or_default())
    });
    let is_campaign = Signal::derive(move || form.cell().read(|s| s.form.kind == SourceKind::Campaign));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            let cell = form.cell();
            let sent = submit_form(&cell, SourceForm::validate, |payload| async move {
                api.sources().create(&payload).await
            })
            .await;
            if let Some(Ok(reply)) = sent {
                router.go(AppRoute::SourceDetail(reply.data.id));
            }
        });
    };

    let failure = form.failure();
    let submitting = form.submitting();
    let kind_options = Signal::derive(|| {
        SourceKind::ALL
            .iter()
            .map(|k| (k.as_str().to_owned(), k.as_str().to_owned()))
            .collect::<Vec<_>>()
    });
    let rotation_options = Signal::derive(|| {
        RotationType::ALL
            .iter()
            .map(|r| (r.as_str().to_owned(), r.label().to_owned()))
            .collect::<Vec<_>>()
    });

    view! {
        <DashboardLayout title="New Source">
            <Card>
                <form on:submit=on_submit class="space-y-2">
                    {move || failure.get().map(|msg| view! {
                        <div role="alert" class="alert alert-error text-sm py-2"><span>{msg}</span></div>
                    })}
                    <div class="grid gap-4 md:grid-cols-2">
                        <TextField label="Name *" value=form.text(|f| f.name.clone())
                            on_input=form.input("name", |f, v| f.name = v) error=form.error("name") />
                        <SelectField label="Type" value=form.text(|f| f.kind.as_str().to_owned())
                            options=kind_options
                            on_change=form.input("type", |f, v| f.kind = SourceKind::parse(&v).unwrap_or(f.kind)) />
                        <Show when=move || is_campaign.get()>
                            <SelectField label="Campaign *" value=form.text(|f| f.campaign_id.clone())
                                options=campaign_options placeholder="Select campaign"
                                on_change=form.input("campaignId", |f, v| f.campaign_id = v) error=form.error("campaignId") />
                        </Show>
                        <SelectField label="Rotation" value=form.text(|f| f.rotation_type.clone())
                            options=rotation_options
                            on_change=form.input("rotationType", |f, v| f.rotation_type = v) />
                        <TextField label="Priority" input_type="number" value=form.text(|f| f.priority.clone())
                            on_input=form.input("priority", |f, v| f.priority = v) error=form.error("priority") />
                    </div>
                    <div class="flex flex-wrap gap-6">
                        <Checkbox label="Active" checked=form.flag(|f| f.is_active)
                            on_toggle=form.toggle("isActive", |f, v| f.is_active = v) />
                        <Checkbox label="Run all time" checked=form.flag(|f| f.run_all_time)
                            on_toggle=form.toggle("runAllTime", |f, v| f.run_all_time = v) />
                        <Checkbox label="Scheduled (cron)" checked=form.flag(|f| f.is_croned)
                            on_toggle=form.toggle("isCroned", |f, v| f.is_croned = v) />
                    </div>
                    <div class="flex justify-end gap-2 pt-4">
                        <Link to=AppRoute::Sources.to_path() class="btn btn-ghost">"Cancel"</Link>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Creating..." } else { "Create Source" }}
                        </button>
                    </div>
                </form>
            </Card>
        </DashboardLayout>
    }
}
