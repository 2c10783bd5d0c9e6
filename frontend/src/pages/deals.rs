//! 交易：管道看板 / 列表、详情、新建/编辑

use estatecrm::controller::{deal_choices, deal_choices_fixture, deal_detail, deal_fixture, submit_form};
use estatecrm::route::AppRoute;
use estatecrm_shared::format;
use estatecrm_shared::forms::DealForm;
use estatecrm_shared::models::{Deal, DealStats, DealStatus, PipelineStage};
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::SubmitEvent;
use tracing::warn;

use crate::auth::use_auth;
use crate::components::fields::{SelectField, TextAreaField, TextField, id_options};
use crate::components::layout::DashboardLayout;
use crate::components::list::{overlays, pagination, search_box, table_body};
use crate::components::ui::{Card, EmptyState, Info, StatCard, StatusBadge, TableHead, phased};
use crate::hooks::{FormBinding, Lister, use_list, use_loader_with_fixture};
use crate::web::router::{Link, use_router};

const HEADERS: &[&str] = &["Deal", "Lead", "Project", "Value", "Commission", "Status", ""];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Pipeline,
    List,
}

#[component]
pub fn DealsPage() -> impl IntoView {
    let deals = use_list::<Deal>();
    let (mode, set_mode) = signal(ViewMode::Pipeline);

    let cell = *deals.cell();
    let stats = Memo::new(move |_| cell.read(|s| DealStats::from_deals(s.rows())));

    let tab = move |m: ViewMode, label: &'static str| {
        view! {
            <a
                role="tab"
                class=move || if mode.get() == m { "tab tab-active" } else { "tab" }
                on:click=move |_| set_mode.set(m)
            >
                {label}
            </a>
        }
    };

    view! {
        <DashboardLayout title="Deals">
            {overlays(&deals)}
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <StatCard title="Pipeline Value" value=Signal::derive(move || format::currency(stats.get().total_value)) />
                <StatCard title="Won Deals" tone="text-success" value=Signal::derive(move || stats.get().won_deals.to_string()) />
                <StatCard title="Avg Deal Size" tone="text-secondary" value=Signal::derive(move || format::currency(stats.get().avg_deal_size)) />
                <StatCard title="Conversion Rate" tone="text-accent" value=Signal::derive(move || format!("{:.1}%", stats.get().conversion_rate)) />
            </div>
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div class="flex items-center gap-4">
                    {search_box(&deals, "Search deals...", |f, term| f.search = term)}
                    <div role="tablist" class="tabs tabs-boxed">
                        {tab(ViewMode::Pipeline, "Pipeline")}
                        {tab(ViewMode::List, "List")}
                    </div>
                </div>
                <Link to=AppRoute::DealNew.to_path() class="btn btn-primary">"New Deal"</Link>
            </div>
            {
                let deals = deals.clone();
                move || match mode.get() {
                    ViewMode::Pipeline => pipeline(&deals).into_any(),
                    ViewMode::List => deal_table(&deals).into_any(),
                }
            }
            {pagination(&deals)}
        </DashboardLayout>
    }
}

/// 管道看板：每列按交易状态分组
fn pipeline(deals: &Lister<Deal>) -> impl IntoView + use<> {
    let cell = *deals.cell();
    view! {
        <div class="grid gap-4 md:grid-cols-3 xl:grid-cols-6">
            {PipelineStage::ALL
                .into_iter()
                .map(|stage| {
                    view! {
                        <div class="bg-base-100 rounded-box shadow p-3 space-y-2">
                            <div class="flex justify-between items-center">
                                <span class=format!("badge {}", stage.badge_class())>{stage.label()}</span>
                                <span class="text-xs opacity-60">
                                    {move || cell.read(|s| format::compact_number(stage.value(s.rows())))}
                                </span>
                            </div>
                            {move || cell.read(|s| {
                                stage
                                    .deals(s.rows())
                                    .into_iter()
                                    .map(|deal| {
                                        let summary = view! {
                                            <div class="font-medium text-sm">{deal.heading()}</div>
                                            <div class="text-xs opacity-60">{lead_name(deal)}</div>
                                            <div class="text-sm font-semibold">{format::currency(deal.deal_value)}</div>
                                        };
                                        view! {
                                            <Link to=AppRoute::DealDetail(deal.id).to_path() class="card bg-base-200 p-3 block hover:shadow">
                                                {summary}
                                            </Link>
                                        }
                                    })
                                    .collect_view()
                            })}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn deal_table(deals: &Lister<Deal>) -> impl IntoView + use<> {
    let row = {
        let deals = deals.clone();
        move |deal: &Deal| {
            let id = deal.id;
            let deals = deals.clone();
            view! {
                <tr>
                    <td class="font-bold">{deal.heading()}</td>
                    <td>{lead_name(deal)}</td>
                    <td>{project_name(deal)}</td>
                    <td>{format::currency(deal.deal_value)}</td>
                    <td>{format::currency(deal.commission_amount)}</td>
                    <td><StatusBadge status=deal.status.as_str() /></td>
                    <td class="flex gap-1">
                        <Link to=AppRoute::DealDetail(id).to_path() class="btn btn-ghost btn-xs">"View"</Link>
                        <Link to=AppRoute::DealEdit(id).to_path() class="btn btn-ghost btn-xs">"Edit"</Link>
                        <button class="btn btn-ghost btn-xs text-error" on:click=move |_| deals.request_delete(id)>
                            "Delete"
                        </button>
                    </td>
                </tr>
            }
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl overflow-x-auto">
            <table class="table table-zebra w-full">
                <TableHead headers=HEADERS />
                {table_body(deals, HEADERS.len() as u32, || view! { <EmptyState title="No deals found" /> }.into_any(), row)}
            </table>
        </div>
    }
}

#[component]
pub fn DealDetailPage(id: i64) -> impl IntoView {
    let loader = use_loader_with_fixture(
        "deal_detail",
        move || deal_fixture(id),
        move |api| async move { deal_detail(&api, id).await }.boxed_local(),
    );
    let retry = {
        let loader = loader.clone();
        Callback::new(move |_: ()| loader.reload())
    };

    view! {
        <DashboardLayout title="Deal Details">
            <div class="flex justify-between">
                <Link to=AppRoute::Deals.to_path() class="btn btn-ghost">"← Back to Deals"</Link>
                <Link to=AppRoute::DealEdit(id).to_path() class="btn btn-primary">"Edit Deal"</Link>
            </div>
            {phased(loader.cell(), retry, deal_overview)}
        </DashboardLayout>
    }
}

fn lead_name(deal: &Deal) -> String {
    deal.lead.as_ref().map(|l| l.name.clone()).unwrap_or_else(|| "N/A".into())
}

fn project_name(deal: &Deal) -> String {
    deal.project.as_ref().map(|p| p.name.clone()).unwrap_or_else(|| "N/A".into())
}

fn deal_overview(deal: &Deal) -> impl IntoView + use<> {
    let terms = view! {
        <div class="grid grid-cols-2 gap-4 text-sm">
            <Info label="Deal Value" value=format::currency(deal.deal_value) />
            <Info label="Commission Rate" value=format!("{}%", deal.commission_rate) />
            <Info label="Commission Amount" value=format::currency(deal.commission_amount) />
            <Info label="Closing Date" value=deal.closing_date.as_deref().map(format::short_date_str).unwrap_or_else(|| "TBD".into()) />
            <Info label="Lead" value=lead_name(deal) />
            <Info label="Project" value=project_name(deal) />
        </div>
    };
    let status = view! {
        <StatusBadge status=deal.status.as_str() />
        <p class="text-sm mt-2">
            "Agent: " {deal.agent.as_ref().map(|a| a.name.clone()).unwrap_or_else(|| "Unassigned".into())}
        </p>
        <p class="text-sm opacity-60">"Updated " {format::relative_time(&deal.updated_at)}</p>
    };
    let payments = if deal.payment_schedule.is_empty() {
        view! { <EmptyState title="No payments scheduled" /> }.into_any()
    } else {
        view! {
            <table class="table w-full">
                <TableHead headers=&["Due Date", "Amount", "Paid", "Status"] />
                <tbody>
                    {deal.payment_schedule.iter().map(|p| view! {
                        <tr>
                            <td>{format::short_date_str(&p.due_date)}</td>
                            <td>{format::currency(p.amount)}</td>
                            <td>{format::currency_or_na(p.paid_amount)}</td>
                            <td><StatusBadge status=format!("{:?}", p.status).to_lowercase() /></td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        }
        .into_any()
    };

    view! {
        <div class="grid gap-6 md:grid-cols-3">
            <Card title=deal.heading() class="md:col-span-2">{terms}</Card>
            <Card title="Status">{status}</Card>
            <Card title="Payment Schedule" class="md:col-span-3">{payments}</Card>
        </div>
    }
}

// ============================================================================
// 表单
// ============================================================================

#[component]
pub fn DealFormPage(#[prop(optional)] id: Option<i64>) -> impl IntoView {
    let api = use_auth().api;
    let router = use_router();
    let form = FormBinding::new(DealForm::default());

    let choices = use_loader_with_fixture("deal_form_choices", deal_choices_fixture, |api| {
        async move { deal_choices(&api).await }.boxed_local()
    });
    let choice_cell = choices.cell();
    let project_options = Signal::derive(move || {
        choice_cell.read(|s| s.data().map(|c| id_options(c.projects.clone())).unwrap_or_default())
    });
    let lead_options = Signal::derive(move || {
        choice_cell.read(|s| s.data().map(|c| id_options(c.leads.clone())).unwrap_or_default())
    });
    let agent_options = Signal::derive(move || {
        choice_cell.read(|s| s.data().map(|c| id_options(c.agents.clone())).unwrap_or_default())
    });

    if let Some(id) = id {
        let api = api.clone();
        spawn_local(async move {
            match deal_detail(&api, id).await {
                Ok(deal) => form.replace(DealForm::from_deal(&deal)),
                Err(e) => {
                    warn!(id, error = %e, "cannot load deal for editing");
                    form.cell().signal().update(|s| s.error = Some(e.message().to_owned()));
                }
            }
        });
    }

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            let cell = form.cell();
            let sent = submit_form(&cell, DealForm::validate, |payload| async move {
                match id {
                    Some(id) => api.deals().update(id, &payload).await,
                    None => api.deals().create(&payload).await,
                }
            })
            .await;
            if let Some(Ok(reply)) = sent {
                router.go(AppRoute::DealDetail(reply.data.id));
            }
        });
    };

    let title = if id.is_some() { "Edit Deal" } else { "New Deal" };
    let failure = form.failure();
    let submitting = form.submitting();
    let commission = {
        let cell = form.cell();
        move || {
            cell.read(|s| s.form.commission_amount())
                .map(format::currency)
                .unwrap_or_else(|| "-".into())
        }
    };
    let status_options = Signal::derive(|| {
        DealStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_owned(), format::snake_to_title(s.as_str())))
            .collect::<Vec<_>>()
    });

    view! {
        <DashboardLayout title=title>
            <Card>
                <form on:submit=on_submit class="space-y-2">
                    {move || failure.get().map(|msg| view! {
                        <div role="alert" class="alert alert-error text-sm py-2"><span>{msg}</span></div>
                    })}
                    <div class="grid gap-4 md:grid-cols-2">
                        <TextField label="Title *" value=form.text(|f| f.title.clone())
                            on_input=form.input("title", |f, v| f.title = v) error=form.error("title") />
                        <SelectField label="Status" value=form.text(|f| f.status.as_str().to_owned())
                            options=status_options
                            on_change=form.input("status", |f, v| f.status = DealStatus::parse(&v).unwrap_or(f.status)) />
                        <SelectField label="Project *" value=form.text(|f| f.project_id.clone())
                            options=project_options placeholder="Select project"
                            on_change=form.input("projectId", |f, v| f.project_id = v) error=form.error("projectId") />
                        <SelectField label="Lead *" value=form.text(|f| f.lead_id.clone())
                            options=lead_options placeholder="Select lead"
                            on_change=form.input("leadId", |f, v| f.lead_id = v) error=form.error("leadId") />
                        <SelectField label="Agent *" value=form.text(|f| f.agent_id.clone())
                            options=agent_options placeholder="Select agent"
                            on_change=form.input("assignedAgentId", |f, v| f.agent_id = v) error=form.error("assignedAgentId") />
                        <TextField label="Deal Value (AED) *" input_type="number" value=form.text(|f| f.deal_value.clone())
                            on_input=form.input("dealValue", |f, v| f.deal_value = v) error=form.error("dealValue") />
                        <TextField label="Commission Rate (%) *" input_type="number" value=form.text(|f| f.commission_rate.clone())
                            on_input=form.input("commissionRate", |f, v| f.commission_rate = v) error=form.error("commissionRate") />
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Commission Amount"</span></label>
                            <div class="input input-bordered flex items-center">{commission}</div>
                        </div>
                        <TextField label="Unit Number" value=form.text(|f| f.unit_number.clone())
                            on_input=form.input("unitNumber", |f, v| f.unit_number = v) />
                        <TextField label="Floor" input_type="number" value=form.text(|f| f.floor_number.clone())
                            on_input=form.input("floorNumber", |f, v| f.floor_number = v) />
                        <TextField label="Carpet Area (sq ft)" input_type="number" value=form.text(|f| f.carpet_area.clone())
                            on_input=form.input("carpetArea", |f, v| f.carpet_area = v) />
                        <TextField label="Expected Closing" input_type="date" value=form.text(|f| f.expected_closing_date.clone())
                            on_input=form.input("expectedClosingDate", |f, v| f.expected_closing_date = v) />
                        <TextField label="Closing Date" input_type="date" value=form.text(|f| f.closing_date.clone())
                            on_input=form.input("closingDate", |f, v| f.closing_date = v) />
                    </div>
                    <TextAreaField label="Notes" value=form.text(|f| f.notes.clone())
                        on_input=form.input("notes", |f, v| f.notes = v) />
                    <div class="flex justify-end gap-2 pt-4">
                        <Link to=AppRoute::Deals.to_path() class="btn btn-ghost">"Cancel"</Link>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Save Deal" }}
                        </button>
                    </div>
                </form>
            </Card>
        </DashboardLayout>
    }
}
