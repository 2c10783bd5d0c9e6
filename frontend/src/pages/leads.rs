//! 线索：列表、详情、新建/编辑

use estatecrm::controller::{LeadChoices, lead_choices, lead_choices_fixture, lead_detail, submit_form};
use estatecrm::route::AppRoute;
use estatecrm_shared::format;
use estatecrm_shared::forms::LeadForm;
use estatecrm_shared::models::Lead;
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::SubmitEvent;
use tracing::warn;

use crate::auth::use_auth;
use crate::components::fields::{SelectField, TextAreaField, TextField, id_options, name_options};
use crate::components::layout::DashboardLayout;
use crate::components::list::{overlays, pagination, search_box, table_body};
use crate::components::ui::{Card, EmptyState, Info, StatusBadge, TableHead, phased};
use crate::hooks::{FormBinding, Loader, spawn_list, use_list, use_loader, use_loader_with_fixture};
use crate::web::router::{Link, use_router};

const HEADERS: &[&str] = &["Lead", "Source", "Status", "Assigned To", "Budget", "Created", ""];

fn use_lead_choices() -> Loader<LeadChoices> {
    use_loader_with_fixture("lead_form_choices", lead_choices_fixture, |api| {
        async move { lead_choices(&api).await }.boxed_local()
    })
}

/// 从已加载的选项中取出一组下拉项；尚未加载时为空
fn choice_options(
    choices: &Loader<LeadChoices>,
    pick: fn(&LeadChoices) -> Vec<(String, String)>,
) -> Signal<Vec<(String, String)>> {
    let cell = choices.cell();
    Signal::derive(move || cell.read(|s| s.data().map(pick).unwrap_or_default()))
}

#[component]
pub fn LeadsPage() -> impl IntoView {
    let leads = use_list::<Lead>();
    let choices = use_lead_choices();

    let status_filter = {
        let leads = leads.clone();
        Callback::new(move |raw: String| {
            let status = raw.parse::<i64>().ok();
            spawn_list(&leads, move |l| async move {
                l.update_filters(|f| f.status_id = status).await;
            });
        })
    };

    let row = {
        let leads = leads.clone();
        move |lead: &Lead| {
            let id = lead.id;
            let leads = leads.clone();
            view! {
                <tr>
                    <td>
                        <div class="font-bold">{lead.name.clone()}</div>
                        <div class="text-sm opacity-60">{lead.email.clone()}</div>
                        <div class="text-sm opacity-60">{format::phone(&lead.phone)}</div>
                    </td>
                    <td>{lead.source_name().to_owned()}</td>
                    <td><StatusBadge status=lead.status_name().to_owned() /></td>
                    <td>{lead.assignee_name().unwrap_or("Unassigned").to_owned()}</td>
                    <td>{format::currency_or_na(lead.budget)}</td>
                    <td>{format::short_date(&lead.created_at)}</td>
                    <td class="flex gap-1">
                        <Link to=AppRoute::LeadDetail(id).to_path() class="btn btn-ghost btn-xs">"View"</Link>
                        <Link to=AppRoute::LeadEdit(id).to_path() class="btn btn-ghost btn-xs">"Edit"</Link>
                        <button class="btn btn-ghost btn-xs text-error" on:click=move |_| leads.request_delete(id)>
                            "Delete"
                        </button>
                    </td>
                </tr>
            }
        }
    };

    view! {
        <DashboardLayout title="Leads">
            {overlays(&leads)}
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="flex flex-wrap items-end gap-4">
                    {search_box(&leads, "Search leads...", |f, term| f.search = term)}
                    <SelectField
                        label="Status"
                        value=Signal::derive(String::new)
                        options=choice_options(&choices, |c| id_options(c.statuses.clone()))
                        placeholder="All statuses"
                        on_change=status_filter
                    />
                </div>
                <Link to=AppRoute::LeadNew.to_path() class="btn btn-primary">"Add Lead"</Link>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <TableHead headers=HEADERS />
                        {table_body(
                            &leads,
                            HEADERS.len() as u32,
                            || view! {
                                <EmptyState title="No leads found">
                                    <Link to=AppRoute::LeadNew.to_path() class="btn btn-primary btn-sm">"Add Lead"</Link>
                                </EmptyState>
                            }.into_any(),
                            row,
                        )}
                    </table>
                </div>
            </div>
            {pagination(&leads)}
        </DashboardLayout>
    }
}

#[component]
pub fn LeadDetailPage(id: i64) -> impl IntoView {
    let loader = use_loader("lead_detail", move |api| async move { lead_detail(&api, id).await }.boxed_local());
    let retry = {
        let loader = loader.clone();
        Callback::new(move |_: ()| loader.reload())
    };

    view! {
        <DashboardLayout title="Lead Details">
            <div class="flex justify-between">
                <Link to=AppRoute::Leads.to_path() class="btn btn-ghost">"← Back to Leads"</Link>
                <Link to=AppRoute::LeadEdit(id).to_path() class="btn btn-primary">"Edit Lead"</Link>
            </div>
            {phased(loader.cell(), retry, lead_overview)}
        </DashboardLayout>
    }
}

fn lead_overview(lead: &Lead) -> impl IntoView + use<> {
    let contact = view! {
        <div class="grid grid-cols-2 gap-4 text-sm">
            <Info label="Email" value=lead.email.clone() />
            <Info label="Phone" value=format::phone(&lead.phone) />
            <Info label="Alternate Phone" value=lead.alternate_phone.clone().unwrap_or_else(|| "N/A".into()) />
            <Info label="Source" value=lead.source_name().to_owned() />
            <Info label="Budget" value=format::currency_or_na(lead.budget) />
            <Info label="Next Follow-up" value=lead.next_follow_up.as_deref().map(format::short_date_str).unwrap_or_else(|| "Not scheduled".into()) />
        </div>
    };
    let status = view! {
        <StatusBadge status=lead.status_name().to_owned() />
        <p class="text-sm mt-2">"Assigned to: " {lead.assignee_name().unwrap_or("Unassigned").to_owned()}</p>
        <p class="text-sm opacity-60">"Created " {format::relative_time(&lead.created_at)}</p>
    };
    let notes = view! {
        <p class="whitespace-pre-line">{lead.requirements.clone().unwrap_or_else(|| "None recorded".into())}</p>
        <h4 class="font-semibold mt-4">"Notes"</h4>
        <p class="whitespace-pre-line">{lead.notes.clone().unwrap_or_else(|| "No notes".into())}</p>
    };

    view! {
        <div class="grid gap-6 md:grid-cols-3">
            <Card title=lead.name.clone() class="md:col-span-2">{contact}</Card>
            <Card title="Status">{status}</Card>
            <Card title="Requirements" class="md:col-span-3">{notes}</Card>
        </div>
    }
}

/// 新建与编辑共用；`id` 有值时先加载原记录
#[component]
pub fn LeadFormPage(#[prop(optional)] id: Option<i64>) -> impl IntoView {
    let api = use_auth().api;
    let router = use_router();
    let form = FormBinding::new(LeadForm::default());
    let choices = use_lead_choices();

    if let Some(id) = id {
        let api = api.clone();
        spawn_local(async move {
            match lead_detail(&api, id).await {
                Ok(lead) => form.replace(LeadForm::from_lead(&lead)),
                Err(e) => {
                    warn!(id, error = %e, "cannot load lead for editing");
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
            let sent = submit_form(&cell, LeadForm::validate, |payload| async move {
                match id {
                    Some(id) => api.leads().update(id, &payload).await,
                    None => api.leads().create(&payload).await,
                }
            })
            .await;
            if let Some(Ok(reply)) = sent {
                router.go(AppRoute::LeadDetail(reply.data.id));
            }
        });
    };

    let title = if id.is_some() { "Edit Lead" } else { "Add New Lead" };
    let failure = form.failure();
    let submitting = form.submitting();

    view! {
        <DashboardLayout title=title>
            <Card>
                <form on:submit=on_submit class="space-y-2">
                    {move || failure.get().map(|msg| view! {
                        <div role="alert" class="alert alert-error text-sm py-2"><span>{msg}</span></div>
                    })}
                    <div class="grid gap-4 md:grid-cols-2">
                        <TextField label="Name *" value=form.text(|f| f.name.clone())
                            on_input=form.input("name", |f, v| f.name = v) error=form.error("name") />
                        <TextField label="Email *" input_type="email" value=form.text(|f| f.email.clone())
                            on_input=form.input("email", |f, v| f.email = v) error=form.error("email") />
                        <TextField label="Phone *" value=form.text(|f| f.phone.clone())
                            on_input=form.input("phone", |f, v| f.phone = v) error=form.error("phone") />
                        <TextField label="Alternate Phone" value=form.text(|f| f.alternate_phone.clone())
                            on_input=form.input("alternatePhone", |f, v| f.alternate_phone = v) />
                        <SelectField label="Source *" value=form.text(|f| f.source.clone())
                            options=choice_options(&choices, |c| name_options(c.sources.clone()))
                            placeholder="Select source"
                            on_change=form.input("source", |f, v| f.source = v) error=form.error("source") />
                        <SelectField label="Status" value=form.text(|f| f.status_id.clone())
                            options=choice_options(&choices, |c| id_options(c.statuses.clone()))
                            on_change=form.input("statusId", |f, v| f.status_id = v) />
                        <SelectField label="Assign To" value=form.text(|f| f.assigned_to_id.clone())
                            options=choice_options(&choices, |c| id_options(c.agents.clone()))
                            placeholder="Unassigned"
                            on_change=form.input("assignedToId", |f, v| f.assigned_to_id = v) />
                        <TextField label="Budget (AED)" input_type="number" value=form.text(|f| f.budget.clone())
                            on_input=form.input("budget", |f, v| f.budget = v) />
                        <TextField label="Next Follow-up" input_type="date" value=form.text(|f| f.next_follow_up.clone())
                            on_input=form.input("nextFollowUp", |f, v| f.next_follow_up = v) />
                    </div>
                    <TextAreaField label="Requirements" value=form.text(|f| f.requirements.clone())
                        on_input=form.input("requirements", |f, v| f.requirements = v) />
                    <TextAreaField label="Notes" value=form.text(|f| f.notes.clone())
                        on_input=form.input("notes", |f, v| f.notes = v) />
                    <div class="flex justify-end gap-2 pt-4">
                        <Link to=AppRoute::Leads.to_path() class="btn btn-ghost">"Cancel"</Link>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Save Lead" }}
                        </button>
                    </div>
                </form>
            </Card>
        </DashboardLayout>
    }
}
