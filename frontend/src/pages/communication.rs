//! 沟通记录：通话、短信、WhatsApp 合并后的时间线

use estatecrm::controller::{communication_fixture, communication_history};
use estatecrm_shared::filters::{CommunicationFilters, non_empty};
use estatecrm_shared::format;
use estatecrm_shared::models::{Channel, CommunicationEntry};
use futures::FutureExt;
use leptos::prelude::*;

use crate::components::fields::{SelectField, TextField};
use crate::components::layout::DashboardLayout;
use crate::components::ui::{Card, EmptyState, StatusBadge, TableHead, phased};
use crate::hooks::use_loader_with_fixture;

const HEADERS: &[&str] = &["Type", "Lead", "Agent", "Details", "Status", "When"];

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items.iter().map(|(v, l)| ((*v).to_owned(), (*l).to_owned())).collect()
}

#[component]
pub fn CommunicationPage() -> impl IntoView {
    let filters = RwSignal::new(CommunicationFilters::default());

    let history = use_loader_with_fixture(
        "communication",
        move || Some(communication_fixture(&filters.get_untracked())),
        move |api| {
            let filters = filters.get_untracked();
            async move { communication_history(&api, &filters).await }.boxed_local()
        },
    );

    // 每次修改筛选条件都重新拉取
    let set_filter = {
        let history = history.clone();
        move |apply: fn(&mut CommunicationFilters, Option<String>)| {
            let history = history.clone();
            Callback::new(move |raw: String| {
                filters.update(|f| apply(f, non_empty(&raw)));
                history.reload();
            })
        }
    };

    let channels = Signal::derive(|| {
        Channel::ALL
            .iter()
            .map(|c| (c.as_str().to_owned(), c.label().to_owned()))
            .collect::<Vec<_>>()
    });
    let statuses = Signal::derive(|| {
        pairs(&[("scheduled", "Scheduled"), ("completed", "Completed"), ("cancelled", "Cancelled"), ("missed", "Missed")])
    });
    let directions = Signal::derive(|| pairs(&[("inbound", "Inbound"), ("outbound", "Outbound")]));
    let text = |get: fn(&CommunicationFilters) -> Option<String>| {
        Signal::derive(move || filters.with(|f| get(f).unwrap_or_default()))
    };

    let retry = {
        let history = history.clone();
        Callback::new(move |_: ()| history.reload())
    };

    view! {
        <DashboardLayout title="Communication">
            <Card>
                <div class="grid gap-4 md:grid-cols-3 xl:grid-cols-6">
                    <TextField label="Search" placeholder="Lead, agent or content" value=text(|f| f.search.clone())
                        on_input=set_filter(|f, v| f.search = v) />
                    <SelectField label="Channel" value=text(|f| f.channel.clone()) options=channels
                        placeholder="All channels" on_change=set_filter(|f, v| f.channel = v) />
                    <SelectField label="Status" value=text(|f| f.status.clone()) options=statuses
                        placeholder="All statuses" on_change=set_filter(|f, v| f.status = v) />
                    <SelectField label="Direction" value=text(|f| f.direction.clone()) options=directions
                        placeholder="Both" on_change=set_filter(|f, v| f.direction = v) />
                    <TextField label="From" input_type="date" value=text(|f| f.date_from.clone())
                        on_input=set_filter(|f, v| f.date_from = v) />
                    <TextField label="To" input_type="date" value=text(|f| f.date_to.clone())
                        on_input=set_filter(|f, v| f.date_to = v) />
                </div>
            </Card>
            {phased(history.cell(), retry, timeline)}
        </DashboardLayout>
    }
}

fn timeline(entries: &Vec<CommunicationEntry>) -> impl IntoView + use<> {
    if entries.is_empty() {
        return view! { <EmptyState title="No communication found" /> }.into_any();
    }
    let rows = entries
        .iter()
        .map(|e| {
            let details = e
                .subject
                .clone()
                .or_else(|| e.content.clone())
                .map(|t| format::truncate(&t, 80))
                .unwrap_or_default();
            view! {
                <tr>
                    <td>
                        <span class="badge badge-outline">{e.channel.label()}</span>
                        <div class="text-xs opacity-60">{e.direction.as_str()}</div>
                    </td>
                    <td>
                        <div class="font-medium">{e.lead_name.clone()}</div>
                        <div class="text-xs opacity-60">{e.lead_phone.as_deref().map(format::phone).unwrap_or_default()}</div>
                    </td>
                    <td>{e.agent_name.clone()}</td>
                    <td class="text-sm">
                        {details}
                        {e.duration.map(|d| view! { <div class="text-xs opacity-60">{format!("{}m {}s", d / 60, d % 60)}</div> })}
                    </td>
                    <td><StatusBadge status=e.status.as_str() /></td>
                    <td class="text-sm">{format::relative_time(&e.created_at)}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="card bg-base-100 shadow-xl overflow-x-auto">
            <table class="table table-zebra w-full">
                <TableHead headers=HEADERS />
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
    .into_any()
}
