use estatecrm::controller::Indicator;
use estatecrm_shared::format;
use estatecrm_shared::models::{Project, ProjectStatus};
use leptos::prelude::*;

use crate::components::fields::SelectField;
use crate::components::layout::DashboardLayout;
use crate::components::list::{overlays, pagination, search_box, table_body};
use crate::components::ui::{EmptyState, RefreshBar, Spinner, StatusBadge, TableHead};
use crate::hooks::{Lister, spawn_list, use_list};

const HEADERS: &[&str] = &["Project", "Developer", "Location", "Units", "Price Range", "Status", ""];

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let projects = use_list::<Project>();
    let (grid, set_grid) = signal(true);

    let status_filter = {
        let projects = projects.clone();
        Callback::new(move |raw: String| {
            let status = estatecrm_shared::filters::non_empty(&raw);
            spawn_list(&projects, move |l| async move {
                l.update_filters(|f| f.status = status).await;
            });
        })
    };
    let status_options = Signal::derive(|| {
        ProjectStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_owned(), s.label().to_owned()))
            .collect::<Vec<_>>()
    });

    view! {
        <DashboardLayout title="Projects">
            {overlays(&projects)}
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="flex flex-wrap items-end gap-4">
                    {search_box(&projects, "Search projects...", |f, term| f.search = term)}
                    <SelectField
                        label="Status"
                        value=Signal::derive(String::new)
                        options=status_options
                        placeholder="All statuses"
                        on_change=status_filter
                    />
                </div>
                <div class="join">
                    <button
                        class=move || if grid.get() { "join-item btn btn-sm btn-active" } else { "join-item btn btn-sm" }
                        on:click=move |_| set_grid.set(true)
                    >
                        "Grid"
                    </button>
                    <button
                        class=move || if grid.get() { "join-item btn btn-sm" } else { "join-item btn btn-sm btn-active" }
                        on:click=move |_| set_grid.set(false)
                    >
                        "List"
                    </button>
                </div>
            </div>
            {
                let projects = projects.clone();
                move || if grid.get() { project_grid(&projects).into_any() } else { project_table(&projects).into_any() }
            }
            {pagination(&projects)}
        </DashboardLayout>
    }
}

fn project_grid(projects: &Lister<Project>) -> impl IntoView + use<> {
    let cell = *projects.cell();
    let projects = projects.clone();
    move || {
        let projects = projects.clone();
        cell.signal().with(move |s| {
            if s.rows.data().is_none() {
                return view! { <Spinner /> }.into_any();
            }
            let bar = (s.rows.indicator() == Indicator::Refreshing).then(|| view! { <RefreshBar /> });
            if s.is_empty() {
                return view! { {bar}<EmptyState title="No projects found" /> }.into_any();
            }
            view! {
                {bar}
                <div class="grid gap-6 md:grid-cols-2 xl:grid-cols-3">
                    {s.rows().iter().map(|p| project_card(p, projects.clone())).collect_view()}
                </div>
            }
            .into_any()
        })
    }
}

fn project_card(project: &Project, projects: Lister<Project>) -> impl IntoView + use<> {
    let id = project.id;
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex justify-between items-start">
                    <h3 class="card-title">{project.name.clone()}</h3>
                    <StatusBadge status=project.status.as_str() />
                </div>
                <p class="text-sm opacity-60">{project.developer_name().to_owned()}</p>
                <p class="text-sm">{project.location.clone()}</p>
                <p class="text-sm line-clamp-2">
                    {project.description.as_deref().map(|d| format::truncate(d, 120)).unwrap_or_default()}
                </p>
                <div class="flex justify-between text-sm mt-2">
                    <span>{project.total_units.map(|u| format!("{u} units")).unwrap_or_else(|| "Units TBD".into())}</span>
                    <span class="font-semibold">{project.price_range.clone().unwrap_or_else(|| "Price on request".into())}</span>
                </div>
                <div class="card-actions justify-end">
                    <button class="btn btn-ghost btn-xs text-error" on:click=move |_| projects.request_delete(id)>
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn project_table(projects: &Lister<Project>) -> impl IntoView + use<> {
    let row = {
        let projects = projects.clone();
        move |project: &Project| {
            let id = project.id;
            let projects = projects.clone();
            view! {
                <tr>
                    <td class="font-bold">{project.name.clone()}</td>
                    <td>{project.developer_name().to_owned()}</td>
                    <td>{project.location.clone()}</td>
                    <td>{project.total_units.map(|u| u.to_string()).unwrap_or_else(|| "-".into())}</td>
                    <td>{project.price_range.clone().unwrap_or_else(|| "-".into())}</td>
                    <td><StatusBadge status=project.status.as_str() /></td>
                    <td>
                        <button class="btn btn-ghost btn-xs text-error" on:click=move |_| projects.request_delete(id)>
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
                {table_body(projects, HEADERS.len() as u32, || view! { <EmptyState title="No projects found" /> }.into_any(), row)}
            </table>
        </div>
    }
}
