//! 列表页的公共部件：表格主体、分页、删除确认与提示

use estatecrm::controller::{Indicator, Listing, Removable};
use leptos::prelude::*;

use super::ui::{ConfirmButton, ErrorBanner, NoticeStack, Pagination, RefreshBar, Spinner};
use crate::hooks::{ListCell, Lister, spawn_list};

fn cell_of<T>(list: &Lister<T>) -> ListCell<T>
where
    T: Listing + Send + Sync,
    T::Filters: Send + Sync,
{
    *list.cell()
}

/// 表格主体
///
/// 首次加载转圈，失败显示错误条，为空时渲染 `empty`。
/// 重新加载期间保留旧行，并在其上方插入一行进度条。
pub fn table_body<T, V, E, R>(list: &Lister<T>, colspan: u32, empty: E, row: R) -> impl IntoView + use<T, V, E, R>
where
    T: Listing + Send + Sync,
    T::Filters: Send + Sync,
    V: IntoView + 'static,
    E: Fn() -> AnyView + Send + Sync + 'static,
    R: Fn(&T) -> V + Send + Sync + 'static,
{
    let cell = cell_of(list);
    let colspan = colspan.to_string();
    let retry = {
        let list = list.clone();
        Callback::new(move |_: ()| {
            spawn_list(&list, |l| async move {
                l.load().await;
            })
        })
    };

    view! {
        <tbody>
            {move || cell.signal().with(|s| {
                if let Some(error) = s.rows.error() {
                    return view! {
                        <tr><td colspan=colspan.clone()><ErrorBanner error=error.clone() on_retry=retry /></td></tr>
                    }.into_any();
                }
                if s.rows.data().is_none() {
                    return view! { <tr><td colspan=colspan.clone()><Spinner label="Loading..." /></td></tr> }.into_any();
                }
                let bar = (s.rows.indicator() == Indicator::Refreshing).then(|| {
                    view! { <tr><td colspan=colspan.clone() class="p-0"><RefreshBar /></td></tr> }
                });
                if s.is_empty() {
                    return view! { {bar}<tr><td colspan=colspan.clone()>{empty()}</td></tr> }.into_any();
                }
                view! { {bar}{s.rows().iter().map(&row).collect_view()} }.into_any()
            })}
        </tbody>
    }
}

pub fn pagination<T>(list: &Lister<T>) -> impl IntoView + use<T>
where
    T: Listing + Send + Sync,
    T::Filters: Send + Sync,
{
    let cell = cell_of(list);
    let list = list.clone();
    let on_change = Callback::new(move |page: u32| {
        spawn_list(&list, move |l| async move {
            l.go_to(page).await;
        })
    });
    view! {
        <Pagination
            page=Signal::derive(move || cell.read(|s| s.query.page))
            pages=Signal::derive(move || cell.read(|s| s.page_count()))
            on_change=on_change
        />
    }
}

/// 提示队列与删除确认框
pub fn overlays<T>(list: &Lister<T>) -> impl IntoView + use<T>
where
    T: Removable + Send + Sync,
    T::Filters: Send + Sync,
{
    let cell = cell_of(list);
    let on_dismiss = Callback::new(move |id: uuid::Uuid| {
        cell.signal().update(|s| s.notices.dismiss(id));
    });
    let on_confirm = {
        let list = list.clone();
        Callback::new(move |_: ()| {
            spawn_list(&list, |l| async move {
                l.confirm_delete().await;
            })
        })
    };
    let on_cancel = {
        let list = list.clone();
        Callback::new(move |_: ()| list.cancel_delete())
    };

    view! {
        <NoticeStack notices=Signal::derive(move || cell.read(|s| s.notices.clone())) on_dismiss=on_dismiss />
        <ConfirmButton
            noun=T::NOUN
            pending=Signal::derive(move || cell.read(|s| s.pending_delete.is_some()))
            on_confirm=on_confirm
            on_cancel=on_cancel
        />
    }
}

/// 搜索框，回车或失焦时应用
pub fn search_box<T>(list: &Lister<T>, placeholder: &'static str, set: fn(&mut T::Filters, Option<String>)) -> impl IntoView + use<T>
where
    T: Listing + Send + Sync,
    T::Filters: Send + Sync,
{
    let list = list.clone();
    let on_change = move |ev: leptos::ev::Event| {
        let term = estatecrm_shared::filters::non_empty(&event_target_value(&ev));
        spawn_list(&list, move |l| async move {
            l.update_filters(|f| set(f, term)).await;
        });
    };
    view! {
        <input type="search" class="input input-bordered w-full md:w-72" placeholder=placeholder on:change=on_change />
    }
}
