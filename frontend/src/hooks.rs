//! 页面级辅助
//!
//! 把核心库的控制器接到信号上，并在组件创建时发起首次加载。

use std::future::Future;
use std::sync::Arc;

use estatecrm::ApiResult;
use estatecrm::controller::{FormState, ListController, ListState, Listing, PageState, load_into};
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{Api, use_auth};
use crate::web::{FetchHttpClient, SignalCell};

pub type ListCell<T> = SignalCell<ListState<T, <T as Listing>::Filters>>;
pub type Lister<T> = ListController<FetchHttpClient, T, ListCell<T>>;

/// 创建列表控制器并加载第一页
pub fn use_list<T>() -> Lister<T>
where
    T: Listing + Send + Sync,
    T::Filters: Send + Sync,
{
    let api = use_auth().api;
    let list = ListController::new(api, SignalCell::new(ListState::default()));
    spawn_list(&list, |l| async move {
        l.load().await;
    });
    list
}

/// 在后台执行一次列表操作
pub fn spawn_list<T, F, Fut>(list: &Lister<T>, f: F)
where
    T: Listing + Send + Sync,
    T::Filters: Send + Sync,
    F: FnOnce(Lister<T>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(f(list.clone()));
}

type Fetch<T> = Arc<dyn Fn(Api) -> LocalBoxFuture<'static, ApiResult<T>> + Send + Sync>;
type Fixture<T> = Arc<dyn Fn() -> Option<T> + Send + Sync>;

/// 单个资源（或一组并发资源）的页面加载器
pub struct Loader<T: 'static> {
    cell: SignalCell<PageState<T>>,
    api: Api,
    label: &'static str,
    fixture: Fixture<T>,
    fetch: Fetch<T>,
}

impl<T: 'static> Clone for Loader<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell,
            api: self.api.clone(),
            label: self.label,
            fixture: self.fixture.clone(),
            fetch: self.fetch.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> Loader<T> {
    pub fn cell(&self) -> SignalCell<PageState<T>> {
        self.cell
    }

    /// 重新加载；旧的响应按票据丢弃
    pub fn reload(&self) {
        let this = self.clone();
        spawn_local(async move {
            let fetch = (this.fetch)(this.api.clone());
            let fixture = move || (this.fixture)();
            load_into(&this.cell, this.api.config().fallback, this.label, fixture, fetch).await;
        });
    }
}

/// 创建加载器并立即加载一次
pub fn use_loader<T, F>(label: &'static str, fetch: F) -> Loader<T>
where
    T: Send + Sync + 'static,
    F: Fn(Api) -> LocalBoxFuture<'static, ApiResult<T>> + Send + Sync + 'static,
{
    use_loader_with_fixture(label, || None, fetch)
}

/// 加载失败且启用了演示数据时改用 `fixture`
pub fn use_loader_with_fixture<T, X, F>(label: &'static str, fixture: X, fetch: F) -> Loader<T>
where
    T: Send + Sync + 'static,
    X: Fn() -> Option<T> + Send + Sync + 'static,
    F: Fn(Api) -> LocalBoxFuture<'static, ApiResult<T>> + Send + Sync + 'static,
{
    let loader = Loader {
        cell: SignalCell::new(PageState::new()),
        api: use_auth().api,
        label,
        fixture: Arc::new(fixture),
        fetch: Arc::new(fetch),
    };
    loader.reload();
    loader
}

// ============================================================================
// 表单绑定
// ============================================================================

/// 把 `FormState` 的字段接到输入控件上
pub struct FormBinding<F: 'static>(SignalCell<FormState<F>>);

impl<F: 'static> Clone for FormBinding<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for FormBinding<F> {}

impl<F: Send + Sync + 'static> FormBinding<F> {
    pub fn new(form: F) -> Self {
        Self(SignalCell::new(FormState::new(form)))
    }

    pub fn cell(&self) -> SignalCell<FormState<F>> {
        self.0
    }

    pub fn text(&self, get: fn(&F) -> String) -> Signal<String> {
        let cell = self.0;
        Signal::derive(move || cell.read(|s| get(&s.form)))
    }

    pub fn flag(&self, get: fn(&F) -> bool) -> Signal<bool> {
        let cell = self.0;
        Signal::derive(move || cell.read(|s| get(&s.form)))
    }

    /// 修改字段并清除该字段的错误
    pub fn input(&self, field: &'static str, set: fn(&mut F, String)) -> Callback<String> {
        let cell = self.0;
        Callback::new(move |value: String| {
            cell.signal().update(|s| s.edit(field, |f| set(f, value)));
        })
    }

    pub fn toggle(&self, field: &'static str, set: fn(&mut F, bool)) -> Callback<bool> {
        let cell = self.0;
        Callback::new(move |value: bool| {
            cell.signal().update(|s| s.edit(field, |f| set(f, value)));
        })
    }

    pub fn error(&self, field: &'static str) -> Signal<Option<String>> {
        let cell = self.0;
        Signal::derive(move || cell.read(|s| s.error_for(field).map(str::to_owned)))
    }

    pub fn submitting(&self) -> Signal<bool> {
        let cell = self.0;
        Signal::derive(move || cell.read(|s| s.submitting))
    }

    /// 提交失败时的整体错误
    pub fn failure(&self) -> Signal<Option<String>> {
        let cell = self.0;
        Signal::derive(move || cell.read(|s| s.error.clone()))
    }

    pub fn replace(&self, form: F) {
        self.0.signal().update(|s| s.form = form);
    }
}
