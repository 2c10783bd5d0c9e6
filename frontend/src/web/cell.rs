//! 页面状态信号
//!
//! 控制器只认识 `StateCell`；这里把 Leptos 的 `RwSignal` 接上去。
//! 页面卸载后信号被释放，`try_update` 返回 `None`，迟到的响应随之丢弃。

use estatecrm::controller::StateCell;
use leptos::prelude::*;

pub struct SignalCell<S: 'static>(RwSignal<S>);

impl<S: 'static> Clone for SignalCell<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for SignalCell<S> {}

impl<S: Send + Sync + 'static> SignalCell<S> {
    pub fn new(initial: S) -> Self {
        Self(RwSignal::new(initial))
    }

    pub fn signal(&self) -> RwSignal<S> {
        self.0
    }

    /// 在视图中读取并追踪
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R
    where
        R: Default,
    {
        self.0.try_with(f).unwrap_or_default()
    }
}

impl<S: Send + Sync + 'static> StateCell<S> for SignalCell<S> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.0.try_with_untracked(f)
    }
}
