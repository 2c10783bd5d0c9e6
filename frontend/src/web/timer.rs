//! 定时器封装模块

use std::time::Duration;

use async_trait::async_trait;
use estatecrm::poller::Timer;

/// 基于 `setTimeout` 的睡眠，供轮询使用
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, period: Duration) {
        gloo_timers::future::sleep(period).await;
    }
}
