//! 顺序队列
//!
//! 一次只交出一个任务；上一个任务完成后再取下一个，两次之间等待固定间隔。
//! 取消只在两个任务之间生效，正在处理的任务总会完成。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// 取消句柄，可以在其他任务里调用 `cancel`
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct SequentialQueue<T> {
    items: VecDeque<T>,
    delay: Duration,
    cancel: CancelHandle,
    started: bool,
}

impl<T> SequentialQueue<T> {
    pub fn new(items: impl IntoIterator<Item = T>, delay: Duration, cancel: CancelHandle) -> Self {
        Self {
            items: items.into_iter().collect(),
            delay,
            cancel,
            started: false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 取下一个任务；第一个之后的每个任务前先等待间隔
    pub async fn next(&mut self) -> Option<T> {
        if self.items.is_empty() || self.cancel.is_cancelled() {
            return None;
        }

        if self.started && !self.delay.is_zero() {
            sleep(self.delay).await;
            if self.cancel.is_cancelled() {
                return None;
            }
        }

        self.started = true;
        self.items.pop_front()
    }
}
