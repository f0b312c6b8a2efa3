//! 通知服务 - 业务能力层
//!
//! 页面右上角的 toast：四种级别，到时自动关闭，也可以被用户提前关闭

use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// 一条通知
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub created_at: Instant,
    pub duration: Duration,
    pub dismissed: bool,
}

impl Notification {
    pub fn is_visible(&self, now: Instant) -> bool {
        !self.dismissed && now.saturating_duration_since(self.created_at) < self.duration
    }
}

/// 通知中心
///
/// 职责：
/// - 发出通知并写日志
/// - 保留本次会话的全部通知
/// - 计算当前仍然可见的通知
pub struct ToastCenter {
    duration: Duration,
    next_id: u64,
    history: Vec<Notification>,
}

impl ToastCenter {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            next_id: 1,
            history: Vec::new(),
        }
    }

    /// 发出通知，返回通知 id
    pub fn notify(
        &mut self,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> u64 {
        let title = title.into();
        let message = message.into();

        match severity {
            Severity::Success => info!("✅ {}: {}", title, message),
            Severity::Info => info!("ℹ️ {}: {}", title, message),
            Severity::Warning => warn!("⚠️ {}: {}", title, message),
            Severity::Error => error!("❌ {}: {}", title, message),
        }

        let id = self.next_id;
        self.next_id += 1;
        self.history.push(Notification {
            id,
            severity,
            title,
            message,
            created_at: Instant::now(),
            duration: self.duration,
            dismissed: false,
        });
        id
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.notify(Severity::Success, title, message)
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.notify(Severity::Error, title, message)
    }

    pub fn warning(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.notify(Severity::Warning, title, message)
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.notify(Severity::Info, title, message)
    }

    /// 用户点击关闭
    pub fn dismiss(&mut self, id: u64) -> bool {
        match self.history.iter_mut().find(|n| n.id == id && !n.dismissed) {
            Some(n) => {
                n.dismissed = true;
                true
            }
            None => false,
        }
    }

    /// 当前可见的通知
    pub fn active(&self, now: Instant) -> Vec<&Notification> {
        self.history.iter().filter(|n| n.is_visible(now)).collect()
    }

    pub fn history(&self) -> &[Notification] {
        &self.history
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.history.iter().filter(|n| n.severity == severity).count()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_expire_after_duration() {
        let mut toasts = ToastCenter::new(Duration::from_secs(5));
        let id = toasts.success("Sucesso", "a.pdf processado com sucesso");

        let created = toasts.history()[0].created_at;
        assert_eq!(toasts.active(created).len(), 1);
        assert_eq!(toasts.active(created + Duration::from_secs(5)).len(), 0);
        assert_eq!(toasts.history()[0].id, id);
    }

    #[test]
    fn test_dismiss_closes_early_once() {
        let mut toasts = ToastCenter::new(Duration::from_secs(5));
        let first = toasts.warning("Atenção", "Apenas arquivos PDF são aceitos");
        toasts.info("Abrindo PDF", "a.pdf");

        assert!(toasts.dismiss(first));
        assert!(!toasts.dismiss(first));
        assert!(!toasts.dismiss(99));

        let now = Instant::now();
        let active = toasts.active(now);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity, Severity::Info);
        // 历史记录保留已关闭的通知
        assert_eq!(toasts.history().len(), 2);
    }

    #[test]
    fn test_count_by_severity() {
        let mut toasts = ToastCenter::new(Duration::from_secs(5));
        toasts.error("Erro", "x");
        toasts.error("Erro", "y");
        toasts.success("Sucesso", "z");
        assert_eq!(toasts.count(Severity::Error), 2);
        assert_eq!(toasts.count(Severity::Warning), 0);
        assert_eq!(toasts.last().map(|n| n.message.as_str()), Some("z"));
    }
}
