use crate::workflow::BatchStats;
use std::time::{Duration, Instant};

/// 统计数字动画：固定时长内从 0 线性增长到目标值
///
/// 每次重新开始都从 0 起步，不保留上一次显示的值
#[derive(Debug, Clone, Copy)]
pub struct AnimatedCounter {
    target: u64,
    started: Instant,
    duration: Duration,
}

impl AnimatedCounter {
    pub fn start(target: u64, duration: Duration) -> Self {
        Self::starting_at(target, Instant::now(), duration)
    }

    pub fn starting_at(target: u64, started: Instant, duration: Duration) -> Self {
        Self {
            target,
            started,
            duration,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn value_at(&self, now: Instant) -> u64 {
        if self.duration.is_zero() {
            return self.target;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        (self.target as f64 * progress).round() as u64
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// 页头的三个统计数字：已处理 / 成功 / 失败
#[derive(Debug, Clone, Copy)]
pub struct StatsCounters {
    pub processed: AnimatedCounter,
    pub success: AnimatedCounter,
    pub errors: AnimatedCounter,
}

impl StatsCounters {
    pub fn restart(stats: BatchStats, duration: Duration) -> Self {
        let now = Instant::now();
        Self {
            processed: AnimatedCounter::starting_at(stats.processed as u64, now, duration),
            success: AnimatedCounter::starting_at(stats.success as u64, now, duration),
            errors: AnimatedCounter::starting_at(stats.errors as u64, now, duration),
        }
    }

    /// (已处理, 成功, 失败) 在 `now` 时刻的显示值
    pub fn values_at(&self, now: Instant) -> (u64, u64, u64) {
        (
            self.processed.value_at(now),
            self.success.value_at(now),
            self.errors.value_at(now),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_interpolates_from_zero() {
        let start = Instant::now();
        let counter = AnimatedCounter::starting_at(10, start, Duration::from_millis(1000));

        assert_eq!(counter.value_at(start), 0);
        assert_eq!(counter.value_at(start + Duration::from_millis(500)), 5);
        assert_eq!(counter.value_at(start + Duration::from_millis(1000)), 10);
        assert_eq!(counter.value_at(start + Duration::from_secs(30)), 10);
        assert!(counter.is_finished(start + Duration::from_millis(1000)));
        assert!(!counter.is_finished(start + Duration::from_millis(999)));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let counter = AnimatedCounter::start(7, Duration::ZERO);
        assert_eq!(counter.value_at(Instant::now()), 7);
    }

    #[test]
    fn test_stats_counters_end_on_targets() {
        let stats = BatchStats {
            processed: 3,
            success: 2,
            errors: 1,
        };
        let counters = StatsCounters::restart(stats, Duration::from_millis(100));
        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(counters.values_at(later), (3, 2, 1));
    }
}
