//! Bounded polling against an external readiness signal

use std::time::Duration;

use async_trait::async_trait;

/// Source of non-blocking waits
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fixed-interval polling bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Longest total wait before giving up
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The check passed after `waited` sleeps
    Ready { waited: u32 },
    /// The check never passed within the bound
    Exhausted { attempts: u32 },
}

impl PollOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready { .. })
    }
}

/// Re-run `check` every `policy.interval` until it passes or
/// `policy.max_attempts` waits have elapsed. The check runs once more after
/// the final wait.
pub async fn poll_until<C, F>(policy: &RetryPolicy, clock: &C, mut check: F) -> PollOutcome
where
    C: Clock + ?Sized,
    F: FnMut() -> bool + Send,
{
    let mut waited = 0;
    loop {
        if check() {
            return PollOutcome::Ready { waited };
        }
        if waited >= policy.max_attempts {
            return PollOutcome::Exhausted { attempts: waited };
        }
        clock.sleep(policy.interval).await;
        waited += 1;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Clock that records waits instead of sleeping
    #[derive(Default)]
    pub(crate) struct FakeClock {
        pub(crate) sleeps: Mutex<Vec<Duration>>,
    }

    impl FakeClock {
        pub(crate) fn total(&self) -> Duration {
            self.sleeps.lock().unwrap().iter().sum()
        }

        pub(crate) fn count(&self) -> usize {
            self.sleeps.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Clock for FakeClock {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }

    const POLICY: RetryPolicy = RetryPolicy::new(Duration::from_millis(100), 50);

    #[tokio::test]
    async fn test_ready_immediately_never_sleeps() {
        let clock = FakeClock::default();
        let outcome = poll_until(&POLICY, &clock, || true).await;
        assert_eq!(outcome, PollOutcome::Ready { waited: 0 });
        assert_eq!(clock.count(), 0);
    }

    #[tokio::test]
    async fn test_ready_after_some_checks() {
        let clock = FakeClock::default();
        let mut checks = 0;
        let outcome = poll_until(&POLICY, &clock, || {
            checks += 1;
            checks > 3
        })
        .await;
        assert_eq!(outcome, PollOutcome::Ready { waited: 3 });
        assert_eq!(clock.total(), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_exhausts_after_bound() {
        let clock = FakeClock::default();
        let outcome = poll_until(&POLICY, &clock, || false).await;
        assert_eq!(outcome, PollOutcome::Exhausted { attempts: 50 });
        assert_eq!(clock.count(), 50);
        assert_eq!(clock.total(), POLICY.budget());
        assert_eq!(POLICY.budget(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_last_check_after_final_wait_counts() {
        let clock = FakeClock::default();
        let mut checks = 0;
        let outcome = poll_until(&POLICY, &clock, || {
            checks += 1;
            checks == 51
        })
        .await;
        assert_eq!(outcome, PollOutcome::Ready { waited: 50 });
    }

    #[tokio::test]
    async fn test_tokio_clock_sleeps() {
        let policy = RetryPolicy::new(Duration::from_millis(1), 2);
        let outcome = poll_until(&policy, &TokioClock, || false).await;
        assert!(!outcome.is_ready());
    }
}
