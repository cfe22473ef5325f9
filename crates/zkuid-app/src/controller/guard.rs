use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use zkuid_types::{ZkuidError, ZkuidResult};

/// Per-flow re-entrancy lock. At most one token exists at a time; a second
/// acquire while a token is alive is rejected rather than queued.
pub struct InFlight {
    busy: AtomicBool,
    action: &'static str,
}

impl InFlight {
    pub fn new(action: &'static str) -> Self {
        Self {
            busy: AtomicBool::new(false),
            action,
        }
    }

    pub fn try_acquire(&self) -> ZkuidResult<InFlightToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ZkuidError::ActionInProgress(self.action))?;
        Ok(InFlightToken { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

pub struct InFlightToken<'a> {
    busy: &'a AtomicBool,
}

impl Drop for InFlightToken<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Publishes `fallback` if dropped before `commit`, so a pending phase
/// never outlives an abandoned call.
pub(crate) struct Rollback<'a, S> {
    state: &'a watch::Sender<S>,
    fallback: Option<S>,
}

impl<'a, S> Rollback<'a, S> {
    pub(crate) fn begin(state: &'a watch::Sender<S>, pending: S, fallback: S) -> Self {
        state.send_replace(pending);
        Self {
            state,
            fallback: Some(fallback),
        }
    }

    pub(crate) fn commit(mut self, next: S) {
        self.fallback = None;
        self.state.send_replace(next);
    }
}

impl<S> Drop for Rollback<'_, S> {
    fn drop(&mut self) {
        if let Some(fallback) = self.fallback.take() {
            self.state.send_replace(fallback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_rejected() {
        let guard = InFlight::new("Registration");
        let token = guard.try_acquire().unwrap();
        assert!(guard.is_busy());
        assert_eq!(
            guard.try_acquire().err(),
            Some(ZkuidError::ActionInProgress("Registration"))
        );
        drop(token);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_ok());
    }

    #[test]
    fn test_rollback_on_drop() {
        let (tx, rx) = watch::channel(0u8);
        {
            let _pending = Rollback::begin(&tx, 1, 9);
            assert_eq!(*rx.borrow(), 1);
        }
        assert_eq!(*rx.borrow(), 9);
    }

    #[test]
    fn test_commit_skips_fallback() {
        let (tx, rx) = watch::channel(0u8);
        let pending = Rollback::begin(&tx, 1, 9);
        pending.commit(2);
        assert_eq!(*rx.borrow(), 2);
    }
}
