//! Cancellable one-shot deadline timer.
//!
//! A background tokio task sleeps for the deadline and then tries to fire.
//! Firing and cancelling both go through a single compare-and-swap on the
//! timer state, so exactly one of them wins: a cancel that observed "pending"
//! guarantees the timer never fires afterwards. Firing is broadcast through a
//! `watch` channel, so any number of observers can poll or await it without
//! consuming the signal. Cancellation is broadcast the same way, which lets
//! observers stop waiting on a timer that will never fire.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// Observable state of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    settled_tx: watch::Sender<TimerState>,
}

impl Shared {
    fn try_fire(&self) -> bool {
        let won = self
            .state
            .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.settled_tx.send_replace(TimerState::Fired);
        }
        won
    }

    fn try_cancel(&self) -> bool {
        let won = self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.settled_tx.send_replace(TimerState::Cancelled);
        }
        won
    }

    fn state(&self) -> TimerState {
        match self.state.load(Ordering::Acquire) {
            PENDING => TimerState::Pending,
            FIRED => TimerState::Fired,
            _ => TimerState::Cancelled,
        }
    }
}

/// Owning handle of a running deadline timer.
///
/// Dropping it cancels a pending timer and aborts the background task.
#[derive(Debug)]
pub struct Timer {
    shared: Arc<Shared>,
    task: JoinHandle<()>,
}

impl Timer {
    /// Start a timer that fires after `duration`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(duration: Duration) -> Self {
        let (settled_tx, _) = watch::channel(TimerState::Pending);
        let shared = Arc::new(Shared {
            state: AtomicU8::new(PENDING),
            settled_tx,
        });

        let task = {
            let shared = Arc::clone(&shared);
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                if shared.try_fire() {
                    tracing::debug!("deadline timer fired after {duration:?}");
                }
            })
        };

        Self { shared, task }
    }

    /// Cancel the timer. Idempotent, and a no-op once the timer has fired.
    ///
    /// Returns `true` if this call is the one that cancelled it.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.try_cancel();
        if cancelled {
            self.task.abort();
        }
        cancelled
    }

    pub fn state(&self) -> TimerState {
        self.shared.state()
    }

    pub fn is_fired(&self) -> bool {
        self.state() == TimerState::Fired
    }

    /// A non-owning observer of this timer.
    pub fn signal(&self) -> TimerSignal {
        TimerSignal {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.shared.try_cancel();
        self.task.abort();
    }
}

/// Clonable observer of a [`Timer`]'s firing.
#[derive(Debug, Clone)]
pub struct TimerSignal {
    shared: Arc<Shared>,
}

impl TimerSignal {
    /// Non-blocking check.
    pub fn is_fired(&self) -> bool {
        self.shared.state() == TimerState::Fired
    }

    pub fn state(&self) -> TimerState {
        self.shared.state()
    }

    /// Resolves once the timer has either fired or been cancelled.
    pub async fn settled(&self) -> TimerState {
        let mut rx = self.shared.settled_tx.subscribe();
        // The sender lives as long as `shared`, which we hold.
        let settled = match rx.wait_for(|state| *state != TimerState::Pending).await {
            Ok(state) => *state,
            Err(_) => self.shared.state(),
        };
        settled
    }

    /// Resolves once the timer fires. Never resolves for a cancelled timer.
    pub async fn fired(&self) {
        if self.settled().await != TimerState::Fired {
            std::future::pending::<()>().await;
        }
    }
}
