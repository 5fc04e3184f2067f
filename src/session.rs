//! Session time limits.
//!
//! A [`SessionGuard`] polls a [`UsageLimit`] on a background thread and fires a
//! callback once the limit is reached. The guard is owned by whoever owns the
//! session; dropping it stops the poller.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use parking_lot::{Condvar, Mutex};

use crate::error::SessionError;

/// Source of truth for "has this session used up its time?".
pub trait UsageLimit: Send + Sync {
    fn limit_exceeded(&self) -> Result<bool, SessionError>;
}

/// Local budget: exceeded once `budget` has elapsed since the session started.
/// Restarts with every launch.
#[derive(Debug, Clone)]
pub struct SessionBudget {
    started: Instant,
    budget: Duration,
}

impl SessionBudget {
    pub fn new(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }
}

impl UsageLimit for SessionBudget {
    fn limit_exceeded(&self) -> Result<bool, SessionError> {
        Ok(self.started.elapsed() >= self.budget)
    }
}

#[derive(Default)]
struct Cancellation {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// Cancellable periodic check of a [`UsageLimit`].
pub struct SessionGuard {
    cancellation: Arc<Cancellation>,
    limit_reached: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SessionGuard {
    /// Start polling `source` every `interval`. `on_exceeded` runs once, on the
    /// poller thread, and the poller exits afterwards.
    pub fn start<F>(
        source: Arc<dyn UsageLimit>,
        interval: Duration,
        on_exceeded: F,
    ) -> Result<Self, SessionError>
    where
        F: Fn() + Send + 'static,
    {
        let cancellation = Arc::new(Cancellation::default());
        let limit_reached = Arc::new(AtomicBool::new(false));

        let handle = thread::Builder::new().name("session-guard".into()).spawn({
            let cancellation = Arc::clone(&cancellation);
            let limit_reached = Arc::clone(&limit_reached);
            move || poll(source.as_ref(), interval, &cancellation, &limit_reached, on_exceeded)
        })?;

        info!("Session guard started, polling every {interval:?}");
        Ok(Self {
            cancellation,
            limit_reached,
            handle: Some(handle),
        })
    }

    /// Whether the limit has been hit. Stays `true` after the poller exits.
    pub fn limit_reached(&self) -> bool {
        self.limit_reached.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the poller and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        {
            let mut cancelled = self.cancellation.cancelled.lock();
            *cancelled = true;
            self.cancellation.wake.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Session guard thread panicked");
            } else {
                debug!("Session guard stopped");
            }
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll<F: Fn()>(
    source: &dyn UsageLimit,
    interval: Duration,
    cancellation: &Cancellation,
    limit_reached: &AtomicBool,
    on_exceeded: F,
) {
    loop {
        match source.limit_exceeded() {
            Ok(true) => {
                info!("Session limit reached");
                limit_reached.store(true, Ordering::Release);
                on_exceeded();
                return;
            }
            Ok(false) => {}
            Err(err) => warn!("Usage limit check failed: {err}"),
        }

        let deadline = Instant::now().checked_add(interval);
        let mut cancelled = cancellation.cancelled.lock();
        while !*cancelled {
            match deadline {
                Some(deadline) => {
                    if cancellation.wake.wait_until(&mut cancelled, deadline).timed_out() {
                        break;
                    }
                }
                // Too far out to represent: only cancellation wakes us.
                None => cancellation.wake.wait(&mut cancelled),
            }
        }
        if *cancelled {
            return;
        }
    }
}
