//! Sliding-window admission control for outbound submissions.
//!
//! At most `request_limit` admissions are recorded in any rolling window.
//! Callers queue in arrival order on a turnstile. Only the head of that queue
//! evaluates the window; when it is full the head sleeps until the oldest
//! admission expires and then re-evaluates from scratch. The admissions lock
//! is never held while sleeping.

use crate::domain::ports::TimeUnit;
use crate::utils::error::{CrptError, Result};
use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
pub struct RateGate {
    request_limit: usize,
    window: Duration,
    // tokio's Mutex hands out the lock in FIFO order, so holding `turnstile`
    // across the wait keeps later arrivals behind the current head.
    turnstile: Mutex<()>,
    admissions: Mutex<VecDeque<Instant>>,
}

impl RateGate {
    pub fn new(request_limit: usize, window: Duration) -> Result<Self> {
        if request_limit == 0 {
            return Err(CrptError::invalid_configuration(
                "request_limit",
                "Request limit must be positive",
            ));
        }
        if window.is_zero() {
            return Err(CrptError::invalid_configuration(
                "time_window",
                "Time window must be positive",
            ));
        }

        Ok(Self {
            request_limit,
            window,
            turnstile: Mutex::new(()),
            admissions: Mutex::new(VecDeque::with_capacity(request_limit)),
        })
    }

    /// `request_limit` admissions per one `time_unit`.
    pub fn per(time_unit: TimeUnit, request_limit: usize) -> Result<Self> {
        Self::new(request_limit, time_unit.window())
    }

    pub fn request_limit(&self) -> usize {
        self.request_limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Waits until an admission is available and records it.
    ///
    /// Never fails. Callers are admitted in arrival order. Dropping the
    /// returned future before it completes records nothing and hands the
    /// turnstile to the next waiter.
    pub async fn acquire(&self) {
        let _turn = self.turnstile.lock().await;
        loop {
            let wait = match self.try_admit().await {
                None => return,
                Some(wait) => wait,
            };

            tracing::debug!(
                "Rate window full ({} admissions), waiting {:?}",
                self.request_limit,
                wait
            );
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }
    }

    /// Like [`acquire`](Self::acquire), but gives up with `Interrupted` once
    /// `cancel` resolves. An interrupted wait leaves no admission behind.
    pub async fn acquire_or_cancel<F>(&self, cancel: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::debug!("Rate gate wait interrupted");
                Err(CrptError::Interrupted)
            }
            _ = self.acquire() => Ok(()),
        }
    }

    /// Number of admissions still inside the window. Does not admit.
    pub async fn admissions_in_window(&self) -> usize {
        let mut admissions = self.admissions.lock().await;
        self.evict_expired(&mut admissions, Instant::now());
        admissions.len()
    }

    /// One pass of the admission decision. `None` means admitted, otherwise
    /// the time until the oldest admission leaves the window.
    async fn try_admit(&self) -> Option<Duration> {
        let mut admissions = self.admissions.lock().await;
        let now = Instant::now();
        self.evict_expired(&mut admissions, now);

        if admissions.len() < self.request_limit {
            admissions.push_back(now);
            tracing::debug!(
                "Admitted request ({}/{} in window)",
                admissions.len(),
                self.request_limit
            );
            return None;
        }

        let wait = match admissions.front() {
            Some(&oldest) => self.window.saturating_sub(now.duration_since(oldest)),
            None => Duration::ZERO,
        };
        Some(wait)
    }

    fn evict_expired(&self, admissions: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&oldest) = admissions.front() {
            if now.duration_since(oldest) >= self.window {
                admissions.pop_front();
            } else {
                break;
            }
        }
    }
}
