//! Periodic liveness probe
//!
//! A `HealthMonitor` owns one probing thread. It probes immediately, then
//! once per interval, and reports through the request runner's channel.
//! The controller stops the monitor on every state transition.

use crate::services::api::AnalysisBackend;
use crate::services::request_runner::{Completion, Outcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default probe period
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_millis(1000);

pub struct HealthMonitor {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl HealthMonitor {
    pub fn start(
        backend: Arc<dyn AnalysisBackend>,
        interval: Duration,
        generation: u64,
        sender: Sender<Completion>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            while !flag.load(Ordering::SeqCst) {
                let started = Instant::now();
                let result = backend.check_health();
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                let completion = Completion {
                    generation,
                    elapsed: started.elapsed(),
                    outcome: Outcome::Health(result),
                };
                if sender.send(completion).is_err() {
                    break;
                }

                // Park until the next period; stop() unparks early
                let deadline = Instant::now() + interval;
                loop {
                    if flag.load(Ordering::SeqCst) {
                        return;
                    }
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    thread::park_timeout(deadline - now);
                }
            }
        });

        tracing::debug!(generation, interval_ms = interval.as_millis() as u64, "health monitor started");
        Self {
            stop,
            handle: Some(handle),
            generation,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::SeqCst)
    }

    /// Stop probing. Does not wait for a probe already in flight; its
    /// result is dropped by the thread or filtered by generation.
    pub fn stop(&mut self) {
        if self.stop.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
        }
        tracing::debug!(generation = self.generation, "health monitor stopped");
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
