//! Background request runner
//!
//! Façade calls block, so each one runs on its own worker thread. Results
//! come back over a channel and are applied by the main loop on `Tick`.
//! Workers never touch controller state.

use crate::model::{DatabaseSetupResult, PaginatedResponse, ServerConfig, SnippetListItem};
use crate::services::api::{AnalysisBackend, ApiError};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of one finished request
pub enum Outcome {
    /// Connection probe; carries the backend to keep on success
    Connected {
        server: ServerConfig,
        result: Result<Arc<dyn AnalysisBackend>, ApiError>,
    },
    DatabaseReady(Result<DatabaseSetupResult, ApiError>),
    SnippetsLoaded(Result<PaginatedResponse<SnippetListItem>, ApiError>),
    Exported(Result<Vec<u8>, ApiError>),
    /// Periodic liveness probe
    Health(Result<(), ApiError>),
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Connected { .. } => "connect",
            Outcome::DatabaseReady(_) => "database",
            Outcome::SnippetsLoaded(_) => "snippets",
            Outcome::Exported(_) => "export",
            Outcome::Health(_) => "health",
        }
    }

    /// Screen-scoped outcomes are dropped once the controller moves on.
    pub fn is_screen_scoped(&self) -> bool {
        !matches!(self, Outcome::Exported(_))
    }
}

/// A finished request tagged with the controller generation it was issued under
pub struct Completion {
    pub generation: u64,
    pub elapsed: Duration,
    pub outcome: Outcome,
}

/// Spawns requests and collects their completions
pub struct RequestRunner {
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl Default for RequestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestRunner {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Sender for other producers (the health monitor)
    pub fn sender(&self) -> Sender<Completion> {
        self.sender.clone()
    }

    /// Run `task` on a worker thread
    pub fn spawn<F>(&self, generation: u64, task: F)
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        let tx = self.sender.clone();
        thread::spawn(move || {
            let started = Instant::now();
            let outcome = task();
            let completion = Completion {
                generation,
                elapsed: started.elapsed(),
                outcome,
            };
            // Receiver gone means the app is shutting down
            let _ = tx.send(completion);
        });
    }

    /// Drain every completion that has arrived so far
    pub fn poll(&self) -> Vec<Completion> {
        let mut completions = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(completion) => completions.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        completions
    }
}
