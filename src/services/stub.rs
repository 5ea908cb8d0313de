//! In-memory backend used by controller tests

use crate::model::{
    CreateDatabaseConfig, DatabaseRequest, DatabaseSetupResult, LineRange, LoadDatabaseConfig,
    PaginatedResponse, PaginationParams, Snippet, SnippetListItem,
};
use crate::services::api::{AnalysisBackend, ApiError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// Scriptable backend. Error results are given as HTTP status codes.
pub struct StubBackend {
    healthy: AtomicBool,
    health_calls: AtomicUsize,
    create_result: Mutex<Result<DatabaseSetupResult, u16>>,
    load_result: Mutex<DatabaseSetupResult>,
    snippets: Mutex<Result<Vec<SnippetListItem>, u16>>,
    snippets_delay: Mutex<Duration>,
    export: Mutex<Result<Vec<u8>, u16>>,
    requests: Mutex<Vec<DatabaseRequest>>,
}

impl StubBackend {
    pub fn healthy() -> Self {
        Self {
            healthy: AtomicBool::new(true),
            health_calls: AtomicUsize::new(0),
            create_result: Mutex::new(Ok(DatabaseSetupResult::succeeded("created"))),
            load_result: Mutex::new(DatabaseSetupResult::succeeded("Database loaded successfully")),
            snippets: Mutex::new(Ok(Vec::new())),
            snippets_delay: Mutex::new(Duration::ZERO),
            export: Mutex::new(Ok(b"{}".to_vec())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        let stub = Self::healthy();
        stub.set_healthy(false);
        stub
    }

    pub fn with_snippets(self, count: usize) -> Self {
        let items = (1..=count)
            .map(|i| SnippetListItem {
                snippet_id: format!("snippet-{}", i),
                file_name: format!("file_{}.cpp", i),
            })
            .collect();
        *lock(&self.snippets) = Ok(items);
        self
    }

    pub fn with_snippets_error(self, status: u16) -> Self {
        *lock(&self.snippets) = Err(status);
        self
    }

    pub fn with_snippets_delay(self, delay: Duration) -> Self {
        *lock(&self.snippets_delay) = delay;
        self
    }

    pub fn with_create_result(self, result: Result<DatabaseSetupResult, u16>) -> Self {
        *lock(&self.create_result) = result;
        self
    }

    pub fn with_load_result(self, result: DatabaseSetupResult) -> Self {
        *lock(&self.load_result) = result;
        self
    }

    pub fn with_export(self, result: Result<Vec<u8>, u16>) -> Self {
        *lock(&self.export) = result;
        self
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    /// Database requests received, in order
    pub fn requests(&self) -> Vec<DatabaseRequest> {
        lock(&self.requests).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AnalysisBackend for StubBackend {
    fn check_health(&self) -> Result<(), ApiError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ApiError::Unreachable("connection refused".to_string()))
        }
    }

    fn create_database(
        &self,
        config: &CreateDatabaseConfig,
    ) -> Result<DatabaseSetupResult, ApiError> {
        lock(&self.requests).push(DatabaseRequest::Create(config.clone()));
        lock(&self.create_result).clone().map_err(ApiError::Status)
    }

    fn load_database(&self, config: &LoadDatabaseConfig) -> DatabaseSetupResult {
        lock(&self.requests).push(DatabaseRequest::Load(config.clone()));
        lock(&self.load_result).clone()
    }

    fn get_snippets_list(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<SnippetListItem>, ApiError> {
        let delay = *lock(&self.snippets_delay);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        lock(&self.snippets)
            .clone()
            .map(|items| PaginatedResponse::from_items(items, params))
            .map_err(ApiError::Status)
    }

    fn submit_ranges(&self, _ranges: &[LineRange]) -> Result<Vec<Snippet>, ApiError> {
        Ok(Vec::new())
    }

    fn export_results(&self) -> Result<Vec<u8>, ApiError> {
        lock(&self.export).clone().map_err(ApiError::Status)
    }

    fn load_file(&self, _file_path: &str) -> Result<Vec<String>, ApiError> {
        Ok(Vec::new())
    }
}
