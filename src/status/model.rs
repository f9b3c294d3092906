use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Process-wide availability switch. Starts available.
#[derive(Debug)]
pub struct ServerStatus {
    available: AtomicBool,
}

impl ServerStatus {
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Applies `available` / `unavailable` (case-insensitive); anything else is
    /// ignored.
    pub fn apply(&self, requested: Option<&str>) {
        match requested.map(str::to_ascii_lowercase).as_deref() {
            Some("available") => self.set_available(true),
            Some("unavailable") => self.set_available(false),
            _ => {}
        }
    }
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct RequestCounter {
    count: AtomicU64,
}

impl RequestCounter {
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub total_requests: u64,
}

impl StatusResponse {
    pub fn from_state(status: &ServerStatus, counter: &RequestCounter) -> Self {
        if status.is_available() {
            StatusResponse {
                status: "available",
                message: "Service is operating normally",
                total_requests: counter.get(),
            }
        } else {
            StatusResponse {
                status: "unavailable",
                message: "Service is temporarily unavailable",
                total_requests: counter.get(),
            }
        }
    }
}
