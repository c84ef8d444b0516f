//! A transport that only records what would have been sent

use crate::net::Transport;
use async_trait::async_trait;
use std::sync::Mutex;

/// A transport that prints and records every address instead of pinging it
///
/// Used by `--dry-run` and as a test double; sending never fails.
#[derive(Debug, Default)]
pub struct DryRunTransport {
    sent: Mutex<Vec<String>>,
}

impl DryRunTransport {
    /// Create a new recording transport
    pub fn new() -> Self {
        Self::default()
    }

    /// All addresses sent so far, in completion order
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("sent record lock poisoned").clone()
    }
}

#[async_trait]
impl Transport for DryRunTransport {
    async fn send(&self, address: &str) -> anyhow::Result<()> {
        tracing::info!("Would ping {}", address);
        self.sent
            .lock()
            .expect("sent record lock poisoned")
            .push(address.to_string());
        Ok(())
    }
}
