//! Transports that deliver encoded paint addresses
//!
//! A [`Transport`] gets one fully encoded IPv6 address per paint operation
//! and is responsible for the actual network probe. Delivery is best-effort;
//! nothing upstream retries a failed send.

mod dry_run;
mod ping;

pub use dry_run::DryRunTransport;
pub use ping::PingTransport;

use async_trait::async_trait;

/// A trait to unify the different paint delivery mechanisms
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one paint operation to the given address
    async fn send(&self, address: &str) -> anyhow::Result<()>;
}
