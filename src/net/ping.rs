//! Paint delivery through the system `ping` binary

use crate::net::Transport;
use anyhow::anyhow;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// The program invoked for each paint operation
const PING_PROGRAM: &str = "ping";

/// Arguments that make a single IPv6 echo request
const PING_ARGS: &[&str] = &["-6", "-c", "1"];

/// A transport that paints by sending one ICMPv6 echo request per operation
///
/// Shells out to the system ping binary so that no raw-socket capability is
/// needed. The echo reply (or its absence) is irrelevant to painting, only a
/// failure to send at all is reported.
#[derive(Debug, Default, Copy, Clone)]
pub struct PingTransport;

#[async_trait]
impl Transport for PingTransport {
    async fn send(&self, address: &str) -> anyhow::Result<()> {
        tracing::trace!("Pinging {}", address);
        let status = Command::new(PING_PROGRAM)
            .args(PING_ARGS)
            .arg(address)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;
        if status.success() {
            Ok(())
        } else {
            Err(anyhow!("ping to {} exited with {}", address, status))
        }
    }
}
