//! The remote canvas a paint run targets

use crate::addr::{encode_address, BaseAddress};
use crate::color::Rgba;
use crate::net::Transport;
use std::sync::Arc;

/// A stateless handle to the remote canvas
///
/// Holds the run's validated [`BaseAddress`] and the transport used to
/// deliver paint operations. Shared read-only across dispatcher workers.
pub struct Canvas {
    base: BaseAddress,
    transport: Arc<dyn Transport>,
}

impl Canvas {
    /// Create a canvas handle painting below the given base address
    pub fn new(base: BaseAddress, transport: Arc<dyn Transport>) -> Self {
        Self { base, transport }
    }

    /// The base address every paint operation of this run shares
    pub fn base(&self) -> &BaseAddress {
        &self.base
    }

    /// Paint a single pixel
    ///
    /// Painting is best-effort: a failed transport call is logged and
    /// swallowed, never retried and never fatal to the run.
    pub async fn paint(&self, x: u16, y: u16, color: Rgba) {
        let address = encode_address(&self.base, x, y, color);
        if let Err(e) = self.transport.send(&address).await {
            tracing::warn!("Could not paint {},{}: {:#}", x, y, e);
        }
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas").field("base", &self.base).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::net::DryRunTransport;

    #[tokio::test]
    async fn test_paint_encodes_and_sends() {
        let transport = Arc::new(DryRunTransport::new());
        let base = BaseAddress::new("2602:f75c:c0::").unwrap();
        let canvas = Canvas::new(base.clone(), transport.clone());
        assert_eq!(canvas.base(), &base);

        canvas.paint(1, 2, Rgba(0xAA, 0xBB, 0xCC, 0xDD)).await;
        assert_eq!(transport.sent(), vec!["2602:f75c:c0::0001:0002:aabb:ccdd"]);
    }
}
