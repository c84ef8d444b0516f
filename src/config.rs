//! Canvas limits shared by size and placement resolution

/// The smallest permitted source dimension per axis
pub const MIN_SOURCE_SIZE: u32 = 1;

/// The base address of the canvas that is painted when no other address is given
pub const DEFAULT_BASE_ADDRESS: &str = "2602:f75c:c0::";

/// The fixed limits of the remote canvas
///
/// Constructed once at startup and passed explicitly into every component
/// that needs to reason about coordinates.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CanvasBounds {
    /// Extent of the canvas per axis; valid coordinates are `[0, canvas_size)`
    pub canvas_size: u32,
}

impl CanvasBounds {
    /// The largest permitted source dimension per axis
    ///
    /// An eighth of the canvas is a safety margin against runaway paint jobs,
    /// not a protocol limit.
    pub fn max_source_size(&self) -> u32 {
        self.canvas_size / 8
    }
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self { canvas_size: 65536 }
    }
}
