//! The dispatch loop that turns a resolved area into paint operations
//!
//! Iterates the resolved iteration window, pulls pixels from the source and
//! hands them to the canvas. Operations run either strictly in order with a
//! fixed inter-pixel delay, or through a bounded pool of workers that is
//! drained after every full batch so that never more than the pool size of
//! transport calls is in flight.

use crate::area::ResolvedArea;
use crate::canvas::Canvas;
use crate::source::Source;
use itertools::Itertools;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// How paint operations are scheduled
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DispatchMode {
    /// One operation at a time, in iteration order, sleeping between pixels
    Serial {
        /// Pause between two consecutive paint operations (may be zero)
        delay: Duration,
    },
    /// A bounded worker pool; no ordering guarantee and no inter-pixel delay
    Pooled {
        /// Maximum number of concurrently running paint operations
        workers: usize,
    },
}

/// Counters describing a finished dispatch run
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DispatchReport {
    /// Number of paint operations actually handed to the canvas
    pub emitted: u64,
    /// Number of pixels in the resolved iteration window
    pub total: u64,
}

/// Drives paint operations over a resolved area
#[derive(Debug, Copy, Clone)]
pub struct Dispatcher {
    /// Scheduling policy, selected once per run
    pub mode: DispatchMode,
    /// Iterate both axes back-to-front instead of front-to-back
    pub reverse: bool,
    /// Omit pixels whose alpha channel is exactly zero
    pub skip_transparent: bool,
}

impl Dispatcher {
    /// Dispatch every pixel of the window described by `area`
    ///
    /// Pixels are fetched from `source` at window-local coordinates and
    /// painted at their absolute canvas position. The run never aborts on a
    /// failed paint operation.
    pub async fn run(&self, source: &Source, area: &ResolvedArea, canvas: Arc<Canvas>) -> DispatchReport {
        match self.mode {
            DispatchMode::Serial { delay } => self.run_serial(source, area, canvas, delay).await,
            DispatchMode::Pooled { workers } => self.run_pooled(source, area, canvas, workers).await,
        }
    }

    /// Map a monotonic window index to the effective window coordinate
    fn effective(&self, start: u32, stop: u32, i: u32) -> u32 {
        if self.reverse {
            stop - 1 - i
        } else {
            start + i
        }
    }

    /// Row-major iteration over the window as `(local_x, local_y)` pairs
    fn window_coords<'a>(&'a self, area: &'a ResolvedArea) -> impl Iterator<Item = (u32, u32)> + 'a {
        (0..area.height())
            .cartesian_product(0..area.width())
            .map(|(iy, ix)| {
                (
                    self.effective(area.start_x, area.stop_x, ix),
                    self.effective(area.start_y, area.stop_y, iy),
                )
            })
    }

    async fn run_serial(
        &self,
        source: &Source,
        area: &ResolvedArea,
        canvas: Arc<Canvas>,
        delay: Duration,
    ) -> DispatchReport {
        let total = area.pixel_count();
        let mut emitted = 0u64;

        for (local_x, local_y) in self.window_coords(area) {
            let color = source.pixel(local_x, local_y);
            if self.skip_transparent && color.is_transparent() {
                continue;
            }
            let (x, y) = area.to_canvas(local_x, local_y);
            canvas.paint(x, y, color).await;
            emitted += 1;
            tracing::info!("Painted {}/{} pixels", emitted, total);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        DispatchReport { emitted, total }
    }

    async fn run_pooled(
        &self,
        source: &Source,
        area: &ResolvedArea,
        canvas: Arc<Canvas>,
        workers: usize,
    ) -> DispatchReport {
        let total = area.pixel_count();
        let emitted = Arc::new(AtomicU64::new(0));
        let mut pool: JoinSet<()> = JoinSet::new();
        let mut in_flight = 0usize;

        for (local_x, local_y) in self.window_coords(area) {
            let color = source.pixel(local_x, local_y);
            if self.skip_transparent && color.is_transparent() {
                continue;
            }
            let (x, y) = area.to_canvas(local_x, local_y);

            let canvas = canvas.clone();
            let emitted = emitted.clone();
            pool.spawn(async move {
                canvas.paint(x, y, color).await;
                let done = emitted.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::info!("Painted {}/{} pixels", done, total);
            });
            in_flight += 1;

            // drain the batch once the pool is full
            if in_flight == workers {
                Self::drain(&mut pool).await;
                in_flight = 0;
            }
        }

        // the final batch may be partial
        Self::drain(&mut pool).await;

        DispatchReport {
            emitted: emitted.load(Ordering::Relaxed),
            total,
        }
    }

    async fn drain(pool: &mut JoinSet<()>) {
        while let Some(result) = pool.join_next().await {
            if let Err(e) = result {
                tracing::error!("Paint worker failed: {}", e);
            }
        }
    }
}
