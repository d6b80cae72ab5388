//! Progress reporting and wall-clock deadline for a single extraction.
//!
//! The governor drives three things from one `select!` loop owned by the
//! request: the work future, a progress ticker, and the deadline. Whichever
//! way the loop exits, the ticker and the losing side are dropped with it,
//! so no timer outlives the call.

use std::future::Future;
use std::time::Duration;

use legalens_core::MediaKind;
use tokio::sync::watch;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

/// Simulated progress never passes this value on its own.
pub const PROGRESS_CEILING: u8 = 95;

/// Reported once the work reaches any terminal outcome.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Default wall-clock ceiling for one extraction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// How fast simulated progress advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub interval: Duration,
    pub step: u8,
}

impl Cadence {
    pub const TEXT: Cadence = Cadence {
        interval: Duration::from_millis(300),
        step: 5,
    };

    /// OCR takes longer, so images tick slower and in smaller steps.
    pub const IMAGE: Cadence = Cadence {
        interval: Duration::from_millis(500),
        step: 1,
    };

    pub fn for_kind(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => Cadence::IMAGE,
            MediaKind::Text | MediaKind::Unsupported => Cadence::TEXT,
        }
    }
}

/// How a governed run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Governed<T> {
    Completed(T),
    /// The deadline fired first; the work was dropped unfinished.
    TimedOut(Duration),
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressGovernor {
    timeout: Duration,
}

impl Default for ProgressGovernor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl ProgressGovernor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `work` under the deadline while publishing progress on `progress`.
    ///
    /// Progress starts at 0, climbs by `cadence.step` every
    /// `cadence.interval` up to [`PROGRESS_CEILING`], and is forced to
    /// [`PROGRESS_COMPLETE`] on every exit path.
    pub async fn run<F>(
        &self,
        cadence: Cadence,
        progress: &watch::Sender<u8>,
        work: F,
    ) -> Governed<F::Output>
    where
        F: Future,
    {
        progress.send_replace(0);

        let start = Instant::now();
        let deadline = time::sleep(self.timeout);
        let mut ticker = time::interval_at(start + cadence.interval, cadence.interval);
        tokio::pin!(work);
        tokio::pin!(deadline);

        let outcome = loop {
            let ticking = *progress.borrow() < PROGRESS_CEILING;
            tokio::select! {
                biased;
                output = &mut work => break Governed::Completed(output),
                _ = &mut deadline => {
                    warn!(timeout_secs = self.timeout.as_secs(), "Extraction deadline reached, abandoning work");
                    break Governed::TimedOut(self.timeout);
                }
                _ = ticker.tick(), if ticking => advance(progress, cadence.step),
            }
        };

        progress.send_replace(PROGRESS_COMPLETE);
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Governed run finished");
        outcome
    }
}

fn advance(progress: &watch::Sender<u8>, step: u8) {
    progress.send_if_modified(|value| {
        if *value >= PROGRESS_CEILING {
            return false;
        }
        *value = value.saturating_add(step).min(PROGRESS_CEILING);
        true
    });
}
