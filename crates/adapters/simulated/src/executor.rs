//! Simulated command transport.

use std::future::Future;
use std::ops::Range;
use std::time::Duration;

use rand::Rng;

use homedash_app::ports::CommandExecutor;
use homedash_domain::command::Command;
use homedash_domain::error::HomeDashError;

const DEFAULT_MIN_LATENCY: Duration = Duration::from_millis(300);
const DEFAULT_MAX_LATENCY: Duration = Duration::from_millis(800);
const DEFAULT_FAILURE_RATE: f64 = 0.05;

/// [`CommandExecutor`] that fakes a network round trip.
///
/// Each call sleeps for a latency drawn uniformly from the configured
/// half-open range and then reports a rejection with probability
/// `failure_rate`. Calls are
/// independent: the outcome of one never influences another.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    latency: Range<Duration>,
    failure_rate: f64,
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LATENCY..DEFAULT_MAX_LATENCY, DEFAULT_FAILURE_RATE)
    }
}

impl SimulatedExecutor {
    /// Create an executor with the given latency range and failure rate.
    ///
    /// A reversed range is normalised and the rate is clamped to `0.0..=1.0`
    /// (`NaN` counts as `0.0`). An empty range means a fixed latency of its
    /// start.
    #[must_use]
    pub fn new(latency: Range<Duration>, failure_rate: f64) -> Self {
        let Range { start, end } = latency;
        let latency = if start <= end { start..end } else { end..start };
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        Self {
            latency,
            failure_rate,
        }
    }

    #[must_use]
    pub fn latency(&self) -> &Range<Duration> {
        &self.latency
    }

    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    fn draw(&self) -> (Duration, bool) {
        let mut rng = rand::rng();
        let latency = if self.latency.is_empty() {
            self.latency.start
        } else {
            rng.random_range(self.latency.clone())
        };
        let accepted = !rng.random_bool(self.failure_rate);
        (latency, accepted)
    }
}

impl CommandExecutor for SimulatedExecutor {
    fn execute(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<bool, HomeDashError>> + Send {
        let (latency, accepted) = self.draw();
        async move {
            tokio::time::sleep(latency).await;
            tracing::debug!(
                device_id = %command.device_id,
                action = %command.action,
                value = %command.value,
                latency_ms = latency.as_millis(),
                accepted,
                "simulated command resolved"
            );
            Ok(accepted)
        }
    }
}
