//! Simulated device registry provider.

use std::future::Future;
use std::time::Duration;

use homedash_app::ports::DeviceSource;
use homedash_domain::error::HomeDashError;
use homedash_domain::registry::DeviceRegistry;

use crate::dataset::demo_registry;

const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(1500);

/// Raised by [`MockDeviceSource`] when configured to fail.
#[derive(Debug, thiserror::Error)]
#[error("simulated device backend is unavailable")]
pub struct BackendUnavailable;

/// [`DeviceSource`] serving the demo household after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockDeviceSource {
    delay: Duration,
    fail: bool,
}

impl Default for MockDeviceSource {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_DELAY)
    }
}

impl MockDeviceSource {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    /// Make every load fail after the delay.
    #[must_use]
    pub fn failing(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }
}

impl DeviceSource for MockDeviceSource {
    fn load(&self) -> impl Future<Output = Result<DeviceRegistry, HomeDashError>> + Send {
        let delay = self.delay;
        let fail = self.fail;
        async move {
            tokio::time::sleep(delay).await;
            if fail {
                return Err(HomeDashError::transport(BackendUnavailable));
            }
            let registry = demo_registry()?;
            tracing::debug!(devices = registry.len(), "mock registry served");
            Ok(registry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn should_serve_demo_registry_after_delay() {
        let source = MockDeviceSource::default();
        let started = tokio::time::Instant::now();

        let registry = source.load().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(registry.len(), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn should_fail_when_configured_to() {
        let source = MockDeviceSource::new(Duration::ZERO).failing(true);

        let result = source.load().await;

        assert!(matches!(result, Err(HomeDashError::Transport(_))));
    }
}
