//! Device source port: where the registry comes from.

use std::future::Future;

use homedash_domain::error::HomeDashError;
use homedash_domain::registry::DeviceRegistry;

/// Provides the initial [`DeviceRegistry`].
///
/// Called once at startup. A failed load is not retried.
pub trait DeviceSource {
    fn load(&self) -> impl Future<Output = Result<DeviceRegistry, HomeDashError>> + Send;
}
