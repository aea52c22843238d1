//! Command executor port: the device-control transport.

use std::future::Future;

use homedash_domain::command::Command;
use homedash_domain::error::HomeDashError;

/// Sends a single [`Command`] to a device and reports whether it was accepted.
///
/// Calls are independent of each other: no ordering is guaranteed between
/// concurrent calls, and any single call may fail regardless of history.
///
/// - `Ok(true)`: the device confirmed the command
/// - `Ok(false)`: the device (or backend) rejected it
/// - `Err(_)`: the transport faulted; callers treat it like a rejection
pub trait CommandExecutor {
    fn execute(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<bool, HomeDashError>> + Send;
}

impl<T: CommandExecutor + Send + Sync> CommandExecutor for std::sync::Arc<T> {
    fn execute(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<bool, HomeDashError>> + Send {
        (**self).execute(command)
    }
}
