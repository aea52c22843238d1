//! # homedash-adapter-simulated
//!
//! Simulated device backend for development and demonstration.
//!
//! ## Provided adapters
//!
//! | Adapter | Port | Behaviour |
//! |---------|------|-----------|
//! | [`SimulatedExecutor`] | `CommandExecutor` | Sleeps a random latency, then accepts or rejects at a configured failure rate |
//! | [`MockDeviceSource`] | `DeviceSource` | Returns the [demo household](dataset::demo_registry) after a load delay, or fails on request |
//!
//! ## Dependency rule
//!
//! Depends on `homedash-app` (port traits) and `homedash-domain` only.

pub mod dataset;
mod executor;
mod source;

pub use executor::SimulatedExecutor;
pub use source::{BackendUnavailable, MockDeviceSource};
