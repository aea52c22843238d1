//! # homedash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `CommandExecutor`: send one device command, report success
//!   - `DeviceSource`: populate the device registry once at startup
//!   - `Notifier`: surface a titled success/error message
//!   - `Renderer`: redraw from a dashboard projection
//! - Own the explicit application state (`Dashboard`): registry, view state,
//!   load progress, in-flight bookkeeping
//! - Run the **optimistic update with rollback** protocol for every
//!   remotely confirmed mutation
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (toast tray, render bus, debouncer)
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only (plus `tokio` for timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod debounce;
pub mod in_flight;
pub mod ports;
pub mod render_bus;
pub mod services;
pub mod toast_tray;
