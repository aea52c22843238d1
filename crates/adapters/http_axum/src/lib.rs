//! # homedash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** that drives the dashboard: view selection
//!   (`/api/view/*`), device controls (`/api/devices/{id}/*`) and the
//!   notification tray (`/api/notifications`)
//! - Stream every render frame and notification change over
//!   **Server-Sent Events** (`/api/stream`) so a thin client can redraw
//!   without polling
//! - Map HTTP requests into dashboard calls (driving adapter) and
//!   dashboard results into JSON responses
//!
//! ## Dependency rule
//! Depends on `homedash-app` (for the dashboard and port traits) and
//! `homedash-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
