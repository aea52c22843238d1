//! # homedash-domain
//!
//! Pure domain model for the homedash smart-home dashboard.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers, error conventions, timestamps
//! - Define **Devices** (lights, thermostats, cameras, security units) and the
//!   **Fields** that can be read, written and rolled back on them
//! - Define the **Device Registry** (category → ordered device list)
//! - Define the **View State** (room filter + active tab) and the dashboard
//!   projection consumed by renderers
//! - Define **Commands** sent to device transports and **Notifications**
//!   surfaced to the user
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod command;
pub mod dashboard;
pub mod device;
pub mod field;
pub mod notification;
pub mod registry;
pub mod room;
pub mod view;
