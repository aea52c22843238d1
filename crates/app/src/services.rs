//! Application services: use-case implementations.
//!
//! [`Dashboard`](dashboard::Dashboard) accepts port trait implementations via
//! generic parameters (constructor injection), keeping this layer decoupled
//! from concrete adapters.

pub mod dashboard;
pub mod update_controller;

#[cfg(test)]
pub(crate) mod test_support;
