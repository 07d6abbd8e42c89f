//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules of the window controller:
//! FSM orchestration and the translation of button and remote inputs
//! into an open duration.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.  [`task`] plugs the service into
//! the cooperative scheduler.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod task;
