//! Sensor drivers.
//!
//! The window controller has a single sensor: the end-stop switch that
//! confirms the window is fully closed.  The hardware adapter samples it
//! once per controller step and writes the result into
//! `WindowContext.sensors`.

pub mod end_stop;
