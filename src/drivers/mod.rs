//! Actuator and input drivers, generic over `embedded-hal` traits.

pub mod button;
pub mod servo;
pub mod status_led;
