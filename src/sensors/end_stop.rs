//! Window end-stop switch.
//!
//! A mechanical switch closes when the window reaches its fully closed
//! position.  The GPIO is configured with a pull-up, so the input reads
//! LOW while the window is closed and HIGH otherwise.

use embedded_hal::digital::InputPin;
use log::debug;

use crate::error::{Result, SensorError};

pub struct EndStop<P> {
    pin: P,
    last_closed: bool,
}

impl<P: InputPin> EndStop<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_closed: false,
        }
    }

    /// Sample the switch.  True iff the window is fully closed.
    pub fn read(&mut self) -> Result<bool> {
        let closed = self.pin.is_low().map_err(|e| {
            debug!("end-stop GPIO error: {:?}", e);
            SensorError::GpioReadFailed
        })?;
        if closed != self.last_closed {
            debug!("end-stop {}", if closed { "closed" } else { "open" });
        }
        self.last_closed = closed;
        Ok(closed)
    }

    /// Result of the last successful read.
    pub fn last_closed(&self) -> bool {
        self.last_closed
    }
}
