//! GPIO / peripheral pin assignments for the window controller board.
//!
//! Single source of truth.  `main` takes the matching peripherals from
//! esp-idf-hal and refuses to boot if a field's GPIO number differs
//! from the one here.

// ---------------------------------------------------------------------------
// Window servo (continuous rotation)
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the servo signal line.
pub const SERVO_PWM_GPIO: i32 = 4;
/// Servo frame rate (50 Hz, 20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution for the servo (bits).
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;

// ---------------------------------------------------------------------------
// End-stop switch (pull-up, LOW = window closed)
// ---------------------------------------------------------------------------

pub const END_STOP_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// User button (active-high with pull-down)
// ---------------------------------------------------------------------------

pub const BUTTON_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

pub const STATUS_LED_GPIO: i32 = 8;
