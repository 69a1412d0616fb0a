//! Telemetry provider module
//!
//! Interfaces to the collaborator services the protocol core consumes: a
//! monotonic millisecond clock and a provider of current position, speed,
//! and flight event. GPS fix acquisition itself lives outside this crate;
//! platform layers adapt whatever fix source the hardware has.

pub mod clock;
pub mod source;

pub use self::clock::{Clock, ManualClock, MonotonicClock};
pub use self::source::{FixedTelemetry, TelemetrySource};
