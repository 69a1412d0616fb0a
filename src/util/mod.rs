//! Utility module
//!
//! This module provides common utilities and helper functions used
//! throughout the library.

use crate::protocol::COORD_SCALE;

/// Converts a millisecond clock reading to the floating seconds carried
/// in a frame's timestamp fields
pub fn millis_to_secs(millis: u64) -> f64 {
    millis as f64 / 1000.0
}

/// Applies the wire scale factor to a coordinate in degrees
pub fn scale_coord(degrees: f64) -> f64 {
    degrees * COORD_SCALE
}

/// Removes the wire scale factor from a received coordinate
pub fn unscale_coord(wire: f64) -> f64 {
    wire / COORD_SCALE
}

/// Installs a process-wide fmt tracing subscriber. Safe to call more
/// than once; later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_conversion() {
        assert_eq!(millis_to_secs(5200), 5.2);
        assert_eq!(millis_to_secs(0), 0.0);
    }

    #[test]
    fn test_coord_scaling() {
        let degrees = 37.1234;
        let wire = scale_coord(degrees);
        assert_eq!(wire, 371234.0);
        assert!((unscale_coord(wire) - degrees).abs() < 1e-9);

        // Negative longitudes survive the round trip
        assert!((unscale_coord(scale_coord(-122.4567)) + 122.4567).abs() < 1e-9);
    }
}
