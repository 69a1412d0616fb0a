/// Provider of the node's current flight telemetry.
///
/// Every accessor returns the latest value without blocking; freshness is
/// the provider's concern, not the protocol's.
pub trait TelemetrySource: Send {
    /// Altitude in meters
    fn altitude(&self) -> f64;
    /// Latitude in degrees
    fn latitude(&self) -> f64;
    /// Longitude in degrees
    fn longitude(&self) -> f64;
    /// Ground speed
    fn speed(&self) -> f64;
    /// Current flight event code
    fn event_code(&self) -> f64;
}

/// Telemetry source returning fixed values, for ground nodes without a
/// sensor package and for tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedTelemetry {
    pub altitude: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub event_code: f64,
}

impl TelemetrySource for FixedTelemetry {
    fn altitude(&self) -> f64 {
        self.altitude
    }

    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn speed(&self) -> f64 {
        self.speed
    }

    fn event_code(&self) -> f64 {
        self.event_code
    }
}
