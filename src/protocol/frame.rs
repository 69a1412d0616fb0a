use crate::core::{Error, NodeId, Result};
use crate::util::unscale_coord;

/// Wire position of each interior frame field.
///
/// Tokens 0 and 13 are the sentinels; data fields occupy tokens 1 through 12.
/// This enum and the accessors on [`ValidatedFrame`] are the only places
/// positions appear; the rest of the crate addresses fields by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PayloadTimestamp = 1,
    PayloadAltitude = 2,
    PayloadLatitude = 3,
    PayloadLongitude = 4,
    PayloadEvent = 5,
    PayloadSpeed = 6,
    MissionControlTimestamp = 7,
    RecoveryTimestamp = 8,
    RecoveryLatitude = 9,
    RecoveryLongitude = 10,
    ResetFlag = 11,
    NodeId = 12,
}

/// A fully specified outgoing frame, assembled once per broadcast.
///
/// Coordinates are plain degrees here; the codec applies the wire scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Seconds since this node booted
    pub payload_timestamp: f64,
    pub payload_altitude: f64,
    pub payload_latitude: f64,
    pub payload_longitude: f64,
    /// Flight event code
    pub payload_event: f64,
    pub payload_speed: f64,
    /// Relayed last-known mission control broadcast time
    pub mission_control_timestamp: f64,
    /// Relayed last-known recovery broadcast time
    pub recovery_timestamp: f64,
    pub recovery_latitude: f64,
    pub recovery_longitude: f64,
    /// Set while this node is announcing a power cycle
    pub reset_flag: bool,
    /// Canonical id of the originating node
    pub node_id: NodeId,
}

/// A received frame that passed sentinel validation.
///
/// Holds the raw comma-separated tokens; fields parse on access so a
/// malformed token surfaces as an explicit error instead of a silent
/// zero. Lives only for the duration of one receive pass and is never
/// stored.
#[derive(Debug, Clone)]
pub struct ValidatedFrame {
    tokens: Vec<String>,
}

impl ValidatedFrame {
    pub(crate) fn new(tokens: Vec<String>) -> Self {
        ValidatedFrame { tokens }
    }

    /// Returns the numeric value at the given wire position
    pub fn field(&self, field: Field) -> Result<f64> {
        let index = field as usize;
        let token = self
            .tokens
            .get(index)
            .ok_or_else(|| Error::field_parse(index, "missing"))?;
        token
            .trim()
            .parse::<f64>()
            .map_err(|err| Error::field_parse(index, err.to_string()))
    }

    pub fn payload_timestamp(&self) -> Result<f64> {
        self.field(Field::PayloadTimestamp)
    }

    pub fn payload_altitude(&self) -> Result<f64> {
        self.field(Field::PayloadAltitude)
    }

    /// Payload latitude in degrees, wire scale removed
    pub fn payload_latitude(&self) -> Result<f64> {
        Ok(unscale_coord(self.field(Field::PayloadLatitude)?))
    }

    /// Payload longitude in degrees, wire scale removed
    pub fn payload_longitude(&self) -> Result<f64> {
        Ok(unscale_coord(self.field(Field::PayloadLongitude)?))
    }

    pub fn payload_event(&self) -> Result<f64> {
        self.field(Field::PayloadEvent)
    }

    pub fn payload_speed(&self) -> Result<f64> {
        self.field(Field::PayloadSpeed)
    }

    pub fn mission_control_timestamp(&self) -> Result<f64> {
        self.field(Field::MissionControlTimestamp)
    }

    pub fn recovery_timestamp(&self) -> Result<f64> {
        self.field(Field::RecoveryTimestamp)
    }

    /// Recovery latitude in degrees, wire scale removed
    pub fn recovery_latitude(&self) -> Result<f64> {
        Ok(unscale_coord(self.field(Field::RecoveryLatitude)?))
    }

    /// Recovery longitude in degrees, wire scale removed
    pub fn recovery_longitude(&self) -> Result<f64> {
        Ok(unscale_coord(self.field(Field::RecoveryLongitude)?))
    }

    /// Whether the originating node is announcing a power cycle
    pub fn reset_flag(&self) -> Result<bool> {
        Ok(self.field(Field::ResetFlag)? != 0.0)
    }

    /// Raw originating node id as carried on the wire
    pub fn origin_id(&self) -> Result<f64> {
        self.field(Field::NodeId)
    }

    /// Canonical node the frame claims to originate from, if the id
    /// falls inside a known band
    pub fn origin(&self) -> Result<Option<NodeId>> {
        Ok(NodeId::from_wire(self.origin_id()?))
    }
}
