use std::time::Duration;

use serde::{Serialize, Deserialize};

use super::error::{Error, Result};

/// One of the three network participants.
///
/// Each node carries a canonical numeric id in the frames it originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeId {
    /// Ground station coordinating the mission
    MissionControl,
    /// Airborne craft carrying the primary sensor package
    Payload,
    /// Recovery beacon tracking the descent
    Recovery,
}

impl NodeId {
    /// Canonical id carried in a frame's node id field
    pub fn wire_id(&self) -> f64 {
        match self {
            NodeId::MissionControl => 1.0,
            NodeId::Payload => 2.0,
            NodeId::Recovery => 3.0,
        }
    }

    /// Matches a received id against the canonical bands (canonical id
    /// plus or minus [`NODE_ID_TOLERANCE`](super::NODE_ID_TOLERANCE)).
    /// Returns `None` for an id outside every band.
    pub fn from_wire(id: f64) -> Option<NodeId> {
        [NodeId::MissionControl, NodeId::Payload, NodeId::Recovery]
            .into_iter()
            .find(|node| (id - node.wire_id()).abs() < super::NODE_ID_TOLERANCE)
    }
}

/// Status indicator events raised by the radio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A broadcast completed
    Sent,
    /// A frame arrived from the channel
    Received,
    /// The link is in a fault state
    Fault,
}

/// Counters describing radio link activity since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Frames validated and merged into the state store
    pub frames_merged: u64,
    /// Frames discarded for a sentinel or field parse failure
    pub frames_rejected: u64,
    /// Broadcasts confirmed by the channel
    pub broadcasts_sent: u64,
    /// Broadcasts that failed or timed out
    pub send_failures: u64,
}

/// Configuration for a trinet radio node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// This node's canonical identity
    pub node_id: NodeId,
    /// Minimum gap between broadcasts
    #[serde(serialize_with = "super::serde::serialize_duration")]
    #[serde(deserialize_with = "super::serde::deserialize_duration")]
    pub broadcast_interval: Duration,
    /// Cadence of the polling loop
    #[serde(serialize_with = "super::serde::serialize_duration")]
    #[serde(deserialize_with = "super::serde::deserialize_duration")]
    pub poll_interval: Duration,
    /// Upper bound on the transmit confirmation wait
    #[serde(serialize_with = "super::serde::serialize_duration")]
    #[serde(deserialize_with = "super::serde::deserialize_duration")]
    pub send_timeout: Duration,
    /// Radio carrier frequency; consumed by the hardware init layer
    pub frequency_mhz: f64,
    /// Transmit power; consumed by the hardware init layer
    pub tx_power_dbm: i8,
    /// Largest frame accepted from the channel
    pub max_frame_len: usize,
}

impl NodeConfig {
    /// Default configuration for the given node.
    ///
    /// Broadcast slots are staggered per node so the half-duplex channel
    /// stays mostly collision-free without any coordination.
    pub fn for_node(node_id: NodeId) -> Self {
        let broadcast_interval = match node_id {
            NodeId::Payload => Duration::from_secs(2),
            NodeId::MissionControl => Duration::from_secs(3),
            NodeId::Recovery => Duration::from_secs(4),
        };

        NodeConfig {
            node_id,
            broadcast_interval,
            poll_interval: Duration::from_millis(50),
            send_timeout: Duration::from_secs(2),
            frequency_mhz: 915.0,
            tx_power_dbm: 23,
            max_frame_len: crate::protocol::MAX_FRAME_SIZE,
        }
    }

    /// Checks the configuration for values the radio layer cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.broadcast_interval.is_zero() {
            return Err(Error::config("broadcast interval must be non-zero"));
        }
        if self.send_timeout.is_zero() {
            return Err(Error::config("send timeout must be non-zero"));
        }
        if self.max_frame_len < crate::protocol::MIN_FRAME_SIZE {
            return Err(Error::config(format!(
                "max frame length {} cannot hold a full frame",
                self.max_frame_len
            )));
        }
        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig::for_node(NodeId::Payload)
    }
}
