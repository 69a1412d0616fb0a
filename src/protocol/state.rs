use crate::core::NodeId;

/// Last known broadcast state held for one remote node
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RemoteRecord {
    /// Highest timestamp ever observed from the node since its last
    /// reset-to-zero event
    pub last_timestamp: f64,
    /// Position paired with that timestamp, where the node reports one
    pub position: Option<(f64, f64)>,
}

/// Per-node store of the most recent known remote state.
///
/// Owned by the radio manager and mutated only by the merge layer, never
/// directly from the wire. The single-threaded polling model means no
/// locking; an update that spans timestamp and position is applied as one
/// assignment so a partially-applied record is never observable.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    mission_control: RemoteRecord,
    recovery: RemoteRecord,
}

impl StateStore {
    /// Creates an empty store; all timestamps start at zero so the first
    /// valid frame from each node is always accepted
    pub fn new() -> Self {
        StateStore::default()
    }

    /// Records a newer mission control broadcast time. Mission control
    /// state is a liveness signal only; no position is tracked for it.
    pub fn update_mission_control(&mut self, timestamp: f64) {
        self.mission_control.last_timestamp = timestamp;
    }

    /// Records a newer recovery broadcast. Timestamp and position move
    /// together; a position is only trustworthy paired with the
    /// timestamp it arrived with.
    pub fn update_recovery(&mut self, timestamp: f64, latitude: f64, longitude: f64) {
        self.recovery = RemoteRecord {
            last_timestamp: timestamp,
            position: Some((latitude, longitude)),
        };
    }

    /// Zeroes the stored record for a node that reported a power cycle,
    /// so its restarted seconds-since-boot counter is not taken for
    /// stale data. The position drops with the timestamp; the next valid
    /// frame from the node overwrites unconditionally.
    pub fn reset(&mut self, node: NodeId) {
        match node {
            NodeId::MissionControl => self.mission_control = RemoteRecord::default(),
            NodeId::Recovery => self.recovery = RemoteRecord::default(),
            // A node never holds a record for itself
            NodeId::Payload => {}
        }
    }

    pub fn mission_control(&self) -> &RemoteRecord {
        &self.mission_control
    }

    pub fn recovery(&self) -> &RemoteRecord {
        &self.recovery
    }
}
