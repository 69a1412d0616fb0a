//! Merge rules applied to received frames.
//!
//! Each receive pass walks `Idle -> FrameAvailable -> Validated -> Merged`,
//! short-circuiting back to `Idle` when the frame is rejected. Conflict
//! resolution is last-writer-wins: a strictly greater timestamp overwrites
//! the stored record, an equal or older one leaves it untouched, so
//! re-delivery of the same frame is idempotent and the stored timestamp
//! only ever ratchets upward between resets.

use crate::core::Result;
use super::frame::ValidatedFrame;
use super::state::StateStore;

/// Observable result of one receive pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// No frame was available from the channel
    Idle,
    /// A frame arrived but was discarded before any state change
    Rejected,
    /// A frame was validated and merged into the store
    Merged,
}

/// Applies one validated frame to the store.
///
/// Every field the merge consumes is parsed before the first store
/// mutation; a parse failure therefore discards the frame wholesale and
/// leaves the store exactly as it was.
pub fn merge_frame(store: &mut StateStore, frame: &ValidatedFrame) -> Result<()> {
    let mc_timestamp = frame.mission_control_timestamp()?;
    let recovery_timestamp = frame.recovery_timestamp()?;
    let recovery_latitude = frame.recovery_latitude()?;
    let recovery_longitude = frame.recovery_longitude()?;
    let reset = frame.reset_flag()?;
    let origin = frame.origin()?;

    if mc_timestamp > store.mission_control().last_timestamp {
        store.update_mission_control(mc_timestamp);
    }

    if recovery_timestamp > store.recovery().last_timestamp {
        store.update_recovery(recovery_timestamp, recovery_latitude, recovery_longitude);
    }

    // Reset runs after the timestamp merge, so a frame that both relays
    // data and announces a restart still lands its fields before the
    // ratchet clears.
    if reset {
        if let Some(node) = origin {
            store.reset(node);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::codec::FrameCodec;

    fn decode(wire: &str) -> ValidatedFrame {
        FrameCodec::new().decode_frame(wire.as_bytes()).unwrap()
    }

    /// Wire frame with the given relayed fields; payload fields are
    /// irrelevant to the merge and held constant.
    fn wire(mc_ts: f64, rec_ts: f64, rec_lat: f64, rec_lon: f64, reset: f64, id: f64) -> String {
        format!(
            "$,1.00,2.00,3.00,4.00,5.00,6.00,{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},$",
            mc_ts,
            rec_ts,
            rec_lat * 10_000.0,
            rec_lon * 10_000.0,
            reset,
            id
        )
    }

    #[test]
    fn test_newer_timestamps_overwrite() {
        let mut store = StateStore::new();
        merge_frame(&mut store, &decode(&wire(10.0, 20.0, -41.28, 174.77, 0.0, 2.0))).unwrap();

        assert_eq!(store.mission_control().last_timestamp, 10.0);
        assert_eq!(store.recovery().last_timestamp, 20.0);
        let (lat, lon) = store.recovery().position.unwrap();
        assert!((lat + 41.28).abs() < 1e-4);
        assert!((lon - 174.77).abs() < 1e-4);
    }

    #[test]
    fn test_idempotent_redelivery() {
        let mut store = StateStore::new();
        let frame = decode(&wire(10.0, 20.0, 1.5, 2.5, 0.0, 2.0));

        merge_frame(&mut store, &frame).unwrap();
        let after_first = store.clone();

        // Same frame again: equal timestamps never overwrite
        merge_frame(&mut store, &frame).unwrap();
        assert_eq!(store.mission_control(), after_first.mission_control());
        assert_eq!(store.recovery(), after_first.recovery());
    }

    #[test]
    fn test_monotonic_ratchet() {
        let (t1, t2, t3) = (5.0, 30.0, 12.0);
        let mut store = StateStore::new();

        // Arrivals out of timestamp order: t1, then t2, then t3 < t2
        merge_frame(&mut store, &decode(&wire(t1, t1, 0.1, 0.1, 0.0, 2.0))).unwrap();
        merge_frame(&mut store, &decode(&wire(t2, t2, 0.2, 0.2, 0.0, 2.0))).unwrap();
        merge_frame(&mut store, &decode(&wire(t3, t3, 0.3, 0.3, 0.0, 2.0))).unwrap();

        // The maximum seen wins, not the latest arrival
        assert_eq!(store.mission_control().last_timestamp, t2);
        assert_eq!(store.recovery().last_timestamp, t2);
        let (lat, _) = store.recovery().position.unwrap();
        assert!((lat - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_stale_frame_never_moves_position() {
        let mut store = StateStore::new();
        merge_frame(&mut store, &decode(&wire(0.0, 50.0, 10.0, 20.0, 0.0, 2.0))).unwrap();
        merge_frame(&mut store, &decode(&wire(0.0, 49.0, 99.0, 99.0, 0.0, 2.0))).unwrap();

        let (lat, lon) = store.recovery().position.unwrap();
        assert!((lat - 10.0).abs() < 1e-4);
        assert!((lon - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_zeroes_mission_control_only() {
        let mut store = StateStore::new();
        store.update_mission_control(40.0);
        store.update_recovery(50.0, 1.0, 2.0);

        merge_frame(&mut store, &decode(&wire(0.0, 0.0, 0.0, 0.0, 1.0, 1.0))).unwrap();

        assert_eq!(store.mission_control().last_timestamp, 0.0);
        assert_eq!(store.recovery().last_timestamp, 50.0);
        assert!(store.recovery().position.is_some());
    }

    #[test]
    fn test_reset_zeroes_recovery_only() {
        let mut store = StateStore::new();
        store.update_mission_control(40.0);
        store.update_recovery(50.0, 1.0, 2.0);

        // Id drifts inside the tolerance band after float round-tripping
        merge_frame(&mut store, &decode(&wire(0.0, 0.0, 0.0, 0.0, 1.0, 3.05))).unwrap();

        assert_eq!(store.mission_control().last_timestamp, 40.0);
        assert_eq!(store.recovery().last_timestamp, 0.0);
        assert!(store.recovery().position.is_none());
    }

    #[test]
    fn test_reset_from_unknown_band_is_noop() {
        let mut store = StateStore::new();
        store.update_mission_control(40.0);
        store.update_recovery(50.0, 1.0, 2.0);

        merge_frame(&mut store, &decode(&wire(0.0, 0.0, 0.0, 0.0, 1.0, 7.5))).unwrap();

        assert_eq!(store.mission_control().last_timestamp, 40.0);
        assert_eq!(store.recovery().last_timestamp, 50.0);
    }

    #[test]
    fn test_reset_reopens_the_ratchet() {
        let mut store = StateStore::new();
        merge_frame(&mut store, &decode(&wire(0.0, 500.0, 1.0, 2.0, 0.0, 2.0))).unwrap();

        // Recovery power-cycled and re-counts from boot; without the
        // reset its new low timestamps would be rejected as stale
        merge_frame(&mut store, &decode(&wire(0.0, 0.0, 0.0, 0.0, 1.0, 3.0))).unwrap();
        merge_frame(&mut store, &decode(&wire(0.0, 3.0, 9.0, 8.0, 0.0, 2.0))).unwrap();

        assert_eq!(store.recovery().last_timestamp, 3.0);
        let (lat, lon) = store.recovery().position.unwrap();
        assert!((lat - 9.0).abs() < 1e-4);
        assert!((lon - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_parse_failure_discards_whole_frame() {
        let mut store = StateStore::new();

        // Valid mission control field followed by a garbage recovery
        // latitude: nothing may be applied, not even the valid field
        let frame = decode("$,1.00,2.00,3.00,4.00,5.00,6.00,77.00,88.00,junk,100.00,0.00,2.00,$");
        assert!(merge_frame(&mut store, &frame).is_err());

        assert_eq!(store.mission_control().last_timestamp, 0.0);
        assert_eq!(store.recovery().last_timestamp, 0.0);
    }

    #[test]
    fn test_scrambled_interior_rejected_at_merge() {
        // Passes the sentinel check, fails the first field parse
        let mut store = StateStore::new();
        let frame = decode("$s0m3 c0rrupt3d,n0nsense$");

        assert!(merge_frame(&mut store, &frame).is_err());
        assert_eq!(store.mission_control().last_timestamp, 0.0);
    }
}
