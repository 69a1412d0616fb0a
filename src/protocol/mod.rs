//! Protocol implementation module
//!
//! This module defines the trinet wire frame, its encoding/decoding, the
//! per-node state store, and the merge rules applied to received frames.

pub mod codec;
pub mod frame;
pub mod merge;
pub mod state;

pub use self::codec::FrameCodec;
pub use self::frame::{Field, Frame, ValidatedFrame};
pub use self::merge::{merge_frame, ReceiveOutcome};
pub use self::state::{RemoteRecord, StateStore};

// Constants
/// Maximum frame size in bytes (RFM95 maximum message length)
pub const MAX_FRAME_SIZE: usize = 251;

/// Smallest buffer that can hold a sentinel-framed frame with all twelve
/// two-decimal fields
pub const MIN_FRAME_SIZE: usize = 63;

/// Frame start/end sentinel character
pub const SENTINEL: char = '$';

/// Number of interior data fields in a frame
pub const FIELD_COUNT: usize = 12;

/// Scale factor applied to coordinates on the wire; preserves
/// fractional-degree precision through integer-safe transmission
pub const COORD_SCALE: f64 = 10_000.0;
