use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::core::{Error, Result};
use crate::util::scale_coord;
use super::frame::{Frame, ValidatedFrame};
use super::{MAX_FRAME_SIZE, SENTINEL};

/// Codec for the sentinel-delimited text frames exchanged over the radio.
///
/// Acceptance checks only that the first and last characters are the `$`
/// sentinel. That weak check is the wire contract of the existing network
/// and is kept for compatibility; interior corruption is caught
/// field-by-field when the merge layer parses the tokens it needs.
#[derive(Debug, Clone, Default)]
pub struct FrameCodec;

impl FrameCodec {
    /// Creates a new frame codec
    pub fn new() -> Self {
        FrameCodec
    }

    /// Serializes a frame into its wire text.
    ///
    /// Every field is printed with two decimal places, so values never
    /// contain a stray delimiter and scaled coordinates keep their four
    /// fractional degree digits.
    pub fn encode_frame(&self, frame: &Frame) -> String {
        let fields = [
            frame.payload_timestamp,
            frame.payload_altitude,
            scale_coord(frame.payload_latitude),
            scale_coord(frame.payload_longitude),
            frame.payload_event,
            frame.payload_speed,
            frame.mission_control_timestamp,
            frame.recovery_timestamp,
            scale_coord(frame.recovery_latitude),
            scale_coord(frame.recovery_longitude),
            if frame.reset_flag { 1.0 } else { 0.0 },
            frame.node_id.wire_id(),
        ];

        let mut out = String::with_capacity(MAX_FRAME_SIZE);
        out.push(SENTINEL);
        for value in fields {
            out.push(',');
            out.push_str(&format!("{:.2}", value));
        }
        out.push(',');
        out.push(SENTINEL);
        out
    }

    /// Validates and tokenizes a received buffer.
    ///
    /// Bytes are interpreted as text up to the received length; trailing
    /// NUL padding from C-string senders is stripped first. The frame is
    /// accepted iff its first and last characters are the sentinel.
    pub fn decode_frame(&self, raw: &[u8]) -> Result<ValidatedFrame> {
        let end = raw
            .iter()
            .rposition(|&byte| byte != 0)
            .map_or(0, |pos| pos + 1);
        let text = std::str::from_utf8(&raw[..end])
            .map_err(|err| Error::frame(format!("frame is not valid text: {}", err)))?;

        if !(text.starts_with(SENTINEL) && text.ends_with(SENTINEL)) {
            return Err(Error::frame("missing start or end sentinel"));
        }

        Ok(ValidatedFrame::new(
            text.split(',').map(str::to_owned).collect(),
        ))
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = Error;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<()> {
        let text = self.encode_frame(&item);
        if text.len() > MAX_FRAME_SIZE {
            return Err(Error::frame(format!(
                "encoded frame is {} bytes, channel limit is {}",
                text.len(),
                MAX_FRAME_SIZE
            )));
        }
        dst.extend_from_slice(text.as_bytes());
        Ok(())
    }
}

impl Decoder for FrameCodec {
    type Item = ValidatedFrame;
    type Error = Error;

    /// One radio datagram is one frame; each call consumes the whole buffer.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<ValidatedFrame>> {
        if src.is_empty() {
            return Ok(None);
        }
        let raw = src.split_to(src.len());
        self.decode_frame(&raw).map(Some)
    }
}
