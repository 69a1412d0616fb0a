use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::Bytes;

use crate::core::{Result, Signal};

/// A half-duplex radio transceiver as seen by the protocol core.
///
/// Hardware initialization (carrier frequency, transmit power, pin
/// wiring) is the platform layer's concern; implementations hand the
/// core an already-configured link. An implementation that loses the
/// hardware returns [`Error::ChannelUnavailable`](crate::Error), which
/// the manager treats as terminal.
#[async_trait]
pub trait RadioChannel: Send {
    /// Non-blocking receive poll. Returns a raw frame if one is waiting,
    /// bounded by `max_len` bytes.
    fn try_receive(&mut self, max_len: usize) -> Result<Option<Bytes>>;

    /// Transmits one frame, resolving once the hardware confirms the
    /// transmission completed.
    async fn send(&mut self, frame: &[u8]) -> Result<()>;
}

/// Status line driven by the radio layer, typically an LED.
///
/// Signals are fire-and-forget; the core never reads anything back.
pub trait StatusIndicator: Send {
    fn signal(&mut self, signal: Signal);
}

/// Indicator that drops every signal
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIndicator;

impl StatusIndicator for NullIndicator {
    fn signal(&mut self, _signal: Signal) {}
}

/// In-memory channel for tests and multi-node simulation.
///
/// Frames pushed with [`inject`](MemoryChannel::inject) appear on the
/// receive side in order; transmitted frames accumulate in
/// [`sent`](MemoryChannel::sent).
#[derive(Debug, Default)]
pub struct MemoryChannel {
    inbox: VecDeque<Bytes>,
    sent: Vec<Bytes>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        MemoryChannel::default()
    }

    /// Queues a raw frame for the next receive poll
    pub fn inject(&mut self, frame: impl Into<Bytes>) {
        self.inbox.push_back(frame.into());
    }

    /// Frames transmitted so far, in order
    pub fn sent(&self) -> &[Bytes] {
        &self.sent
    }
}

#[async_trait]
impl RadioChannel for MemoryChannel {
    fn try_receive(&mut self, max_len: usize) -> Result<Option<Bytes>> {
        Ok(self.inbox.pop_front().map(|frame| {
            if frame.len() > max_len {
                frame.slice(..max_len)
            } else {
                frame
            }
        }))
    }

    async fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.sent.push(Bytes::copy_from_slice(frame));
        Ok(())
    }
}
