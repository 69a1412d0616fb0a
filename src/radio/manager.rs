use bytes::BytesMut;
use tokio::time::{sleep, timeout};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, error, warn};

use crate::core::{Error, LinkStats, NodeConfig, Result, Signal};
use crate::protocol::{merge_frame, Frame, FrameCodec, ReceiveOutcome, StateStore};
use crate::telemetry::{Clock, TelemetrySource};
use crate::util;
use super::channel::{RadioChannel, StatusIndicator};

/// Lifecycle of the radio link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Servicing the link normally
    Running,
    /// Terminal: the channel reported an unrecoverable failure. The
    /// manager only raises the fault signal from here; recovery requires
    /// a restart.
    Halted,
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub receive: ReceiveOutcome,
    pub broadcast: bool,
}

/// Drives one node's radio link.
///
/// Each tick performs a non-blocking receive check followed by an
/// interval-gated broadcast, in that order: the receive side's store
/// mutations land before the tick's encode, so a broadcast always relays
/// the freshest merge. All state lives on the single polling task; there
/// are no other writers.
pub struct RadioManager<C, T, K, S> {
    config: NodeConfig,
    channel: C,
    telemetry: T,
    clock: K,
    indicator: S,
    codec: FrameCodec,
    store: StateStore,
    recv_buffer: BytesMut,
    state: LinkState,
    stats: LinkStats,
    /// Clock reading at the last confirmed broadcast
    last_broadcast_ms: u64,
    /// Set until the first confirmed broadcast announces the power cycle
    reset_pending: bool,
}

impl<C, T, K, S> RadioManager<C, T, K, S>
where
    C: RadioChannel,
    T: TelemetrySource,
    K: Clock,
    S: StatusIndicator,
{
    /// Creates a manager for an already-initialized channel
    pub fn new(
        config: NodeConfig,
        channel: C,
        telemetry: T,
        clock: K,
        indicator: S,
    ) -> Result<Self> {
        config.validate()?;
        let recv_buffer = BytesMut::with_capacity(config.max_frame_len);

        Ok(RadioManager {
            config,
            channel,
            telemetry,
            clock,
            indicator,
            codec: FrameCodec::new(),
            store: StateStore::new(),
            recv_buffer,
            state: LinkState::Running,
            stats: LinkStats::default(),
            last_broadcast_ms: 0,
            reset_pending: true,
        })
    }

    /// One cooperative pass over the link: receive check, then broadcast
    /// check. Transmit failures surface as [`Error::Transmit`] and leave
    /// the manager running; channel loss halts it.
    pub async fn tick(&mut self) -> Result<TickReport> {
        if self.state == LinkState::Halted {
            self.indicator.signal(Signal::Fault);
            return Ok(TickReport {
                receive: ReceiveOutcome::Idle,
                broadcast: false,
            });
        }

        let receive = self.poll_receive()?;
        let broadcast = self.maybe_broadcast().await?;
        Ok(TickReport { receive, broadcast })
    }

    /// Services the link until the future is dropped or the channel
    /// becomes unavailable. Transmit failures are logged and retried on
    /// the next tick.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.tick().await {
                Ok(_) => {}
                Err(Error::Transmit(reason)) => {
                    warn!(%reason, "broadcast failed, retrying next tick");
                }
                Err(err) => return Err(err),
            }
            sleep(self.config.poll_interval).await;
        }
    }

    /// Non-blocking receive pass: `Idle` when the channel has nothing,
    /// otherwise decode, merge, and report the outcome. A frame that
    /// fails the sentinel check or any field parse is discarded without
    /// touching the store.
    fn poll_receive(&mut self) -> Result<ReceiveOutcome> {
        let raw = match self.channel.try_receive(self.config.max_frame_len) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(ReceiveOutcome::Idle),
            Err(Error::ChannelUnavailable(reason)) => {
                self.halt();
                return Err(Error::ChannelUnavailable(reason));
            }
            Err(err) => {
                warn!(%err, "receive poll failed");
                self.stats.frames_rejected += 1;
                return Ok(ReceiveOutcome::Rejected);
            }
        };

        debug!(frame = %String::from_utf8_lossy(&raw), "radio in");
        self.indicator.signal(Signal::Received);

        self.recv_buffer.clear();
        self.recv_buffer.extend_from_slice(&raw);
        match self.codec.decode(&mut self.recv_buffer) {
            Ok(Some(frame)) => match merge_frame(&mut self.store, &frame) {
                Ok(()) => {
                    self.stats.frames_merged += 1;
                    Ok(ReceiveOutcome::Merged)
                }
                Err(err) => {
                    debug!(%err, "frame discarded");
                    self.stats.frames_rejected += 1;
                    Ok(ReceiveOutcome::Rejected)
                }
            },
            Ok(None) => Ok(ReceiveOutcome::Idle),
            Err(err) => {
                debug!(%err, "frame rejected");
                self.stats.frames_rejected += 1;
                Ok(ReceiveOutcome::Rejected)
            }
        }
    }

    /// Broadcasts once the configured interval has elapsed. The transmit
    /// wait is bounded by the configured send timeout; on failure the
    /// broadcast timer is left alone so the next tick retries instead of
    /// waiting out a full interval.
    async fn maybe_broadcast(&mut self) -> Result<bool> {
        let now = self.clock.now_millis();
        let interval_ms = self.config.broadcast_interval.as_millis() as u64;
        if now.saturating_sub(self.last_broadcast_ms) <= interval_ms {
            return Ok(false);
        }

        let frame = self.assemble_frame(now);
        let mut out = BytesMut::new();
        if let Err(err) = self.codec.encode(frame, &mut out) {
            self.stats.send_failures += 1;
            return Err(Error::transmit(format!("encode failed: {}", err)));
        }
        debug!(frame = %String::from_utf8_lossy(&out), "radio out");

        match timeout(self.config.send_timeout, self.channel.send(&out)).await {
            Ok(Ok(())) => {
                self.stats.broadcasts_sent += 1;
                self.indicator.signal(Signal::Sent);
                self.last_broadcast_ms = now;
                self.reset_pending = false;
                Ok(true)
            }
            Ok(Err(Error::ChannelUnavailable(reason))) => {
                self.halt();
                Err(Error::ChannelUnavailable(reason))
            }
            Ok(Err(err)) => {
                self.stats.send_failures += 1;
                Err(Error::transmit(err.to_string()))
            }
            Err(_elapsed) => {
                self.stats.send_failures += 1;
                Err(Error::transmit(format!(
                    "send timed out after {:?}",
                    self.config.send_timeout
                )))
            }
        }
    }

    /// Captures own telemetry and the relayed store into one frame. The
    /// frame timestamp is the same clock reading that gates the
    /// broadcast window.
    fn assemble_frame(&self, now_ms: u64) -> Frame {
        let recovery = self.store.recovery();
        let (recovery_latitude, recovery_longitude) = recovery.position.unwrap_or((0.0, 0.0));

        Frame {
            payload_timestamp: util::millis_to_secs(now_ms),
            payload_altitude: self.telemetry.altitude(),
            payload_latitude: self.telemetry.latitude(),
            payload_longitude: self.telemetry.longitude(),
            payload_event: self.telemetry.event_code(),
            payload_speed: self.telemetry.speed(),
            mission_control_timestamp: self.store.mission_control().last_timestamp,
            recovery_timestamp: recovery.last_timestamp,
            recovery_latitude,
            recovery_longitude,
            reset_flag: self.reset_pending,
            node_id: self.config.node_id,
        }
    }

    fn halt(&mut self) {
        error!("radio channel unavailable, link halted");
        self.state = LinkState::Halted;
        self.indicator.signal(Signal::Fault);
    }

    /// Link lifecycle state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Counters since startup
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Last known remote state
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}
